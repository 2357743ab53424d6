//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod tables;

pub use tables::{
    history_lines, prediction_lines, print_lines, theme_label, theme_lines, truncate_string,
};
