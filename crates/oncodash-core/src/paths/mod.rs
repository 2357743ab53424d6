//! Path utilities for oncodash data files.
//!
//! - `data_root()` is the directory holding settings and preferences
//! - File locations hang off it and never create the files themselves
//! - No interactive I/O; the CLI handles prompts

mod ensure;
mod error;
mod files;
mod platform;

#[cfg(test)]
pub(crate) mod test_utils;

pub use ensure::ensure_directory;
pub use error::PathError;
pub use files::{PREFERENCES_FILE, SETTINGS_FILE, preferences_path, settings_path};
pub use platform::{DATA_DIR_ENV, data_root};
