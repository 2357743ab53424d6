//! Application services built on the ports.
//!
//! Services own session state and coordinate between ports. They never touch
//! HTTP or the filesystem directly.

mod dashboard;
mod dropdown;
mod theme_resolver;

pub use dashboard::{CLEAR_HISTORY_ERROR, Dashboard, DashboardError};
pub use dropdown::Dropdown;
pub use theme_resolver::{ObserverId, THEME_PREFERENCE_KEY, ThemeResolver};
