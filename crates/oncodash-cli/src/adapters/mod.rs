//! Concrete implementations of core ports backed by the operating system.

pub mod color_scheme;
pub mod directory_sink;
pub mod preference_file;
pub mod settings_file;

pub use color_scheme::DarkLightColorScheme;
pub use directory_sink::DirectorySink;
pub use preference_file::FilePreferenceStore;
pub use settings_file::SettingsFile;
