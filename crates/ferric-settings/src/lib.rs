//! Settings session and persistence for the ferric tracker
//!
//! Ties the input-binding engine (`ferric-input`) and the per-device MIDI
//! map (`ferric-midi`) to their persisted state:
//! - the flat `key=value` config store
//! - the color table and its import/export files
//! - keybind import/export files
//! - the settings-screen lifecycle (sync on open, commit on close,
//!   revert on cancel, per-device map reload on device change)

pub mod colors;
pub mod conf;
pub mod io;
pub mod session;

pub use colors::{ColorDef, ColorTable, COLORS};
pub use conf::ConfigStore;
pub use io::{export_colors, export_keybinds, import_colors, import_keybinds};
pub use session::{default_config_dir, Settings, SettingsSession};
