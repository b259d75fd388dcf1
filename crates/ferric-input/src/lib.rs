//! Keyboard input binding for the ferric tracker
//!
//! This crate provides:
//! - The semantic action catalog (stable machine names, per-context id
//!   ranges, default bindings)
//! - The mutable key binding table with modal "press a key" capture
//! - Compilation of the table into per-context dispatch maps
//! - The note-entry key map and its compact text codec
//!
//! It deliberately knows nothing about persistence or MIDI; those live in
//! `ferric-settings` and `ferric-midi`.

pub mod action;
pub mod binds;
pub mod dispatch;
pub mod key;
pub mod notekeys;

pub use action::{ActionDef, ActionId, ActionRegistry, Context, CONTEXTS};
pub use binds::{BindingTable, CaptureState, KeyCapture};
pub use dispatch::{compile, DispatchMaps};
pub use key::{has_key, key_name, RawKey, KEY_MASK, MOD_ALT, MOD_CTRL, MOD_META, MOD_SHIFT};
pub use notekeys::{NoteKeyMap, DEFAULT_NOTE_KEYS, ENV_RELEASE, MAX_NOTE, NOTE_OFF, NOTE_RELEASE};
