//! MIDI input mapping for the ferric tracker
//!
//! This crate provides:
//! - MIDI device enumeration and input handling via midir
//! - Raw message parsing for all channel voice message kinds
//! - The per-device map: bind rules with wildcards, learn mode,
//!   value-input styles and the velocity curve
//! - The per-device map file (`midiIn_<device>.cfg`)
//!
//! # Architecture
//!
//! ```text
//! MIDI device → midir callback → flume channel → event loop → MidiMap
//! ```
//!
//! The midir callback only parses and forwards; every mutation of the map
//! (learn capture, bind edits) happens on the foreground event loop when
//! it drains the channel.

mod bind;
mod connection;
mod file;
mod input;
mod map;
mod message;
mod value_input;

pub use bind::{MidiBind, CHANNEL_ANY, DATA_ANY};
pub use connection::{list_input_ports, list_output_ports, MidiConnectionError};
pub use file::{load_midi_map, map_file_name, sanitize_device_name, save_midi_map};
pub use input::{open_input, MidiInputHandler};
pub use map::{MidiMap, VOL_EXP_MAX, VOL_EXP_MIN};
pub use message::{MessageKind, MidiMessage, SELECTABLE_KINDS};
pub use value_input::{
    note_value, CcAssign, CcMode, ColumnStyle, ColumnValueInput, ValueDecoder, ValueInputStyle,
    COLUMN_TARGETS, COLUMN_TARGET_COUNT,
};
