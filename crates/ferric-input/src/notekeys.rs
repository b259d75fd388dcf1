//! Note-entry key map
//!
//! Maps physical scancodes to note slots for the piano-style entry rows of
//! the keyboard. A slot is either a semitone offset (0..=96) or one of the
//! reserved codes for note-off, note-release and envelope-release.
//!
//! The whole map round-trips through a compact `"<scancode>:<slot>;"`
//! string stored in the main config store. Decoding is total: malformed
//! segments are dropped, never fatal.

use std::collections::BTreeMap;

/// Highest plain note slot.
pub const MAX_NOTE: i32 = 96;
/// Reserved slot: note off.
pub const NOTE_OFF: i32 = 100;
/// Reserved slot: note release.
pub const NOTE_RELEASE: i32 = 101;
/// Reserved slot: envelope release.
pub const ENV_RELEASE: i32 = 102;

/// Factory note layout (two and a half octaves across the letter rows,
/// note-off on `1` and Tab, note release on `=`, envelope release on
/// backtick).
pub const DEFAULT_NOTE_KEYS: &str = "5:7;6:4;7:3;8:16;10:6;11:8;12:24;13:10;16:11;17:9;18:26;19:28;20:12;21:17;22:1;23:19;24:23;25:5;26:14;27:2;28:21;29:0;30:100;31:13;32:15;34:18;35:20;36:22;38:25;39:27;43:100;46:101;47:29;48:31;53:102;";

/// Scancode → note slot mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteKeyMap {
    keys: BTreeMap<u32, i32>,
}

impl NoteKeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped default layout.
    pub fn factory_default() -> Self {
        Self::decode(DEFAULT_NOTE_KEYS)
    }

    /// Parse an encoded map. Segments that are not `<number>:<number>`
    /// are skipped; an unparsable string therefore yields an empty (or
    /// partial) map rather than an error.
    pub fn decode(encoded: &str) -> Self {
        let mut keys = BTreeMap::new();
        for segment in encoded.split(';') {
            if segment.is_empty() {
                continue;
            }
            let Some((scan, slot)) = segment.split_once(':') else {
                log::warn!("ignoring malformed note key segment: {}", segment);
                continue;
            };
            match (scan.trim().parse::<u32>(), slot.trim().parse::<i32>()) {
                (Ok(scan), Ok(slot)) => {
                    keys.insert(scan, slot);
                }
                _ => {
                    log::warn!("ignoring malformed note key segment: {}", segment);
                }
            }
        }
        Self { keys }
    }

    /// Encode to the `"<scancode>:<slot>;"` form. No ordering is promised
    /// beyond what the map iterates; decode accepts any order.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (scan, slot) in &self.keys {
            out.push_str(&format!("{}:{};", scan, slot));
        }
        out
    }

    pub fn get(&self, scancode: u32) -> Option<i32> {
        self.keys.get(&scancode).copied()
    }

    /// Map a key, clamping plain note slots to the valid range. The
    /// reserved slots pass through untouched.
    pub fn set(&mut self, scancode: u32, slot: i32) {
        let slot = match slot {
            NOTE_OFF | NOTE_RELEASE | ENV_RELEASE => slot,
            _ => slot.clamp(0, MAX_NOTE),
        };
        self.keys.insert(scancode, slot);
    }

    pub fn remove(&mut self, scancode: u32) {
        self.keys.remove(&scancode);
    }

    /// Advance a key through the slot kinds the way the editor's type
    /// button does: note → off → release → envelope release → note 0.
    pub fn cycle_kind(&mut self, scancode: u32) {
        let Some(slot) = self.get(scancode) else {
            return;
        };
        let next = match slot {
            NOTE_OFF => NOTE_RELEASE,
            NOTE_RELEASE => ENV_RELEASE,
            ENV_RELEASE => 0,
            _ => NOTE_OFF,
        };
        self.keys.insert(scancode, next);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.keys.iter().map(|(k, v)| (*k, *v))
    }

    /// Entries ordered by slot, the order the note-input editor lists
    /// them in (low notes first, reserved slots last).
    pub fn sorted_by_slot(&self) -> Vec<(u32, i32)> {
        let mut entries: Vec<(u32, i32)> = self.iter().collect();
        entries.sort_by_key(|&(scan, slot)| (slot, scan));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut map = NoteKeyMap::new();
        map.set(5, 7);
        map.set(29, 0);
        map.set(30, NOTE_OFF);
        map.set(53, ENV_RELEASE);

        let decoded = NoteKeyMap::decode(&map.encode());
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_decode_skips_garbage() {
        let map = NoteKeyMap::decode("5:7;garbage;6:4;");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(5), Some(7));
        assert_eq!(map.get(6), Some(4));
    }

    #[test]
    fn test_decode_is_total() {
        assert!(NoteKeyMap::decode("").is_empty());
        assert!(NoteKeyMap::decode(";;;").is_empty());
        assert!(NoteKeyMap::decode("::;:;x").is_empty());
        // missing trailing separator is fine
        let map = NoteKeyMap::decode("5:7");
        assert_eq!(map.get(5), Some(7));
    }

    #[test]
    fn test_default_layout_decodes() {
        let map = NoteKeyMap::factory_default();
        assert_eq!(map.len(), 35);
        assert_eq!(map.get(29), Some(0)); // Z = lowest note
        assert_eq!(map.get(30), Some(NOTE_OFF));
        assert_eq!(map.get(46), Some(NOTE_RELEASE));
        assert_eq!(map.get(53), Some(ENV_RELEASE));
    }

    #[test]
    fn test_set_clamps_note_slots() {
        let mut map = NoteKeyMap::new();
        map.set(4, 150); // not a reserved slot, clamps like any note
        assert_eq!(map.get(4), Some(MAX_NOTE));
        map.set(4, 97);
        assert_eq!(map.get(4), Some(MAX_NOTE));
        map.set(4, -3);
        assert_eq!(map.get(4), Some(0));
    }

    #[test]
    fn test_cycle_kind() {
        let mut map = NoteKeyMap::new();
        map.set(4, 12);
        map.cycle_kind(4);
        assert_eq!(map.get(4), Some(NOTE_OFF));
        map.cycle_kind(4);
        assert_eq!(map.get(4), Some(NOTE_RELEASE));
        map.cycle_kind(4);
        assert_eq!(map.get(4), Some(ENV_RELEASE));
        map.cycle_kind(4);
        assert_eq!(map.get(4), Some(0));
    }

    #[test]
    fn test_sorted_by_slot() {
        let map = NoteKeyMap::decode("10:5;11:2;12:100;13:0;");
        let sorted = map.sorted_by_slot();
        let slots: Vec<i32> = sorted.iter().map(|&(_, v)| v).collect();
        assert_eq!(slots, vec![0, 2, 5, 100]);
    }
}
