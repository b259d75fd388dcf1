//! MIDI bind rules
//!
//! A bind matches a MIDI message shape (kind, channel, two data bytes,
//! each with a wildcard) and names the action it triggers. Rules are not
//! mutually exclusive by construction; the map fires every matching rule,
//! not just the first (see `MidiMap::match_message`).

use ferric_input::ActionId;

use crate::message::{MessageKind, MidiMessage};

/// Channel wildcard ("Any" in the editor).
pub const CHANNEL_ANY: u8 = 16;
/// Data byte wildcard.
pub const DATA_ANY: u8 = 128;

/// One bind rule.
///
/// `kind` is `None` for a freshly added rule the user has not configured
/// yet; such a rule matches nothing. `action` 0 means "no action".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiBind {
    pub kind: Option<MessageKind>,
    pub channel: u8,
    pub data1: u8,
    pub data2: u8,
    pub action: ActionId,
}

impl Default for MidiBind {
    fn default() -> Self {
        Self {
            kind: None,
            channel: CHANNEL_ANY,
            data1: DATA_ANY,
            data2: DATA_ANY,
            action: 0,
        }
    }
}

impl MidiBind {
    /// Wildcard-or-equal on every component; the kind always has to match
    /// exactly.
    pub fn matches(&self, msg: &MidiMessage) -> bool {
        self.kind == Some(msg.kind)
            && (self.channel == CHANNEL_ANY || self.channel == msg.channel)
            && (self.data1 == DATA_ANY || self.data1 == msg.data1)
            && (self.data2 == DATA_ANY || self.data2 == msg.data2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cc(channel: u8, data1: u8, data2: u8) -> MidiMessage {
        MidiMessage::new(MessageKind::Control, channel, data1, data2)
    }

    #[test]
    fn test_wildcard_matching() {
        let msg = cc(3, 64, 100);

        let rule = MidiBind {
            kind: Some(MessageKind::Control),
            channel: CHANNEL_ANY,
            data1: 64,
            data2: DATA_ANY,
            action: 0,
        };
        assert!(rule.matches(&msg));

        let rule = MidiBind {
            channel: 5,
            ..rule
        };
        assert!(!rule.matches(&msg));

        let rule = MidiBind {
            kind: Some(MessageKind::Control),
            channel: 3,
            data1: 64,
            data2: 100,
            action: 0,
        };
        assert!(rule.matches(&msg));
    }

    #[test]
    fn test_kind_must_match_exactly() {
        let rule = MidiBind {
            kind: Some(MessageKind::NoteOn),
            channel: CHANNEL_ANY,
            data1: DATA_ANY,
            data2: DATA_ANY,
            action: 0,
        };
        assert!(!rule.matches(&cc(0, 64, 100)));
        assert!(rule.matches(&MidiMessage::new(MessageKind::NoteOn, 9, 60, 127)));
    }

    #[test]
    fn test_unconfigured_rule_matches_nothing() {
        let rule = MidiBind::default();
        assert!(!rule.matches(&cc(0, 0, 0)));
        assert!(!rule.matches(&MidiMessage::new(MessageKind::NoteOn, 0, 60, 1)));
    }
}
