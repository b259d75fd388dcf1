//! Per-device MIDI map
//!
//! Holds everything that belongs to one input device: option flags, the
//! bind list, value-input configuration and the velocity curve. The map is
//! loaded when the selected device changes, edited live in the settings
//! screen, compiled after every edit, and written back on commit.

use ferric_input::ActionId;

use crate::bind::MidiBind;
use crate::message::{MessageKind, MidiMessage};
use crate::value_input::{
    CcAssign, ColumnValueInput, ValueDecoder, ValueInputStyle, COLUMN_TARGET_COUNT,
};

pub const VOL_EXP_MIN: f32 = 0.01;
pub const VOL_EXP_MAX: f32 = 8.0;

/// Per-device MIDI input configuration.
#[derive(Debug, Clone)]
pub struct MidiMap {
    pub note_input: bool,
    pub vol_input: bool,
    /// Use the raw velocity value instead of the curve.
    pub raw_volume: bool,
    pub poly_input: bool,
    /// Map MIDI channels to direct channels.
    pub direct_channel: bool,
    /// Program change selects the current instrument.
    pub program_change: bool,
    pub midi_clock: bool,
    pub midi_time_code: bool,

    pub value_input_style: ValueInputStyle,
    pub value_assign: CcAssign,
    pub column_inputs: [ColumnValueInput; COLUMN_TARGET_COUNT],

    pub binds: Vec<MidiBind>,

    vol_exp: f32,
    // derived by compile()
    volume_curve: [u8; 128],
    kind_index: [Vec<usize>; 8],
    // learn state: index of the bind awaiting the next message
    learning: Option<usize>,
    value_decoder: ValueDecoder,
}

impl Default for MidiMap {
    fn default() -> Self {
        let mut map = Self {
            note_input: true,
            vol_input: true,
            raw_volume: false,
            poly_input: false,
            direct_channel: false,
            program_change: false,
            midi_clock: false,
            midi_time_code: false,
            value_input_style: ValueInputStyle::Disabled,
            value_assign: CcAssign::default(),
            column_inputs: [ColumnValueInput::default(); COLUMN_TARGET_COUNT],
            binds: Vec::new(),
            vol_exp: 2.0,
            volume_curve: [0; 128],
            kind_index: Default::default(),
            learning: None,
            value_decoder: ValueDecoder::default(),
        };
        map.compile();
        map
    }
}

fn build_volume_curve(exp: f32) -> [u8; 128] {
    let mut curve = [0u8; 128];
    for (i, out) in curve.iter_mut().enumerate() {
        *out = ((i as f64 / 127.0).powf(exp as f64) * 127.0).round() as u8;
    }
    curve
}

impl MidiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the derived structures: the per-kind bind buckets used by
    /// `match_message` and the velocity curve. Must be called after any
    /// direct edit of `binds` or the options; the mutating methods on the
    /// map itself already do.
    pub fn compile(&mut self) {
        for bucket in &mut self.kind_index {
            bucket.clear();
        }
        for (i, bind) in self.binds.iter().enumerate() {
            if let Some(kind) = bind.kind {
                self.kind_index[kind.index()].push(i);
            }
        }
        self.volume_curve = build_volume_curve(self.vol_exp);
    }

    pub fn vol_exp(&self) -> f32 {
        self.vol_exp
    }

    /// Set the velocity curve exponent, clamped to its slider range.
    pub fn set_vol_exp(&mut self, exp: f32) {
        self.vol_exp = exp.clamp(VOL_EXP_MIN, VOL_EXP_MAX);
        self.volume_curve = build_volume_curve(self.vol_exp);
    }

    /// The compiled 128-entry velocity lookup.
    pub fn volume_curve(&self) -> &[u8; 128] {
        &self.volume_curve
    }

    /// Map an incoming velocity through the curve (or straight through
    /// when raw velocity is selected).
    pub fn map_velocity(&self, velocity: u8) -> u8 {
        if self.raw_volume {
            velocity
        } else {
            self.volume_curve[(velocity & 0x7F) as usize]
        }
    }

    /// Append an empty rule. Returns its index.
    pub fn add_bind(&mut self) -> usize {
        self.binds.push(MidiBind::default());
        self.compile();
        self.binds.len() - 1
    }

    /// Append an empty rule and arm learn mode for it.
    pub fn add_bind_learn(&mut self) -> usize {
        let idx = self.add_bind();
        self.learning = Some(idx);
        idx
    }

    /// Remove a rule. Later indices shift down; a pending learn target is
    /// adjusted or cleared accordingly.
    pub fn remove_bind(&mut self, index: usize) {
        if index >= self.binds.len() {
            return;
        }
        self.binds.remove(index);
        self.learning = match self.learning {
            Some(l) if l == index => None,
            Some(l) if l > index => Some(l - 1),
            other => other,
        };
        self.compile();
    }

    /// Toggle learn mode for a rule: arming the armed index disarms it.
    pub fn toggle_learn(&mut self, index: usize) {
        if index >= self.binds.len() {
            return;
        }
        self.learning = if self.learning == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn learn_target(&self) -> Option<usize> {
        self.learning
    }

    /// Feed a message to a pending learn. Returns true when the message
    /// was consumed (rule populated, learn disarmed).
    pub fn feed_learn(&mut self, msg: &MidiMessage) -> bool {
        let Some(index) = self.learning else {
            return false;
        };
        let Some(bind) = self.binds.get_mut(index) else {
            self.learning = None;
            return false;
        };
        bind.kind = Some(msg.kind);
        bind.channel = msg.channel;
        if msg.kind.data1_is_address() {
            bind.data1 = msg.data1;
        }
        self.learning = None;
        self.compile();
        log::debug!(
            "MIDI learn: bind {} captured {} ch{} d1={}",
            index,
            msg.kind.name(),
            msg.channel,
            msg.data1
        );
        true
    }

    /// Indices of every rule matching the message, in list order.
    ///
    /// Rules are not mutually exclusive; the caller fires the action of
    /// each returned rule independently.
    pub fn match_message(&self, msg: &MidiMessage) -> Vec<usize> {
        self.kind_index[msg.kind.index()]
            .iter()
            .copied()
            .filter(|&i| self.binds[i].matches(msg))
            .collect()
    }

    /// Actions triggered by the message (rules with no action skipped).
    pub fn matched_actions(&self, msg: &MidiMessage) -> Vec<ActionId> {
        self.match_message(msg)
            .into_iter()
            .map(|i| self.binds[i].action)
            .filter(|&a| a != 0)
            .collect()
    }

    /// Feed a control change through the global value-input style.
    pub fn value_from_cc(&mut self, cc: u8, value: u8) -> Option<u16> {
        let mode = self.value_input_style.cc_mode()?;
        self.value_decoder.feed_cc(mode, &self.value_assign, cc, value)
    }

    /// Feed a control change through one pattern-column target.
    pub fn column_value_from_cc(&mut self, column: usize, cc: u8, value: u8) -> Option<u16> {
        self.column_inputs.get_mut(column)?.feed_cc(cc, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::{CHANNEL_ANY, DATA_ANY};

    fn cc(channel: u8, data1: u8, data2: u8) -> MidiMessage {
        MidiMessage::new(MessageKind::Control, channel, data1, data2)
    }

    fn rule(kind: MessageKind, channel: u8, data1: u8, data2: u8, action: ActionId) -> MidiBind {
        MidiBind {
            kind: Some(kind),
            channel,
            data1,
            data2,
            action,
        }
    }

    #[test]
    fn test_all_matches_fire() {
        let mut map = MidiMap::new();
        map.binds = vec![
            rule(MessageKind::Control, CHANNEL_ANY, 64, DATA_ANY, 3),
            rule(MessageKind::Control, 5, 64, DATA_ANY, 4),
            rule(MessageKind::Control, 3, DATA_ANY, DATA_ANY, 5),
            rule(MessageKind::NoteOn, CHANNEL_ANY, DATA_ANY, DATA_ANY, 6),
        ];
        map.compile();

        let msg = cc(3, 64, 100);
        assert_eq!(map.match_message(&msg), vec![0, 2]);
        assert_eq!(map.matched_actions(&msg), vec![3, 5]);
    }

    #[test]
    fn test_match_requires_compile_but_methods_keep_it_current() {
        let mut map = MidiMap::new();
        let idx = map.add_bind();
        map.binds[idx] = rule(MessageKind::NoteOn, CHANNEL_ANY, DATA_ANY, DATA_ANY, 2);
        map.compile();
        let msg = MidiMessage::new(MessageKind::NoteOn, 0, 60, 100);
        assert_eq!(map.match_message(&msg), vec![idx]);

        map.remove_bind(idx);
        assert!(map.match_message(&msg).is_empty());
    }

    #[test]
    fn test_rules_with_no_action_do_not_fire() {
        let mut map = MidiMap::new();
        map.binds = vec![rule(MessageKind::Control, CHANNEL_ANY, DATA_ANY, DATA_ANY, 0)];
        map.compile();
        let msg = cc(0, 1, 2);
        assert_eq!(map.match_message(&msg).len(), 1);
        assert!(map.matched_actions(&msg).is_empty());
    }

    #[test]
    fn test_volume_curve_identity() {
        let mut map = MidiMap::new();
        map.set_vol_exp(1.0);
        for i in 0..=127u8 {
            assert_eq!(map.map_velocity(i), i);
        }
    }

    #[test]
    fn test_volume_curve_steep() {
        let mut map = MidiMap::new();
        map.set_vol_exp(8.0);
        let curve = map.volume_curve();
        assert_eq!(curve[0], 0);
        assert_eq!(curve[127], 127);
        for i in 1..128 {
            assert!(curve[i] >= curve[i - 1]);
        }
    }

    #[test]
    fn test_vol_exp_clamps() {
        let mut map = MidiMap::new();
        map.set_vol_exp(0.0);
        assert_eq!(map.vol_exp(), VOL_EXP_MIN);
        map.set_vol_exp(100.0);
        assert_eq!(map.vol_exp(), VOL_EXP_MAX);
    }

    #[test]
    fn test_raw_volume_bypasses_curve() {
        let mut map = MidiMap::new();
        map.set_vol_exp(8.0);
        map.raw_volume = true;
        assert_eq!(map.map_velocity(64), 64);
    }

    #[test]
    fn test_learn_populates_and_disarms() {
        let mut map = MidiMap::new();
        let idx = map.add_bind_learn();
        assert_eq!(map.learn_target(), Some(idx));

        let msg = cc(2, 48, 99);
        assert!(map.feed_learn(&msg));
        assert_eq!(map.learn_target(), None);

        let bind = &map.binds[idx];
        assert_eq!(bind.kind, Some(MessageKind::Control));
        assert_eq!(bind.channel, 2);
        assert_eq!(bind.data1, 48);
        // data2 stays wildcard so any value matches afterwards
        assert_eq!(bind.data2, DATA_ANY);
        assert!(!map.feed_learn(&msg));
    }

    #[test]
    fn test_learn_skips_data1_for_value_kinds() {
        let mut map = MidiMap::new();
        let idx = map.add_bind_learn();
        let msg = MidiMessage::new(MessageKind::PitchBend, 1, 0x12, 0x40);
        assert!(map.feed_learn(&msg));
        assert_eq!(map.binds[idx].kind, Some(MessageKind::PitchBend));
        assert_eq!(map.binds[idx].data1, DATA_ANY);
    }

    #[test]
    fn test_toggle_learn() {
        let mut map = MidiMap::new();
        let idx = map.add_bind();
        map.toggle_learn(idx);
        assert_eq!(map.learn_target(), Some(idx));
        map.toggle_learn(idx);
        assert_eq!(map.learn_target(), None);
    }

    #[test]
    fn test_remove_bind_adjusts_learn_target() {
        let mut map = MidiMap::new();
        map.add_bind();
        map.add_bind();
        let third = map.add_bind();
        map.toggle_learn(third);

        map.remove_bind(0);
        assert_eq!(map.learn_target(), Some(third - 1));

        map.remove_bind(third - 1);
        assert_eq!(map.learn_target(), None);
    }

    #[test]
    fn test_global_value_input() {
        let mut map = MidiMap::new();
        assert_eq!(map.value_from_cc(7, 100), None); // disabled

        map.value_input_style = ValueInputStyle::SingleCc;
        map.value_assign.set_single(7);
        assert_eq!(map.value_from_cc(7, 100), Some(100));
    }
}
