//! Continuous value input
//!
//! Describes how incoming controller data becomes a pattern value. The
//! note channel has the full set of styles (including the note-derived
//! ones); the 18 specific pattern-column targets only take the CC-based
//! styles. CC index fields are clamped to 0..=127 on every edit.

/// Value input style for the note channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueInputStyle {
    #[default]
    Disabled,
    TwoOctaves,
    Raw,
    TwoOctavesAlt,
    DualCc,
    FourteenBitCc,
    SingleCc,
}

impl ValueInputStyle {
    pub fn id(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::TwoOctaves => 1,
            Self::Raw => 2,
            Self::TwoOctavesAlt => 3,
            Self::DualCc => 4,
            Self::FourteenBitCc => 5,
            Self::SingleCc => 6,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::Disabled,
            1 => Self::TwoOctaves,
            2 => Self::Raw,
            3 => Self::TwoOctavesAlt,
            4 => Self::DualCc,
            5 => Self::FourteenBitCc,
            6 => Self::SingleCc,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled/custom",
            Self::TwoOctaves => "Two octaves (0 is C-4, F is D#5)",
            Self::Raw => "Raw (note number is value)",
            Self::TwoOctavesAlt => {
                "Two octaves alternate (lower keys are 0-9, upper keys are A-F)"
            }
            Self::DualCc => "Use dual control change (one for each nibble)",
            Self::FourteenBitCc => "Use 14-bit control change",
            Self::SingleCc => "Use single control change (imprecise)",
        }
    }

    /// CC decoding mode, for the styles driven by control changes.
    pub fn cc_mode(self) -> Option<CcMode> {
        match self {
            Self::DualCc => Some(CcMode::Dual),
            Self::FourteenBitCc => Some(CcMode::FourteenBit),
            Self::SingleCc => Some(CcMode::Single),
            _ => None,
        }
    }

    /// Whether the style derives values from note numbers instead of CCs.
    pub fn uses_notes(self) -> bool {
        matches!(self, Self::TwoOctaves | Self::Raw | Self::TwoOctavesAlt)
    }
}

/// Value input style for a specific pattern column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnStyle {
    #[default]
    Disabled,
    DualCc,
    FourteenBitCc,
    SingleCc,
}

impl ColumnStyle {
    pub fn id(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::DualCc => 1,
            Self::FourteenBitCc => 2,
            Self::SingleCc => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::Disabled,
            1 => Self::DualCc,
            2 => Self::FourteenBitCc,
            3 => Self::SingleCc,
            _ => return None,
        })
    }

    pub fn cc_mode(self) -> Option<CcMode> {
        match self {
            Self::Disabled => None,
            Self::DualCc => Some(CcMode::Dual),
            Self::FourteenBitCc => Some(CcMode::FourteenBit),
            Self::SingleCc => Some(CcMode::Single),
        }
    }
}

/// Number of specific pattern-column targets.
pub const COLUMN_TARGET_COUNT: usize = 18;

/// Display names of the specific targets, in configuration order.
pub const COLUMN_TARGETS: [&str; COLUMN_TARGET_COUNT] = [
    "Instrument",
    "Volume",
    "Effect 1 type",
    "Effect 1 value",
    "Effect 2 type",
    "Effect 2 value",
    "Effect 3 type",
    "Effect 3 value",
    "Effect 4 type",
    "Effect 4 value",
    "Effect 5 type",
    "Effect 5 value",
    "Effect 6 type",
    "Effect 6 value",
    "Effect 7 type",
    "Effect 7 value",
    "Effect 8 type",
    "Effect 8 value",
];

/// How a CC-based style combines messages into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcMode {
    /// Two CCs, combined as `msb * 128 + lsb`; emits when the LSB CC
    /// arrives, using the most recent MSB.
    Dual,
    /// One CC (the MSB field names it) carrying a 14-bit value as two
    /// consecutive messages, MSB first.
    FourteenBit,
    /// One CC, 7-bit value taken directly.
    Single,
}

/// CC number assignment for a value-input target. Fields are private so
/// every write goes through the clamping setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CcAssign {
    msb: u8,
    lsb: u8,
    single: u8,
}

impl CcAssign {
    pub fn msb(&self) -> u8 {
        self.msb
    }

    pub fn lsb(&self) -> u8 {
        self.lsb
    }

    pub fn single(&self) -> u8 {
        self.single
    }

    pub fn set_msb(&mut self, value: i32) {
        self.msb = value.clamp(0, 127) as u8;
    }

    pub fn set_lsb(&mut self, value: i32) {
        self.lsb = value.clamp(0, 127) as u8;
    }

    pub fn set_single(&mut self, value: i32) {
        self.single = value.clamp(0, 127) as u8;
    }
}

/// Stateful CC decoder for one target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueDecoder {
    pending_msb: Option<u8>,
}

impl ValueDecoder {
    pub fn reset(&mut self) {
        self.pending_msb = None;
    }

    /// Feed one control change. Returns the assembled value when the
    /// style's message sequence completes.
    pub fn feed_cc(&mut self, mode: CcMode, assign: &CcAssign, cc: u8, value: u8) -> Option<u16> {
        match mode {
            CcMode::Dual => {
                if cc == assign.msb {
                    self.pending_msb = Some(value);
                    None
                } else if cc == assign.lsb {
                    let msb = self.pending_msb.unwrap_or(0);
                    Some(msb as u16 * 128 + value as u16)
                } else {
                    None
                }
            }
            CcMode::FourteenBit => {
                if cc != assign.msb {
                    return None;
                }
                match self.pending_msb.take() {
                    Some(msb) => Some(((msb as u16) << 7) | value as u16),
                    None => {
                        self.pending_msb = Some(value);
                        None
                    }
                }
            }
            CcMode::Single => {
                if cc == assign.single {
                    Some(value as u16)
                } else {
                    None
                }
            }
        }
    }
}

/// Value input configuration and decode state for one pattern column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnValueInput {
    pub style: ColumnStyle,
    pub assign: CcAssign,
    decoder: ValueDecoder,
}

impl ColumnValueInput {
    /// Feed one control change through this column's style.
    pub fn feed_cc(&mut self, cc: u8, value: u8) -> Option<u16> {
        let mode = self.style.cc_mode()?;
        self.decoder.feed_cc(mode, &self.assign, cc, value)
    }
}

/// Derive a value from a note number for the note-driven styles.
///
/// Out-of-range notes yield nothing; the `Disabled` and CC styles never
/// produce note-derived values.
pub fn note_value(style: ValueInputStyle, note: u8) -> Option<u8> {
    match style {
        ValueInputStyle::TwoOctaves => {
            if (48..=63).contains(&note) {
                Some(note - 48)
            } else {
                None
            }
        }
        ValueInputStyle::Raw => Some(note),
        ValueInputStyle::TwoOctavesAlt => {
            if (48..=57).contains(&note) {
                Some(note - 48)
            } else if (60..=65).contains(&note) {
                Some(note - 60 + 10)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cc_assign_clamps() {
        let mut assign = CcAssign::default();
        assign.set_msb(-5);
        assert_eq!(assign.msb(), 0);
        assign.set_msb(200);
        assert_eq!(assign.msb(), 127);
        assign.set_lsb(128);
        assert_eq!(assign.lsb(), 127);
        assign.set_single(64);
        assert_eq!(assign.single(), 64);
    }

    #[test]
    fn test_dual_cc_decode() {
        let mut assign = CcAssign::default();
        assign.set_msb(20);
        assign.set_lsb(21);
        let mut dec = ValueDecoder::default();

        // MSB alone produces nothing
        assert_eq!(dec.feed_cc(CcMode::Dual, &assign, 20, 3), None);
        // LSB completes
        assert_eq!(dec.feed_cc(CcMode::Dual, &assign, 21, 15), Some(3 * 128 + 15));
        // MSB is retained for repeated LSB messages
        assert_eq!(dec.feed_cc(CcMode::Dual, &assign, 21, 16), Some(3 * 128 + 16));
        // unrelated CC is ignored
        assert_eq!(dec.feed_cc(CcMode::Dual, &assign, 55, 99), None);
    }

    #[test]
    fn test_dual_cc_lsb_without_msb() {
        let mut assign = CcAssign::default();
        assign.set_msb(20);
        assign.set_lsb(21);
        let mut dec = ValueDecoder::default();
        assert_eq!(dec.feed_cc(CcMode::Dual, &assign, 21, 7), Some(7));
    }

    #[test]
    fn test_fourteen_bit_decode() {
        let mut assign = CcAssign::default();
        assign.set_msb(30);
        let mut dec = ValueDecoder::default();

        assert_eq!(dec.feed_cc(CcMode::FourteenBit, &assign, 30, 0x12), None);
        assert_eq!(
            dec.feed_cc(CcMode::FourteenBit, &assign, 30, 0x34),
            Some((0x12 << 7) | 0x34)
        );
        // state resets after a full value
        assert_eq!(dec.feed_cc(CcMode::FourteenBit, &assign, 30, 0x01), None);
    }

    #[test]
    fn test_single_cc_decode() {
        let mut assign = CcAssign::default();
        assign.set_single(7);
        let mut dec = ValueDecoder::default();
        assert_eq!(dec.feed_cc(CcMode::Single, &assign, 7, 100), Some(100));
        assert_eq!(dec.feed_cc(CcMode::Single, &assign, 8, 100), None);
    }

    #[test]
    fn test_column_disabled_maps_nothing() {
        let mut column = ColumnValueInput::default();
        assert_eq!(column.feed_cc(7, 100), None);

        column.style = ColumnStyle::SingleCc;
        column.assign.set_single(7);
        assert_eq!(column.feed_cc(7, 100), Some(100));
    }

    #[test]
    fn test_note_value_two_octaves() {
        assert_eq!(note_value(ValueInputStyle::TwoOctaves, 48), Some(0));
        assert_eq!(note_value(ValueInputStyle::TwoOctaves, 63), Some(15));
        assert_eq!(note_value(ValueInputStyle::TwoOctaves, 47), None);
        assert_eq!(note_value(ValueInputStyle::TwoOctaves, 64), None);
    }

    #[test]
    fn test_note_value_alternate() {
        assert_eq!(note_value(ValueInputStyle::TwoOctavesAlt, 48), Some(0));
        assert_eq!(note_value(ValueInputStyle::TwoOctavesAlt, 57), Some(9));
        assert_eq!(note_value(ValueInputStyle::TwoOctavesAlt, 60), Some(10));
        assert_eq!(note_value(ValueInputStyle::TwoOctavesAlt, 65), Some(15));
        assert_eq!(note_value(ValueInputStyle::TwoOctavesAlt, 58), None);
    }

    #[test]
    fn test_note_value_raw_and_disabled() {
        assert_eq!(note_value(ValueInputStyle::Raw, 0x42), Some(0x42));
        assert_eq!(note_value(ValueInputStyle::Disabled, 60), None);
        assert_eq!(note_value(ValueInputStyle::SingleCc, 60), None);
    }

    #[test]
    fn test_style_ids_round_trip() {
        for id in 0..=6 {
            assert_eq!(ValueInputStyle::from_id(id).unwrap().id(), id);
        }
        assert!(ValueInputStyle::from_id(7).is_none());
        for id in 0..=3 {
            assert_eq!(ColumnStyle::from_id(id).unwrap().id(), id);
        }
        assert!(ColumnStyle::from_id(4).is_none());
    }
}
