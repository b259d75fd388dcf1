//! Semantic action catalog
//!
//! Every user-invocable operation has a dense integer id, a stable machine
//! name (the persistence key; renaming one orphans saved bindings), a
//! display label, and a default key binding. Ids are grouped into
//! contiguous per-context ranges, each bracketed by a non-bindable min/max
//! sentinel so the dispatch compiler can iterate a range without touching
//! its neighbors.

use crate::key::{sc, RawKey, MOD_ALT, MOD_CTRL, MOD_SHIFT};

/// Index into the action catalog.
pub type ActionId = usize;

/// Usage context an action belongs to. Each context gets its own dispatch
/// map; the same raw key may mean different things in different contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Pattern,
    InsList,
    WaveList,
    SampleList,
    Sample,
    Orders,
}

pub const CONTEXTS: [Context; 7] = [
    Context::Global,
    Context::Pattern,
    Context::InsList,
    Context::WaveList,
    Context::SampleList,
    Context::Sample,
    Context::Orders,
];

/// One catalog entry.
///
/// A `friendly` label that is empty is a placeholder; one starting with
/// `---` is a section header. Neither is bindable. `default_bind` of
/// `None` marks a non-bindable entry (sentinels); `Some(0)` is a bindable
/// action that ships unbound.
#[derive(Debug, Clone, Copy)]
pub struct ActionDef {
    pub name: &'static str,
    pub friendly: &'static str,
    pub default_bind: Option<RawKey>,
}

const fn act(name: &'static str, friendly: &'static str, bind: RawKey) -> ActionDef {
    ActionDef {
        name,
        friendly,
        default_bind: Some(bind),
    }
}

const GLOBAL_ACTIONS: &[ActionDef] = &[
    act("OPEN", "Open file", MOD_CTRL | sc::O),
    act("OPEN_BACKUP", "Restore backup", 0),
    act("SAVE", "Save file", MOD_CTRL | sc::S),
    act("SAVE_AS", "Save as", MOD_CTRL | MOD_SHIFT | sc::S),
    act("UNDO", "Undo", MOD_CTRL | sc::Z),
    act("REDO", "Redo", MOD_CTRL | sc::Y),
    act("PLAY_TOGGLE", "Play/Stop (toggle)", sc::RETURN),
    act("PLAY", "Play", 0),
    act("STOP", "Stop", 0),
    act("PLAY_REPEAT", "Play (repeat pattern)", 0),
    act("PLAY_CURSOR", "Play from cursor", MOD_SHIFT | sc::RETURN),
    act("STEP_ONE", "Step one row", MOD_CTRL | sc::RETURN),
    act("OCTAVE_UP", "Octave up", sc::KP_MULTIPLY),
    act("OCTAVE_DOWN", "Octave down", sc::KP_DIVIDE),
    act("INS_UP", "Previous instrument", MOD_SHIFT | sc::KP_DIVIDE),
    act("INS_DOWN", "Next instrument", MOD_SHIFT | sc::KP_MULTIPLY),
    act("STEP_UP", "Increase edit step", MOD_CTRL | sc::KP_MULTIPLY),
    act("STEP_DOWN", "Decrease edit step", MOD_CTRL | sc::KP_DIVIDE),
    act("TOGGLE_EDIT", "Toggle edit mode", sc::SPACE),
    act("METRONOME", "Metronome", MOD_CTRL | sc::M),
    act("REPEAT_PATTERN", "Toggle repeat pattern", 0),
    act("FOLLOW_ORDERS", "Follow orders", 0),
    act("FOLLOW_PATTERN", "Follow pattern", 0),
    act("PANIC", "Panic", sc::F12),
    act("WINDOW_EDIT_CONTROLS", "Edit Controls", 0),
    act("WINDOW_ORDERS", "Orders", 0),
    act("WINDOW_INS_LIST", "Instrument List", 0),
    act("WINDOW_INS_EDIT", "Instrument Editor", 0),
    act("WINDOW_SONG_INFO", "Song Information", 0),
    act("WINDOW_PATTERN", "Pattern", 0),
    act("WINDOW_WAVE_LIST", "Wavetable List", 0),
    act("WINDOW_WAVE_EDIT", "Wavetable Editor", 0),
    act("WINDOW_SAMPLE_LIST", "Sample List", 0),
    act("WINDOW_SAMPLE_EDIT", "Sample Editor", 0),
    act("WINDOW_ABOUT", "About", 0),
    act("WINDOW_SETTINGS", "Settings", 0),
    act("WINDOW_MIXER", "Mixer", 0),
    act("WINDOW_DEBUG", "Debug Menu", 0),
    act("WINDOW_OSCILLOSCOPE", "Oscilloscope", 0),
    act("WINDOW_VOL_METER", "Volume Meter", 0),
    act("WINDOW_STATS", "Statistics", 0),
    act("WINDOW_COMPAT_FLAGS", "Compatibility Flags", 0),
    act("WINDOW_PIANO", "Piano", 0),
    act("WINDOW_NOTES", "Song Comments", 0),
    act("WINDOW_CHANNELS", "Channels", 0),
    act("WINDOW_REGISTER_VIEW", "Register View", 0),
    act("WINDOW_LOG", "Log Viewer", 0),
    act("COLLAPSE_WINDOW", "Collapse/expand current window", 0),
    act("CLOSE_WINDOW", "Close current window", MOD_SHIFT | sc::ESCAPE),
];

const PATTERN_ACTIONS: &[ActionDef] = &[
    act("PAT_NOTE_UP", "Transpose (semitone up)", MOD_ALT | sc::Q),
    act("PAT_NOTE_DOWN", "Transpose (semitone down)", MOD_ALT | sc::A),
    act("PAT_OCTAVE_UP", "Transpose (octave up)", MOD_ALT | MOD_SHIFT | sc::Q),
    act("PAT_OCTAVE_DOWN", "Transpose (octave down)", MOD_ALT | MOD_SHIFT | sc::A),
    act("PAT_SELECT_ALL", "Select all", MOD_CTRL | sc::A),
    act("PAT_CUT", "Cut", MOD_CTRL | sc::X),
    act("PAT_COPY", "Copy", MOD_CTRL | sc::C),
    act("PAT_PASTE", "Paste", MOD_CTRL | sc::V),
    act("PAT_PASTE_MIX", "Paste (mix)", MOD_CTRL | MOD_SHIFT | sc::V),
    act("PAT_PASTE_MIX_BG", "Paste (mix, background)", 0),
    act("PAT_PASTE_FLOOD", "Paste (flood)", 0),
    act("PAT_PASTE_OVERFLOW", "Paste (overflow)", 0),
    act("PAT_CURSOR_UP", "Move cursor up", sc::UP),
    act("PAT_CURSOR_DOWN", "Move cursor down", sc::DOWN),
    act("PAT_CURSOR_LEFT", "Move cursor left", sc::LEFT),
    act("PAT_CURSOR_RIGHT", "Move cursor right", sc::RIGHT),
    act("PAT_CURSOR_UP_ONE", "Move cursor up by one (override edit step)", 0),
    act("PAT_CURSOR_DOWN_ONE", "Move cursor down by one (override edit step)", 0),
    act("PAT_CURSOR_LEFT_CHANNEL", "Move cursor to previous channel", 0),
    act("PAT_CURSOR_RIGHT_CHANNEL", "Move cursor to next channel", 0),
    act("PAT_CURSOR_PREVIOUS_CHANNEL", "Move cursor to previous channel (overflow)", 0),
    act("PAT_CURSOR_NEXT_CHANNEL", "Move cursor to next channel (overflow)", 0),
    act("PAT_CURSOR_BEGIN", "Move cursor to beginning of pattern", sc::HOME),
    act("PAT_CURSOR_END", "Move cursor to end of pattern", sc::END),
    act("PAT_CURSOR_UP_COARSE", "Move cursor up (coarse)", sc::PAGE_UP),
    act("PAT_CURSOR_DOWN_COARSE", "Move cursor down (coarse)", sc::PAGE_DOWN),
    act("PAT_SELECTION_UP", "Expand selection upwards", MOD_SHIFT | sc::UP),
    act("PAT_SELECTION_DOWN", "Expand selection downwards", MOD_SHIFT | sc::DOWN),
    act("PAT_SELECTION_LEFT", "Expand selection to the left", MOD_SHIFT | sc::LEFT),
    act("PAT_SELECTION_RIGHT", "Expand selection to the right", MOD_SHIFT | sc::RIGHT),
    act("PAT_SELECTION_UP_ONE", "Expand selection upwards by one", 0),
    act("PAT_SELECTION_DOWN_ONE", "Expand selection downwards by one", 0),
    act("PAT_SELECTION_BEGIN", "Expand selection to beginning of pattern", MOD_SHIFT | sc::HOME),
    act("PAT_SELECTION_END", "Expand selection to end of pattern", MOD_SHIFT | sc::END),
    act("PAT_SELECTION_UP_COARSE", "Expand selection upwards (coarse)", MOD_SHIFT | sc::PAGE_UP),
    act("PAT_SELECTION_DOWN_COARSE", "Expand selection downwards (coarse)", MOD_SHIFT | sc::PAGE_DOWN),
    act("PAT_DELETE", "Delete", sc::DELETE),
    act("PAT_PULL_DELETE", "Pull delete", sc::BACKSPACE),
    act("PAT_INSERT", "Insert", sc::INSERT),
    act("PAT_MUTE_CURSOR", "Mute channel at cursor", MOD_ALT | sc::F9),
    act("PAT_SOLO_CURSOR", "Solo channel at cursor", MOD_ALT | sc::F10),
    act("PAT_UNMUTE_ALL", "Unmute all channels", MOD_ALT | MOD_SHIFT | sc::F9),
    act("PAT_NEXT_ORDER", "Go to next order", 0),
    act("PAT_PREV_ORDER", "Go to previous order", 0),
    act("PAT_COLLAPSE", "Collapse channel at cursor", 0),
    act("PAT_INCREASE_COLUMNS", "Increase effect columns", 0),
    act("PAT_DECREASE_COLUMNS", "Decrease effect columns", 0),
    act("PAT_INTERPOLATE", "Interpolate", 0),
    act("PAT_FADE", "Fade", 0),
    act("PAT_INVERT_VALUES", "Invert values", 0),
    act("PAT_FLIP_SELECTION", "Flip selection", 0),
    act("PAT_COLLAPSE_ROWS", "Collapse rows", 0),
    act("PAT_EXPAND_ROWS", "Expand rows", 0),
    act("PAT_LATCH", "Set effect latch", 0),
];

const INS_LIST_ACTIONS: &[ActionDef] = &[
    act("INS_LIST_ADD", "Add instrument", sc::INSERT),
    act("INS_LIST_DUPLICATE", "Duplicate instrument", MOD_CTRL | sc::D),
    act("INS_LIST_OPEN", "Open instrument", 0),
    act("INS_LIST_SAVE", "Save instrument", 0),
    act("INS_LIST_MOVE_UP", "Move instrument up", MOD_SHIFT | sc::UP),
    act("INS_LIST_MOVE_DOWN", "Move instrument down", MOD_SHIFT | sc::DOWN),
    act("INS_LIST_DELETE", "Delete instrument", 0),
    act("INS_LIST_EDIT", "Edit instrument", MOD_SHIFT | sc::RETURN),
    act("INS_LIST_UP", "Previous instrument", sc::UP),
    act("INS_LIST_DOWN", "Next instrument", sc::DOWN),
];

const WAVE_LIST_ACTIONS: &[ActionDef] = &[
    act("WAVE_LIST_ADD", "Add wavetable", sc::INSERT),
    act("WAVE_LIST_DUPLICATE", "Duplicate wavetable", MOD_CTRL | sc::D),
    act("WAVE_LIST_OPEN", "Open wavetable", 0),
    act("WAVE_LIST_SAVE", "Save wavetable", 0),
    act("WAVE_LIST_MOVE_UP", "Move wavetable up", MOD_SHIFT | sc::UP),
    act("WAVE_LIST_MOVE_DOWN", "Move wavetable down", MOD_SHIFT | sc::DOWN),
    act("WAVE_LIST_DELETE", "Delete wavetable", 0),
    act("WAVE_LIST_EDIT", "Edit wavetable", MOD_SHIFT | sc::RETURN),
    act("WAVE_LIST_UP", "Previous wavetable", sc::UP),
    act("WAVE_LIST_DOWN", "Next wavetable", sc::DOWN),
];

const SAMPLE_LIST_ACTIONS: &[ActionDef] = &[
    act("SAMPLE_LIST_ADD", "Add sample", sc::INSERT),
    act("SAMPLE_LIST_DUPLICATE", "Duplicate sample", MOD_CTRL | sc::D),
    act("SAMPLE_LIST_OPEN", "Open sample", 0),
    act("SAMPLE_LIST_SAVE", "Save sample", 0),
    act("SAMPLE_LIST_MOVE_UP", "Move sample up", MOD_SHIFT | sc::UP),
    act("SAMPLE_LIST_MOVE_DOWN", "Move sample down", MOD_SHIFT | sc::DOWN),
    act("SAMPLE_LIST_DELETE", "Delete sample", 0),
    act("SAMPLE_LIST_EDIT", "Edit sample", MOD_SHIFT | sc::RETURN),
    act("SAMPLE_LIST_UP", "Previous sample", sc::UP),
    act("SAMPLE_LIST_DOWN", "Next sample", sc::DOWN),
    act("SAMPLE_LIST_PREVIEW", "Preview sample", 0),
    act("SAMPLE_LIST_STOP_PREVIEW", "Stop sample preview", 0),
];

const SAMPLE_ACTIONS: &[ActionDef] = &[
    act("SAMPLE_SELECT", "Edit mode: select", MOD_SHIFT | sc::I),
    act("SAMPLE_DRAW", "Edit mode: draw", MOD_SHIFT | sc::D),
    act("SAMPLE_CUT", "Cut", MOD_CTRL | sc::X),
    act("SAMPLE_COPY", "Copy", MOD_CTRL | sc::C),
    act("SAMPLE_PASTE", "Paste", MOD_CTRL | sc::V),
    act("SAMPLE_PASTE_REPLACE", "Paste replace", MOD_CTRL | MOD_SHIFT | sc::V),
    act("SAMPLE_PASTE_MIX", "Paste mix", MOD_CTRL | MOD_ALT | sc::V),
    act("SAMPLE_SELECT_ALL", "Select all", MOD_CTRL | sc::A),
    act("SAMPLE_RESIZE", "Resize", MOD_CTRL | sc::R),
    act("SAMPLE_RESAMPLE", "Resample", MOD_CTRL | sc::E),
    act("SAMPLE_AMPLIFY", "Amplify", MOD_CTRL | sc::B),
    act("SAMPLE_NORMALIZE", "Normalize", MOD_CTRL | sc::N),
    act("SAMPLE_FADE_IN", "Fade in", MOD_CTRL | sc::I),
    act("SAMPLE_FADE_OUT", "Fade out", MOD_CTRL | sc::O),
    act("SAMPLE_INSERT", "Insert silence", sc::INSERT),
    act("SAMPLE_SILENCE", "Apply silence", MOD_SHIFT | sc::DELETE),
    act("SAMPLE_DELETE", "Delete", sc::DELETE),
    act("SAMPLE_TRIM", "Trim", MOD_CTRL | sc::T),
    act("SAMPLE_REVERSE", "Reverse", MOD_CTRL | MOD_SHIFT | sc::R),
    act("SAMPLE_INVERT", "Invert", MOD_CTRL | MOD_SHIFT | sc::T),
    act("SAMPLE_SIGN", "Signed/unsigned exchange", 0),
    act("SAMPLE_FILTER", "Apply filter", MOD_CTRL | sc::F),
    act("SAMPLE_PREVIEW", "Preview sample", 0),
    act("SAMPLE_STOP_PREVIEW", "Stop sample preview", 0),
    act("SAMPLE_ZOOM_IN", "Zoom in", MOD_CTRL | sc::EQUALS),
    act("SAMPLE_ZOOM_OUT", "Zoom out", MOD_CTRL | sc::MINUS),
    act("SAMPLE_ZOOM_AUTO", "Toggle auto-zoom", MOD_CTRL | sc::NUM_0),
];

const ORDERS_ACTIONS: &[ActionDef] = &[
    act("ORDERS_UP", "Previous order", sc::UP),
    act("ORDERS_DOWN", "Next order", sc::DOWN),
    act("ORDERS_LEFT", "Cursor left", sc::LEFT),
    act("ORDERS_RIGHT", "Cursor right", sc::RIGHT),
    act("ORDERS_INCREASE", "Increase value", 0),
    act("ORDERS_DECREASE", "Decrease value", 0),
    act("ORDERS_EDIT_MODE", "Switch edit mode", 0),
    act("ORDERS_LINK", "Toggle alter entire row", MOD_CTRL | sc::L),
    act("ORDERS_ADD", "Add", sc::INSERT),
    act("ORDERS_DUPLICATE", "Duplicate", MOD_CTRL | sc::D),
    act("ORDERS_DEEP_CLONE", "Deep clone", MOD_CTRL | MOD_SHIFT | sc::D),
    act("ORDERS_DUPLICATE_END", "Duplicate to end of song", MOD_CTRL | sc::E),
    act("ORDERS_DEEP_CLONE_END", "Deep clone to end of song", MOD_CTRL | MOD_SHIFT | sc::E),
    act("ORDERS_REMOVE", "Remove", sc::DELETE),
    act("ORDERS_MOVE_UP", "Move up", MOD_SHIFT | sc::UP),
    act("ORDERS_MOVE_DOWN", "Move down", MOD_SHIFT | sc::DOWN),
    act("ORDERS_REPLAY", "Replay order", 0),
];

struct Section {
    min_name: &'static str,
    max_name: &'static str,
    header: &'static str,
    actions: &'static [ActionDef],
}

const SECTIONS: [Section; 7] = [
    Section {
        min_name: "GLOBAL_MIN",
        max_name: "GLOBAL_MAX",
        header: "",
        actions: GLOBAL_ACTIONS,
    },
    Section {
        min_name: "PAT_MIN",
        max_name: "PAT_MAX",
        header: "---Pattern",
        actions: PATTERN_ACTIONS,
    },
    Section {
        min_name: "INS_LIST_MIN",
        max_name: "INS_LIST_MAX",
        header: "---Instrument list",
        actions: INS_LIST_ACTIONS,
    },
    Section {
        min_name: "WAVE_LIST_MIN",
        max_name: "WAVE_LIST_MAX",
        header: "---Wavetable list",
        actions: WAVE_LIST_ACTIONS,
    },
    Section {
        min_name: "SAMPLE_LIST_MIN",
        max_name: "SAMPLE_LIST_MAX",
        header: "---Sample list",
        actions: SAMPLE_LIST_ACTIONS,
    },
    Section {
        min_name: "SAMPLE_MIN",
        max_name: "SAMPLE_MAX",
        header: "---Sample editor",
        actions: SAMPLE_ACTIONS,
    },
    Section {
        min_name: "ORDERS_MIN",
        max_name: "ORDERS_MAX",
        header: "---Order list",
        actions: ORDERS_ACTIONS,
    },
];

/// The process-wide action catalog.
///
/// Built once at startup; the id space is the index space of `defs`.
pub struct ActionRegistry {
    defs: Vec<ActionDef>,
    ranges: [(ActionId, ActionId); 7],
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        let mut defs = Vec::new();
        let mut ranges = [(0, 0); 7];

        for (ctx_idx, section) in SECTIONS.iter().enumerate() {
            let min = defs.len();
            defs.push(ActionDef {
                name: section.min_name,
                friendly: section.header,
                default_bind: None,
            });
            defs.extend_from_slice(section.actions);
            let max = defs.len();
            defs.push(ActionDef {
                name: section.max_name,
                friendly: "",
                default_bind: None,
            });
            ranges[ctx_idx] = (min, max);
        }

        Self { defs, ranges }
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn def(&self, id: ActionId) -> &ActionDef {
        &self.defs[id]
    }

    pub fn defs(&self) -> &[ActionDef] {
        &self.defs
    }

    /// Sentinel ids `(min, max)` bracketing a context's actions. The
    /// bindable ids are `min+1 .. max` (`max` itself is the closing
    /// sentinel).
    pub fn range(&self, context: Context) -> (ActionId, ActionId) {
        let idx = CONTEXTS.iter().position(|c| *c == context).unwrap_or(0);
        self.ranges[idx]
    }

    /// Context a given id falls into.
    pub fn context_of(&self, id: ActionId) -> Option<Context> {
        CONTEXTS
            .iter()
            .zip(self.ranges.iter())
            .find(|(_, (min, max))| id >= *min && id <= *max)
            .map(|(ctx, _)| *ctx)
    }

    /// Linear scan by machine name. Catalogs are small; a map would be
    /// overkill here.
    pub fn find_by_name(&self, name: &str) -> Option<ActionId> {
        self.defs.iter().position(|d| d.name == name)
    }

    /// Whether the entry can carry a key binding at all.
    pub fn is_bindable(&self, id: ActionId) -> bool {
        self.defs[id].default_bind.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_contiguous_and_cover_catalog() {
        let reg = ActionRegistry::new();
        let mut expected_start = 0;
        for ctx in CONTEXTS {
            let (min, max) = reg.range(ctx);
            assert_eq!(min, expected_start);
            assert!(max > min + 1, "context {:?} has no actions", ctx);
            expected_start = max + 1;
        }
        assert_eq!(expected_start, reg.len());
    }

    #[test]
    fn test_sentinels_not_bindable() {
        let reg = ActionRegistry::new();
        for ctx in CONTEXTS {
            let (min, max) = reg.range(ctx);
            assert!(!reg.is_bindable(min));
            assert!(!reg.is_bindable(max));
            for id in min + 1..max {
                assert!(reg.is_bindable(id));
            }
        }
    }

    #[test]
    fn test_find_by_name() {
        let reg = ActionRegistry::new();
        let id = reg.find_by_name("OPEN").unwrap();
        assert_eq!(reg.def(id).friendly, "Open file");
        assert_eq!(reg.context_of(id), Some(Context::Global));

        let id = reg.find_by_name("ORDERS_REPLAY").unwrap();
        assert_eq!(reg.context_of(id), Some(Context::Orders));

        assert!(reg.find_by_name("NO_SUCH_ACTION").is_none());
    }

    #[test]
    fn test_machine_names_unique() {
        let reg = ActionRegistry::new();
        for (i, a) in reg.defs().iter().enumerate() {
            for b in reg.defs().iter().skip(i + 1) {
                assert_ne!(a.name, b.name, "duplicate machine name {}", a.name);
            }
        }
    }
}
