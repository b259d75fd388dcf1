//! Raw key-code encoding
//!
//! A key binding is stored as a single `u32`: the physical scancode in the
//! low bits plus modifier flags in the reserved high bits. Zero means
//! "unbound". Some legacy/placeholder values carry modifier bits without a
//! scancode; `has_key` tells a real physical-key binding apart from those.

/// Physical key + modifier flags packed into one integer.
pub type RawKey = u32;

/// Bits that hold the physical scancode. A binding with none of these set
/// is not a physical-key binding and must not enter a dispatch map.
pub const KEY_MASK: RawKey = 0x0FFF_FFFF;

pub const MOD_SHIFT: RawKey = 1 << 28;
pub const MOD_CTRL: RawKey = 1 << 29;
pub const MOD_ALT: RawKey = 1 << 30;
pub const MOD_META: RawKey = 1 << 31;

/// Scancode constants for the keys the default bindings and the default
/// note map refer to. Values follow the USB HID usage table, which is what
/// the input backend reports.
pub mod sc {
    pub const A: u32 = 4;
    pub const B: u32 = 5;
    pub const C: u32 = 6;
    pub const D: u32 = 7;
    pub const E: u32 = 8;
    pub const F: u32 = 9;
    pub const G: u32 = 10;
    pub const H: u32 = 11;
    pub const I: u32 = 12;
    pub const J: u32 = 13;
    pub const K: u32 = 14;
    pub const L: u32 = 15;
    pub const M: u32 = 16;
    pub const N: u32 = 17;
    pub const O: u32 = 18;
    pub const P: u32 = 19;
    pub const Q: u32 = 20;
    pub const R: u32 = 21;
    pub const S: u32 = 22;
    pub const T: u32 = 23;
    pub const U: u32 = 24;
    pub const V: u32 = 25;
    pub const W: u32 = 26;
    pub const X: u32 = 27;
    pub const Y: u32 = 28;
    pub const Z: u32 = 29;
    pub const NUM_1: u32 = 30;
    pub const NUM_2: u32 = 31;
    pub const NUM_3: u32 = 32;
    pub const NUM_4: u32 = 33;
    pub const NUM_5: u32 = 34;
    pub const NUM_6: u32 = 35;
    pub const NUM_7: u32 = 36;
    pub const NUM_8: u32 = 37;
    pub const NUM_9: u32 = 38;
    pub const NUM_0: u32 = 39;
    pub const RETURN: u32 = 40;
    pub const ESCAPE: u32 = 41;
    pub const BACKSPACE: u32 = 42;
    pub const TAB: u32 = 43;
    pub const SPACE: u32 = 44;
    pub const MINUS: u32 = 45;
    pub const EQUALS: u32 = 46;
    pub const LEFT_BRACKET: u32 = 47;
    pub const RIGHT_BRACKET: u32 = 48;
    pub const BACKSLASH: u32 = 49;
    pub const SEMICOLON: u32 = 51;
    pub const APOSTROPHE: u32 = 52;
    pub const GRAVE: u32 = 53;
    pub const COMMA: u32 = 54;
    pub const PERIOD: u32 = 55;
    pub const SLASH: u32 = 56;
    pub const CAPS_LOCK: u32 = 57;
    pub const F1: u32 = 58;
    pub const F2: u32 = 59;
    pub const F3: u32 = 60;
    pub const F4: u32 = 61;
    pub const F5: u32 = 62;
    pub const F6: u32 = 63;
    pub const F7: u32 = 64;
    pub const F8: u32 = 65;
    pub const F9: u32 = 66;
    pub const F10: u32 = 67;
    pub const F11: u32 = 68;
    pub const F12: u32 = 69;
    pub const INSERT: u32 = 73;
    pub const HOME: u32 = 74;
    pub const PAGE_UP: u32 = 75;
    pub const DELETE: u32 = 76;
    pub const END: u32 = 77;
    pub const PAGE_DOWN: u32 = 78;
    pub const RIGHT: u32 = 79;
    pub const LEFT: u32 = 80;
    pub const DOWN: u32 = 81;
    pub const UP: u32 = 82;
    pub const KP_DIVIDE: u32 = 84;
    pub const KP_MULTIPLY: u32 = 85;
    pub const KP_MINUS: u32 = 86;
    pub const KP_PLUS: u32 = 87;
    pub const KP_ENTER: u32 = 88;
}

/// Whether this value binds an actual physical key.
pub fn has_key(code: RawKey) -> bool {
    code & KEY_MASK != 0
}

/// The scancode portion of a raw key-code.
pub fn scancode(code: RawKey) -> u32 {
    code & KEY_MASK
}

/// Compose a raw key-code from a scancode and the current modifier state.
pub fn compose(scan: u32, shift: bool, ctrl: bool, alt: bool, meta: bool) -> RawKey {
    let mut code = scan & KEY_MASK;
    if shift {
        code |= MOD_SHIFT;
    }
    if ctrl {
        code |= MOD_CTRL;
    }
    if alt {
        code |= MOD_ALT;
    }
    if meta {
        code |= MOD_META;
    }
    code
}

fn scancode_name(scan: u32) -> Option<&'static str> {
    Some(match scan {
        4 => "A",
        5 => "B",
        6 => "C",
        7 => "D",
        8 => "E",
        9 => "F",
        10 => "G",
        11 => "H",
        12 => "I",
        13 => "J",
        14 => "K",
        15 => "L",
        16 => "M",
        17 => "N",
        18 => "O",
        19 => "P",
        20 => "Q",
        21 => "R",
        22 => "S",
        23 => "T",
        24 => "U",
        25 => "V",
        26 => "W",
        27 => "X",
        28 => "Y",
        29 => "Z",
        30 => "1",
        31 => "2",
        32 => "3",
        33 => "4",
        34 => "5",
        35 => "6",
        36 => "7",
        37 => "8",
        38 => "9",
        39 => "0",
        40 => "Return",
        41 => "Escape",
        42 => "Backspace",
        43 => "Tab",
        44 => "Space",
        45 => "-",
        46 => "=",
        47 => "[",
        48 => "]",
        49 => "\\",
        51 => ";",
        52 => "'",
        53 => "`",
        54 => ",",
        55 => ".",
        56 => "/",
        57 => "Caps Lock",
        58 => "F1",
        59 => "F2",
        60 => "F3",
        61 => "F4",
        62 => "F5",
        63 => "F6",
        64 => "F7",
        65 => "F8",
        66 => "F9",
        67 => "F10",
        68 => "F11",
        69 => "F12",
        73 => "Insert",
        74 => "Home",
        75 => "Page Up",
        76 => "Delete",
        77 => "End",
        78 => "Page Down",
        79 => "Right",
        80 => "Left",
        81 => "Down",
        82 => "Up",
        84 => "Keypad /",
        85 => "Keypad *",
        86 => "Keypad -",
        87 => "Keypad +",
        88 => "Keypad Enter",
        _ => return None,
    })
}

/// Human-readable name for a raw key-code, modifiers included.
///
/// Used by the binding editor to label the current binding.
pub fn key_name(code: RawKey) -> String {
    if !has_key(code) {
        return "<none>".to_string();
    }
    let mut name = String::new();
    if code & MOD_CTRL != 0 {
        name.push_str("Ctrl-");
    }
    if code & MOD_ALT != 0 {
        name.push_str("Alt-");
    }
    if code & MOD_META != 0 {
        name.push_str("Meta-");
    }
    if code & MOD_SHIFT != 0 {
        name.push_str("Shift-");
    }
    let scan = scancode(code);
    match scancode_name(scan) {
        Some(s) => name.push_str(s),
        None => name.push_str(&format!("Key {}", scan)),
    }
    name
}
