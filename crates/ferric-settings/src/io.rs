//! Color and keybind file import/export
//!
//! Both formats are `key=value` lines, one record per line. Import resets
//! the target table to defaults first, then applies every well-formed
//! record whose key is found in the catalog (linear scan; the catalogs are
//! small). Unknown keys and unparsable values are logged and skipped; only
//! a file that cannot be opened fails the operation, and in that case the
//! in-memory table is left untouched.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ferric_input::{ActionRegistry, BindingTable};

use crate::colors::{ColorTable, COLORS};

fn split_record(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
}

/// Import a color file. Returns false when the file cannot be read.
pub fn import_colors(path: &Path, colors: &mut ColorTable) -> bool {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("error while opening color file for import: {}", e);
            return false;
        }
    };

    colors.reset();
    for line in contents.lines() {
        let Some((key, value)) = split_record(line) else {
            if !line.trim().is_empty() {
                log::warn!("line invalid: {}", line);
            }
            continue;
        };
        let applied = ColorTable::find_by_name(key)
            .zip(value.trim().parse::<i64>().ok())
            .map(|(index, parsed)| colors.set(index, parsed as u32));
        if applied.is_none() {
            log::warn!("line invalid: {}", line);
        }
    }
    true
}

/// Export every color, in catalog order.
pub fn export_colors(path: &Path, colors: &ColorTable) -> bool {
    let mut out = String::new();
    for (i, def) in COLORS.iter().enumerate() {
        let _ = writeln!(out, "{}={}", def.name, colors.get(i));
    }
    match fs::write(path, out) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("error while exporting colors: {}", e);
            false
        }
    }
}

/// Import a keybind file. Returns false when the file cannot be read.
pub fn import_keybinds(path: &Path, registry: &ActionRegistry, table: &mut BindingTable) -> bool {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("error while opening keybind file for import: {}", e);
            return false;
        }
    };

    table.reset(registry);
    for line in contents.lines() {
        let Some((key, value)) = split_record(line) else {
            if !line.trim().is_empty() {
                log::warn!("line invalid: {}", line);
            }
            continue;
        };
        let applied = registry
            .find_by_name(key)
            .filter(|&id| registry.is_bindable(id))
            .zip(value.trim().parse::<i64>().ok())
            .map(|(id, parsed)| table.set(id, parsed as u32));
        if applied.is_none() {
            log::warn!("line invalid: {}", line);
        }
    }
    true
}

/// Export every bindable action, in catalog order. Sentinels and headers
/// are skipped.
pub fn export_keybinds(path: &Path, registry: &ActionRegistry, table: &BindingTable) -> bool {
    let mut out = String::new();
    for (id, def) in registry.defs().iter().enumerate() {
        if def.default_bind.is_none() {
            continue;
        }
        let _ = writeln!(out, "{}={}", def.name, table.get(id));
    }
    match fs::write(path, out) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("error while exporting keybinds: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferric_input::key::{sc, MOD_CTRL};

    #[test]
    fn test_color_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.cfg");

        let mut colors = ColorTable::with_defaults();
        colors.set(0, 0xDEADBEEF);
        colors.set(5, 0x00FF00FF);
        assert!(export_colors(&path, &colors));

        let mut loaded = ColorTable::with_defaults();
        assert!(import_colors(&path, &mut loaded));
        assert_eq!(loaded, colors);
    }

    #[test]
    fn test_color_import_failure_leaves_table_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut colors = ColorTable::with_defaults();
        colors.set(0, 0x11111111);
        let before = colors.clone();

        assert!(!import_colors(&dir.path().join("missing.cfg"), &mut colors));
        assert_eq!(colors, before);
    }

    #[test]
    fn test_color_import_resets_before_applying() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.cfg");
        // a file that only overrides one color
        fs::write(&path, format!("{}=123456\n", COLORS[2].name)).unwrap();

        let mut colors = ColorTable::with_defaults();
        colors.set(0, 0x11111111);
        colors.set(2, 0x22222222);
        assert!(import_colors(&path, &mut colors));

        // color 0 went back to its default, color 2 took the file value
        assert_eq!(colors.get(0), COLORS[0].default);
        assert_eq!(colors.get(2), 123456);
    }

    #[test]
    fn test_color_import_skips_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.cfg");
        fs::write(
            &path,
            format!(
                "{}=42\nnoSuchColor=1\n{}=notanumber\njunk line\n",
                COLORS[0].name, COLORS[1].name
            ),
        )
        .unwrap();

        let mut colors = ColorTable::with_defaults();
        assert!(import_colors(&path, &mut colors));
        assert_eq!(colors.get(0), 42);
        assert_eq!(colors.get(1), COLORS[1].default);
    }

    #[test]
    fn test_keybind_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.cfg");
        let registry = ActionRegistry::new();

        let mut table = BindingTable::with_defaults(&registry);
        let open = registry.find_by_name("OPEN").unwrap();
        table.set(open, MOD_CTRL | sc::F7);
        assert!(export_keybinds(&path, &registry, &table));

        let mut loaded = BindingTable::with_defaults(&registry);
        assert!(import_keybinds(&path, &registry, &mut loaded));
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_keybind_import_failure_leaves_table_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ActionRegistry::new();
        let mut table = BindingTable::with_defaults(&registry);
        let open = registry.find_by_name("OPEN").unwrap();
        table.set(open, sc::F9);
        let before = table.clone();

        assert!(!import_keybinds(
            &dir.path().join("missing.cfg"),
            &registry,
            &mut table
        ));
        assert_eq!(table, before);
    }

    #[test]
    fn test_keybind_import_resets_before_applying() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.cfg");
        let registry = ActionRegistry::new();
        fs::write(&path, "PLAY=58\n").unwrap();

        let mut table = BindingTable::with_defaults(&registry);
        let open = registry.find_by_name("OPEN").unwrap();
        let play = registry.find_by_name("PLAY").unwrap();
        table.set(open, sc::F9);
        assert!(import_keybinds(&path, &registry, &mut table));

        assert_eq!(table.get(open), MOD_CTRL | sc::O);
        assert_eq!(table.get(play), 58);
    }

    #[test]
    fn test_export_skips_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybinds.cfg");
        let registry = ActionRegistry::new();
        let table = BindingTable::with_defaults(&registry);
        assert!(export_keybinds(&path, &registry, &table));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("GLOBAL_MIN"));
        assert!(!contents.contains("PAT_MAX"));
        assert!(contents.contains("OPEN="));
    }
}
