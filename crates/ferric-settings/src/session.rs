//! Settings session
//!
//! Owns everything the settings screen edits: the binding table, the
//! note-key map, the color table and the per-device MIDI map, together
//! with the config store they persist to. `sync` pulls the persisted
//! state in and compiles; `commit` writes everything back out. Closing
//! the screen without committing means calling `revert`, which is just a
//! re-sync.

use std::path::PathBuf;

use ferric_input::{
    compile, ActionId, ActionRegistry, BindingTable, Context, DispatchMaps, KeyCapture,
    NoteKeyMap, RawKey, DEFAULT_NOTE_KEYS,
};
use ferric_midi::{load_midi_map, map_file_name, save_midi_map, MidiMap};

use crate::colors::{ColorTable, COLORS};
use crate::conf::ConfigStore;

/// Default per-user config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ferric")
}

/// The scalar settings this subsystem owns. The rest of the application's
/// flat settings live beside these in the same store but are read and
/// written by their own components.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub midi_in_device: String,
    pub midi_out_device: String,
}

/// Live state of the settings screen.
pub struct SettingsSession {
    config_dir: PathBuf,
    pub conf: ConfigStore,
    pub registry: ActionRegistry,
    pub settings: Settings,
    pub keybinds: BindingTable,
    pub capture: KeyCapture,
    pub dispatch: DispatchMaps,
    pub note_keys: NoteKeyMap,
    pub colors: ColorTable,
    pub midi_map: MidiMap,
}

impl SettingsSession {
    /// Open (or create) a session rooted at `config_dir` and sync it.
    pub fn new(config_dir: PathBuf) -> Self {
        let conf = ConfigStore::open(config_dir.join("ferric.cfg"));
        let registry = ActionRegistry::new();
        let keybinds = BindingTable::with_defaults(&registry);
        let dispatch = compile(&registry, &keybinds);
        let mut session = Self {
            config_dir,
            conf,
            registry,
            settings: Settings::default(),
            keybinds,
            capture: KeyCapture::new(),
            dispatch,
            note_keys: NoteKeyMap::factory_default(),
            colors: ColorTable::with_defaults(),
            midi_map: MidiMap::new(),
        };
        session.sync();
        session
    }

    /// Load every table from the store and the per-device file, then
    /// compile. Also serves as the discard path: un-committed edits are
    /// overwritten by the persisted state.
    pub fn sync(&mut self) {
        self.settings.midi_in_device = self.conf.get_str("midiInDevice", "");
        self.settings.midi_out_device = self.conf.get_str("midiOutDevice", "");

        for (id, def) in self.registry.defs().iter().enumerate() {
            if let Some(default) = def.default_bind {
                let key = format!("keybind_{}", def.name);
                let code = self.conf.get_int(&key, default as i64) as RawKey;
                self.keybinds.set(id, code);
            }
        }

        self.note_keys = NoteKeyMap::decode(&self.conf.get_str("noteKeys", DEFAULT_NOTE_KEYS));

        for (i, def) in COLORS.iter().enumerate() {
            self.colors.set(i, self.conf.get_int(def.name, def.default as i64) as u32);
        }

        self.capture = KeyCapture::new();
        self.dispatch = compile(&self.registry, &self.keybinds);
        self.reload_midi_map();
    }

    /// Write every table back to the store and the per-device file.
    pub fn commit(&mut self) -> anyhow::Result<()> {
        self.conf.set("midiInDevice", &self.settings.midi_in_device);
        self.conf.set("midiOutDevice", &self.settings.midi_out_device);

        for (id, def) in self.registry.defs().iter().enumerate() {
            if def.default_bind.is_none() {
                continue;
            }
            let key = format!("keybind_{}", def.name);
            self.conf.set(&key, self.keybinds.get(id));
        }

        self.conf.set("noteKeys", self.note_keys.encode());

        for (i, def) in COLORS.iter().enumerate() {
            self.conf.set(def.name, self.colors.get(i));
        }

        self.dispatch = compile(&self.registry, &self.keybinds);
        self.midi_map.compile();
        save_midi_map(&self.midi_map, &self.midi_map_path(), &self.registry)?;
        self.conf.save()?;
        Ok(())
    }

    /// Drop un-committed edits.
    pub fn revert(&mut self) {
        self.sync();
    }

    /// Path of the current device's map file.
    pub fn midi_map_path(&self) -> PathBuf {
        self.config_dir
            .join(map_file_name(&self.settings.midi_in_device))
    }

    /// Replace the map with the selected device's persisted one (or a
    /// default map for a device that has never been configured).
    pub fn reload_midi_map(&mut self) {
        self.midi_map = load_midi_map(&self.midi_map_path(), &self.registry).unwrap_or_default();
        self.midi_map.compile();
    }

    /// Select a different MIDI input device, reloading its map.
    pub fn set_midi_in_device(&mut self, name: &str) {
        if self.settings.midi_in_device == name {
            return;
        }
        self.settings.midi_in_device = name.to_string();
        self.reload_midi_map();
    }

    /// Route one raw key event.
    ///
    /// While a binding capture is pending, the dispatch path is bypassed
    /// and the event completes the capture instead; otherwise the event
    /// is resolved against the given context's dispatch map.
    pub fn handle_key(&mut self, context: Context, code: RawKey) -> Option<ActionId> {
        if self.capture.is_active() {
            self.capture.feed(&mut self.keybinds, code);
            self.dispatch = compile(&self.registry, &self.keybinds);
            return None;
        }
        self.dispatch.lookup(context, code)
    }

    /// Arm a binding capture for `target`.
    pub fn begin_capture(&mut self, target: ActionId) {
        self.capture.begin(&mut self.keybinds, target);
    }

    /// Abort a pending capture, restoring the previous binding.
    pub fn cancel_capture(&mut self) {
        self.capture.cancel(&mut self.keybinds);
        self.dispatch = compile(&self.registry, &self.keybinds);
    }

    /// Unbind one action.
    pub fn clear_bind(&mut self, id: ActionId) {
        self.keybinds.clear(id);
        self.dispatch = compile(&self.registry, &self.keybinds);
    }

    /// Restore all keybinds to catalog defaults.
    pub fn reset_keybinds(&mut self) {
        self.keybinds.reset(&self.registry);
        self.dispatch = compile(&self.registry, &self.keybinds);
    }

    /// Restore all colors to catalog defaults.
    pub fn reset_colors(&mut self) {
        self.colors.reset();
    }

    /// Import keybinds from a file, recompiling on success.
    pub fn import_keybinds(&mut self, path: &std::path::Path) -> bool {
        let ok = crate::io::import_keybinds(path, &self.registry, &mut self.keybinds);
        if ok {
            self.dispatch = compile(&self.registry, &self.keybinds);
        }
        ok
    }

    pub fn export_keybinds(&self, path: &std::path::Path) -> bool {
        crate::io::export_keybinds(path, &self.registry, &self.keybinds)
    }

    pub fn import_colors(&mut self, path: &std::path::Path) -> bool {
        crate::io::import_colors(path, &mut self.colors)
    }

    pub fn export_colors(&self, path: &std::path::Path) -> bool {
        crate::io::export_colors(path, &self.colors)
    }
}
