//! Key binding table and modal capture
//!
//! The table holds one raw key-code per catalog entry. Setting or clearing
//! never checks for duplicates; two actions in the same context may share a
//! code, and the dispatch compiler resolves that deterministically
//! (last-wins). Capture is a two-state machine: while a capture is pending
//! the normal shortcut-dispatch path is bypassed and exactly one raw key
//! event becomes the new binding.

use crate::action::{ActionId, ActionRegistry};
use crate::key::RawKey;

/// Mutable `action id → raw key-code` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    keys: Vec<RawKey>,
}

impl BindingTable {
    /// Build a table holding every action's default binding.
    pub fn with_defaults(registry: &ActionRegistry) -> Self {
        let keys = registry
            .defs()
            .iter()
            .map(|d| d.default_bind.unwrap_or(0))
            .collect();
        Self { keys }
    }

    pub fn get(&self, id: ActionId) -> RawKey {
        self.keys[id]
    }

    pub fn set(&mut self, id: ActionId, code: RawKey) {
        self.keys[id] = code;
    }

    /// Unbind an action (right-click on a binding button).
    pub fn clear(&mut self, id: ActionId) {
        self.keys[id] = 0;
    }

    /// Restore every action to its catalog default.
    pub fn reset(&mut self, registry: &ActionRegistry) {
        for (id, def) in registry.defs().iter().enumerate() {
            self.keys[id] = def.default_bind.unwrap_or(0);
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Capture progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    /// Waiting for one key event to bind to `target`. `previous` is the
    /// binding the action had before the capture started, so a cancel can
    /// restore it.
    Awaiting {
        target: ActionId,
        previous: RawKey,
    },
}

/// Modal key-binding capture.
///
/// `begin` clears the target's binding and suspends dispatch (callers
/// consult `is_active` before routing key events to the dispatch maps);
/// the next key event fed in completes the capture unconditionally.
/// Non-key events leave the state untouched; `cancel` restores the
/// pre-capture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyCapture {
    state: CaptureState,
}

impl KeyCapture {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CaptureState::Awaiting { .. })
    }

    /// Arm a capture for `target`. A capture already pending for another
    /// action is abandoned without restoring it, matching the editor
    /// behavior of clicking another binding button mid-capture.
    pub fn begin(&mut self, table: &mut BindingTable, target: ActionId) {
        let previous = table.get(target);
        table.clear(target);
        self.state = CaptureState::Awaiting { target, previous };
        log::debug!("keybind capture armed for action {}", target);
    }

    /// Feed one raw key event. Returns the action that received the new
    /// binding, or `None` when no capture was pending.
    pub fn feed(&mut self, table: &mut BindingTable, code: RawKey) -> Option<ActionId> {
        match self.state {
            CaptureState::Idle => None,
            CaptureState::Awaiting { target, .. } => {
                table.set(target, code);
                self.state = CaptureState::Idle;
                Some(target)
            }
        }
    }

    /// Abort a pending capture, restoring the previous binding.
    pub fn cancel(&mut self, table: &mut BindingTable) {
        if let CaptureState::Awaiting { target, previous } = self.state {
            table.set(target, previous);
            self.state = CaptureState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{sc, MOD_CTRL};

    fn setup() -> (ActionRegistry, BindingTable) {
        let reg = ActionRegistry::new();
        let table = BindingTable::with_defaults(&reg);
        (reg, table)
    }

    #[test]
    fn test_defaults_from_registry() {
        let (reg, table) = setup();
        let open = reg.find_by_name("OPEN").unwrap();
        assert_eq!(table.get(open), MOD_CTRL | sc::O);
        // sentinels come out unbound
        let (min, _) = reg.range(crate::action::Context::Global);
        assert_eq!(table.get(min), 0);
    }

    #[test]
    fn test_set_allows_duplicates() {
        let (reg, mut table) = setup();
        let a = reg.find_by_name("PLAY").unwrap();
        let b = reg.find_by_name("STOP").unwrap();
        table.set(a, sc::F5);
        table.set(b, sc::F5);
        assert_eq!(table.get(a), sc::F5);
        assert_eq!(table.get(b), sc::F5);
    }

    #[test]
    fn test_capture_completes_on_key() {
        let (reg, mut table) = setup();
        let open = reg.find_by_name("OPEN").unwrap();
        let mut capture = KeyCapture::new();

        capture.begin(&mut table, open);
        assert!(capture.is_active());
        assert_eq!(table.get(open), 0);

        let done = capture.feed(&mut table, sc::F1);
        assert_eq!(done, Some(open));
        assert!(!capture.is_active());
        assert_eq!(table.get(open), sc::F1);
    }

    #[test]
    fn test_capture_cancel_restores() {
        let (reg, mut table) = setup();
        let open = reg.find_by_name("OPEN").unwrap();
        let before = table.get(open);
        let mut capture = KeyCapture::new();

        capture.begin(&mut table, open);
        capture.cancel(&mut table);
        assert!(!capture.is_active());
        assert_eq!(table.get(open), before);
    }

    #[test]
    fn test_feed_without_capture_is_noop() {
        let (_, mut table) = setup();
        let mut capture = KeyCapture::new();
        assert_eq!(capture.feed(&mut table, sc::A), None);
    }

    #[test]
    fn test_reset() {
        let (reg, mut table) = setup();
        let open = reg.find_by_name("OPEN").unwrap();
        table.set(open, sc::F8);
        table.reset(&reg);
        assert_eq!(table.get(open), MOD_CTRL | sc::O);
    }
}
