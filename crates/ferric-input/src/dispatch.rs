//! Dispatch map compilation
//!
//! Turns the binding table into seven per-context lookup maps
//! (`raw key-code → action id`) so the event loop resolves a shortcut with
//! one hash lookup. Compilation is a pure function of the table and must
//! be re-run after every table change, load, import, or reset.
//!
//! Duplicate resolution is part of the contract: the compiler walks each
//! context's id range in increasing order and overwrites on collision, so
//! of two actions sharing a code within one context the higher-indexed
//! one wins.

use std::collections::HashMap;

use crate::action::{ActionId, ActionRegistry, Context, CONTEXTS};
use crate::binds::BindingTable;
use crate::key::{has_key, RawKey};

/// One compiled lookup table per usage context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchMaps {
    pub global: HashMap<RawKey, ActionId>,
    pub pattern: HashMap<RawKey, ActionId>,
    pub ins_list: HashMap<RawKey, ActionId>,
    pub wave_list: HashMap<RawKey, ActionId>,
    pub sample_list: HashMap<RawKey, ActionId>,
    pub sample: HashMap<RawKey, ActionId>,
    pub orders: HashMap<RawKey, ActionId>,
}

impl DispatchMaps {
    pub fn for_context(&self, context: Context) -> &HashMap<RawKey, ActionId> {
        match context {
            Context::Global => &self.global,
            Context::Pattern => &self.pattern,
            Context::InsList => &self.ins_list,
            Context::WaveList => &self.wave_list,
            Context::SampleList => &self.sample_list,
            Context::Sample => &self.sample,
            Context::Orders => &self.orders,
        }
    }

    fn for_context_mut(&mut self, context: Context) -> &mut HashMap<RawKey, ActionId> {
        match context {
            Context::Global => &mut self.global,
            Context::Pattern => &mut self.pattern,
            Context::InsList => &mut self.ins_list,
            Context::WaveList => &mut self.wave_list,
            Context::SampleList => &mut self.sample_list,
            Context::Sample => &mut self.sample,
            Context::Orders => &mut self.orders,
        }
    }

    /// Resolve a raw key-code in one context.
    pub fn lookup(&self, context: Context, code: RawKey) -> Option<ActionId> {
        self.for_context(context).get(&code).copied()
    }
}

/// Compile the binding table into dispatch maps.
pub fn compile(registry: &ActionRegistry, table: &BindingTable) -> DispatchMaps {
    let mut maps = DispatchMaps::default();
    for context in CONTEXTS {
        let (min, max) = registry.range(context);
        let map = maps.for_context_mut(context);
        for id in min + 1..max {
            let code = table.get(id);
            if has_key(code) {
                map.insert(code, id);
            }
        }
    }
    maps
}
