use std::collections::HashMap;
use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::config::CombatConfig;
use crate::procs::{ProcData, ProcKind, handlers};
use crate::state::{Combatant, Timestamp};

/// Everything a proc handler may read or mutate.
pub struct ProcContext<'a> {
    pub attacker: &'a Combatant,
    pub target: &'a mut Combatant,
    pub now: Timestamp,
    pub data: &'a ProcData,
    pub config: &'a CombatConfig,
}

/// A proc handler mutates the target and returns extra damage to land.
///
/// The returned damage is applied by the caller so down-state resolution stays
/// in one place.
pub type ProcHandler = fn(&mut ProcContext<'_>) -> u32;

/// Tag → handler dispatch table.
#[derive(Clone, Debug)]
pub struct ProcRegistry {
    handlers: HashMap<ProcKind, ProcHandler>,
}

impl ProcRegistry {
    /// A registry with no handlers; every dispatch is a no-op.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with every built-in handler.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for kind in ProcKind::iter() {
            registry.register(kind, handlers::builtin(kind));
        }
        registry
    }

    /// Installs `handler` for `kind`, returning the handler it replaced.
    pub fn register(&mut self, kind: ProcKind, handler: ProcHandler) -> Option<ProcHandler> {
        self.handlers.insert(kind, handler)
    }

    pub fn handler(&self, kind: ProcKind) -> Option<ProcHandler> {
        self.handlers.get(&kind).copied()
    }

    /// Runs the handler registered for `tag`. Unknown or unregistered tags
    /// return 0 without touching the target.
    pub fn dispatch(&self, tag: &str, ctx: &mut ProcContext<'_>) -> u32 {
        let Ok(kind) = ProcKind::from_str(tag) else {
            tracing::trace!(tag, "ignoring unknown proc tag");
            return 0;
        };
        let Some(handler) = self.handler(kind) else {
            return 0;
        };
        let extra = handler(ctx);
        tracing::debug!(
            proc = %kind,
            attacker = %ctx.attacker.id,
            target = %ctx.target.id,
            extra,
            "proc fired"
        );
        extra
    }
}

impl Default for ProcRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
