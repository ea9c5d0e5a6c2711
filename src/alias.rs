use std::{
    fmt,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use smol_str::{SmolStr, format_smolstr};

/// Hands out names for derived tables. Every call must return a name not
/// returned before by the same generator.
pub trait AliasGenerator: fmt::Debug + Send + Sync {
    fn next_alias(&self, prefix: &str) -> SmolStr;
}

/// Monotonic `<prefix><n>` aliases, starting at 1.
#[derive(Debug, Default)]
pub struct AliasSequence {
    next: AtomicU64,
}

static SHARED: OnceLock<Arc<AliasSequence>> = OnceLock::new();

impl AliasSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide sequence used by builders that were not given a
    /// generator of their own.
    pub fn shared() -> Arc<AliasSequence> {
        SHARED.get_or_init(|| Arc::new(AliasSequence::new())).clone()
    }
}

impl AliasGenerator for AliasSequence {
    fn next_alias(&self, prefix: &str) -> SmolStr {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format_smolstr!("{prefix}{id}")
    }
}
