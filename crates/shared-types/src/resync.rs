//! Outcome of a projection resync pass.

/// What a projector changed while reconciling against an authority snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResyncReport {
    /// Entries the snapshot had and the projection was missing.
    pub added: usize,
    /// Entries the projection had and the snapshot contradicted.
    pub removed: usize,
}

impl ResyncReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            added: self.added + other.added,
            removed: self.removed + other.removed,
        }
    }
}
