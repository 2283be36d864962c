//! Concurrent first-visit-wins reachability accumulator.

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, ReadOnlyView};

use rewind_core::types::collections::FxBuildHasher;
use rewind_core::types::{DeclarationId, SymbolId};

/// Symbols proven reachable from entry points, each mapped to one
/// representative declaration site.
///
/// [`insert_if_absent`](Self::insert_if_absent) is the sole admission
/// gate for traversal: a failed insert means some exploration already
/// owns the symbol. The same check breaks call cycles and deduplicates
/// shared callees, so the explorer carries no separate visited state.
///
/// For a symbol declared at several sites, the representative is
/// whichever site's insert won; callers must not rely on the choice.
#[derive(Debug, Default)]
pub struct ReachabilitySet {
    visited: DashMap<SymbolId, DeclarationId, FxBuildHasher>,
}

impl ReachabilitySet {
    pub fn new() -> Self {
        Self {
            visited: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Atomically record `symbol -> declaration` unless the symbol is
    /// already present. Returns `true` when this call was the first visit.
    pub fn insert_if_absent(&self, symbol: SymbolId, declaration: DeclarationId) -> bool {
        match self.visited.entry(symbol) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(declaration);
                true
            }
        }
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.visited.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Seal the set for reconciliation. Consuming `self` guarantees no
    /// writer survives the hand-off.
    pub fn freeze(self) -> FrozenReachability {
        FrozenReachability {
            visited: self.visited.into_read_only(),
        }
    }
}

/// Immutable view of a sealed [`ReachabilitySet`], the form the
/// reconciler reads after every producer has joined.
pub struct FrozenReachability {
    visited: ReadOnlyView<SymbolId, DeclarationId, FxBuildHasher>,
}

impl std::fmt::Debug for FrozenReachability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrozenReachability")
            .field("len", &self.len())
            .finish()
    }
}

impl FrozenReachability {
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.visited.contains_key(&symbol)
    }

    /// The declaration site recorded for `symbol` at first visit.
    pub fn representative(&self, symbol: SymbolId) -> Option<DeclarationId> {
        self.visited.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.visited.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    #[test]
    fn first_insert_wins() {
        let set = ReachabilitySet::new();
        let symbol = SymbolId::new(3);

        assert!(set.insert_if_absent(symbol, DeclarationId::new(7)));
        assert!(!set.insert_if_absent(symbol, DeclarationId::new(9)));
        assert_eq!(set.len(), 1);

        let frozen = set.freeze();
        assert_eq!(frozen.representative(symbol), Some(DeclarationId::new(7)));
    }

    #[test]
    fn contains_tracks_inserts() {
        let set = ReachabilitySet::new();
        assert!(set.is_empty());
        assert!(!set.contains(SymbolId::new(0)));

        set.insert_if_absent(SymbolId::new(0), DeclarationId::new(0));
        assert!(set.contains(SymbolId::new(0)));
        assert!(!set.contains(SymbolId::new(1)));
    }

    #[test]
    fn freeze_preserves_contents() {
        let set = ReachabilitySet::new();
        for raw in 0..64u32 {
            set.insert_if_absent(SymbolId::new(raw), DeclarationId::new(raw));
        }

        let frozen = set.freeze();
        assert_eq!(frozen.len(), 64);
        assert!(frozen.contains(SymbolId::new(63)));
        assert_eq!(frozen.symbols().count(), 64);
    }

    #[test]
    fn concurrent_inserts_admit_exactly_one_winner_per_symbol() {
        let set = ReachabilitySet::new();
        let symbols = 512u32;
        let attempts_per_symbol = 8u32;

        // Every (symbol, attempt) pair races; exactly one attempt per
        // symbol may report a first visit.
        let wins: usize = (0..symbols * attempts_per_symbol)
            .into_par_iter()
            .map(|raw| {
                let symbol = SymbolId::new(raw % symbols);
                let declaration = DeclarationId::new(raw);
                usize::from(set.insert_if_absent(symbol, declaration))
            })
            .sum();

        assert_eq!(wins, symbols as usize);
        assert_eq!(set.len(), symbols as usize);
    }
}
