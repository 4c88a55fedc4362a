//! The storage write-log engine — `spec.md` §4.4. Point lookups resolve
//! against a chain of `SStore` overlays the same way `buffer::read_byte`
//! resolves against write/copy overlays, grounded in the same
//! `fuel-vm/src/interpreter/blockchain.rs` `state_read_word` /
//! `state_write_word` pattern, generalized from a flat key-value store
//! backed by an external trait to an immutable overlay chain.
//!
//! `readStorage` is the one place in the algebra that can't always produce
//! an answer in-process: a literal key against an `EmptyStore` or
//! `AbstractStore` base names a slot with no populated map behind it (no
//! writes recorded, and for `AbstractStore` no map at all — its concrete
//! contents live outside this crate, in the account's real on-chain
//! storage), so resolution there returns `None` to tell the caller to go
//! fetch it — `spec.md` §8 scenario S5, §9.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::expr::{EWord, Storage};
use crate::word::U256;

/// `readStorage(key, store) -> Option<EWord>`.
///
/// `Some(_)` covers every case the algebra can settle on its own, whether
/// that's a folded literal or a residual `SLoad` node. `None` is reserved
/// for a literal key whose nearest concrete information is an `EmptyStore`,
/// a `ConcreteStore` miss, or an `AbstractStore` — none of those name a
/// recorded value for that slot, so nothing in the expression can answer
/// it; only an external state fetch can. `EmptyStore` is indistinguishable
/// from an empty `ConcreteStore` for reads, and both behave the same way
/// here.
pub fn read_storage(key: &EWord, store: &Storage) -> Option<EWord> {
    let mut cur = store.clone();

    loop {
        match &cur {
            Storage::EmptyStore => {
                return match key {
                    EWord::Lit(k) => {
                        tracing::trace!(slot = %k, "no writes and no backing store, external fetch required");
                        None
                    }
                    _ => Some(EWord::SLoad(Arc::new(key.clone()), Arc::new(cur.clone()))),
                };
            }

            Storage::ConcreteStore(map) => {
                return match key {
                    EWord::Lit(k) => map.get(k).copied().map(EWord::Lit),
                    _ => Some(EWord::SLoad(Arc::new(key.clone()), Arc::new(cur.clone()))),
                };
            }

            Storage::AbstractStore(name) => {
                return match key {
                    EWord::Lit(k) => {
                        tracing::trace!(store = %name, slot = %k, "concrete slot not covered by any write, external fetch required");
                        None
                    }
                    _ => Some(EWord::SLoad(Arc::new(key.clone()), Arc::new(cur.clone()))),
                };
            }

            Storage::SStore(k, v, base) => match (key, k.as_ref()) {
                (EWord::Lit(a), EWord::Lit(b)) if a == b => return Some((**v).clone()),
                (EWord::Lit(_), EWord::Lit(_)) => {
                    cur = (**base).clone();
                }
                _ => return Some(EWord::SLoad(Arc::new(key.clone()), Arc::new(cur.clone()))),
            },
        }
    }
}

/// `writeStorage(key, val, store) -> Storage`.
pub fn write_storage(key: EWord, val: EWord, store: Storage) -> Storage {
    if let (EWord::Lit(k), EWord::Lit(v), Storage::ConcreteStore(map)) = (&key, &val, &store) {
        let mut new_map: BTreeMap<U256, U256> = (**map).clone();
        new_map.insert(*k, *v);
        return Storage::ConcreteStore(Arc::new(new_map));
    }

    Storage::SStore(Arc::new(key), Arc::new(val), Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s5_empty_store_asks_for_external_fetch() {
        assert_eq!(read_storage(&EWord::Lit(U256::from(3u64)), &Storage::EmptyStore), None);
    }

    #[test]
    fn symbolic_key_against_empty_store_stays_residual() {
        let sym = EWord::Var(Arc::from("slot"));
        assert!(matches!(read_storage(&sym, &Storage::EmptyStore), Some(EWord::SLoad(_, _))));
    }

    #[test]
    fn scenario_s5_write_then_read_same_slot() {
        let store = write_storage(EWord::Lit(U256::from(1u64)), EWord::Lit(U256::from(99u64)), Storage::EmptyStore);
        assert_eq!(read_storage(&EWord::Lit(U256::from(1u64)), &store), Some(EWord::Lit(U256::from(99u64))));
    }

    #[test]
    fn scenario_s7_overwrite_returns_latest_write() {
        let store = Storage::EmptyStore;
        let store = write_storage(EWord::Lit(U256::from(1u64)), EWord::Lit(U256::from(1u64)), store);
        let store = write_storage(EWord::Lit(U256::from(1u64)), EWord::Lit(U256::from(2u64)), store);
        assert_eq!(read_storage(&EWord::Lit(U256::from(1u64)), &store), Some(EWord::Lit(U256::from(2u64))));
    }

    #[test]
    fn scenario_s8_disjoint_write_is_invisible() {
        let store = write_storage(EWord::Lit(U256::from(1u64)), EWord::Lit(U256::from(42u64)), Storage::EmptyStore);
        assert_eq!(read_storage(&EWord::Lit(U256::from(2u64)), &store), None);
    }

    #[test]
    fn concrete_store_folds_through_clone_on_write() {
        let mut map = BTreeMap::new();
        map.insert(U256::from(5u64), U256::from(500u64));
        let store = Storage::ConcreteStore(Arc::new(map));
        let store = write_storage(EWord::Lit(U256::from(6u64)), EWord::Lit(U256::from(600u64)), store);
        assert_eq!(read_storage(&EWord::Lit(U256::from(5u64)), &store), Some(EWord::Lit(U256::from(500u64))));
        assert_eq!(read_storage(&EWord::Lit(U256::from(6u64)), &store), Some(EWord::Lit(U256::from(600u64))));
    }

    #[test]
    fn concrete_store_miss_asks_for_external_fetch_like_empty_store() {
        let mut map = BTreeMap::new();
        map.insert(U256::from(5u64), U256::from(500u64));
        let store = Storage::ConcreteStore(Arc::new(map));
        assert_eq!(read_storage(&EWord::Lit(U256::from(6u64)), &store), None);
        assert_eq!(read_storage(&EWord::Lit(U256::from(6u64)), &store), read_storage(&EWord::Lit(U256::from(6u64)), &Storage::EmptyStore));
    }

    #[test]
    fn abstract_store_literal_key_asks_for_external_fetch() {
        let store = Storage::AbstractStore(Arc::from("account-1"));
        assert_eq!(read_storage(&EWord::Lit(U256::from(3u64)), &store), None);
    }

    #[test]
    fn abstract_store_symbolic_key_stays_residual() {
        let store = Storage::AbstractStore(Arc::from("account-1"));
        let key = EWord::Var(Arc::from("slot"));
        let result = read_storage(&key, &store);
        assert!(matches!(result, Some(EWord::SLoad(_, _))));
    }

    #[test]
    fn symbolic_key_against_sstore_chain_builds_residual() {
        let store = write_storage(EWord::Lit(U256::from(1u64)), EWord::Lit(U256::from(99u64)), Storage::EmptyStore);
        let key = EWord::Var(Arc::from("slot"));
        let result = read_storage(&key, &store);
        assert!(matches!(result, Some(EWord::SLoad(_, _))));
    }

    #[test]
    fn deep_sstore_chain_does_not_overflow_stack() {
        let mut store = Storage::EmptyStore;
        for i in 0..50_000u64 {
            store = write_storage(EWord::Lit(U256::from(i)), EWord::Lit(U256::from(i * 2)), store);
        }
        assert_eq!(read_storage(&EWord::Lit(U256::from(49_999u64)), &store), Some(EWord::Lit(U256::from(99_998u64))));
    }
}
