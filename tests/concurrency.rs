//! `spec.md` §5: "safe to call from parallel threads without
//! synchronization provided the language's memory model publishes the
//! constructed IR values safely." This builds one overlay chain, shares
//! it across a `rayon` thread pool by reference, and has every thread
//! read from it concurrently — exercising real cross-thread sharing
//! (made possible by `Arc`-linked nodes, see `DESIGN.md`'s Open Question
//! decision on `Rc` vs `Arc`), not per-thread private clones. Shaped
//! after the teacher's `rayon`-based ALU fuzz tests, retargeted from VM
//! execution to algebra evaluation.

use evm_symbolic_core::prelude::*;
use rayon::prelude::*;

fn build_shared_chain() -> Buf {
    let mut buf = Buf::ConcreteBuf(std::sync::Arc::from(vec![0u8; 4096].into_boxed_slice()));
    for i in 0..200u64 {
        let offset = (i * 17) % 4000;
        buf = write_word(EWord::Lit(U256::from(offset)), EWord::Lit(U256::from(i)), buf);
    }
    buf
}

#[test]
fn many_threads_read_the_same_shared_overlay_chain_consistently() {
    let shared = build_shared_chain();

    let offsets: Vec<u64> = (0..4096).collect();

    let parallel: Vec<Byte> = offsets
        .par_iter()
        .map(|&off| read_byte(&EWord::Lit(U256::from(off)), &shared))
        .collect();

    let sequential: Vec<Byte> = offsets.iter().map(|&off| read_byte(&EWord::Lit(U256::from(off)), &shared)).collect();

    assert_eq!(parallel, sequential);
}

#[test]
fn many_threads_read_the_same_shared_storage_chain_consistently() {
    let mut store = Storage::EmptyStore;
    for i in 0..500u64 {
        store = write_storage(EWord::Lit(U256::from(i)), EWord::Lit(U256::from(i * i)), store);
    }
    let store = store;

    let keys: Vec<u64> = (0..500).collect();

    let parallel: Vec<Option<EWord>> = keys.par_iter().map(|&k| read_storage(&EWord::Lit(U256::from(k)), &store)).collect();
    let sequential: Vec<Option<EWord>> = keys.iter().map(|&k| read_storage(&EWord::Lit(U256::from(k)), &store)).collect();

    assert_eq!(parallel, sequential);
    for (k, v) in keys.iter().zip(parallel.iter()) {
        assert_eq!(*v, Some(EWord::Lit(U256::from(k * k))));
    }
}

#[test]
fn many_independent_expressions_fold_consistently_in_parallel() {
    let seeds: Vec<u64> = (0..10_000).collect();

    let parallel_results: Vec<U256> = seeds.par_iter().map(|&seed| fold_expression(seed)).collect();
    let sequential_results: Vec<U256> = seeds.iter().map(|&seed| fold_expression(seed)).collect();

    assert_eq!(parallel_results, sequential_results);
}

fn fold_expression(seed: u64) -> U256 {
    let a = EWord::Lit(U256::from(seed));
    let b = EWord::Lit(U256::from(seed.wrapping_mul(3).wrapping_add(1)));
    let sum = add_s(a, b);
    let doubled = mul_s(sum, EWord::Lit(U256::from(2u64)));
    let masked = and_s(doubled, EWord::Lit(U256::from(0xFFFFu64)));
    masked.as_lit().expect("fully concrete inputs fold to a literal")
}
