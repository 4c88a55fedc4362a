//! Integration tests for the concrete word kernel and its smart
//! constructors: scenario S4 plus determinism checks that only make sense
//! from outside the crate.

use evm_symbolic_core::prelude::*;

fn neg(x: U256) -> U256 {
    (!x).wrapping_add(U256::from(1u64))
}

#[test]
fn scenario_s4_signed_division_rounds_toward_zero() {
    let lhs = EWord::Lit(neg(U256::from(7u64)));
    let rhs = EWord::Lit(U256::from(2u64));
    let result = sdiv_s(lhs, rhs);
    assert_eq!(result, EWord::Lit(neg(U256::from(3u64))));
}

#[test]
fn scenario_s4_positive_division_matches_unsigned() {
    let result = sdiv_s(EWord::Lit(U256::from(7u64)), EWord::Lit(U256::from(2u64)));
    assert_eq!(result, EWord::Lit(U256::from(3u64)));
}

#[test]
fn fully_concrete_expression_folds_all_the_way_down() {
    let a = add_s(EWord::Lit(U256::from(2u64)), EWord::Lit(U256::from(3u64)));
    let b = mul_s(a, EWord::Lit(U256::from(10u64)));
    assert_eq!(b, EWord::Lit(U256::from(50u64)));
}

#[test]
fn one_symbolic_operand_prevents_folding() {
    let x = EWord::Var(std::sync::Arc::from("x"));
    let result = add_s(x.clone(), EWord::Lit(U256::from(1u64)));
    assert!(result.as_lit().is_none());
    assert_eq!(result, EWord::Add(std::sync::Arc::new(x), std::sync::Arc::new(EWord::Lit(U256::from(1u64)))));
}

#[test]
fn div_and_mod_by_zero_are_total() {
    let x = EWord::Lit(U256::from(42u64));
    assert_eq!(div_s(x.clone(), EWord::Lit(U256::ZERO)), EWord::Lit(U256::ZERO));
    assert_eq!(mod_s(x.clone(), EWord::Lit(U256::ZERO)), EWord::Lit(U256::ZERO));
    assert_eq!(sdiv_s(x.clone(), EWord::Lit(U256::ZERO)), EWord::Lit(U256::ZERO));
    assert_eq!(smod_s(x, EWord::Lit(U256::ZERO)), EWord::Lit(U256::ZERO));
}

#[test]
fn shift_by_256_or_more_is_zero() {
    let v = EWord::Lit(U256::MAX);
    assert_eq!(shl_s(EWord::Lit(U256::from(256u64)), v.clone()), EWord::Lit(U256::ZERO));
    assert_eq!(shr_s(EWord::Lit(U256::from(1000u64)), v), EWord::Lit(U256::ZERO));
}

#[test]
fn addmod_and_mulmod_reduce_modulo_z() {
    let x = EWord::Lit(U256::MAX);
    let y = EWord::Lit(U256::MAX);
    let z = EWord::Lit(U256::from(7u64));
    let sum = addmod_s(x, y, z.clone());
    let EWord::Lit(sum_v) = sum else { panic!("expected literal") };
    assert!(sum_v < U256::from(7u64));

    let prod = mulmod_s(EWord::Lit(U256::MAX), EWord::Lit(U256::MAX), z);
    let EWord::Lit(prod_v) = prod else { panic!("expected literal") };
    assert!(prod_v < U256::from(7u64));
}
