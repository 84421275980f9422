//! Property-Based Test Generators
//!
//! Provides proptest strategies for raw identifiers and reimbursement
//! candidates.

use core_kernel::UserId;
use domain_reimbursement::ReimbursementCandidate;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for raw ids that satisfy the id predicate
pub fn valid_raw_id_strategy() -> impl Strategy<Value = String> {
    (1i32..=i32::MAX).prop_map(|n| n.to_string())
}

/// Strategy for raw ids that are zero or negative
pub fn non_positive_raw_id_strategy() -> impl Strategy<Value = String> {
    (i32::MIN..=0i32).prop_map(|n| n.to_string())
}

/// Strategy for raw ids with a fractional part
pub fn fractional_raw_id_strategy() -> impl Strategy<Value = String> {
    (0i32..100_000, 1u32..1000).prop_map(|(whole, frac)| format!("{}.{:03}", whole, frac))
}

/// Strategy for every kind of invalid raw id
pub fn invalid_raw_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        non_positive_raw_id_strategy(),
        fractional_raw_id_strategy(),
        Just("NaN".to_string()),
        Just("Infinity".to_string()),
        Just(String::new()),
        "[a-z]{1,8}",
    ]
}

/// Strategy for non-negative amounts with cents
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for candidates that pass validation
pub fn valid_candidate_strategy() -> impl Strategy<Value = ReimbursementCandidate> {
    (
        amount_strategy(),
        "[A-Za-z][A-Za-z ]{0,60}",
        1i32..1000,
        proptest::option::of(1i32..1000),
        1i32..=3,
        1i32..=4,
    )
        .prop_map(|(amount, description, author, resolver, status, kind)| {
            ReimbursementCandidate {
                id: None,
                amount,
                submitted: None,
                resolved: None,
                description,
                receipt: None,
                author_id: UserId::new(author),
                resolver_id: resolver.map(UserId::new),
                reimb_status_id: status,
                reimb_type_id: kind,
            }
        })
}
