//! Custom Test Assertions
//!
//! Provides assertion helpers for service results and persisted records that
//! give more meaningful failure messages than bare `assert!`.

use std::fmt::Debug;

use domain_reimbursement::{Reimbursement, ReimbursementCandidate, ReimbursementError};

/// Asserts that a result failed with `BadRequest`
///
/// # Panics
///
/// Panics if the result is `Ok` or carries another error kind
pub fn assert_bad_request<T: Debug>(result: &Result<T, ReimbursementError>) {
    match result {
        Err(ReimbursementError::BadRequest(_)) => {}
        other => panic!("Expected BadRequest, got {:?}", other),
    }
}

/// Asserts that a result failed with `ResourceNotFound`
pub fn assert_not_found<T: Debug>(result: &Result<T, ReimbursementError>) {
    match result {
        Err(ReimbursementError::ResourceNotFound(_)) => {}
        other => panic!("Expected ResourceNotFound, got {:?}", other),
    }
}

/// Asserts that a result failed with `InternalServerError`
pub fn assert_internal_error<T: Debug>(result: &Result<T, ReimbursementError>) {
    match result {
        Err(ReimbursementError::InternalServerError(_)) => {}
        other => panic!("Expected InternalServerError, got {:?}", other),
    }
}

/// Asserts that a persisted record carries every mutable field of a candidate
///
/// `id`, `submitted`, and `receipt` are not compared; storage owns them.
pub fn assert_matches_candidate(actual: &Reimbursement, candidate: &ReimbursementCandidate) {
    assert_eq!(actual.amount, candidate.amount, "amount mismatch");
    assert_eq!(actual.description, candidate.description, "description mismatch");
    assert_eq!(actual.author_id, candidate.author_id, "author_id mismatch");
    assert_eq!(actual.resolver_id, candidate.resolver_id, "resolver_id mismatch");
    assert_eq!(actual.resolved, candidate.resolved, "resolved mismatch");
    assert_eq!(actual.reimb_status_id, candidate.reimb_status_id, "reimb_status_id mismatch");
    assert_eq!(actual.reimb_type_id, candidate.reimb_type_id, "reimb_type_id mismatch");
}

/// Asserts that reimbursements are in strictly ascending id order
pub fn assert_ordered_by_id(reimbursements: &[Reimbursement]) {
    for pair in reimbursements.windows(2) {
        assert!(
            pair[0].id < pair[1].id,
            "Expected ascending ids, found {} before {}",
            pair[0].id,
            pair[1].id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{CandidateFixtures, ReimbursementFixtures};

    #[test]
    fn test_assert_bad_request_accepts_bad_request() {
        let result: Result<(), _> = Err(ReimbursementError::bad_request("id"));
        assert_bad_request(&result);
    }

    #[test]
    #[should_panic(expected = "Expected ResourceNotFound")]
    fn test_assert_not_found_rejects_ok() {
        let result: Result<u8, ReimbursementError> = Ok(1);
        assert_not_found(&result);
    }

    #[test]
    fn test_assert_matches_candidate_ignores_identity() {
        let lunch = ReimbursementFixtures::lunch_conference();
        let mut candidate = CandidateFixtures::lunch_approved();
        candidate.reimb_status_id = lunch.reimb_status_id;
        candidate.submitted = None;

        assert_matches_candidate(&lunch, &candidate);
    }

    #[test]
    fn test_fixtures_are_ordered() {
        assert_ordered_by_id(&ReimbursementFixtures::all());
    }
}
