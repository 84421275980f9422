//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDateTime;
use core_kernel::{ReimbursementId, UserId};
use domain_reimbursement::{
    Reimbursement, ReimbursementCandidate, ReimbursementStatus, ReimbursementType,
};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{TemporalFixtures, UserFixtures};

/// Builder for client-supplied candidates
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    candidate: ReimbursementCandidate,
}

impl Default for CandidateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateBuilder {
    /// Creates a builder for a valid pending food claim
    pub fn new() -> Self {
        Self {
            candidate: ReimbursementCandidate {
                id: None,
                amount: dec!(12.50),
                submitted: None,
                resolved: None,
                description: "Team breakfast".to_string(),
                receipt: None,
                author_id: UserFixtures::employee(),
                resolver_id: None,
                reimb_status_id: ReimbursementStatus::Pending.id(),
                reimb_type_id: ReimbursementType::Food.id(),
            },
        }
    }

    /// Uses a random lorem-ipsum description
    pub fn with_random_description(mut self) -> Self {
        self.candidate.description = Sentence(2..6).fake();
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.candidate.id = Some(ReimbursementId::new(id));
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.candidate.amount = amount;
        self
    }

    pub fn with_submitted(mut self, submitted: NaiveDateTime) -> Self {
        self.candidate.submitted = Some(submitted);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.candidate.description = description.into();
        self
    }

    pub fn with_author(mut self, author: UserId) -> Self {
        self.candidate.author_id = author;
        self
    }

    /// Marks the claim resolved by `resolver` with the given status
    pub fn resolved_by(
        mut self,
        resolver: UserId,
        status: ReimbursementStatus,
        at: NaiveDateTime,
    ) -> Self {
        self.candidate.resolver_id = Some(resolver);
        self.candidate.reimb_status_id = status.id();
        self.candidate.resolved = Some(at);
        self
    }

    pub fn with_status_id(mut self, status_id: i32) -> Self {
        self.candidate.reimb_status_id = status_id;
        self
    }

    pub fn with_type(mut self, kind: ReimbursementType) -> Self {
        self.candidate.reimb_type_id = kind.id();
        self
    }

    pub fn with_type_id(mut self, type_id: i32) -> Self {
        self.candidate.reimb_type_id = type_id;
        self
    }

    pub fn build(self) -> ReimbursementCandidate {
        self.candidate
    }
}

/// Builder for persisted reimbursement records
#[derive(Debug, Clone)]
pub struct ReimbursementBuilder {
    reimbursement: Reimbursement,
}

impl ReimbursementBuilder {
    /// Creates a builder for a pending claim with the given id
    pub fn new(id: i32) -> Self {
        Self {
            reimbursement: Reimbursement {
                id: ReimbursementId::new(id),
                amount: dec!(50.00),
                submitted: TemporalFixtures::at(2021, 3, 1, 12, 0, 0),
                resolved: None,
                description: format!("Expense #{}", id),
                receipt: None,
                author_id: UserFixtures::employee(),
                resolver_id: None,
                reimb_status_id: ReimbursementStatus::Pending.id(),
                reimb_type_id: ReimbursementType::Other.id(),
            },
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.reimbursement.amount = amount;
        self
    }

    pub fn with_author(mut self, author: UserId) -> Self {
        self.reimbursement.author_id = author;
        self
    }

    pub fn with_submitted(mut self, submitted: NaiveDateTime) -> Self {
        self.reimbursement.submitted = submitted;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.reimbursement.description = description.into();
        self
    }

    pub fn build(self) -> Reimbursement {
        self.reimbursement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_reimbursement::ReimbursementValidator;

    #[test]
    fn test_default_candidate_is_valid() {
        let result = ReimbursementValidator::validate(&CandidateBuilder::new().build());
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_random_description_is_valid() {
        let candidate = CandidateBuilder::new().with_random_description().build();
        assert!(ReimbursementValidator::validate(&candidate).is_valid);
    }

    #[test]
    fn test_resolved_by_sets_all_resolution_fields() {
        let at = TemporalFixtures::lunch_resolved();
        let candidate = CandidateBuilder::new()
            .resolved_by(UserFixtures::admin(), ReimbursementStatus::Denied, at)
            .build();

        assert_eq!(candidate.resolver_id, Some(UserFixtures::admin()));
        assert_eq!(candidate.reimb_status_id, 3);
        assert_eq!(candidate.resolved, Some(at));
    }

    #[test]
    fn test_reimbursement_builder_defaults() {
        let r = ReimbursementBuilder::new(9).with_amount(dec!(0)).build();
        assert_eq!(r.id, ReimbursementId::new(9));
        assert_eq!(r.amount, Decimal::ZERO);
        assert_eq!(r.description, "Expense #9");
    }
}
