//! Reimbursement model
//!
//! A reimbursement is a monetary claim submitted by one user (the author) and
//! resolved, approved or denied, by another (the resolver).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ReimbursementId, UserId};

/// A persisted reimbursement record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reimbursement {
    /// Storage-assigned key, immutable after creation
    pub id: ReimbursementId,
    /// Claimed amount
    pub amount: Decimal,
    /// When the claim was submitted; never changed by an update
    pub submitted: NaiveDateTime,
    /// When the claim was resolved, if it has been
    pub resolved: Option<NaiveDateTime>,
    /// Free text description of the expense
    pub description: String,
    /// Receipt reference (not yet used, always null in storage)
    pub receipt: Option<String>,
    /// User who submitted the claim
    pub author_id: UserId,
    /// User who resolved the claim
    pub resolver_id: Option<UserId>,
    /// Status lookup key, see [`ReimbursementStatus`]
    pub reimb_status_id: i32,
    /// Type lookup key, see [`ReimbursementType`]
    pub reimb_type_id: i32,
}

impl Reimbursement {
    /// Returns the decoded status, or `None` for an unknown lookup key
    pub fn status(&self) -> Option<ReimbursementStatus> {
        ReimbursementStatus::from_id(self.reimb_status_id)
    }

    /// Returns the decoded type, or `None` for an unknown lookup key
    pub fn reimbursement_type(&self) -> Option<ReimbursementType> {
        ReimbursementType::from_id(self.reimb_type_id)
    }

    /// Returns true once a resolver has acted on the claim
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// A reimbursement as supplied by a client for creation or replacement
///
/// `id` and `submitted` may be present in a request body but are never
/// trusted: the path id wins on update and `submitted` is owned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReimbursementCandidate {
    #[serde(default)]
    pub id: Option<ReimbursementId>,
    pub amount: Decimal,
    #[serde(default)]
    pub submitted: Option<NaiveDateTime>,
    #[serde(default)]
    pub resolved: Option<NaiveDateTime>,
    #[validate(length(min = 1, max = 250))]
    pub description: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub author_id: UserId,
    #[serde(default)]
    pub resolver_id: Option<UserId>,
    #[validate(range(min = 1, max = 3))]
    pub reimb_status_id: i32,
    #[validate(range(min = 1, max = 4))]
    pub reimb_type_id: i32,
}

impl From<Reimbursement> for ReimbursementCandidate {
    fn from(r: Reimbursement) -> Self {
        Self {
            id: Some(r.id),
            amount: r.amount,
            submitted: Some(r.submitted),
            resolved: r.resolved,
            description: r.description,
            receipt: r.receipt,
            author_id: r.author_id,
            resolver_id: r.resolver_id,
            reimb_status_id: r.reimb_status_id,
            reimb_type_id: r.reimb_type_id,
        }
    }
}

/// Fixed status enumeration backing `reimb_status_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementStatus {
    Pending = 1,
    Approved = 2,
    Denied = 3,
}

impl ReimbursementStatus {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(ReimbursementStatus::Pending),
            2 => Some(ReimbursementStatus::Approved),
            3 => Some(ReimbursementStatus::Denied),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }
}

/// Fixed type enumeration backing `reimb_type_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementType {
    Lodging = 1,
    Travel = 2,
    Food = 3,
    Other = 4,
}

impl ReimbursementType {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(ReimbursementType::Lodging),
            2 => Some(ReimbursementType::Travel),
            3 => Some(ReimbursementType::Food),
            4 => Some(ReimbursementType::Other),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn lunch() -> Reimbursement {
        let day = NaiveDate::from_ymd_opt(2020, 5, 15).unwrap();
        Reimbursement {
            id: ReimbursementId::new(1),
            amount: dec!(19.99),
            submitted: day.and_hms_opt(15, 57, 15).unwrap(),
            resolved: None,
            description: "Lunch Conference".to_string(),
            receipt: None,
            author_id: UserId::new(1),
            resolver_id: None,
            reimb_status_id: 1,
            reimb_type_id: 3,
        }
    }

    #[test]
    fn test_status_and_type_decode() {
        let r = lunch();
        assert_eq!(r.status(), Some(ReimbursementStatus::Pending));
        assert_eq!(r.reimbursement_type(), Some(ReimbursementType::Food));
        assert!(!r.is_resolved());
    }

    #[test]
    fn test_unknown_lookup_keys() {
        assert_eq!(ReimbursementStatus::from_id(9), None);
        assert_eq!(ReimbursementType::from_id(0), None);
        assert_eq!(ReimbursementType::Other.id(), 4);
    }

    #[test]
    fn test_candidate_from_reimbursement_keeps_id() {
        let candidate = ReimbursementCandidate::from(lunch());
        assert_eq!(candidate.id, Some(ReimbursementId::new(1)));
        assert_eq!(candidate.description, "Lunch Conference");
    }

    #[test]
    fn test_candidate_deserializes_without_optional_fields() {
        let json = r#"{
            "amount": 42.5,
            "description": "Taxi",
            "author_id": 2,
            "reimb_status_id": 1,
            "reimb_type_id": 2
        }"#;
        let candidate: ReimbursementCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.amount, dec!(42.5));
        assert_eq!(candidate.id, None);
        assert_eq!(candidate.resolver_id, None);
    }
}
