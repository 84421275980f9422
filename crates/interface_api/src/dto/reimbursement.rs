//! Reimbursement DTOs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ReimbursementId, UserId};
use domain_reimbursement::{
    Reimbursement, ReimbursementCandidate, ReimbursementStatus, ReimbursementType,
};

/// Body of a submit or update request
///
/// `id` and `submitted` are accepted for compatibility with clients that echo
/// a fetched record back, but neither is ever persisted as sent.
#[derive(Debug, Clone, Deserialize)]
pub struct ReimbursementRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub amount: Decimal,
    #[serde(default)]
    pub submitted: Option<NaiveDateTime>,
    #[serde(default)]
    pub resolved: Option<NaiveDateTime>,
    pub description: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub author_id: i32,
    #[serde(default)]
    pub resolver_id: Option<i32>,
    pub reimb_status_id: i32,
    pub reimb_type_id: i32,
}

impl From<ReimbursementRequest> for ReimbursementCandidate {
    fn from(req: ReimbursementRequest) -> Self {
        ReimbursementCandidate {
            id: req.id.map(ReimbursementId::new),
            amount: req.amount,
            submitted: req.submitted,
            resolved: req.resolved,
            description: req.description,
            receipt: req.receipt,
            author_id: UserId::new(req.author_id),
            resolver_id: req.resolver_id.map(UserId::new),
            reimb_status_id: req.reimb_status_id,
            reimb_type_id: req.reimb_type_id,
        }
    }
}

/// A reimbursement as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementResponse {
    pub id: i32,
    pub amount: Decimal,
    pub submitted: NaiveDateTime,
    pub resolved: Option<NaiveDateTime>,
    pub description: String,
    pub receipt: Option<String>,
    pub author_id: i32,
    pub resolver_id: Option<i32>,
    pub reimb_status_id: i32,
    pub reimb_type_id: i32,
    /// Decoded status, absent for an unknown lookup key
    pub status: Option<ReimbursementStatus>,
    /// Decoded type, absent for an unknown lookup key
    #[serde(rename = "type")]
    pub reimbursement_type: Option<ReimbursementType>,
}

impl From<Reimbursement> for ReimbursementResponse {
    fn from(r: Reimbursement) -> Self {
        let status = r.status();
        let reimbursement_type = r.reimbursement_type();
        Self {
            id: r.id.get(),
            amount: r.amount,
            submitted: r.submitted,
            resolved: r.resolved,
            description: r.description,
            receipt: r.receipt,
            author_id: r.author_id.get(),
            resolver_id: r.resolver_id.map(UserId::get),
            reimb_status_id: r.reimb_status_id,
            reimb_type_id: r.reimb_type_id,
            status,
            reimbursement_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_optional_fields() {
        let json = r#"{
            "amount": "12.75",
            "description": "Parking",
            "author_id": 2,
            "reimb_status_id": 1,
            "reimb_type_id": 2
        }"#;
        let req: ReimbursementRequest = serde_json::from_str(json).unwrap();
        let candidate = ReimbursementCandidate::from(req);

        assert_eq!(candidate.id, None);
        assert_eq!(candidate.author_id, UserId::new(2));
        assert_eq!(candidate.amount, Decimal::new(1275, 2));
    }

    #[test]
    fn test_response_decodes_lookup_keys() {
        let json = serde_json::json!({
            "id": 1,
            "amount": "19.99",
            "submitted": "2020-05-15T15:57:15",
            "resolved": null,
            "description": "Lunch Conference",
            "receipt": null,
            "author_id": 1,
            "resolver_id": null,
            "reimb_status_id": 1,
            "reimb_type_id": 3
        });
        let r: Reimbursement = serde_json::from_value(json).unwrap();
        let response = ReimbursementResponse::from(r);

        assert_eq!(response.status, Some(ReimbursementStatus::Pending));
        assert_eq!(response.reimbursement_type, Some(ReimbursementType::Food));

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["type"], "food");
    }
}
