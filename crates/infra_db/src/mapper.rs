//! Row to domain mapping
//!
//! Converts `app_reimbursements` rows into domain `Reimbursement` values.
//! Mapping is total: every row maps field-for-field, and no row maps to `None`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use core_kernel::{ReimbursementId, UserId};
use domain_reimbursement::Reimbursement;

/// Database row for a reimbursement
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ReimbursementRow {
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
}

impl From<ReimbursementRow> for Reimbursement {
    fn from(row: ReimbursementRow) -> Self {
        Reimbursement {
            id: ReimbursementId::new(row.id),
            amount: row.amount,
            submitted: row.submitted,
            resolved: row.resolved,
            description: row.description,
            receipt: row.receipt,
            author_id: UserId::new(row.author_id),
            resolver_id: row.resolver_id.map(UserId::new),
            reimb_status_id: row.reimb_status_id,
            reimb_type_id: row.reimb_type_id,
        }
    }
}

/// Maps an optional row, returning `None` when there was no row
pub fn map_reimbursement_row(row: Option<ReimbursementRow>) -> Option<Reimbursement> {
    row.map(Reimbursement::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn lunch_row() -> ReimbursementRow {
        let day = NaiveDate::from_ymd_opt(2020, 5, 15).unwrap();
        ReimbursementRow {
            id: 1,
            amount: dec!(19.99),
            submitted: day.and_hms_opt(15, 57, 15).unwrap(),
            resolved: NaiveDate::from_ymd_opt(2020, 5, 18)
                .unwrap()
                .and_hms_opt(15, 45, 36),
            description: "Lunch Conference".to_string(),
            receipt: None,
            author_id: 1,
            resolver_id: Some(1),
            reimb_status_id: 1,
            reimb_type_id: 3,
        }
    }

    #[test]
    fn test_maps_every_field() {
        let row = lunch_row();
        let r = map_reimbursement_row(Some(row.clone())).unwrap();

        assert_eq!(r.id, ReimbursementId::new(1));
        assert_eq!(r.amount, dec!(19.99));
        assert_eq!(r.submitted, row.submitted);
        assert_eq!(r.resolved, row.resolved);
        assert_eq!(r.description, "Lunch Conference");
        assert_eq!(r.receipt, None);
        assert_eq!(r.author_id, UserId::new(1));
        assert_eq!(r.resolver_id, Some(UserId::new(1)));
        assert_eq!(r.reimb_status_id, 1);
        assert_eq!(r.reimb_type_id, 3);
    }

    #[test]
    fn test_absent_row_maps_to_none() {
        assert_eq!(map_reimbursement_row(None), None);
    }

    #[test]
    fn test_zero_amount_row_is_not_absence() {
        let mut row = lunch_row();
        row.amount = Decimal::ZERO;
        row.resolver_id = None;

        let r = map_reimbursement_row(Some(row)).unwrap();
        assert_eq!(r.amount, Decimal::ZERO);
        assert_eq!(r.resolver_id, None);
    }
}
