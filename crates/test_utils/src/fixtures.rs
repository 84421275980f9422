//! Pre-built Test Fixtures
//!
//! Provides ready-to-use reimbursement data. The users referenced here (ids 1
//! and 2) exist in the seeded test schema.

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::{ReimbursementId, UserId};
use domain_reimbursement::{Reimbursement, ReimbursementCandidate};
use rust_decimal_macros::dec;

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// When the lunch conference claim was submitted
    pub fn lunch_submitted() -> NaiveDateTime {
        Self::at(2020, 5, 15, 15, 57, 15)
    }

    /// When the lunch conference claim was resolved
    pub fn lunch_resolved() -> NaiveDateTime {
        Self::at(2020, 5, 18, 15, 45, 36)
    }

    /// A timestamp far in the future, never a legitimate submission time
    pub fn far_future() -> NaiveDateTime {
        Self::at(2099, 1, 1, 0, 0, 0)
    }

    /// Builds a timestamp, panicking on an impossible date
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .expect("fixture timestamp must be valid")
    }
}

/// Fixture for user ids present in the seeded schema
pub struct UserFixtures;

impl UserFixtures {
    /// The seeded admin user
    pub fn admin() -> UserId {
        UserId::new(1)
    }

    /// The seeded employee user
    pub fn employee() -> UserId {
        UserId::new(2)
    }
}

/// Fixture for reimbursement records
pub struct ReimbursementFixtures;

impl ReimbursementFixtures {
    /// The resolved lunch conference claim (id 1, 19.99, food)
    pub fn lunch_conference() -> Reimbursement {
        Reimbursement {
            id: ReimbursementId::new(1),
            amount: dec!(19.99),
            submitted: TemporalFixtures::lunch_submitted(),
            resolved: Some(TemporalFixtures::lunch_resolved()),
            description: "Lunch Conference".to_string(),
            receipt: None,
            author_id: UserFixtures::admin(),
            resolver_id: Some(UserFixtures::admin()),
            reimb_status_id: 1,
            reimb_type_id: 3,
        }
    }

    /// A pending lodging claim by the employee (id 2)
    pub fn hotel_stay() -> Reimbursement {
        Reimbursement {
            id: ReimbursementId::new(2),
            amount: dec!(240.00),
            submitted: TemporalFixtures::at(2020, 6, 1, 9, 0, 0),
            resolved: None,
            description: "Hotel, two nights".to_string(),
            receipt: None,
            author_id: UserFixtures::employee(),
            resolver_id: None,
            reimb_status_id: 1,
            reimb_type_id: 1,
        }
    }

    /// A pending travel claim by the employee (id 3)
    pub fn airport_taxi() -> Reimbursement {
        Reimbursement {
            id: ReimbursementId::new(3),
            amount: dec!(23.10),
            submitted: TemporalFixtures::at(2020, 6, 2, 7, 30, 0),
            resolved: None,
            description: "Airport taxi".to_string(),
            receipt: None,
            author_id: UserFixtures::employee(),
            resolver_id: None,
            reimb_status_id: 1,
            reimb_type_id: 2,
        }
    }

    /// All fixture records in id order
    pub fn all() -> Vec<Reimbursement> {
        vec![Self::lunch_conference(), Self::hotel_stay(), Self::airport_taxi()]
    }
}

/// Fixture for client-supplied candidates
pub struct CandidateFixtures;

impl CandidateFixtures {
    /// A valid new food claim with no id or timestamps
    pub fn client_dinner() -> ReimbursementCandidate {
        ReimbursementCandidate {
            id: None,
            amount: dec!(35.50),
            submitted: None,
            resolved: None,
            description: "Client dinner".to_string(),
            receipt: None,
            author_id: UserFixtures::admin(),
            resolver_id: None,
            reimb_status_id: 1,
            reimb_type_id: 3,
        }
    }

    /// The lunch conference claim, approved
    pub fn lunch_approved() -> ReimbursementCandidate {
        let mut candidate = ReimbursementCandidate::from(ReimbursementFixtures::lunch_conference());
        candidate.reimb_status_id = 2;
        candidate
    }
}
