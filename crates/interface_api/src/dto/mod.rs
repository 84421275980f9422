//! Request and response bodies

pub mod reimbursement;
