//! Reimbursement validation rules
//!
//! # Identifiers
//! An id is valid only if it is an integer, strictly greater than zero, and
//! not NaN. The predicate itself lives in `core_kernel` next to the id types.
//!
//! # Candidates
//! - Amount must not be negative (a zero-amount claim is a real record)
//! - Amount must fit the `NUMERIC(12, 2)` column: whole cents, below 10^10
//! - Description must not be blank and is at most 250 characters
//! - Author must be a valid user id; resolver too, when present
//! - Status and type must name a known lookup row

use rust_decimal::Decimal;
use validator::Validate;

use crate::error::ReimbursementError;
use crate::reimbursement::ReimbursementCandidate;

pub use core_kernel::{is_valid_id, parse_raw_id};

/// Decimal places the amount column stores
pub const AMOUNT_SCALE: u32 = 2;

/// Integer digits the amount column stores (precision 12 minus scale 2)
pub const AMOUNT_INTEGER_DIGITS: u32 = 10;

/// Result of candidate validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the candidate is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Converts into a `BadRequest` carrying every message
    ///
    /// # Errors
    ///
    /// Returns `ReimbursementError::BadRequest` if any rule failed
    pub fn into_result(self) -> Result<(), ReimbursementError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ReimbursementError::bad_request(self.errors.join("; ")))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for reimbursement candidates
pub struct ReimbursementValidator;

impl ReimbursementValidator {
    /// Validates a candidate before it is handed to storage
    ///
    /// # Arguments
    ///
    /// * `candidate` - The client-supplied reimbursement
    ///
    /// # Returns
    ///
    /// A `ValidationResult` listing every failed rule
    pub fn validate(candidate: &ReimbursementCandidate) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if let Err(errors) = candidate.validate() {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter()
                        .map(move |e| format!("{} failed '{}' check", field, e.code))
                })
                .collect();
            messages.sort();
            for message in messages {
                result.add_error(message);
            }
        }

        if candidate.amount < Decimal::ZERO {
            result.add_error("amount must not be negative");
        }

        if candidate.amount.normalize().scale() > AMOUNT_SCALE {
            result.add_error(format!(
                "amount must not have more than {} decimal places",
                AMOUNT_SCALE
            ));
        }

        if candidate.amount.abs() >= Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS)) {
            result.add_error(format!(
                "amount must be less than 10^{}",
                AMOUNT_INTEGER_DIGITS
            ));
        }

        if !candidate.description.is_empty() && candidate.description.trim().is_empty() {
            result.add_error("description must not be blank");
        }

        if !candidate.author_id.is_valid() {
            result.add_error(format!("author_id {} is not a valid id", candidate.author_id));
        }

        if let Some(resolver_id) = candidate.resolver_id {
            if !resolver_id.is_valid() {
                result.add_error(format!("resolver_id {} is not a valid id", resolver_id));
            }
        }

        result
    }
}
