//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types for the ports and adapters
//! pattern used between the domain and infrastructure crates.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     ReimbursementService     │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │      ReimbursementPort       │
//! └──────────────────────────────┘
//!          ▲              ▲
//!          │              │
//!  ┌───────┴──────┐ ┌─────┴─────────┐
//!  │  PostgreSQL  │ │   In-memory   │
//!  │  repository  │ │   mock port   │
//!  └──────────────┘ └───────────────┘
//! ```
//!
//! Adapters report every storage fault through `PortError`. The public kind is
//! deliberately coarse, but the original cause is kept as the error source.

use serde::{Deserialize, Serialize};
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The storage backend could not be reached or no connection was available
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Any other storage fault (malformed query, constraint violation, decoding)
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause
    pub fn with_source(self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        let boxed: BoxedSource = Box::new(cause);
        match self {
            PortError::Connection { message, .. } => PortError::Connection {
                message,
                source: Some(boxed),
            },
            PortError::Internal { message, .. } => PortError::Internal {
                message,
                source: Some(boxed),
            },
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Returns true if the adapter reported itself healthy
    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}
