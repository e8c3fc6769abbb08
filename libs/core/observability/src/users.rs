//! Users-domain metrics.

use metrics::counter;

/// The five operations the users API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOperation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl UserOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// How an operation ended, in the same buckets as the HTTP error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOutcome {
    Success,
    ValidationError,
    NotFound,
    InternalError,
}

impl UserOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ValidationError => "validation_error",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
        }
    }
}

/// Users metrics recorder
pub struct UserMetrics;

impl UserMetrics {
    /// Count one finished operation.
    pub fn record(operation: UserOperation, outcome: UserOutcome) {
        counter!(
            "user_operations_total",
            "operation" => operation.as_str(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
    }

    /// Record a list call together with the size of the page it produced.
    pub fn record_list(returned: usize, total: usize) {
        Self::record(UserOperation::List, UserOutcome::Success);
        tracing::debug!(returned, total, "Listed users");
    }
}
