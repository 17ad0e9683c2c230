//! Error types for the planner and its collaborators.
//!
//! Finding no feasible route is not an error: the search reports it as an
//! ordinary outcome. These types cover invalid requests and infrastructure
//! failures only.

use crate::matrix::MatrixError;
use crate::polyline::PolylineError;

/// Failures talking to a travel-time / routing service.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("routing service unavailable: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success HTTP status
    #[error("routing service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Service answered 200 but reported a failure in the body
    #[error("routing service error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("malformed routing response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Polyline(#[from] PolylineError),
}

/// Failures reading the venue catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors from [`crate::planner::RoutePlanner::plan`].
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Request failed validation; the search never started.
    #[error("invalid route request: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),

    /// No venue matched the date and location filters.
    #[error("no venues match the requested time and area")]
    NoCandidates,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// A broken internal precondition.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlanError {
    /// User-facing messages, one per problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            PlanError::InvalidRequest(messages) => messages.clone(),
            PlanError::Internal(_) => vec!["failed to generate route".to_string()],
            other => vec![other.to_string()],
        }
    }
}
