//! One module per command group.

pub mod auth;
pub mod bodies;
pub mod controls;
pub mod products;
pub mod report;

use nadzor_client::ApiError;

/// Map a failed request to the message shown to the user.
///
/// The raw status and body were already logged by the client; the user gets
/// something they can act on.
pub(crate) fn user_error(e: ApiError, doing: &str) -> anyhow::Error {
    let hint = match &e {
        ApiError::Network(_) => "is the backend running and --server correct?",
        ApiError::Api(401, _) | ApiError::Api(403, _) => "are you logged in?",
        ApiError::Api(..) => "the backend rejected the request",
        ApiError::Parse(_) => "the backend answered with an unexpected payload",
    };
    tracing::error!(error = %e, "{doing} failed");
    anyhow::anyhow!("could not {doing}: {hint}")
}
