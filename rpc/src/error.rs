//! RPC error types and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use votechain_node::{MineError, RegistrationError, Rejection};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Mine(#[from] MineError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<JsonRejection> for RpcError {
    fn from(e: JsonRejection) -> Self {
        RpcError::InvalidRequest(e.body_text())
    }
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::Rejected(rejection) => match rejection {
                Rejection::Validation(_) => StatusCode::BAD_REQUEST,
                Rejection::Signature
                | Rejection::DuplicateVote { .. }
                | Rejection::UnregisteredVoter(_)
                | Rejection::IdentityMismatch(_)
                | Rejection::ElectionClosed => StatusCode::FORBIDDEN,
                Rejection::UnknownCandidate(_) => StatusCode::UNPROCESSABLE_ENTITY,
                Rejection::MempoolFull(_) | Rejection::ChainCorrupted => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            RpcError::Mine(e) => match e {
                MineError::Empty => StatusCode::CONFLICT,
                MineError::Cancelled | MineError::ChainCorrupted => StatusCode::SERVICE_UNAVAILABLE,
                MineError::Work(_)
                | MineError::Worker(_)
                | MineError::Ledger(_)
                | MineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            RpcError::Registration(e) => match e {
                RegistrationError::MissingField(_)
                | RegistrationError::InvalidKey(_)
                | RegistrationError::PaddedIdentifier(_) => StatusCode::BAD_REQUEST,
                RegistrationError::DuplicateVoter(_) | RegistrationError::DuplicateCandidate(_) => {
                    StatusCode::CONFLICT
                }
                RegistrationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            RpcError::Rejected(e) => e.code(),
            RpcError::Mine(e) => e.code(),
            RpcError::Registration(e) => e.code(),
            RpcError::InvalidRequest(_) => "invalid_request",
            RpcError::Server(_) => "server_error",
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(reason = self.reason(), error = %self, "request failed");
        } else {
            tracing::debug!(reason = self.reason(), error = %self, "request refused");
        }
        let body = Json(json!({
            "message": self.to_string(),
            "reason": self.reason(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_ledger::TransactionError;
    use votechain_node::VoteLocation;

    #[test]
    fn rejections_map_to_distinct_statuses() {
        let cases = [
            (
                Rejection::Validation(TransactionError::MissingField("voter_id")),
                StatusCode::BAD_REQUEST,
            ),
            (Rejection::Signature, StatusCode::FORBIDDEN),
            (
                Rejection::DuplicateVote {
                    voter_id: "V1".into(),
                    location: VoteLocation::Chain,
                },
                StatusCode::FORBIDDEN,
            ),
            (
                Rejection::UnknownCandidate("C9".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (Rejection::MempoolFull(10), StatusCode::SERVICE_UNAVAILABLE),
            (Rejection::ChainCorrupted, StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (rejection, status) in cases {
            assert_eq!(RpcError::from(rejection).status(), status);
        }
    }

    #[test]
    fn empty_mine_is_a_conflict() {
        let err = RpcError::from(MineError::Empty);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.reason(), "nothing_to_mine");
    }

    #[test]
    fn duplicate_registration_is_a_conflict() {
        let err = RpcError::from(RegistrationError::DuplicateVoter("V1".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn reason_codes_pass_through() {
        assert_eq!(RpcError::from(Rejection::Signature).reason(), "invalid_signature");
        assert_eq!(RpcError::InvalidRequest("x".into()).reason(), "invalid_request");
    }
}
