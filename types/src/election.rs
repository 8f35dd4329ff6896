//! Candidate metadata supplied by the registration collaborator.

use serde::{Deserialize, Serialize};

/// A candidate on the ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub id: String,
    pub name: String,
    pub party: String,
}

impl CandidateInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, party: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            party: party.into(),
        }
    }
}
