use crate::domain::OutcomeKind;
use serde::{Deserialize, Serialize};

/// What a batch does after an item fails. `Continue` sends every key no
/// matter what came back for the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationPolicy {
    #[default]
    Continue,
    StopOnTransportFailure,
    StopOnAnyFailure,
}

impl ContinuationPolicy {
    pub fn should_stop(&self, kind: OutcomeKind) -> bool {
        match self {
            ContinuationPolicy::Continue => false,
            ContinuationPolicy::StopOnTransportFailure => kind == OutcomeKind::TransportFailure,
            ContinuationPolicy::StopOnAnyFailure => kind != OutcomeKind::Success,
        }
    }
}
