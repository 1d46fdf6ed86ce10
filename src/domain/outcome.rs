use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome {
    Success(Value),
    RemoteError(String),
    MalformedResponse(Value),
    TransportFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    RemoteError,
    MalformedResponse,
    TransportFailure,
}

impl RpcOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            RpcOutcome::Success(_) => OutcomeKind::Success,
            RpcOutcome::RemoteError(_) => OutcomeKind::RemoteError,
            RpcOutcome::MalformedResponse(_) => OutcomeKind::MalformedResponse,
            RpcOutcome::TransportFailure(_) => OutcomeKind::TransportFailure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RpcOutcome::Success(_))
    }
}

impl OutcomeKind {
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "Success",
            OutcomeKind::RemoteError => "Error",
            OutcomeKind::MalformedResponse => "Unknown Response",
            OutcomeKind::TransportFailure => "Request Failed",
        }
    }
}
