use crate::domain::{RpcOutcome, SellRequest};
use serde::Serialize;
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const SELL_METHOD: &str = "sell_token";
pub const REQUEST_ID: u64 = 1;

#[derive(Debug, Serialize)]
pub struct RpcEnvelope<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: SellParams<'a>,
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct SellParams<'a> {
    pub amount: &'a str,
    pub private_key: &'a str,
    pub mint: &'a str,
    pub slippage: f64,
}

impl<'a> RpcEnvelope<'a> {
    pub fn sell(method: &'a str, request: &'a SellRequest) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params: SellParams {
                amount: &request.amount,
                private_key: &request.secret_key,
                mint: &request.token_address,
                slippage: request.slippage,
            },
            id: REQUEST_ID,
        }
    }
}

/// Maps a parsed response body onto an outcome. `result` wins over `error`;
/// an `error` without a `message` is not a usable rejection and counts as
/// malformed.
pub fn classify_response(body: Value) -> RpcOutcome {
    if let Some(result) = body.get("result") {
        return RpcOutcome::Success(result.clone());
    }

    if let Some(message) = body.get("error").and_then(|e| e.get("message")) {
        let message = match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return RpcOutcome::RemoteError(message);
    }

    RpcOutcome::MalformedResponse(body)
}
