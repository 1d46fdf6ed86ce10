use crate::domain::{BatchTranscript, RpcOutcome};
use crate::execution::errors::ValidationError;
use log::{error, info, warn};

pub fn log_validation_failure(err: &ValidationError) {
    error!("❌ Rejected before sending: {}", err);
}

pub fn log_outcome(index: Option<usize>, outcome: &RpcOutcome) {
    let tag = match index {
        Some(i) => format!("Key #{}", i),
        None => "Sell".to_string(),
    };

    match outcome {
        RpcOutcome::Success(_) => info!("✅ {} — success", tag),
        RpcOutcome::RemoteError(msg) => warn!("❌ {} — backend error: {}", tag, msg),
        RpcOutcome::MalformedResponse(_) => warn!("⚠️ {} — unrecognised response", tag),
        RpcOutcome::TransportFailure(msg) => warn!("🚫 {} — request failed: {}", tag, msg),
    }
}

pub fn log_batch_summary(transcript: &BatchTranscript) {
    info!(
        "📊 Batch done — {} sent, {} succeeded, {} failed, {} blank lines skipped{}",
        transcript.len(),
        transcript.succeeded(),
        transcript.failed(),
        transcript.skipped_lines(),
        if transcript.halted() { " (halted early)" } else { "" }
    );
}
