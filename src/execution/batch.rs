use crate::client::Transport;
use crate::config::ContinuationPolicy;
use crate::domain::{BatchItem, BatchTranscript, RpcOutcome, SellForm, SellRequest, TradeParams};
use crate::execution::errors::ValidationError;
use crate::logging::{log_batch_summary, log_outcome, log_validation_failure};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Processing { index: usize, credential_hint: String },
    Completed(BatchItem),
    Finished { succeeded: usize, failed: usize, skipped_lines: usize },
}

// ==================================================
// Executor
// ==================================================

pub struct BatchExecutor {
    transport: Arc<dyn Transport>,
    policy: ContinuationPolicy,
    progress: Option<UnboundedSender<BatchEvent>>,
}

impl BatchExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            policy: ContinuationPolicy::default(),
            progress: None,
        }
    }

    pub fn with_policy(mut self, policy: ContinuationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: UnboundedSender<BatchEvent>) -> Self {
        self.progress = Some(progress);
        self
    }

    fn emit(&self, event: BatchEvent) {
        if let Some(tx) = &self.progress {
            if tx.send(event).is_err() {
                debug!("progress receiver dropped");
            }
        }
    }

    /// Mint and slippage are checked once for the whole list; any failure
    /// there means nothing is sent. Blank lines are skipped without using up
    /// an index.
    pub async fn run_batch<S>(
        &self,
        amount: &str,
        secret_key_lines: &[S],
        token_address: &str,
        slippage: &str,
    ) -> Result<BatchTranscript, ValidationError>
    where
        S: AsRef<str> + Sync,
    {
        let params = TradeParams::parse(amount, token_address, slippage).map_err(|e| {
            log_validation_failure(&e);
            e
        })?;

        let is_key = |line: &S| !line.as_ref().trim().is_empty();

        if !secret_key_lines.iter().any(is_key) {
            let e = ValidationError::EmptyCredential;
            log_validation_failure(&e);
            return Err(e);
        }

        info!(
            "🚀 Selling {} of {} for {} keys (slippage {})",
            params.amount,
            params.token_address,
            secret_key_lines.iter().filter(|l| is_key(*l)).count(),
            params.slippage
        );

        let mut transcript = BatchTranscript::new();
        let mut index = 0;

        for (pos, line) in secret_key_lines.iter().enumerate() {
            if !is_key(line) {
                transcript.record_skipped();
                continue;
            }
            index += 1;

            let request = params.with_credential(line.as_ref())?;
            let credential_hint = request.credential_hint();

            info!("🔁 Processing key #{} ({})", index, credential_hint);
            self.emit(BatchEvent::Processing {
                index,
                credential_hint,
            });

            let outcome = self.transport.call(&request).await;
            log_outcome(Some(index), &outcome);

            let stop = self.policy.should_stop(outcome.kind());
            let item = BatchItem {
                index,
                credential: request.secret_key,
                outcome,
            };
            self.emit(BatchEvent::Completed(item.clone()));
            transcript.push(item);

            if stop && secret_key_lines[pos + 1..].iter().any(is_key) {
                warn!("⛔ Stopping after key #{} ({:?})", index, self.policy);
                transcript.mark_halted();
                break;
            }
        }

        log_batch_summary(&transcript);
        self.emit(BatchEvent::Finished {
            succeeded: transcript.succeeded(),
            failed: transcript.failed(),
            skipped_lines: transcript.skipped_lines(),
        });

        Ok(transcript)
    }

    pub async fn run_form(&self, form: &SellForm) -> Result<BatchTranscript, ValidationError> {
        self.run_batch(&form.amount, &form.secret_keys, &form.token_address, &form.slippage)
            .await
    }

    pub async fn run_single(
        &self,
        amount: &str,
        secret_key: &str,
        token_address: &str,
        slippage: &str,
    ) -> Result<RpcOutcome, ValidationError> {
        let request = SellRequest::build(amount, secret_key, token_address, slippage).map_err(|e| {
            log_validation_failure(&e);
            e
        })?;

        info!(
            "🚀 Selling {} of {} with key {} (slippage {})",
            request.amount,
            request.token_address,
            request.credential_hint(),
            request.slippage
        );

        let outcome = self.transport.call(&request).await;
        log_outcome(None, &outcome);
        Ok(outcome)
    }
}
