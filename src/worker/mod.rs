use crate::client::Transport;
use crate::config::ContinuationPolicy;
use crate::domain::{BatchTranscript, RpcOutcome, SellForm};
use crate::execution::{BatchEvent, BatchExecutor, ValidationError};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkerError {
    #[error("a sell job is already running")]
    Busy,
}

pub struct BatchJob {
    pub handle: JoinHandle<Result<BatchTranscript, ValidationError>>,
    pub events: UnboundedReceiver<BatchEvent>,
}

/// Clears the busy flag when the job's future is dropped, panics included.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
        debug!("sell worker idle");
    }
}

#[derive(Clone)]
pub struct SellWorker {
    transport: Arc<dyn Transport>,
    policy: ContinuationPolicy,
    busy: Arc<AtomicBool>,
}

impl SellWorker {
    pub fn new(transport: Arc<dyn Transport>, policy: ContinuationPolicy) -> Self {
        Self {
            transport,
            policy,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<BusyGuard, WorkerError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| WorkerError::Busy)?;
        Ok(BusyGuard(self.busy.clone()))
    }

    pub fn submit_batch(&self, form: SellForm) -> Result<BatchJob, WorkerError> {
        let guard = self.acquire()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let executor = BatchExecutor::new(self.transport.clone())
            .with_policy(self.policy)
            .with_progress(tx);

        let handle = tokio::spawn(async move {
            let _guard = guard;
            executor.run_form(&form).await
        });

        Ok(BatchJob { handle, events: rx })
    }

    pub fn submit_single(
        &self,
        form: SellForm,
    ) -> Result<JoinHandle<Result<RpcOutcome, ValidationError>>, WorkerError> {
        let guard = self.acquire()?;
        let executor = BatchExecutor::new(self.transport.clone());

        Ok(tokio::spawn(async move {
            let _guard = guard;
            executor
                .run_single(&form.amount, form.single_key(), &form.token_address, &form.slippage)
                .await
        }))
    }
}
