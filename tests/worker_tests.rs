use async_trait::async_trait;
use pumpfun_sell::client::Transport;
use pumpfun_sell::config::ContinuationPolicy;
use pumpfun_sell::domain::{RpcOutcome, SellForm, SellRequest};
use pumpfun_sell::execution::{BatchEvent, ValidationError};
use pumpfun_sell::worker::{SellWorker, WorkerError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

struct GatedTransport {
    gate: Semaphore,
    seen: Mutex<Vec<String>>,
}

impl GatedTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn open(&self, calls: usize) {
        self.gate.add_permits(calls);
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn call(&self, request: &SellRequest) -> RpcOutcome {
        self.gate.acquire().await.unwrap().forget();
        self.seen.lock().unwrap().push(request.secret_key.clone());

        if request.secret_key.starts_with("down") {
            RpcOutcome::TransportFailure("connection reset by peer".into())
        } else {
            RpcOutcome::Success(json!(format!("sig-{}", request.secret_key)))
        }
    }
}

fn form(keys: &str) -> SellForm {
    SellForm::new("all", SellForm::keys_from_text(keys), "Mint111", "0.25")
}

#[tokio::test]
async fn second_submission_is_refused_while_busy() {
    let transport = GatedTransport::new();
    let worker = SellWorker::new(transport.clone(), ContinuationPolicy::Continue);

    let job = worker.submit_batch(form("k1\nk2")).unwrap();
    assert!(worker.is_busy());

    assert_eq!(worker.submit_batch(form("k3")).err(), Some(WorkerError::Busy));
    assert_eq!(worker.submit_single(form("k3")).err(), Some(WorkerError::Busy));

    transport.open(2);
    let transcript = job.handle.await.unwrap().unwrap();
    assert_eq!(transcript.len(), 2);
    assert!(!worker.is_busy());

    // free again once the first job has finished
    transport.open(1);
    let outcome = worker.submit_single(form("k3")).unwrap().await.unwrap().unwrap();
    assert_eq!(outcome, RpcOutcome::Success(json!("sig-k3")));
}

#[tokio::test]
async fn events_stream_while_batch_runs() {
    let transport = GatedTransport::new();
    let worker = SellWorker::new(transport.clone(), ContinuationPolicy::Continue);
    let mut job = worker.submit_batch(form("k1\n\ndown-k2\nk3")).unwrap();

    // first item is announced before the backend has answered anything
    let first = job.events.recv().await.unwrap();
    assert_eq!(
        first,
        BatchEvent::Processing {
            index: 1,
            credential_hint: "****".into()
        }
    );

    transport.open(3);

    let mut completed = Vec::new();
    let mut finished = None;
    while let Some(event) = job.events.recv().await {
        match event {
            BatchEvent::Completed(item) => completed.push((item.index, item.credential, item.outcome.is_success())),
            BatchEvent::Finished {
                succeeded,
                failed,
                skipped_lines,
            } => finished = Some((succeeded, failed, skipped_lines)),
            BatchEvent::Processing { .. } => {}
        }
    }

    assert_eq!(
        completed,
        vec![
            (1, "k1".to_string(), true),
            (2, "down-k2".to_string(), false),
            (3, "k3".to_string(), true),
        ]
    );
    assert_eq!(finished, Some((2, 1, 1)));

    let transcript = job.handle.await.unwrap().unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(*transport.seen.lock().unwrap(), vec!["k1", "down-k2", "k3"]);
}

#[tokio::test]
async fn validation_failure_releases_the_worker() {
    let transport = GatedTransport::new();
    let worker = SellWorker::new(transport.clone(), ContinuationPolicy::Continue);

    let bad = SellForm::new("all", vec!["k1".into()], "Mint111", "a lot");
    let mut job = worker.submit_batch(bad).unwrap();

    let err = job.handle.await.unwrap().unwrap_err();
    assert_eq!(err, ValidationError::InvalidSlippage("a lot".into()));
    assert!(job.events.recv().await.is_none());
    assert!(!worker.is_busy());
    assert!(transport.seen.lock().unwrap().is_empty());
}
