use super::outcome::{OutcomeKind, RpcOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// 1-based, dense over non-blank key lines.
    pub index: usize,
    pub credential: String,
    pub outcome: RpcOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchTranscript {
    items: Vec<BatchItem>,
    skipped_lines: usize,
    halted: bool,
}

impl BatchTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: BatchItem) {
        self.items.push(item);
    }

    pub fn record_skipped(&mut self) {
        self.skipped_lines += 1;
    }

    pub fn mark_halted(&mut self) {
        self.halted = true;
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// True when a stopping continuation policy cut the run short.
    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn succeeded(&self) -> usize {
        self.count(OutcomeKind::Success)
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.items.iter().filter(|i| i.outcome.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(index: usize, outcome: RpcOutcome) -> BatchItem {
        BatchItem {
            index,
            credential: format!("key-{}", index),
            outcome,
        }
    }

    #[test]
    fn test_counts_by_kind() {
        let mut t = BatchTranscript::new();
        t.push(item(1, RpcOutcome::Success(json!("sig"))));
        t.push(item(2, RpcOutcome::TransportFailure("timeout".into())));
        t.push(item(3, RpcOutcome::RemoteError("no balance".into())));
        t.record_skipped();

        assert_eq!(t.len(), 3);
        assert_eq!(t.succeeded(), 1);
        assert_eq!(t.failed(), 2);
        assert_eq!(t.count(OutcomeKind::TransportFailure), 1);
        assert_eq!(t.skipped_lines(), 1);
        assert!(!t.halted());
    }
}
