use crate::domain::{BatchTranscript, OutcomeKind, RpcOutcome};
use serde_json::Value;

pub fn prefix(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Success => "✅ Success:",
        OutcomeKind::RemoteError => "❌ Error:",
        OutcomeKind::MalformedResponse => "⚠️ Unknown Response:",
        OutcomeKind::TransportFailure => "🚫 Request Failed:",
    }
}

fn payload_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

pub fn render_outcome(outcome: &RpcOutcome) -> String {
    let body = match outcome {
        RpcOutcome::Success(payload) => payload_text(payload),
        RpcOutcome::RemoteError(msg) => msg.clone(),
        RpcOutcome::MalformedResponse(raw) => payload_text(raw),
        RpcOutcome::TransportFailure(msg) => msg.clone(),
    };
    format!("{}\n{}\n", prefix(outcome.kind()), body)
}

pub fn render_progress(index: usize, credential_hint: &str) -> String {
    format!("🔁 Processing key #{} ({})...\n", index, credential_hint)
}

pub fn render_summary(transcript: &BatchTranscript) -> String {
    let mut line = format!(
        "{} sent · {} succeeded · {} failed",
        transcript.len(),
        transcript.succeeded(),
        transcript.failed()
    );
    if transcript.skipped_lines() > 0 {
        line.push_str(&format!(" · {} blank lines skipped", transcript.skipped_lines()));
    }
    if transcript.halted() {
        line.push_str(" · stopped early");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{mask_secret, BatchItem};
    use serde_json::json;

    #[test]
    fn test_each_category_has_distinct_prefix() {
        let kinds = [
            OutcomeKind::Success,
            OutcomeKind::RemoteError,
            OutcomeKind::MalformedResponse,
            OutcomeKind::TransportFailure,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(prefix(*a), prefix(*b));
            }
        }
    }

    #[test]
    fn test_string_payload_is_printed_bare() {
        let text = render_outcome(&RpcOutcome::Success(json!("tx-signature-xyz")));
        assert_eq!(text, "✅ Success:\ntx-signature-xyz\n");
    }

    #[test]
    fn test_malformed_body_is_pretty_printed() {
        let text = render_outcome(&RpcOutcome::MalformedResponse(json!({"status": "ok"})));
        assert_eq!(text, "⚠️ Unknown Response:\n{\n  \"status\": \"ok\"\n}\n");
    }

    #[test]
    fn test_progress_and_summary_mask_keys() {
        let mut t = BatchTranscript::new();
        t.push(BatchItem {
            index: 1,
            credential: "4wBqpZM9k1GkK9Tq9dW2vxWm3sYHcrPzB3sM8a1pNq7x".into(),
            outcome: RpcOutcome::RemoteError("no balance".into()),
        });
        t.record_skipped();

        let item = &t.items()[0];
        let progress = render_progress(item.index, &mask_secret(&item.credential));
        assert_eq!(progress, "🔁 Processing key #1 (4wBq…Nq7x)...\n");
        assert!(!progress.contains(&item.credential));

        assert_eq!(render_summary(&t), "1 sent · 0 succeeded · 1 failed · 1 blank lines skipped");
        t.mark_halted();
        assert!(render_summary(&t).ends_with(" · stopped early"));
    }
}
