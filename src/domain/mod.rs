pub mod outcome;
pub mod request;
pub mod transcript;

pub use outcome::{OutcomeKind, RpcOutcome};
pub use request::{mask_secret, SellRequest, TradeParams};
pub use transcript::{BatchItem, BatchTranscript};

// ==================================================
// OPERATOR INPUT
// ==================================================

#[derive(Debug, Clone, Default)]
pub struct SellForm {
    pub amount: String,
    pub secret_keys: Vec<String>,
    pub token_address: String,
    pub slippage: String,
}

impl SellForm {
    pub fn new(amount: &str, secret_keys: Vec<String>, token_address: &str, slippage: &str) -> Self {
        Self {
            amount: amount.to_string(),
            secret_keys,
            token_address: token_address.to_string(),
            slippage: slippage.to_string(),
        }
    }

    /// One key per line, as pasted into a multi-line field.
    pub fn keys_from_text(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    pub fn single_key(&self) -> &str {
        self.secret_keys.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_from_text_keeps_blank_lines() {
        let keys = SellForm::keys_from_text("k1\n\n  k2  \r\n");
        assert_eq!(keys, vec!["k1", "", "  k2  "]);
    }

    #[test]
    fn test_single_key_of_empty_form() {
        let form = SellForm::new("all", vec![], "Mint111", "0.25");
        assert_eq!(form.single_key(), "");
    }
}
