use crate::execution::errors::ValidationError;
use std::fmt;

/// Shortens a secret for display: first and last four characters only.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

// ==================================================
// TRADE PARAMS (credential independent)
// ==================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TradeParams {
    pub amount: String,
    pub token_address: String,
    pub slippage: f64,
}

impl TradeParams {
    pub fn parse(amount: &str, token_address: &str, slippage: &str) -> Result<Self, ValidationError> {
        let token_address = token_address.trim();
        if token_address.is_empty() {
            return Err(ValidationError::EmptyTokenAddress);
        }

        let slippage = parse_slippage(slippage)?;

        Ok(Self {
            amount: amount.trim().to_string(),
            token_address: token_address.to_string(),
            slippage,
        })
    }

    pub fn with_credential(&self, secret_key: &str) -> Result<SellRequest, ValidationError> {
        let secret_key = secret_key.trim();
        if secret_key.is_empty() {
            return Err(ValidationError::EmptyCredential);
        }

        Ok(SellRequest {
            amount: self.amount.clone(),
            secret_key: secret_key.to_string(),
            token_address: self.token_address.clone(),
            slippage: self.slippage,
        })
    }
}

fn parse_slippage(text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidSlippage(text.to_string())),
    }
}

// ==================================================
// SELL REQUEST
// ==================================================

#[derive(Clone, PartialEq)]
pub struct SellRequest {
    pub amount: String,
    pub secret_key: String,
    pub token_address: String,
    pub slippage: f64,
}

impl SellRequest {
    pub fn build(
        amount: &str,
        secret_key: &str,
        token_address: &str,
        slippage: &str,
    ) -> Result<Self, ValidationError> {
        if secret_key.trim().is_empty() {
            return Err(ValidationError::EmptyCredential);
        }
        TradeParams::parse(amount, token_address, slippage)?.with_credential(secret_key)
    }

    pub fn credential_hint(&self) -> String {
        mask_secret(&self.secret_key)
    }
}

impl fmt::Debug for SellRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SellRequest")
            .field("amount", &self.amount)
            .field("secret_key", &self.credential_hint())
            .field("token_address", &self.token_address)
            .field("slippage", &self.slippage)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_trims_every_field() {
        let req = SellRequest::build("  all ", " abc\n", "\tMint111 ", " 0.25 ").unwrap();
        assert_eq!(req.amount, "all");
        assert_eq!(req.secret_key, "abc");
        assert_eq!(req.token_address, "Mint111");
        assert_eq!(req.slippage, 0.25);
    }

    #[test]
    fn test_build_rejects_empty_credential_first() {
        // every field bad: the credential is reported
        let err = SellRequest::build("all", "   ", "", "x").unwrap_err();
        assert_eq!(err, ValidationError::EmptyCredential);
    }

    #[test]
    fn test_build_rejects_empty_token_address() {
        let err = SellRequest::build("all", "abc", "  ", "0.25").unwrap_err();
        assert_eq!(err, ValidationError::EmptyTokenAddress);
    }

    #[test]
    fn test_build_rejects_non_numeric_slippage() {
        for bad in ["", "abc", "0.25%", "1,5", "NaN", "inf", "-inf"] {
            let err = SellRequest::build("all", "abc", "Mint111", bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidSlippage(_)),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_amount_is_not_validated() {
        for amount in ["all", "25%", "1000.5", "", "whatever"] {
            let req = SellRequest::build(amount, "abc", "Mint111", "1").unwrap();
            assert_eq!(req.amount, amount);
        }
    }

    #[test]
    fn test_debug_masks_secret_key() {
        let req = SellRequest::build("all", "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP", "Mint111", "0.1")
            .unwrap();
        let dbg = format!("{:?}", req);
        assert!(!dbg.contains("5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP"));
        assert!(dbg.contains("5KQw…yXtP"));
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("123456789"), "1234…6789");
    }
}
