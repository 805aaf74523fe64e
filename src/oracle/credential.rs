use std::fmt;

use crate::error::InputValidationError;

const PREFIX: &str = "sk-";
const MIN_LEN: usize = 41;

/// Caller-supplied API key, passed through to the suggestion service.
///
/// The shape check only catches obvious paste mistakes; the service is the
/// one that actually accepts or refuses the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn parse(raw: &str) -> Result<Self, InputValidationError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(InputValidationError::Credential("API key is empty".into()));
        }
        if !key.starts_with(PREFIX) || key.len() < MIN_LEN {
            return Err(InputValidationError::Credential(format!(
                "it should start with `{PREFIX}` and be longer than {} characters",
                MIN_LEN - 1
            )));
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({PREFIX}***, {} chars)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "sk-test-0123456789abcdefghijklmnopqrstuvwxyz";

    #[test]
    fn accepts_well_formed_key() {
        let credential = Credential::parse(&format!("  {VALID}\n")).unwrap();
        assert_eq!(credential.expose(), VALID);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(Credential::parse("").is_err());
        assert!(Credential::parse("sk-short").is_err());
        assert!(Credential::parse(&VALID.replace("sk-", "pk-")).is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::parse(VALID).unwrap();
        let shown = format!("{credential:?}");
        assert!(!shown.contains("abcdef"));
    }
}
