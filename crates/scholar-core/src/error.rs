//! Validation errors for domain-primitive construction.

use thiserror::Error;

/// Errors from identifier and domain-primitive validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The string does not match the `did:method:identifier` format.
    #[error("invalid DID: {0:?}")]
    InvalidDid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_did_display_names_the_value() {
        let err = ValidationError::InvalidDid("bogus".to_string());
        assert!(format!("{err}").contains("bogus"));
    }
}
