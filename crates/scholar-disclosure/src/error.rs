use scholar_core::CanonicalizationError;

/// Errors from building presentations and predicate statements.
///
/// Verification failures are not errors. A presentation that does not
/// verify produces a report with `verified: false`; these variants cover
/// malformed requests and internal failures only.
#[derive(Debug, thiserror::Error)]
pub enum DisclosureError {
    /// A requested attribute does not exist on the credential subject.
    /// Never silently ignored: a typo in a reveal set would otherwise
    /// hide an attribute the holder meant to disclose.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// The credential carries no proof, so a presentation cannot be
    /// bound to an issuer signature.
    #[error("credential has no proof; only signed credentials can be presented")]
    UnsignedCredential,

    /// A comparison was requested over a value that is neither a number
    /// nor a numeric string.
    #[error("attribute is not numeric: {attribute}")]
    NotNumeric { attribute: String },

    /// An operator symbol outside the supported set.
    #[error("unsupported predicate operator: {0}")]
    UnsupportedOperator(String),

    /// An attribute value could not be canonicalized for hashing.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}
