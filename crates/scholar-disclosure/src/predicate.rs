//! # Predicate and Range Statements
//!
//! Committed boolean statements about a single hidden attribute:
//! "gpa >= 3.0" without revealing the GPA, or "year between 2020 and
//! 2026" without revealing the year.
//!
//! **NOT ZERO-KNOWLEDGE.** The statement's truth value is computed by
//! the holder and only *hash-bound* to the true value: nothing prevents
//! a holder with code access from fabricating `holds`. The issuer's
//! signature on the original credential — not the binding hash — is the
//! only real trust anchor. If genuine ZK predicates are required, a
//! proper range-proof scheme must replace this module behind the same
//! interface.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use scholar_core::{CanonicalBytes, ContentDigest, CredentialId, Did, Sha256Accumulator, Timestamp};
use scholar_crypto::Nonce;
use scholar_vc::AcademicCredential;

use crate::commitment::commit_value;
use crate::error::DisclosureError;

/// Comparison operator of a predicate statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Strictly greater than.
    Gt,
    /// Strictly less than.
    Lt,
    /// Greater than or equal.
    Ge,
    /// Less than or equal.
    Le,
    /// Equal.
    Eq,
}

impl Operator {
    /// The symbol used in predicate statements.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Eq => "==",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = DisclosureError;

    /// Parse an operator symbol. Unknown symbols are an explicit error,
    /// never a silently-false predicate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            ">=" => Ok(Operator::Ge),
            "<=" => Ok(Operator::Le),
            "==" => Ok(Operator::Eq),
            other => Err(DisclosureError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// A committed predicate statement about one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateProof {
    /// Type tag, always `"PredicateProof"`.
    #[serde(rename = "type")]
    pub proof_type: String,

    /// Reference to the source credential.
    #[serde(rename = "credentialId")]
    pub credential_id: CredentialId,

    /// The attribute the statement is about.
    pub attribute: String,

    /// Human-readable statement, e.g. `"gpa >= 3.0"`.
    pub predicate: String,

    /// Whether the statement holds for the true value.
    pub holds: bool,

    /// Commitment to the true value (fresh opening), revealable later.
    pub commitment: ContentDigest,

    /// Hash binding `(value, operator, threshold, holds)` together.
    /// Transparent, not zero-knowledge.
    #[serde(rename = "bindingHash")]
    pub binding_hash: ContentDigest,

    /// Issuer of the source credential.
    pub issuer: Did,

    /// Issuance date of the source credential.
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,
}

/// A committed two-sided range statement about one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeProof {
    /// Type tag, always `"RangeProof"`.
    #[serde(rename = "type")]
    pub proof_type: String,

    /// Reference to the source credential.
    #[serde(rename = "credentialId")]
    pub credential_id: CredentialId,

    /// The attribute the statement is about.
    pub attribute: String,

    /// Human-readable statement, e.g. `"3.0 <= gpa <= 4.0"`.
    pub range: String,

    /// Whether the value lies inside the closed interval.
    pub holds: bool,

    /// Commitment to the true value (fresh opening).
    pub commitment: ContentDigest,

    /// Issuer of the source credential.
    pub issuer: Did,

    /// Issuance date of the source credential.
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,
}

/// Interpret an attribute value as a number: JSON numbers directly,
/// strings via parsing (GPA travels as a fixed-point decimal string).
fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Create a predicate proof for one attribute of a credential.
///
/// Comparison operators require both the attribute value and the
/// threshold to be numeric (or numeric strings); equality falls back to
/// raw value comparison when they are not.
pub fn create_predicate_proof(
    credential: &AcademicCredential,
    attribute: &str,
    operator: Operator,
    threshold: &serde_json::Value,
) -> Result<PredicateProof, DisclosureError> {
    let value = credential
        .credential_subject
        .get(attribute)
        .ok_or_else(|| DisclosureError::UnknownAttribute(attribute.to_string()))?;

    let holds = match operator {
        Operator::Eq => match (value_as_f64(value), value_as_f64(threshold)) {
            (Some(v), Some(t)) => v == t,
            _ => value == threshold,
        },
        _ => {
            let v = value_as_f64(value).ok_or_else(|| DisclosureError::NotNumeric {
                attribute: attribute.to_string(),
            })?;
            let t = value_as_f64(threshold).ok_or_else(|| DisclosureError::NotNumeric {
                attribute: format!("threshold for {attribute}"),
            })?;
            match operator {
                Operator::Gt => v > t,
                Operator::Lt => v < t,
                Operator::Ge => v >= t,
                Operator::Le => v <= t,
                Operator::Eq => unreachable!("handled above"),
            }
        }
    };

    let nonce = Nonce::generate();
    let commitment = commit_value(value, &nonce)?;

    // Bind (value, operator, threshold, holds) in one transparent hash.
    let value_canonical = CanonicalBytes::from_value(value.clone())?;
    let mut acc = Sha256Accumulator::new();
    acc.update(value_canonical.as_bytes());
    acc.update(operator.symbol().as_bytes());
    acc.update(display_value(threshold).as_bytes());
    acc.update(if holds { b"true" } else { b"false" });
    let binding_hash = acc.finalize();

    Ok(PredicateProof {
        proof_type: "PredicateProof".to_string(),
        credential_id: credential.id.clone(),
        attribute: attribute.to_string(),
        predicate: format!("{attribute} {operator} {}", display_value(threshold)),
        holds,
        commitment,
        binding_hash,
        issuer: credential.issuer.clone(),
        issuance_date: credential.issuance_date.clone(),
    })
}

/// Create a range proof: `min <= value <= max`.
///
/// The attribute must be numeric (or a numeric string).
pub fn create_range_proof(
    credential: &AcademicCredential,
    attribute: &str,
    min: f64,
    max: f64,
) -> Result<RangeProof, DisclosureError> {
    let value = credential
        .credential_subject
        .get(attribute)
        .ok_or_else(|| DisclosureError::UnknownAttribute(attribute.to_string()))?;

    let v = value_as_f64(value).ok_or_else(|| DisclosureError::NotNumeric {
        attribute: attribute.to_string(),
    })?;

    let nonce = Nonce::generate();
    let commitment = commit_value(value, &nonce)?;

    Ok(RangeProof {
        proof_type: "RangeProof".to_string(),
        credential_id: credential.id.clone(),
        attribute: attribute.to_string(),
        range: format!("{min} <= {attribute} <= {max}"),
        holds: v >= min && v <= max,
        commitment,
        issuer: credential.issuer.clone(),
        issuance_date: credential.issuance_date.clone(),
    })
}
