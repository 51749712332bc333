//! # Credential Subject
//!
//! The subject of an academic credential is an open attribute map, not a
//! fixed struct: the selective disclosure engine iterates attributes
//! generically, while typed accessors exist for the fields every academic
//! credential carries (id, name, institution, degree, courses, gpa).
//!
//! Attribute iteration order is the map's sorted key order, which keeps
//! commitment records and presentations deterministic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use scholar_core::Did;

use crate::error::VcError;

/// A single course entry on an academic transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course name, e.g. `"Linear Algebra"`.
    pub name: String,
    /// Letter grade, e.g. `"A-"`. Unknown grades count as 0 grade points.
    pub grade: String,
    /// Credit hours. Whole credits only — fractional credit systems are
    /// not modeled.
    pub credits: u32,
    /// Calendar year the course was taken.
    pub year: u32,
}

/// Grade points for a letter grade on the 4.0 scale.
///
/// Unknown grades map to 0.0 rather than erroring, matching transcript
/// conventions for non-letter entries (P/NP, W).
fn grade_points(grade: &str) -> f64 {
    match grade {
        "A+" | "A" => 4.0,
        "A-" => 3.7,
        "B+" => 3.3,
        "B" => 3.0,
        "B-" => 2.7,
        "C+" => 2.3,
        "C" => 2.0,
        "C-" => 1.7,
        "D" => 1.0,
        "F" => 0.0,
        _ => 0.0,
    }
}

/// Credit-weighted GPA over a course list, formatted to two decimal
/// places.
///
/// The result is a *string* because the canonical wire encoding carries
/// no floats: `sum(points × credits) / sum(credits)`, `"0.00"` for an
/// empty course list or a zero-credit total (never NaN).
pub fn calculate_gpa(courses: &[Course]) -> String {
    let total_credits: u32 = courses.iter().map(|c| c.credits).sum();
    if total_credits == 0 {
        return "0.00".to_string();
    }

    let total_points: f64 = courses
        .iter()
        .map(|c| grade_points(&c.grade) * f64::from(c.credits))
        .sum();

    format!("{:.2}", total_points / f64::from(total_credits))
}

/// The attribute map of an academic credential.
///
/// Serializes transparently as a JSON object. The `id` attribute holds
/// the holder's DID and participates in the commitment/disclosure loop
/// like any other attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSubject {
    attributes: Map<String, Value>,
}

impl CredentialSubject {
    /// Build the subject for a new academic credential.
    ///
    /// Computes the derived `gpa` attribute from `courses`.
    pub fn academic(
        holder: &Did,
        student_name: &str,
        institution: &str,
        degree: &str,
        courses: &[Course],
    ) -> Result<Self, VcError> {
        let mut attributes = Map::new();
        attributes.insert("id".into(), Value::String(holder.as_str().to_string()));
        attributes.insert("name".into(), Value::String(student_name.to_string()));
        attributes.insert("institution".into(), Value::String(institution.to_string()));
        attributes.insert("degree".into(), Value::String(degree.to_string()));
        attributes.insert("courses".into(), serde_json::to_value(courses)?);
        attributes.insert("gpa".into(), Value::String(calculate_gpa(courses)));
        Ok(Self { attributes })
    }

    /// Wrap an existing attribute map.
    pub fn from_map(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// The holder's DID, if the `id` attribute is present and valid.
    pub fn id(&self) -> Option<Did> {
        self.attributes
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Did::new(s).ok())
    }

    /// The student's name.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    /// The issuing institution's display name.
    pub fn institution(&self) -> Option<&str> {
        self.attributes.get("institution").and_then(Value::as_str)
    }

    /// The degree program.
    pub fn degree(&self) -> Option<&str> {
        self.attributes.get("degree").and_then(Value::as_str)
    }

    /// The course list, if present and well-formed.
    pub fn courses(&self) -> Option<Vec<Course>> {
        self.attributes
            .get("courses")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The derived GPA as a two-decimal string.
    pub fn gpa(&self) -> Option<&str> {
        self.attributes.get("gpa").and_then(Value::as_str)
    }

    /// An arbitrary attribute by name.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Whether the attribute exists.
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Iterate attributes in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attributes.iter()
    }

    /// Attribute names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.attributes.keys()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the subject carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
