//! End-to-end selective disclosure: issue a credential, present a
//! subset of its attributes, verify the presentation against the
//! original, and confirm tampering is caught at every layer.

use std::collections::BTreeSet;

use scholar_disclosure::{verify_presentation, CachePolicy, DisclosureEngine};
use scholar_vc::{AcademicCredential, Course};
use scholar_wallet::IdentityWallet;

struct Actors {
    wallet: IdentityWallet,
    credential: AcademicCredential,
}

fn setup() -> Actors {
    let wallet = IdentityWallet::new();
    let issuer = wallet.create_identity("registrar").unwrap();
    let holder = wallet.create_identity("alice").unwrap();
    let provider = wallet.signing_provider(&issuer).unwrap();

    let credential = AcademicCredential::issue(
        &issuer,
        provider.as_ref(),
        &holder,
        "Alice Chen",
        "Momentum University",
        "BSc Computer Science",
        &[Course {
            name: "Cryptography".into(),
            grade: "A".into(),
            credits: 4,
            year: 2025,
        }],
    )
    .unwrap();

    Actors { wallet, credential }
}

fn reveal(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn disclose_degree_hide_the_rest() {
    let actors = setup();
    let engine = DisclosureEngine::session_scoped();

    let presentation = engine
        .create_presentation(&actors.credential, &reveal(&["degree", "institution"]))
        .unwrap();

    assert_eq!(presentation.revealed_attribute_count, 2);
    assert!(presentation.commitments.contains_key("gpa"));
    assert!(presentation.commitments.contains_key("name"));
    assert!(!presentation.disclosed_attributes.contains_key("gpa"));

    let report = verify_presentation(
        &presentation,
        Some(&actors.credential),
        actors.wallet.resolver(),
    );
    assert!(report.verified, "errors: {:?}", report.errors);
    assert_eq!(
        report.disclosed_attributes.get("degree").unwrap(),
        "BSc Computer Science"
    );
    assert_eq!(
        report.hidden_count,
        actors.credential.credential_subject.len() - 2
    );
}

#[test]
fn presentation_survives_wire_roundtrip() {
    let actors = setup();
    let engine = DisclosureEngine::session_scoped();
    let presentation = engine
        .create_presentation(&actors.credential, &reveal(&["gpa"]))
        .unwrap();

    let encoded = serde_json::to_string(&presentation).unwrap();
    let decoded = serde_json::from_str(&encoded).unwrap();

    let report = verify_presentation(
        &decoded,
        Some(&actors.credential),
        actors.wallet.resolver(),
    );
    assert!(report.verified, "errors: {:?}", report.errors);
    assert_eq!(report.disclosed_attributes.get("gpa").unwrap(), "4.00");
}

#[test]
fn inflated_gpa_in_presentation_is_caught() {
    let actors = setup();
    let engine = DisclosureEngine::session_scoped();
    let mut presentation = engine
        .create_presentation(&actors.credential, &reveal(&["gpa"]))
        .unwrap();

    // Holder edits the revealed value after the commitments were made.
    let inflated = serde_json::json!("4.00 honors");
    presentation
        .disclosed_attributes
        .insert("gpa".into(), inflated.clone());
    presentation.proofs.get_mut("gpa").unwrap().value = inflated;

    let report = verify_presentation(
        &presentation,
        Some(&actors.credential),
        actors.wallet.resolver(),
    );
    assert!(!report.verified);
    assert!(!report.checks.commitments);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("commitment mismatch for attribute: gpa")));
}

#[test]
fn presentation_over_forged_credential_fails_signature() {
    let actors = setup();
    let engine = DisclosureEngine::session_scoped();
    let presentation = engine
        .create_presentation(&actors.credential, &reveal(&["degree"]))
        .unwrap();

    let mut forged = actors.credential.clone();
    forged.proof.as_mut().unwrap().signature_value = "cd".repeat(64);

    let report = verify_presentation(&presentation, Some(&forged), actors.wallet.resolver());
    assert!(!report.verified);
    assert!(!report.checks.original_signature);
}

#[test]
fn fresh_policy_makes_presentations_unlinkable() {
    let actors = setup();
    let engine = DisclosureEngine::new(CachePolicy::AlwaysFresh);

    let p1 = engine
        .create_presentation(&actors.credential, &reveal(&["degree"]))
        .unwrap();
    let p2 = engine
        .create_presentation(&actors.credential, &reveal(&["degree"]))
        .unwrap();

    assert_ne!(p1.commitments, p2.commitments);

    // Both still verify independently.
    for p in [&p1, &p2] {
        let report = verify_presentation(p, Some(&actors.credential), actors.wallet.resolver());
        assert!(report.verified, "errors: {:?}", report.errors);
    }
}

#[test]
fn session_policy_links_presentations() {
    let actors = setup();
    let engine = DisclosureEngine::session_scoped();

    let p1 = engine
        .create_presentation(&actors.credential, &reveal(&["degree"]))
        .unwrap();
    let p2 = engine
        .create_presentation(&actors.credential, &reveal(&["degree"]))
        .unwrap();

    assert_eq!(p1.commitments, p2.commitments);
}
