use plink_match::{MatchScorer, compute_match};
use plink_model::{ConfidenceLevel, IdentityRecord};

fn juan() -> IdentityRecord {
    IdentityRecord::new("Juan", "Dela Cruz")
        .with_middle_name("Santos")
        .with_sex("M")
        .with_birth_date("1990-01-01")
}

#[test]
fn exact_match_scores_100() {
    let source = juan();
    let candidate = juan();
    let result = compute_match(Some(&source), &candidate);

    assert_eq!(result.score, 100);
    assert_eq!(result.level, ConfidenceLevel::High);
    assert_eq!(result.fields.matched_count(), 5);
    assert_eq!(result.fields.first_name.similarity, 1.0);
    assert_eq!(result.fields.last_name.similarity, 1.0);
    assert_eq!(result.fields.middle_name.similarity, 1.0);

    insta::assert_json_snapshot!(result, @r###"
    {
      "score": 100,
      "level": "high",
      "fields": {
        "first_name": {
          "matched": true,
          "similarity": 1.0
        },
        "last_name": {
          "matched": true,
          "similarity": 1.0
        },
        "middle_name": {
          "matched": true,
          "similarity": 1.0
        },
        "sex": {
          "matched": true
        },
        "birth_date": {
          "matched": true
        }
      }
    }
    "###);
}

#[test]
fn last_name_typo_still_contributes() {
    let source = IdentityRecord {
        last_name: "Delacruz".to_string(),
        ..juan()
    };
    let candidate = juan();
    let explanation = MatchScorer::default().explain(Some(&source), &candidate);
    let result = explanation.result;

    let last = result.fields.last_name;
    assert!((last.similarity - 8.0 / 9.0).abs() < 1e-9);
    assert!(!last.matched, "0.89 is below the display threshold");
    assert_eq!(result.score, 97);
    assert_eq!(result.level, ConfidenceLevel::High);

    insta::assert_snapshot!(
        explanation.summary(),
        @"first_name: 25.0/25; last_name: 26.7/30; middle_name: 10.0/10; sex: 15.0/15; birth_date: 20.0/20"
    );
}

#[test]
fn wrong_birth_date_demotes_to_medium() {
    let source = juan();
    let candidate = juan().with_birth_date("1990-01-02");
    let result = compute_match(Some(&source), &candidate);

    assert_eq!(result.score, 80);
    assert_eq!(result.level, ConfidenceLevel::Medium);
    assert!(!result.fields.birth_date.matched);
    assert_eq!(result.badge(), "80% Medium match");
}

#[test]
fn two_weak_fields_fall_to_low() {
    let source = juan();
    let candidate = juan().with_birth_date("1990-01-02").with_sex("F");
    let result = compute_match(Some(&source), &candidate);

    assert_eq!(result.score, 65);
    assert_eq!(result.level, ConfidenceLevel::Medium);

    let candidate = IdentityRecord {
        middle_name: None,
        ..candidate
    };
    let result = compute_match(Some(&source), &candidate);
    assert_eq!(result.score, 55);
    assert_eq!(result.level, ConfidenceLevel::Low);
}

#[test]
fn missing_source_scores_zero() {
    let result = compute_match(None, &juan());

    assert_eq!(result.score, 0);
    assert_eq!(result.level, ConfidenceLevel::Low);
    assert_eq!(result.fields.matched_count(), 0);
    assert_eq!(result.fields.first_name.similarity, 0.0);
}

#[test]
fn empty_records_never_panic() {
    let empty = IdentityRecord::default();
    let result = compute_match(Some(&empty), &juan());
    assert_eq!(result.score, 0);
    assert_eq!(result.level, ConfidenceLevel::Low);

    let result = compute_match(Some(&empty), &empty);
    assert_eq!(result.score, 100);
}

#[test]
fn padded_uppercase_names_match() {
    let source = IdentityRecord {
        first_name: "  JUAN  ".to_string(),
        last_name: "DELA   CRUZ".to_string(),
        ..juan()
    };
    let result = compute_match(Some(&source), &juan());
    assert_eq!(result.fields.first_name.similarity, 1.0);
    assert_eq!(result.fields.last_name.similarity, 1.0);
    assert_eq!(result.score, 100);
}
