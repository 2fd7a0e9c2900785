use crate::branch::*;
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_BRANCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(feature|bugfix|fix|chore|refactor)/[a-z0-9][a-z0-9/-]*$").unwrap());

fn assert_well_formed(branch: &str) {
    assert!(VALID_BRANCH.is_match(branch), "malformed branch: {branch:?}");
    assert!(branch.len() <= MAX_BRANCH_LEN);
    assert!(!branch.contains("--"), "doubled dash in {branch:?}");
    assert!(!branch.contains("//"), "doubled slash in {branch:?}");
    assert!(!branch.ends_with('-') && !branch.ends_with('/'));
}

#[test]
fn test_sanitize_basic() {
    assert_eq!(sanitize("Fix Login Bug"), "feature/fix-login-bug");
    assert_eq!(sanitize("  Add   OAuth  "), "feature/add-oauth");
}

#[test]
fn test_sanitize_keeps_existing_prefix() {
    assert_eq!(sanitize("bugfix/null-pointer"), "bugfix/null-pointer");
    assert_eq!(sanitize("chore/update-deps"), "chore/update-deps");
    assert_eq!(sanitize("Refactor/Session-Store"), "refactor/session-store");
}

#[test]
fn test_sanitize_does_not_double_prefix() {
    assert_eq!(sanitize("feature/login"), "feature/login");
    // A bare category word is not a prefix.
    assert_eq!(sanitize("feature"), "feature/feature");
}

#[test]
fn test_sanitize_collapses_separators() {
    assert_eq!(sanitize("fix//double--dash"), "fix/double-dash");
    assert_eq!(sanitize("a___b...c"), "feature/a-b-c");
}

#[test]
fn test_sanitize_trims_separators() {
    assert_eq!(sanitize("--hello--"), "feature/hello");
    assert_eq!(sanitize("//hello//"), "feature/hello");
    assert_eq!(sanitize("-/hello/-"), "feature/hello");
}

#[test]
fn test_sanitize_pure_symbols_is_empty() {
    assert_eq!(sanitize("!!! ???"), "");
    assert_eq!(sanitize(""), "");
    assert_eq!(sanitize("---///---"), "");
}

#[test]
fn test_sanitize_truncates_to_limit() {
    let long = "a".repeat(200);
    let branch = sanitize(&long);
    assert_eq!(branch.len(), MAX_BRANCH_LEN);
    assert_well_formed(&branch);
}

#[test]
fn test_sanitize_truncation_never_leaves_dangling_separator() {
    // Arrange a dash to land exactly at the truncation point.
    let raw = format!("{}-{}", "a".repeat(111), "b".repeat(50));
    let branch = sanitize(&raw);
    assert!(branch.len() <= MAX_BRANCH_LEN);
    assert_well_formed(&branch);
}

#[test]
fn test_sanitize_idempotent() {
    let inputs = [
        "Fix Login Bug",
        "bugfix/null-pointer-123",
        "  weird__input//here  ",
        &"x".repeat(300),
        "docs/readme-touchup",
    ];
    for input in inputs {
        let once = sanitize(input);
        if !once.is_empty() {
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
            assert_well_formed(&once);
        }
    }
}

#[test]
fn test_sanitize_reprefixes_docs_and_test() {
    // Only the five canonical prefixes survive as-is.
    assert_eq!(sanitize("docs/readme"), "feature/docs/readme");
    assert_eq!(sanitize("test/flaky-suite"), "feature/test/flaky-suite");
}

#[test]
fn test_fallback_slug() {
    assert_eq!(fallback_slug("Fix login bug"), "fix-login-bug");
    assert_eq!(sanitize(&fallback_slug("Fix login bug")), "feature/fix-login-bug");
    assert_eq!(fallback_slug("日本語だけ"), "task");
    assert_eq!(fallback_slug("!!!"), "task");
}

#[test]
fn test_extract_candidate_prefixed_token() {
    let out = "Sure! I suggest branch: bugfix/null-pointer-123 done";
    assert_eq!(extract_candidate(out), "bugfix/null-pointer-123");
}

#[test]
fn test_extract_candidate_last_match_wins() {
    let out = "maybe feature/first-idea or rather fix/second-idea";
    assert_eq!(extract_candidate(out), "fix/second-idea");
}

#[test]
fn test_extract_candidate_normalizes_case_and_cr() {
    let out = "Branch name:\r\nFeature/Login-Form\r\n";
    assert_eq!(extract_candidate(out), "feature/login-form");
}

#[test]
fn test_extract_candidate_token_fallback() {
    // No category-prefixed token anywhere; the last usable word wins.
    let out = "I would call it \"login-form\".";
    assert_eq!(extract_candidate(out), "feature/login-form");
}

#[test]
fn test_extract_candidate_empty_output() {
    assert_eq!(extract_candidate(""), "");
    assert_eq!(extract_candidate("!!! ---"), "");
}
