// Tests for identifier canonicalization and the known-bad registry

use htmlparity_core::id::{PageId, canonicalize, ids_equal, to_dashed};
use htmlparity_core::known_bad::KnownBadRegistry;
use std::io::Write;
use tempfile::NamedTempFile;

const DASHED: &str = "0367c2db-381a-4f8b-9ce3-60f388a6b2e3";
const NO_DASH: &str = "0367c2db381a4f8b9ce360f388a6b2e3";

// ============================================================================
// Canonicalization Tests
// ============================================================================

#[test]
fn test_canonicalize_dashed() {
    assert_eq!(canonicalize(DASHED), NO_DASH);
}

#[test]
fn test_canonicalize_is_idempotent() {
    let once = canonicalize(DASHED);
    assert_eq!(canonicalize(&once), once);
    assert_eq!(canonicalize(NO_DASH), NO_DASH);
}

#[test]
fn test_canonicalize_short_ids_unchanged() {
    assert_eq!(canonicalize("abc"), "abc");
}

#[test]
fn test_canonicalize_ignores_case_and_surrounding_space() {
    assert_eq!(canonicalize("  0367C2DB381A4F8B9CE360F388A6B2E3\n"), NO_DASH);
}

#[test]
fn test_ids_equal_across_encodings() {
    assert!(ids_equal(DASHED, NO_DASH));
    assert!(!ids_equal(DASHED, "abc"));
}

#[test]
fn test_to_dashed() {
    assert_eq!(to_dashed(NO_DASH), DASHED);
    assert_eq!(to_dashed(DASHED), DASHED);
    assert_eq!(to_dashed("abc"), "abc");
}

#[test]
fn test_page_id_equality() {
    assert_eq!(PageId::parse(DASHED), PageId::parse(NO_DASH));
    assert_eq!(PageId::from(DASHED).as_str(), NO_DASH);
    assert_eq!(PageId::parse(NO_DASH).dashed(), DASHED);
}

#[test]
fn test_page_id_serializes_as_string() {
    let json = serde_json::to_string(&PageId::parse(DASHED)).unwrap();
    assert_eq!(json, format!("\"{}\"", NO_DASH));
}

// ============================================================================
// Known-bad Registry Tests
// ============================================================================

#[test]
fn test_known_bad_uses_canonical_ids() {
    let registry = KnownBadRegistry::new([DASHED]);
    assert!(registry.is_known_bad(&PageId::parse(NO_DASH)));
    assert!(!registry.is_known_bad(&PageId::parse("abc")));
}

#[test]
fn test_known_bad_empty_by_default() {
    let registry = KnownBadRegistry::default();
    assert!(registry.is_empty());
    assert!(!registry.is_known_bad(&PageId::parse(NO_DASH)));
}

#[test]
fn test_known_bad_parse_scopes_to_root() {
    let content = "\
# pages that never match
global1
root1 scoped1
root2 scoped2   # other workspace

";
    let registry = KnownBadRegistry::parse(content, &PageId::parse("root1"));

    assert_eq!(registry.len(), 2);
    assert!(registry.is_known_bad(&PageId::parse("global1")));
    assert!(registry.is_known_bad(&PageId::parse("scoped1")));
    assert!(!registry.is_known_bad(&PageId::parse("scoped2")));
}

#[test]
fn test_known_bad_parse_skips_lines_with_extra_fields() {
    let content = "root1 page1 page2\nroot1 page3\n";
    let registry = KnownBadRegistry::parse(content, &PageId::parse("root1"));

    assert_eq!(registry.len(), 1);
    assert!(!registry.is_known_bad(&PageId::parse("page1")));
    assert!(!registry.is_known_bad(&PageId::parse("page2")));
    assert!(registry.is_known_bad(&PageId::parse("page3")));
}

#[test]
fn test_known_bad_parse_matches_root_in_any_encoding() {
    let content = format!("{} {}\n", DASHED, "bad");
    let registry = KnownBadRegistry::parse(&content, &PageId::parse(NO_DASH));
    assert!(registry.is_known_bad(&PageId::parse("bad")));
}

#[test]
fn test_known_bad_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "{}", DASHED)?;
    writeln!(temp_file)?;

    let registry = KnownBadRegistry::from_file(temp_file.path(), &PageId::parse("root"))?;
    assert!(registry.is_known_bad(&PageId::parse(NO_DASH)));

    Ok(())
}

#[test]
fn test_known_bad_from_missing_file() {
    let result = KnownBadRegistry::from_file(
        std::path::Path::new("/nonexistent/known-bad.txt"),
        &PageId::parse("root"),
    );
    assert!(result.is_err());
}
