use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use super::*;

const SAMPLE_OUTPUT: &str = "
Stuff
  More stuff
The following NEW packages will be installed:
  abc{a} def{a} ghi jk lmno pqwerty{a}
  xyz
  g++
Even more stuff
Stuff again
";

fn names(packages: &[PackageName]) -> Vec<&str> {
    packages.iter().map(|package| package.name.as_str()).collect()
}

#[test]
fn parses_manual_packages_by_default() {
    let packages = parse_new_packages(SAMPLE_OUTPUT, false);
    assert!(!packages
        .iter()
        .any(|package| package.name.to_lowercase().contains("stuff")));
    assert!(!packages.iter().any(|package| package.name == "abc"));
    assert_eq!(names(&packages), vec!["ghi", "jk", "lmno", "xyz", "g++"]);
    assert!(packages.iter().all(|package| !package.automatic));
}

#[test]
fn parses_automatic_packages_when_requested() {
    let packages = parse_new_packages(SAMPLE_OUTPUT, true);
    assert_eq!(
        names(&packages),
        vec!["abc", "def", "ghi", "jk", "lmno", "pqwerty", "xyz", "g++"]
    );
    assert!(packages[0].automatic);
    assert!(!packages[2].automatic);
}

#[test]
fn output_without_new_packages_header_yields_nothing() {
    let output = "Reading package lists...\nAll packages are up to date.\n";
    assert!(parse_new_packages(output, false).is_empty());
    assert!(parse_new_packages(output, true).is_empty());
    assert!(parse_new_packages("", false).is_empty());
}

#[test]
fn parsing_is_idempotent() {
    let first = parse_new_packages(SAMPLE_OUTPUT, true);
    let second = parse_new_packages(SAMPLE_OUTPUT, true);
    assert_eq!(first, second);
}

#[test]
fn duplicate_tokens_survive_in_raw_order() {
    let output = "The following NEW packages will be installed:\n  abc abc def\nDone\n";
    let packages = parse_new_packages(output, false);
    assert_eq!(names(&packages), vec!["abc", "abc", "def"]);
}

#[test]
fn block_must_be_terminated_by_a_following_section() {
    // aptitude always prints a summary line after the block; a header with
    // nothing after it does not form a recognizable block.
    let output = "The following NEW packages will be installed:\n  abc def\n";
    assert!(parse_new_packages(output, false).is_empty());
}

#[test]
fn from_token_strips_automatic_marker() {
    let package = PackageName::from_token("libc6-dev{a}");
    assert_eq!(package.name, "libc6-dev");
    assert!(package.automatic);

    let package = PackageName::from_token("g++");
    assert_eq!(package.name, "g++");
    assert!(!package.automatic);
}

#[test]
fn strip_comment_removes_comments_and_trailing_whitespace() {
    assert_eq!(strip_comment("abc"), "abc");
    assert_eq!(strip_comment("  "), "");
    assert_eq!(strip_comment("# def"), "");
    assert_eq!(strip_comment("egh "), "egh");
    assert_eq!(strip_comment("  bar # baz"), "  bar");
    assert_eq!(strip_comment("abc #foo"), "abc");
}

static TEST_SPEC_COUNTER: AtomicU64 = AtomicU64::new(0);

fn test_spec_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let sequence = TEST_SPEC_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!(
        "aptscope-core-tests-{}-{}-{}.txt",
        std::process::id(),
        nanos,
        sequence
    ));
    path
}

#[test]
fn read_spec_file_filters_comments_and_blanks() {
    let path = test_spec_path();
    fs::write(&path, "libxml2-dev\n# build tools\ng++  # compiler\n\n   \nzlib1g-dev \n")
        .expect("must write spec file");

    let deps = read_spec_file(&path).expect("must read spec file");
    assert_eq!(deps, vec!["libxml2-dev", "g++", "zlib1g-dev"]);

    fs::remove_file(&path).expect("must remove spec file");
}

#[test]
fn read_spec_file_treats_missing_file_as_empty() {
    let deps = read_spec_file(&test_spec_path()).expect("missing file must not error");
    assert!(deps.is_empty());
}
