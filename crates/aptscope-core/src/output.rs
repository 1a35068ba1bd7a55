use std::sync::OnceLock;

use regex_lite::Regex;

use crate::PackageName;

fn new_packages_block() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?ms)^The following NEW packages will be installed:[\r\n]+(.*?)[\r\n]\w")
            .expect("new-packages block pattern must compile")
    })
}

fn package_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\w{}.+-]+").expect("package token pattern must compile")
    })
}

/// Given the output from an apt or aptitude command, determine which
/// packages are newly installed.
///
/// The block under the "NEW packages" header is tokenized in raw order,
/// without deduplication. Output with no such header yields an empty list;
/// aptitude prints no block when nothing new was installed, so the two
/// cases are indistinguishable by design. When `include_automatic` is
/// false, packages drawn in as automatic dependencies are filtered out.
pub fn parse_new_packages(output: &str, include_automatic: bool) -> Vec<PackageName> {
    let Some(block) = new_packages_block()
        .captures(output)
        .and_then(|captures| captures.get(1))
    else {
        return Vec::new();
    };

    package_token()
        .find_iter(block.as_str())
        .map(|token| PackageName::from_token(token.as_str()))
        .filter(|package| include_automatic || !package.automatic)
        .collect()
}
