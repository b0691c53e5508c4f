use std::sync::OnceLock;

use regex::Regex;

use crate::license::catalog::Catalog;
use crate::models::{Classification, UNKNOWN_LABEL};

/// `Version` followed by whitespace and a digit run; only the first mention counts.
fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Version\s+(\d+)").expect("valid regex"))
}

/// `Copyright ... <year> <author>`. The author class is loose and can pick up
/// trailing text. The whitespace after the year may be a newline, so the
/// author can come from the following line.
fn copyright_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Copyright.*(\d{4}),?\s([\w !-]*\w)").expect("valid regex"))
}

/// Classify raw file contents.
///
/// Invalid UTF-8 is replaced rather than rejected, so binary noise in a
/// license file does not hide the readable parts.
pub fn classify(catalog: &Catalog, contents: &[u8]) -> Classification {
    let text = String::from_utf8_lossy(contents);
    classify_text(catalog, &text)
}

/// Classify license text.
///
/// Handles:
/// - version numbers (`Version 2`)
/// - copyright year and author (`Copyright (c) 2020 Jane Doe`)
/// - any number of catalog hits, sorted alphabetically
/// - no hits at all → the `Unknown` sentinel
pub fn classify_text(catalog: &Catalog, text: &str) -> Classification {
    let version = version_regex()
        .captures(text)
        .map(|caps| caps[1].to_string());

    let (copyright_year, copyright_author) = match copyright_regex().captures(text) {
        Some(caps) => (Some(caps[1].to_string()), Some(caps[2].to_string())),
        None => (None, None),
    };

    let hits = catalog.matching_labels(text);
    let license_labels = if hits.is_empty() {
        vec![UNKNOWN_LABEL.to_string()]
    } else {
        hits.into_iter().map(str::to_string).collect()
    };

    Classification {
        license_labels,
        version,
        copyright_year,
        copyright_author,
    }
}
