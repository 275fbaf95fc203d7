use regex::Regex;
use std::sync::LazyLock;

/// Link text of a documentation version, e.g. `Python 3.12 (stable)` or
/// just `3.12 (stable)`.
pub static VERSION_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Python )?(?P<version>\d+\.\d+) \((?P<status>.*)\)")
        .expect("version/status pattern compiles")
});

/// Href of the zipped A4 PDF archive on the downloads page.
pub static PDF_A4_ZIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".+pdf-a4\.zip$").expect("archive pattern compiles")
});

/// Short status code shown in the PEP index mapped to the full statuses
/// a PEP page may carry for it.
const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

/// Full statuses consistent with `code`. Unknown codes have none.
pub fn expected_statuses(code: &str) -> &'static [&'static str] {
    EXPECTED_STATUS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, statuses)| *statuses)
        .unwrap_or(&[])
}

/// The index abbreviation is `<type><status>`, e.g. `SF`; the status code
/// is everything after the type letter.
pub fn status_code(abbreviation: &str) -> &str {
    let mut chars = abbreviation.chars();
    chars.next();
    chars.as_str()
}

/// Splits a version link text into `(version, status)`. Text that does not
/// look like `[Python ]X.Y (status)` is kept whole with an empty status.
pub fn split_version_status(text: &str) -> (String, String) {
    match VERSION_STATUS.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}
