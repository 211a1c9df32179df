//! File name rules.
//!
//! Every client-supplied name passes through [`sanitize`] before it touches
//! the filesystem, and upload/rename targets must also pass
//! [`is_allowed_extension`].

use unicode_normalization::UnicodeNormalization;

use crate::{CloudStoreError, Result};

/// Turn a client-supplied name into a canonical stored name.
///
/// Accented letters are decomposed to their ASCII base and other non-ASCII
/// characters are dropped. Directory components collapse into the name
/// itself, so the result can never address anything outside the storage
/// root:
///
/// ```
/// use cloudstore::file::sanitize;
///
/// assert_eq!(sanitize("../etc/passwd").unwrap(), "etc_passwd");
/// assert_eq!(sanitize("My Report.pdf").unwrap(), "My_Report.pdf");
/// assert_eq!(sanitize("résumé.pdf").unwrap(), "resume.pdf");
/// assert!(sanitize("..").is_err());
/// ```
pub fn sanitize(raw: &str) -> Result<String> {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let name = filtered.trim_matches(|c| c == '.' || c == '_');
    if name.is_empty() {
        return Err(CloudStoreError::InvalidName(raw.to_string()));
    }

    Ok(name.to_string())
}

/// Extension of `name`: the text after its last `.`, if any.
pub fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Check whether `name` carries an extension from `allowed`.
///
/// The comparison is case-insensitive; names without a `.` never pass.
pub fn is_allowed_extension<S: AsRef<str>>(name: &str, allowed: &[S]) -> bool {
    match extension(name) {
        Some(ext) => allowed
            .iter()
            .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext)),
        None => false,
    }
}
