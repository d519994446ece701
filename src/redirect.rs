//! Callback-URL sanitization for post-auth redirects
//!
//! P0 Security: Prevents open-redirect attacks. Any redirect target taken
//! from an untrusted query parameter must resolve to a same-origin relative
//! path before it is handed to the browser.
//!
//! The policy is deliberately conservative: reject anything that is not
//! trivially safe, rather than trying to parse, decode, or repair the value.
//! Sanitizing a hostile URL into safety is itself an injection surface.

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// Fallback path used whenever a callback target is absent or rejected.
pub const DEFAULT_CALLBACK_PATH: &str = "/";

/// Query parameter names consulted for a callback target, in preference order.
pub const CALLBACK_PARAMS: [&str; 2] = ["callbackUrl", "callbackURL"];

/// Max chars of a rejected candidate echoed into logs
const LOG_CANDIDATE_MAX: usize = 32;

/// A redirect target guaranteed safe for same-origin navigation.
///
/// Starts with a single `/` and never with `//`. The only way to obtain one
/// is [`resolve_callback_path`], so a `SanitizedPath` in a signature is proof
/// the open-redirect check already ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedPath(String);

impl SanitizedPath {
    fn root() -> Self {
        SanitizedPath(DEFAULT_CALLBACK_PATH.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve an untrusted callback candidate into a safe same-origin path.
///
/// Rules, applied in order:
/// 1. Absent or empty candidate resolves to [`DEFAULT_CALLBACK_PATH`].
/// 2. A candidate not starting with `/` is rejected (absolute URLs,
///    `javascript:`, `http://evil.com`).
/// 3. A candidate starting with `//` is rejected (protocol-relative URLs,
///    which browsers resolve as same-scheme absolute: `//evil.com`).
/// 4. Anything else passes through verbatim. No trimming, percent-decoding,
///    or trailing-slash handling.
///
/// Total over all inputs; never panics or errors. Idempotent: resolving an
/// already-resolved path returns it unchanged.
///
/// # Arguments
/// * `candidate` - The raw query-parameter value, if one was present
///
/// # Returns
/// * A [`SanitizedPath`], falling back to `/` for anything unsafe
pub fn resolve_callback_path(candidate: Option<&str>) -> SanitizedPath {
    let candidate = match candidate {
        None | Some("") => return SanitizedPath::root(),
        Some(c) => c,
    };

    if !candidate.starts_with('/') || candidate.starts_with("//") {
        warn!(
            candidate = %truncate_for_log(candidate),
            "rejected unsafe callback target, falling back to root"
        );
        return SanitizedPath::root();
    }

    SanitizedPath(candidate.to_owned())
}

/// Pick the callback candidate out of parsed query pairs.
///
/// The auth pages accept both `callbackUrl` and `callbackURL` spellings;
/// `callbackUrl` wins when both are present. Returns `None` when neither
/// parameter exists, which callers feed straight into
/// [`resolve_callback_path`].
pub fn callback_from_query<'a, I>(pairs: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let [primary, secondary] = CALLBACK_PARAMS;
    let mut fallback = None;
    for (name, value) in pairs {
        if name == primary {
            return Some(value);
        }
        if name == secondary && fallback.is_none() {
            fallback = Some(value);
        }
    }
    fallback
}

/// Truncate a hostile candidate before it reaches the logs.
///
/// Rejected values are attacker-controlled and can be arbitrarily long;
/// only a prefix is needed to investigate.
fn truncate_for_log(candidate: &str) -> String {
    let mut end = LOG_CANDIDATE_MAX.min(candidate.len());
    while !candidate.is_char_boundary(end) {
        end -= 1;
    }
    if end < candidate.len() {
        format!("{}... ({} bytes)", &candidate[..end], candidate.len())
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_candidate_falls_back_to_root() {
        assert_eq!(resolve_callback_path(None).as_str(), "/");
    }

    #[test]
    fn test_empty_candidate_falls_back_to_root() {
        assert_eq!(resolve_callback_path(Some("")).as_str(), "/");
    }

    #[test]
    fn test_absolute_url_rejected() {
        assert_eq!(resolve_callback_path(Some("http://evil.com")).as_str(), "/");
        assert_eq!(
            resolve_callback_path(Some("https://evil.com/dashboard")).as_str(),
            "/"
        );
    }

    #[test]
    fn test_scheme_payload_rejected() {
        assert_eq!(
            resolve_callback_path(Some("javascript:alert(1)")).as_str(),
            "/"
        );
    }

    #[test]
    fn test_protocol_relative_rejected() {
        assert_eq!(resolve_callback_path(Some("//evil.com")).as_str(), "/");
        assert_eq!(resolve_callback_path(Some("//evil.com/path")).as_str(), "/");
    }

    #[test]
    fn test_relative_path_passes_verbatim() {
        assert_eq!(
            resolve_callback_path(Some("/dashboard")).as_str(),
            "/dashboard"
        );
        // Query strings survive untouched, no re-encoding
        assert_eq!(
            resolve_callback_path(Some("/a/b?x=1")).as_str(),
            "/a/b?x=1"
        );
    }

    #[test]
    fn test_whitespace_candidate_rejected() {
        // Leading whitespace means no leading slash, so it is unsafe
        assert_eq!(resolve_callback_path(Some("  /dashboard")).as_str(), "/");
        assert_eq!(resolve_callback_path(Some(" ")).as_str(), "/");
    }

    #[test]
    fn test_single_slash_is_stable() {
        assert_eq!(resolve_callback_path(Some("/")).as_str(), "/");
    }

    #[test]
    fn test_idempotent_for_all_inputs() {
        let inputs = [
            "",
            "/",
            "/dashboard",
            "/a/b?x=1",
            "//evil.com",
            "http://evil.com",
            "javascript:alert(1)",
            "no-leading-slash",
        ];
        for input in inputs {
            let once = resolve_callback_path(Some(input));
            let twice = resolve_callback_path(Some(once.as_str()));
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_long_candidate_is_handled() {
        let long = format!("/{}", "a".repeat(1 << 16));
        assert_eq!(resolve_callback_path(Some(&long)).as_str(), long);

        let hostile = format!("//evil.com/{}", "a".repeat(1 << 16));
        assert_eq!(resolve_callback_path(Some(&hostile)).as_str(), "/");
    }

    #[test]
    fn test_query_prefers_camel_case_spelling() {
        let pairs = [("callbackURL", "/upper"), ("callbackUrl", "/camel")];
        assert_eq!(callback_from_query(pairs), Some("/camel"));
    }

    #[test]
    fn test_query_falls_back_to_upper_spelling() {
        let pairs = [("other", "x"), ("callbackURL", "/upper")];
        assert_eq!(callback_from_query(pairs), Some("/upper"));
    }

    #[test]
    fn test_query_without_callback_param() {
        let pairs = [("page", "2"), ("sort", "asc")];
        assert_eq!(callback_from_query(pairs), None);
    }

    #[test]
    fn test_sanitized_path_serializes_as_plain_string() {
        let path = resolve_callback_path(Some("/dashboard"));
        assert_eq!(
            serde_json::to_string(&path).unwrap(),
            r#""/dashboard""#
        );
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let value = "é".repeat(40);
        let logged = truncate_for_log(&value);
        assert!(logged.len() < value.len());
        assert!(logged.contains("bytes"));
    }
}
