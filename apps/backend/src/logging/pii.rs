use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for PII redaction in logs.
///
/// All patterns are literals known to compile.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Compact JWS: three base64url segments joined by dots
    pub fn compact_token() -> &'static Regex {
        static COMPACT_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]*").unwrap()
        });
        &COMPACT_TOKEN_REGEX
    }

    /// Standard email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Opaque base64url/hex-like runs of 16+ characters
    pub fn opaque_token() -> &'static Regex {
        static OPAQUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{16,}={0,2}").unwrap()
        });
        &OPAQUE_TOKEN_REGEX
    }
}

/// Masks sensitive fragments of a string.
///
/// - Bearer tokens (compact JWS) and other long opaque runs become `[REDACTED_TOKEN]`
/// - Emails keep the first character of the local part and the full domain
pub fn redact(input: &str) -> String {
    let tokens_redacted = PiiRegexRegistry::compact_token().replace_all(input, "[REDACTED_TOKEN]");

    let email_redacted =
        PiiRegexRegistry::email().replace_all(&tokens_redacted, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    let first: String = local.chars().take(1).collect();
                    format!("{first}***@{domain}")
                }
                _ => full_match.to_string(),
            }
        });

    PiiRegexRegistry::opaque_token()
        .replace_all(&email_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Wrapper that redacts its contents whenever it is formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
