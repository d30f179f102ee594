//! Security event logging and PII redaction helpers.

pub mod pii;
pub mod security;
