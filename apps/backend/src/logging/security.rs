use tracing::warn;

use crate::logging::pii::Redacted;
use crate::middleware::authz::AuthzError;
use crate::trace_ctx;

/// Log a rejected request on a protected scope.
pub fn auth_rejected(reason: &AuthzError, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason = %reason,
        path = %Redacted(path),
        "Authorization rejected"
    );
}

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}
