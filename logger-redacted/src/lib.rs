//! PII redaction for log output
//!
//! Patient and doctor records carry phone numbers, and free-text fields may
//! carry e-mail addresses. Values passed through [`PiiRedactor::redact`] have
//! those replaced before they reach a log line. With correlation hashing
//! enabled the same phone number always redacts to the same `PHONE[…]` token,
//! so log lines about one record can still be matched up.
//!
//! ```rust
//! use logger_redacted::{PiiRedactor, RedactionConfig};
//!
//! let redactor = PiiRedactor::new(RedactionConfig {
//!     hash_for_correlation: false,
//!     ..Default::default()
//! });
//! assert_eq!(redactor.redact("555-0100"), "***-****");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

/// Build the redactor matching a logger configuration
pub fn redactor_for(config: &LoggerConfig) -> PiiRedactor {
    if config.redaction_enabled {
        PiiRedactor::default()
    } else {
        tracing::warn!("PII redaction disabled; phone numbers will appear in logs");
        PiiRedactor::new(RedactionConfig::disabled())
    }
}
