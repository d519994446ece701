//! Input validation core for the BulkBuddy platform
//!
//! P0 Security: Provides the two security-sensitive validators shared by the
//! auth and signup flows:
//!
//! - [`redirect`] - Callback-URL sanitization against open redirects
//! - [`password`] - Rule-based password strength scoring for the UI meter
//!
//! Both validators are pure, total functions: every input, including empty
//! and pathological strings, maps to a defined output. They own no state,
//! perform no I/O, and may be called concurrently without coordination.

pub mod password;
pub mod redirect;

pub use password::{
    evaluate_strength, format_strength_feedback, score_description, score_strength,
    StrengthEvaluation, StrengthRule,
};
pub use redirect::{
    callback_from_query, resolve_callback_path, SanitizedPath, CALLBACK_PARAMS,
    DEFAULT_CALLBACK_PATH,
};
