//! Property-based tests
//!
//! - `recovery_props`: JSON recovery from model output
//!   - A bundle wrapped in brace-free prose is always recovered intact
//!   - Recovery never panics on arbitrary text
//!   - The brace block always starts with `{` and ends with `}`
//!   - Any non-empty string prompt is accepted verbatim

mod recovery_props;
