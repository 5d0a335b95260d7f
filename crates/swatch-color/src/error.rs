// SPDX-License-Identifier: MIT

/// Failure produced by the conversion functions.
///
/// The only way a conversion can fail is malformed text input; every numeric
/// path is total because the value types cannot hold out-of-range data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The input is not 3 or 6 hex digits with an optional leading `#`.
    #[error("invalid hex color `{0}` (expected 3 or 6 hex digits, optional `#`)")]
    InvalidHex(String),
}
