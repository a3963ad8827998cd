//! Result type alias for rvanon
//!
//! This module provides a convenient Result type alias that uses RvanonError
//! as the error type.

use super::errors::RvanonError;

/// Result type alias for rvanon operations
///
/// # Examples
///
/// ```
/// use rvanon::domain::result::Result;
/// use rvanon::domain::errors::RvanonError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RvanonError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RvanonError>;
