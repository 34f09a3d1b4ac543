//! Result type alias for Fairwatt

use super::errors::FairwattError;

/// Result type alias for Fairwatt operations
///
/// # Examples
///
/// ```
/// use fairwatt::domain::result::Result;
/// use fairwatt::domain::errors::FairwattError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FairwattError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FairwattError>;
