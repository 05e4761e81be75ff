//! Result type alias for the pipeline

use super::errors::AlvysError;

/// Result type alias for pipeline operations
///
/// # Examples
///
/// ```
/// use alvys_etl::domain::result::Result;
/// use alvys_etl::domain::errors::AlvysError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AlvysError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AlvysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
