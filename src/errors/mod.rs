use anyhow::Context as _;

/// Add context to lookups of catalog entries
pub fn not_found_context(kind: &str, name: &str) -> String {
    format!("Unknown {}: {} not found", kind, name)
}

/// Add context to data file errors
pub fn store_context(operation: &str, path: &str) -> String {
    format!("Failed to {} data file: {}", operation, path)
}

/// Wrap result with data file context
pub fn with_store_context<T, E>(result: Result<T, E>, operation: &str, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| store_context(operation, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_source() {
        let result = std::fs::read_to_string("/nonexistent/beer_data.json");
        let err = with_store_context(result, "read", "/nonexistent/beer_data.json").unwrap_err();

        assert_eq!(err.to_string(), "Failed to read data file: /nonexistent/beer_data.json");
        assert_eq!(err.chain().count(), 2);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(not_found_context("style", "Gose"), "Unknown style: Gose not found");
    }
}
