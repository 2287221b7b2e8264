pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create warehouse schema parse error
pub fn schema_parse_error(path: &str, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!(
        "Schema parse error in '{}':\n  {}",
        path,
        message.into()
    ))
}

/// Create questions file parse error
pub fn questions_parse_error(path: &str, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!(
        "Questions parse error in '{}':\n  {}",
        path,
        message.into()
    ))
}

/// Create question selection parse error
pub fn selection_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Invalid question selection: {}", message.into()))
}

/// Create model response parse error
pub fn response_parse_error(message: impl Into<String>) -> AppError {
    AppError::service(format!("Failed to parse model response: {}", message.into()))
}

/// Create LLM API error
pub fn llm_api_error(message: impl Into<String>) -> AppError {
    AppError::service(message.into())
}

/// Create HTTP error
pub fn http_error(err: reqwest::Error) -> AppError {
    let msg = if err.is_timeout() {
        format!("Request timeout: {}", err)
    } else if err.is_connect() {
        format!("Connection failed: {}", err)
    } else if err.is_status() {
        format!("HTTP error {}: {}", err.status().unwrap_or_default(), err)
    } else {
        err.to_string()
    };
    AppError::service(msg)
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create export error
pub fn export_error(path: &str, message: impl Into<String>) -> AppError {
    AppError::internal(format!(
        "Failed to export '{}': {}",
        path,
        message.into()
    ))
}
