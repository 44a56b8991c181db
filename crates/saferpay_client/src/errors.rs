/// Result alias carrying an error-stack report.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures of a single gateway call, transport and contract level.
///
/// Business-level rejections are not errors: the gateway reports them as a
/// non-200 response with an error payload, which callers read from the
/// returned value object.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Error while obtaining URL for the gateway call")]
    FailedToObtainIntegrationUrl,
    #[error("Failed to encode gateway request")]
    RequestEncodingFailed,
    #[error("Failed to execute the gateway call")]
    RequestFailed,
    #[error("Failed to deserialize gateway response")]
    ResponseDeserializationFailed,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
}
