use std::borrow::Cow;

use review_core::control::ControlError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps control-plane failures onto MCP error codes.
///
/// A review against a missing restaurant is the caller's mistake; everything
/// else is reported as an internal failure.
pub(crate) fn map_err(err: ControlError) -> ErrorData {
    match err {
        ControlError::UnknownRestaurant(_) => mcp_err(ErrorCode::INVALID_PARAMS, err.to_string()),
        ControlError::Store(_) | ControlError::Timeout(_) | ControlError::Task(_) => {
            mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
        }
    }
}
