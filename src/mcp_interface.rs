//! Glue between the report builders and the MCP tool surface.
//!
//! Tools hand their `DexResult` to [`respond`], which renders reports as
//! pretty JSON text content and turns errors into MCP error data.

use crate::errors::{DexError, DexResult};
use rmcp::model::{CallToolResult, Content, ErrorCode, ErrorData as McpError};
use serde::Serialize;
use std::borrow::Cow;
use tracing::warn;

pub const INVALID_PARAMS: i32 = -32602;
pub const RESOURCE_NOT_FOUND: i32 = -32002;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC error code for each error kind.
pub fn error_code(err: &DexError) -> i32 {
    match err {
        DexError::Validation(_) => INVALID_PARAMS,
        DexError::NotFound { .. } => RESOURCE_NOT_FOUND,
        DexError::Upstream { .. } => INTERNAL_ERROR,
    }
}

pub fn to_mcp_error(err: DexError) -> McpError {
    warn!(error = %err, "tool call failed");
    McpError {
        code: ErrorCode(error_code(&err)),
        message: Cow::from(err.to_string()),
        data: None,
    }
}

pub fn to_pretty_json<T: Serialize>(report: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(report).map_err(|e| McpError {
        code: ErrorCode(INTERNAL_ERROR),
        message: Cow::from(format!("Failed to serialize report: {}", e)),
        data: None,
    })
}

pub fn render<T: Serialize>(report: &T) -> Result<CallToolResult, McpError> {
    let text = to_pretty_json(report)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Renders a tool outcome for the MCP layer.
pub fn respond<T: Serialize>(result: DexResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(report) => render(&report),
        Err(err) => Err(to_mcp_error(err)),
    }
}
