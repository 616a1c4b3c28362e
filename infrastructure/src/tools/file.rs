//! Bounded file reader: ReadFile

use super::io_tool_error;
use crate::workspace::resolve_confined;
use async_trait::async_trait;
use codelens_application::{InvocationContext, ports::tool::Tool};
use codelens_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use codelens_domain::workspace::{
    DEFAULT_READ_LENGTH, EmptyPath, MAX_READ_LENGTH, ReadRequest, ReadWindow, WorkspaceRoot,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Tool name constant
pub const READ_FILE: &str = "ReadFile";

/// Get the tool definition for ReadFile
pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        format!(
            "Read a byte range of a file in the workspace. Returns the content and the total \
             file size in bytes; page through large files by advancing offset. At most {} \
             bytes are returned per call.",
            MAX_READ_LENGTH
        ),
    )
    .with_parameter(
        ToolParameter::new("path", "Workspace-relative path of the file to read", true)
            .with_type(ParamType::Path),
    )
    .with_parameter(
        ToolParameter::new("offset", "Byte offset to start reading from", false)
            .with_type(ParamType::Integer)
            .with_default(0),
    )
    .with_parameter(
        ToolParameter::new(
            "length",
            format!(
                "Number of bytes to read (default {}, maximum {})",
                DEFAULT_READ_LENGTH, MAX_READ_LENGTH
            ),
            false,
        )
        .with_type(ParamType::Integer)
        .with_default(DEFAULT_READ_LENGTH),
    )
}

#[derive(Debug, Deserialize)]
struct ReadFileArgs {
    path: String,
    #[serde(default)]
    offset: i64,
    #[serde(default)]
    length: i64,
}

/// Success payload of ReadFile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileOutput {
    pub content: String,
    /// Size of the whole file in bytes
    pub total: u64,
    pub offset: u64,
    /// Bytes actually read; the next page starts at `offset + bytes_read`
    pub bytes_read: u64,
}

pub struct ReadFileTool {
    root: Arc<WorkspaceRoot>,
    definition: ToolDefinition,
}

impl ReadFileTool {
    pub fn new(root: Arc<WorkspaceRoot>) -> Self {
        Self {
            root,
            definition: read_file_definition(),
        }
    }

    async fn read(&self, call: &ToolCall, ctx: &InvocationContext) -> Result<ToolResult, ToolError> {
        let args: ReadFileArgs = call.parse_args().map_err(ToolError::invalid_argument)?;

        // Offset is checked first so a negative one fails even for missing files
        let request = ReadRequest::new(args.offset, args.length)
            .map_err(|e| ToolError::invalid_argument(e.to_string()))?;

        let confined = resolve_confined(&self.root, &args.path, EmptyPath::Reject)?;
        ctx.check_cancelled()?;

        let shown = confined.resolved.to_string();
        let host = confined.host;
        let (bytes, total, window) = tokio::task::spawn_blocking(move || read_window(&host, request))
            .await
            .map_err(|e| ToolError::execution_failed(format!("Read task failed: {}", e)))?
            .map_err(|e| io_tool_error(&shown, &e))?;

        debug!(
            path = %shown,
            offset = window.offset,
            len = window.len,
            total,
            "Read file window"
        );

        let bytes_read = bytes.len();
        let output = ReadFileOutput {
            content: String::from_utf8_lossy(&bytes).into_owned(),
            total,
            offset: request.offset(),
            bytes_read: bytes_read as u64,
        };

        Ok(
            ToolResult::from_payload(READ_FILE, &output).with_metadata(ToolResultMetadata {
                bytes: Some(bytes_read),
                path: Some(shown),
                truncated: Some(request.offset() + (bytes_read as u64) < total),
                ..Default::default()
            }),
        )
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, call: &ToolCall, ctx: &InvocationContext) -> ToolResult {
        self.read(call, ctx)
            .await
            .unwrap_or_else(|e| ToolResult::failure(READ_FILE, e))
    }
}

/// Positional read of exactly the clamped window; the handle is dropped on
/// every path out of this function.
fn read_window(path: &Path, request: ReadRequest) -> io::Result<(Vec<u8>, u64, ReadWindow)> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    if metadata.is_dir() {
        return Err(io::Error::new(io::ErrorKind::IsADirectory, "is a directory"));
    }

    let total = metadata.len();
    let window = request.window(total);
    let mut buf = vec![0u8; window.len as usize];
    let filled = read_at_most(&file, &mut buf, window.offset)?;
    buf.truncate(filled);
    Ok((buf, total, window))
}

/// Fill `buf` from `offset`; a short read at end of file is not an error.
#[cfg(unix)]
fn read_at_most(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;

    let mut filled = 0;
    while filled < buf.len() {
        match file.read_at(&mut buf[filled..], offset + filled as u64) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(not(unix))]
fn read_at_most(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::io::{Read, Seek, SeekFrom};

    let mut file = file;
    file.seek(SeekFrom::Start(offset))?;
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
