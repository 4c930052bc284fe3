use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use deployer_core::Attachment;
use std::path::Path;
use tracing::debug;
use vcs::Workspace;

use crate::error::{OrchestratorError, Result};

/// Extensions written byte-for-byte; everything else is treated as text.
const BINARY_EXTENSIONS: &[&str] = &["xlsx", "xls", "png", "jpg", "jpeg", "gif", "zip"];

pub fn is_binary_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Decodes the base64 payload that follows the first comma of a data URL.
pub fn decode_data_url(url: &str) -> std::result::Result<Vec<u8>, String> {
    let (_, payload) = url
        .split_once(',')
        .ok_or_else(|| "data URL has no ',' separator".to_string())?;

    BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {e}"))
}

/// Writes `attachment` to `workspace/<name>`, replacing any existing file.
///
/// Text files are decoded as UTF-8 with invalid sequences replaced.
pub async fn materialize(workspace: &Workspace, attachment: &Attachment) -> Result<()> {
    attachment.validate()?;

    let bytes = decode_data_url(&attachment.url)
        .map_err(|reason| OrchestratorError::attachment(&attachment.name, reason))?;
    let target = workspace.file(&attachment.name);

    if is_binary_name(&attachment.name) {
        debug!(name = %attachment.name, bytes = bytes.len(), "Writing binary attachment");
        tokio::fs::write(&target, &bytes).await?;
    } else {
        let text = String::from_utf8_lossy(&bytes);
        debug!(name = %attachment.name, chars = text.len(), "Writing text attachment");
        tokio::fs::write(&target, text.as_bytes()).await?;
    }

    Ok(())
}
