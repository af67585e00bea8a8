//! Logo file storage under a server-controlled directory.
//!
//! Client-supplied filenames are never used as paths directly: only the
//! final component survives, characters outside `[A-Za-z0-9._-]` become
//! `_`, and the stored name is always `campaign_{id}_{name}`.

use campaign_core::{CampaignError, CampaignId, CampaignResult};
use std::path::{Path, PathBuf};
use tracing::info;

/// Longest sanitized filename kept, in characters.
const MAX_FILENAME_LEN: usize = 128;

/// Name used when the client sends a file without a filename.
pub const DEFAULT_LOGO_NAME: &str = "uploaded_logo";

pub struct LogoStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl LogoStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Write the logo and return its stored path.
    pub async fn store(
        &self,
        campaign_id: CampaignId,
        filename: &str,
        bytes: &[u8],
    ) -> CampaignResult<PathBuf> {
        if bytes.len() > self.max_bytes {
            return Err(CampaignError::InvalidUpload(format!(
                "logo exceeds {} bytes",
                self.max_bytes
            )));
        }

        let safe_name = sanitize_filename(filename)?;
        let path = self.root.join(format!("campaign_{campaign_id}_{safe_name}"));

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;

        info!(campaign_id, path = %path.display(), size = bytes.len(), "Logo stored");
        Ok(path)
    }
}

/// Reduce a client filename to a safe single path component.
pub fn sanitize_filename(raw: &str) -> CampaignResult<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|ch| ch == '.') {
        return Err(CampaignError::InvalidUpload(format!(
            "unusable filename {raw:?}"
        )));
    }

    Ok(cleaned)
}
