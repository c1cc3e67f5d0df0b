//! Image uploads written to the public uploads directory

use std::path::PathBuf;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
};

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9._-]").expect("file name pattern compiles"));

/// Replace every character outside `[a-zA-Z0-9._-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return "upload".to_string();
    }
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

#[derive(Clone)]
pub struct UploadsService {
    config: UploadsConfig,
}

impl UploadsService {
    pub fn new(config: UploadsConfig) -> Self {
        Self { config }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.config.dir
    }

    /// Store `bytes` under a timestamped, sanitized name and return its public URL
    pub async fn store(&self, original_name: Option<&str>, bytes: &[u8]) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if bytes.len() > self.config.max_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds the {} byte limit",
                self.config.max_bytes
            )));
        }

        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name.unwrap_or("upload"))
        );

        tokio::fs::create_dir_all(&self.config.dir).await?;
        tokio::fs::write(self.config.dir.join(&file_name), bytes).await?;

        tracing::info!("Stored upload {} ({} bytes)", file_name, bytes.len());
        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            file_name
        ))
    }
}
