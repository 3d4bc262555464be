//! File-backed token store mirroring the app's secure-storage slot.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Result, TokenError, TokenStore};

const TMP_SUFFIX: &str = "tmp";
const APP_DIR: &str = "onboard";
const TOKEN_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Stores the session token as a small JSON document, written atomically so
/// a crash mid-save never leaves a truncated credential behind.
pub struct JsonTokenStore {
    path: PathBuf,
}

impl JsonTokenStore {
    /// Places the token file under the platform data directory.
    pub fn new_default() -> Result<Self> {
        let base = dirs::data_dir().ok_or(TokenError::NoDataDir)?;
        Ok(Self::at(base.join(APP_DIR).join(TOKEN_FILE)))
    }

    /// Uses an explicit file path (tests, portable installs).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_atomic(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let tmp = tmp_path(&self.path);
        {
            let mut file = File::create(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for JsonTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        let record = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        self.write_atomic(&json)
    }

    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let record: StoredToken = serde_json::from_str(&data)?;
        Ok(Some(record.token))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}
