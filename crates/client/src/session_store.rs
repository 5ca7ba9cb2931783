use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use slotbook_core::models::session::Session;
use tracing::info;

/// File-backed holder for the signed-in identity.
///
/// This is the only state the client keeps between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Option<Session>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).wrap_err_with(|| {
                    format!("Failed to read session file {}", self.path.display())
                });
            }
        };

        let session = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("Corrupt session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> Result<()> {
        let contents = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, contents)
            .await
            .wrap_err_with(|| format!("Failed to write session file {}", self.path.display()))?;
        info!(user_id = %session.user_id, "session saved");
        Ok(())
    }

    /// Removing a session that does not exist is not an error.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .wrap_err_with(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }
}
