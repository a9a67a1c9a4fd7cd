//! File-backed session store.
//!
//! The `{token, actor}` pair persists as one JSON document in one file, the
//! console's analogue of durable browser storage: it survives process
//! restarts and is cleared on logout or forced invalidation. Writes go
//! through a sibling temp file and a rename so a crash mid-write never
//! leaves half a session behind.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use crate::domain::SessionSnapshot;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// Session store persisting to one JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let encoded = serde_json::to_vec_pretty(snapshot)
            .map_err(|err| SessionStoreError::io(format!("failed to encode session: {err}")))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, encoded).map_err(map_io)?;
        fs::rename(&temp, &self.path).map_err(map_io)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(map_io(err)),
        };
        let snapshot = serde_json::from_slice(&bytes)
            .map_err(|err| SessionStoreError::corrupt(err.to_string()))?;
        Ok(Some(snapshot))
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io(err)),
        }
    }
}

fn map_io(error: io::Error) -> SessionStoreError {
    SessionStoreError::io(error.to_string())
}
