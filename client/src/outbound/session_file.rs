//! File-backed session store.
//!
//! Persists the session as one JSON document, staged under a unique
//! temporary name and renamed into place so readers never observe a partial
//! write. A record that fails to decode is treated as signed out rather
//! than an error, matching how the rest of the client handles unreadable
//! session state.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::session::Session;

/// Session store rooted in the directory that holds the session file.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
    directory: PathBuf,
    file_name: PathBuf,
}

impl FileSessionStore {
    /// Open a store for the session file at `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// Returns [`SessionStoreError`] when `path` has no file name or the
    /// parent directory cannot be created or opened.
    pub fn open(path: &Path) -> Result<Self, SessionStoreError> {
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| {
                SessionStoreError::with_context(format!("{} is not a file path", path.display()))
            })?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        };

        Dir::create_ambient_dir_all(&directory, ambient_authority())
            .map_err(|error| io_error(&directory, &error))?;
        let dir = Dir::open_ambient_dir(&directory, ambient_authority())
            .map_err(|error| io_error(&directory, &error))?;

        Ok(Self {
            dir,
            directory,
            file_name,
        })
    }

    /// Full path of the session file, for display purposes.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    fn context_path(&self, relative: &Path) -> PathBuf {
        self.directory.join(relative)
    }

    fn replace_file(&self, staged: &Path) -> Result<(), SessionStoreError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(io_error(&self.path(), &error)),
        }
        self.dir
            .rename(staged, &self.dir, &self.file_name)
            .map_err(|error| io_error(&self.path(), &error))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let bytes = match self.dir.read(&self.file_name) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(io_error(&self.path(), &error)),
        };

        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                warn!(
                    path = %self.path().display(),
                    error = %error,
                    "discarding unreadable session record"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let encoded = serde_json::to_vec(session).map_err(|error| {
            SessionStoreError::with_context(format!("failed to encode session: {error}"))
        })?;

        let staged = PathBuf::from(format!(".tmp-session-{}", Uuid::new_v4().simple()));
        let result = (|| -> Result<(), SessionStoreError> {
            self.dir
                .write(&staged, &encoded)
                .map_err(|error| io_error(&self.context_path(&staged), &error))?;
            self.replace_file(&staged)
        })();

        let _cleanup_result = self.dir.remove_file(&staged);
        result
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(&self.path(), &error)),
        }
    }
}

fn io_error(path: &Path, error: &io::Error) -> SessionStoreError {
    SessionStoreError::with_context(format!("{}: {error}", path.display()))
}
