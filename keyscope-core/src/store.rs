use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

use crate::credential::ScopedCredential;

/// File name used by [`FileKeyStore`] inside its directory.
pub const CREDENTIAL_FILE_NAME: &str = "scoped_credential.json";

/// Errors from credential persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("io_error: {context}")]
    Io {
        /// What the store was doing when the failure occurred.
        context: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The persisted record could not be encoded or decoded.
    #[error("serialization_error: {error}")]
    Serialization {
        /// Underlying serializer message.
        error: String,
    },
    /// An internal lock was poisoned by a panicking writer.
    #[error("lock_error: {message}")]
    Lock {
        /// Poisoning detail.
        message: String,
    },
}

/// Durable persistence for at most one [`ScopedCredential`].
///
/// `write` replaces any existing record atomically: a concurrent `read`
/// observes either the previous record or the new one, never a torn mix.
/// Within one process, `read` reflects the most recent `write`/`clear`.
/// `clear` is idempotent. No cross-process coordination is provided; the
/// store has a single logical owner.
pub trait ScopedKeyStore: Send + Sync {
    /// Returns the current credential, or `None` when nothing is stored.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing medium fails or holds a
    /// corrupt record.
    fn read(&self) -> Result<Option<ScopedCredential>, StorageError>;

    /// Persists `credential`, replacing any existing record.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the record cannot be made durable.
    fn write(&self, credential: &ScopedCredential) -> Result<(), StorageError>;

    /// Removes the stored credential, if any.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing medium fails.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral profiles.
#[derive(Default)]
pub struct MemoryKeyStore {
    slot: RwLock<Option<ScopedCredential>>,
}

impl MemoryKeyStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScopedKeyStore for MemoryKeyStore {
    fn read(&self) -> Result<Option<ScopedCredential>, StorageError> {
        let slot = self.slot.read().map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;
        Ok(slot.clone())
    }

    fn write(&self, credential: &ScopedCredential) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;
        *slot = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;
        *slot = None;
        Ok(())
    }
}

/// Durable store backed by a single JSON file.
///
/// Writes go to a temporary sibling file which is fsynced and then renamed
/// over the record, so a crash mid-write leaves either the old record or the
/// new one on disk.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Creates a store that keeps its record as
    /// [`CREDENTIAL_FILE_NAME`] under `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIAL_FILE_NAME),
        }
    }

    /// Creates a store over an explicit record path.
    #[must_use]
    pub const fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path of the persisted record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ScopedKeyStore for FileKeyStore {
    fn read(&self) -> Result<Option<ScopedCredential>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    context: format!("reading {}", self.path.display()),
                    source: err,
                })
            }
        };
        let credential =
            serde_json::from_slice(&bytes).map_err(|err| StorageError::Serialization {
                error: err.to_string(),
            })?;
        Ok(Some(credential))
    }

    fn write(&self, credential: &ScopedCredential) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io {
                context: format!("creating {}", parent.display()),
                source: err,
            })?;
        }

        let bytes = serde_json::to_vec(credential).map_err(|err| StorageError::Serialization {
            error: err.to_string(),
        })?;

        let temp = self.temp_path();
        let io_err = |context: String| {
            move |source: std::io::Error| StorageError::Io { context, source }
        };

        let mut file = fs::File::create(&temp)
            .map_err(io_err(format!("creating {}", temp.display())))?;
        file.write_all(&bytes)
            .map_err(io_err(format!("writing {}", temp.display())))?;
        file.sync_all()
            .map_err(io_err(format!("syncing {}", temp.display())))?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(io_err(format!(
            "renaming {} over {}",
            temp.display(),
            self.path.display()
        )))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io {
                context: format!("removing {}", self.path.display()),
                source: err,
            }),
        }
    }
}
