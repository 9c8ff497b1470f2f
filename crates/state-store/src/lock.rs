use crate::error::StoreError;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Advisory lock guarding the state file against concurrent runs.
///
/// Acquisition creates `<state file>.lock` with create-new semantics, so two
/// overlapping invocations cannot both hold it. The file is removed when the
/// guard is dropped. A crashed run can leave a stale lock behind; the error
/// message names the path so an operator can clean it up.
#[derive(Debug)]
pub struct StateLock {
    path: PathBuf,
}

impl StateLock {
    /// Takes the lock protecting `state_path`.
    pub fn acquire(state_path: &Path) -> Result<Self, StoreError> {
        let path = lock_path(state_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::Locked(path.display().to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to remove the state lock file.");
        }
    }
}

fn lock_path(state_path: &Path) -> PathBuf {
    let mut raw = state_path.as_os_str().to_os_string();
    raw.push(".lock");
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquisition_fails_while_the_first_is_held() {
        let dir = tempfile::tempdir().unwrap();
        let state_path = dir.path().join("roi_state.json");

        let held = StateLock::acquire(&state_path).unwrap();
        match StateLock::acquire(&state_path) {
            Err(StoreError::Locked(path)) => assert!(path.ends_with("roi_state.json.lock")),
            other => panic!("expected a lock conflict, got {other:?}"),
        }

        drop(held);
        // Released on drop, so a later run can take it again.
        StateLock::acquire(&state_path).unwrap();
    }
}
