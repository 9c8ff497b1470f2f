use crate::error::StoreError;
use crate::lock::StateLock;
use chrono::{DateTime, Utc};
use core_types::{AccountSnapshot, BaselineRecord, PeriodKey};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// The durable mapping of period key to baseline record, the entire contents
/// of the on-disk store.
pub type PersistedState = BTreeMap<PeriodKey, BaselineRecord>;

/// Owns the per-period baseline records and decides when each one rolls
/// forward. The only writer of `BaselineRecord`s in the system.
#[derive(Debug)]
pub struct BaselineStore {
    path: PathBuf,
    state: PersistedState,
    _lock: StateLock,
}

impl BaselineStore {
    /// Opens the store at `path`: takes the advisory lock, then loads any
    /// prior state. A missing or corrupted file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let lock = StateLock::acquire(&path)?;
        let state = load_state(&path);
        Ok(Self {
            path,
            state,
            _lock: lock,
        })
    }

    pub fn get(&self, key: PeriodKey) -> Option<&BaselineRecord> {
        self.state.get(&key)
    }

    /// Ensures a baseline exists for `key`, rolling it forward when the period
    /// boundary given by `period_start` has been crossed since it was
    /// anchored.
    ///
    /// An existing anchor at or past `period_start` is left untouched, which
    /// guards against double-rollover within one period. Periods whose
    /// `rolls()` is false (the all-time baseline) only ever take the create
    /// branch.
    pub fn ensure_baseline(
        &mut self,
        key: PeriodKey,
        period_start: DateTime<Utc>,
        snapshot: &AccountSnapshot,
    ) -> &BaselineRecord {
        match self.state.entry(key) {
            Entry::Vacant(slot) => {
                tracing::info!(period = ?key, anchor = %period_start, "Initializing baseline.");
                slot.insert(record_from(period_start, snapshot))
            }
            Entry::Occupied(slot) => {
                let record = slot.into_mut();
                if key.rolls() && record.anchored_at < period_start {
                    tracing::info!(
                        period = ?key,
                        from = %record.anchored_at,
                        to = %period_start,
                        "Rolling baseline forward."
                    );
                    *record = record_from(period_start, snapshot);
                }
                record
            }
        }
    }

    /// Writes the whole state out, replacing the file atomically so that an
    /// interrupted run never leaves a torn document behind.
    pub fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.state)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|e| StoreError::Io(e.error))?;

        Ok(())
    }
}

fn record_from(period_start: DateTime<Utc>, snapshot: &AccountSnapshot) -> BaselineRecord {
    BaselineRecord {
        anchored_at: period_start,
        equity: snapshot.equity,
        balance: snapshot.balance,
    }
}

/// Reads the persisted state. Absent, unreadable, or structurally invalid
/// files all come back as "no history": the tracker rebuilds its baselines
/// from the current run rather than aborting.
fn load_state(path: &Path) -> PersistedState {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return PersistedState::new(),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Could not read the state file; starting from empty baselines.");
            return PersistedState::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "State file is corrupted; starting from empty baselines.");
            PersistedState::new()
        }
    }
}
