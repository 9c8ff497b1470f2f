//! # Meridian State Store
//!
//! This crate is the tracker's only durable memory: one baseline record per
//! tracked period, kept in a single JSON file.
//!
//! ## Architectural Principles
//!
//! - **Single Writer:** `BaselineStore` is the only component that mutates
//!   baseline records, and an advisory lock file keeps overlapping runs from
//!   racing on the state file.
//! - **Corruption Is Not Fatal:** a missing or unparsable state file is
//!   treated as "no history"; the store logs a warning and rebuilds its
//!   baselines from the current run.
//! - **Atomic Persistence:** saves go through a temp file and a rename, so an
//!   interrupted run can never leave a syntactically invalid store behind.
//!
//! ## Public API
//!
//! - `BaselineStore`: opens the state file, answers baseline lookups, and
//!   performs the period rollover (`ensure_baseline`).
//! - `StateLock`: the advisory lock guard, acquired on open.
//! - `StoreError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod lock;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use lock::StateLock;
pub use store::{BaselineStore, PersistedState};
