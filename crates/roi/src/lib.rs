//! # Meridian ROI Engine
//!
//! This crate is the core of the tracker: it decides where each reporting
//! period begins, measures the account against the stored baselines, and
//! renders the result.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** window math, the two aggregation strategies and the
//!   report composer are deterministic functions of their inputs. Everything
//!   stateful (HTTP, the state file) is reached through the `account-client`
//!   and `state-store` interfaces.
//! - **Per-Period Isolation:** a failure while computing one period's figure
//!   degrades that figure to "not available"; it never suppresses another
//!   period's result or aborts the run.
//!
//! ## Public API
//!
//! - `PeriodWindows`: period-start instants for a timezone-aware moment.
//! - `RoiEngine`: baseline rollover plus the snapshot-delta and
//!   compounded-daily-gain aggregation strategies.
//! - `compose_report`: turns the computed results into the notification text.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;
pub mod window;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{compound_sum, roi_pct, simple_sum, RoiEngine};
pub use report::compose_report;
pub use window::PeriodWindows;
