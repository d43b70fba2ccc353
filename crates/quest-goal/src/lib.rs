//! # quest-goal
//!
//! Goal domain model, tracker aggregate, and snapshot store for Questline.
//!
//! A [`Goal`] is a trackable objective with a point reward and one of
//! three completion rules (simple, eternal, checklist). The
//! [`GoalTracker`] aggregate owns the ordered goal sequence, the running
//! score, and the session history log.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalKind`] — the closed variant set and its completion
//!   semantics
//! - [`GoalTracker`] — the aggregate (sole owner and writer of the goals)
//! - [`GoalFile`] — JSON snapshot persistence with partial-failure decode
//! - [`QuestError`] — the error taxonomy; nothing here is fatal to a caller

pub mod error;
pub mod goal;
pub mod store;
pub mod tracker;

pub use error::QuestError;
pub use goal::{EventOutcome, Goal, GoalKind, Priority};
pub use store::{decode, encode, GoalFile, Snapshot};
pub use tracker::{EventRecord, GoalTracker, HistoryEntry};
