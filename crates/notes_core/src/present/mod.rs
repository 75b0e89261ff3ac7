//! Presentation ranking and display helpers shared by every front end.
//!
//! # Responsibility
//! - Deterministic task ordering and due labels for the quick-glance view.
//! - Completion-recency filtering for compact tables.
//! - Short status/priority codes and text shortening.
//!
//! # Invariants
//! - Nothing here touches storage or returns errors.

pub mod codes;
pub mod preview;
pub mod ranker;
pub mod recent;

pub use ranker::{due_label, rank, DueLabel, RankedTask, QUICK_VIEW_LIMIT};
pub use recent::{recent_view, DEFAULT_COMPLETED_WINDOW_DAYS};
