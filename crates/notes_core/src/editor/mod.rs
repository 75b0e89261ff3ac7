//! Task field editor.
//!
//! # Responsibility
//! - Model interactive editing of one task as a pure state machine over
//!   abstract input events.
//! - Coerce edited text back into typed task attributes.
//! - Offer a line-by-line mode for terminals without raw input.
//!
//! # Invariants
//! - Both modes commit through `FieldEditor::apply_to`, so the same intended
//!   edits produce identical attributes.
//! - Coercion never fails: invalid text keeps the prior value.

pub mod field;
pub mod linear;
pub mod machine;

pub use field::{EditField, FIELD_COUNT};
pub use linear::{edit_linear, LinearAnswer};
pub use machine::{EditorOutcome, EditorState, FieldEditor, InputEvent};
