//! Entity resolver: user-typed identifier -> stored record.
//!
//! # Responsibility
//! - Match by id prefix first, then by case-insensitive title substring.
//! - Report ambiguity with the full ordered candidate list instead of
//!   guessing.
//! - Dispatch across record kinds in a fixed order.
//!
//! # Invariants
//! - Resolution is pure over the supplied candidate pool; it never fails.
//! - Id matches always precede title-only matches.
//! - Record status is ignored; archived or completed records resolve.

pub mod dispatch;
pub mod lookup;
pub mod resolver;

pub use dispatch::{resolve_any, EntityKind, EntityRef, ANY_KIND, ARCHIVABLE_KINDS};
pub use resolver::{resolve, Resolution, Resolvable};
