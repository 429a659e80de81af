//! Form domain layer
//!
//! Field values, per-form schemas and validators, the observable form store
//! and governing-field switches.

mod branch;
pub mod event;
mod field;
pub mod job;
mod rules;
mod schema;
mod store;
pub mod survey;

pub use branch::switch_branch;
pub use field::{FieldKind, FieldSpec, FieldValue, ValuesExt};
pub use schema::{FormId, FormSchema, SummaryLine};
pub use store::FormStore;
