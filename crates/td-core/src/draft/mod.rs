//! Form fields and the persisted registration draft.

pub mod form;
pub mod record;

pub use form::{FieldKind, FormField};
pub use record::{DraftError, DraftRecord, DraftValue, FieldAssignment, FieldChange};
