//! Sign-up Form Model
//!
//! Field names, values, and the caller-held interaction state.

pub mod field;
pub mod state;

pub use field::{FieldName, FormValues};
pub use state::{FieldStatus, FormState, TouchedSet};
