pub mod form;
pub mod grid;

pub use form::{FieldSpec, FormOutcome, FormState};
pub use grid::{Cell, CellKind, Column, DataGrid};
