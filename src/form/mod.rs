//! Form field operations.
//!
//! [`FormFieldController`] exposes the practice form's fields (first name,
//! gender, state) as domain operations, in the regular DOM, inside shadow
//! roots and inside frames.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FieldTarget`] | Logical field and its locator lists |
//! | [`FormLocation`] | Where the form was found |
//! | [`FormFieldController`] | Setters, getters, shadow mutations, screenshots |

// ============================================================================
// Submodules
// ============================================================================

mod controller;
mod field;
mod frames;
mod screenshot;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::FormFieldController;
pub use field::FieldTarget;
pub use frames::FormLocation;
pub use screenshot::{sanitize_label, save_png};
