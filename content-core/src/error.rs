//! Error types for content engine operations.

use thiserror::Error;

use crate::kind::{BaseShape, ElementKind};
use crate::surface::FieldKey;

/// Result type for content engine operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur in content engine operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A kind name that is not part of the taxonomy.
    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    /// A registry was built without a template for this shape.
    #[error("No template registered for base shape {0}")]
    MissingTemplate(BaseShape),

    /// A template was registered under a shape it does not own.
    #[error("Template for {template} registered under {slot}")]
    TemplateShapeMismatch {
        /// Shape slot the template was registered under.
        slot: BaseShape,
        /// Shape the template reports.
        template: BaseShape,
    },

    /// An element and an uploadable slot do not belong together.
    #[error("Element does not fulfil uploadable slot: {0}")]
    SlotMismatch(String),

    /// A descriptor reached a template that does not own its kind.
    #[error("{kind} is not a {expected} kind")]
    KindMismatch {
        /// Kind carried by the descriptor.
        kind: ElementKind,
        /// Shape of the template that received it.
        expected: BaseShape,
    },

    /// The template for this shape is disabled.
    #[error("Base shape {0} is not supported")]
    UnsupportedShape(BaseShape),

    /// The field is not editable on this shape.
    #[error("Field {field} is not editable on {shape} content")]
    UnsupportedField {
        /// Shape of the content.
        shape: BaseShape,
        /// Requested field.
        field: FieldKey,
    },

    /// Descriptor serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Config(#[from] std::io::Error),
}
