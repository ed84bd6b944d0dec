//! Error types for schema augmentation
//!
//! This module contains the error type shared by graph validation, the
//! synthesizers and the assembler.

/// Error type for schema augmentation
#[derive(Debug, thiserror::Error)]
pub enum AugmentError {
    /// A type references another type that is not declared
    #[error("unknown type '{type_name}' referenced by '{referenced_by}'")]
    UnknownType {
        /// The missing type name
        type_name: String,
        /// Where the reference was found
        referenced_by: String,
    },

    /// Two types share the same name
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// Two fields of the same type share the same name
    #[error("duplicate field '{field_name}' on type '{type_name}'")]
    DuplicateField {
        /// Owning type
        type_name: String,
        /// Duplicated field
        field_name: String,
    },

    /// A field definition is malformed
    #[error("invalid field '{type_name}.{field_name}': {reason}")]
    InvalidField {
        /// Owning type
        type_name: String,
        /// Offending field
        field_name: String,
        /// What is wrong with it
        reason: String,
    },

    /// A union lists something other than an object type
    #[error("union '{union}' member '{member}' is not an object type")]
    InvalidUnionMember {
        /// The union
        union: String,
        /// The offending member
        member: String,
    },

    /// An object implements something other than an interface
    #[error("type '{object}' implements '{interface}', which is not an interface")]
    InvalidImplements {
        /// The implementing type
        object: String,
        /// The offending name
        interface: String,
    },

    /// An object does not declare a field required by one of its interfaces
    #[error("type '{object}' is missing field '{field}' of interface '{interface}'")]
    MissingInterfaceField {
        /// The implementing type
        object: String,
        /// The interface
        interface: String,
        /// The missing field
        field: String,
    },

    /// A declared type takes a name the generated schema needs
    #[error("type name '{type_name}' is reserved: {reason}")]
    ReservedTypeName {
        /// The declared name
        type_name: String,
        /// Which generated type it collides with
        reason: String,
    },

    /// Two synthesizers produced different definitions under one name
    #[error("conflicting definitions generated for type '{0}'")]
    ConflictingDefinition(String),

    /// A generated definition references a type that was never generated
    #[error("generated type '{type_name}' is referenced by '{referenced_by}' but was never defined")]
    DanglingReference {
        /// The missing type
        type_name: String,
        /// The definition holding the reference
        referenced_by: String,
    },

    /// Failed to decode a type graph document
    #[error("decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AugmentError {
    /// Shorthand for [`AugmentError::InvalidField`]
    pub(crate) fn invalid_field(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AugmentError::InvalidField {
            type_name: type_name.into(),
            field_name: field_name.into(),
            reason: reason.into(),
        }
    }
}
