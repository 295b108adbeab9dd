//! Error types for registry construction and definition registration.

use thiserror::Error;

/// Errors raised while building a registry or registering definitions.
///
/// Matching never fails; only misconfiguration does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Settings are malformed or use colliding markers.
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// `add` was called with nothing to add.
    #[error("At least one definition must be provided")]
    NoDefinitions,

    /// Definition name is empty.
    #[error("Definition name must be a non-empty string")]
    MissingName,

    /// `args` or `flags` was present but empty.
    #[error("Definition \"{definition}\": \"{field}\" must contain at least one item")]
    EmptyFields {
        definition: String,
        field: &'static str,
    },

    /// Alias listed twice on the same definition.
    #[error("Definition \"{definition}\": alias \"{alias}\" is declared more than once")]
    DuplicateAlias { definition: String, alias: String },

    /// Argument or flag with an empty name.
    #[error("Definition \"{definition}\": {field} names must be non-empty strings")]
    MissingFieldName {
        definition: String,
        field: &'static str,
    },

    /// Two arguments share a name.
    #[error("Definition \"{definition}\": argument \"{name}\" is declared more than once")]
    DuplicateArgument { definition: String, name: String },

    /// `match = "boolean"` used on a positional argument.
    #[error("Argument \"{name}\" cannot match boolean, only flags can")]
    BooleanArgument { name: String },

    /// `delimiter` set on a field that is not a list.
    #[error("Field \"{name}\" declares a delimiter but does not match list")]
    DelimiterNotAllowed { name: String },

    /// List delimiter is the empty string.
    #[error("Field \"{name}\" must use a non-empty list delimiter")]
    EmptyListDelimiter { name: String },

    /// A content argument is followed by other arguments.
    #[error("Argument \"{name}\" must be defined last because it is matching content")]
    ContentNotLast { name: String },
}
