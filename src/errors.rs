/*!
Error types for the command pipeline.

Discovery never fails and assembly performs no validation, so there are only
two sources of errors: the metadata provider ([`InfoError`]) and the opt-in
early validation of assembled definitions ([`DefinitionError`]).
*/

use thiserror::Error;

/// The metadata record for a method couldn't be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfoError {
    #[error("no command metadata for method `{method}`")]
    UnknownMethod { method: String },

    #[error("command metadata for method `{method}` is unavailable: {message}")]
    Custom { method: String, message: String },
}

impl InfoError {
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }

    pub fn custom(method: impl Into<String>, message: impl core::fmt::Display) -> Self {
        Self::Custom {
            method: method.into(),
            message: message.to_string(),
        }
    }
}

/// A problem with an assembled [`CommandDefinition`][crate::CommandDefinition]
/// that a command-line framework would reject at registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("command name is empty")]
    EmptyName,

    #[error("an argument or option has an empty name")]
    EmptyParameterName,

    #[error("argument `{argument}` is declared more than once")]
    DuplicateArgument { argument: String },

    #[error("option --{option} is declared more than once")]
    DuplicateOption { option: String },

    #[error("shortcut -{shortcut} is used by more than one option")]
    DuplicateShortcut { shortcut: String },

    #[error("variadic argument `{argument}` must be the last argument")]
    VariadicNotLast { argument: String },

    #[error("argument `{argument}` is variadic, but an earlier argument already is")]
    MultipleVariadic { argument: String },

    #[error("required argument `{argument}` can't follow an optional argument")]
    RequiredAfterOptional { argument: String },
}

/// Errors from the [`CommandFactory`][crate::CommandFactory].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Info(#[from] InfoError),

    #[error("invalid command `{command}`: {error}")]
    Definition {
        command: String,
        #[source]
        error: DefinitionError,
    },
}
