/*!
Assembled command definitions.

A [`CommandDefinition`] is the framework-ready form of one command: its
identity, help text, and the ordered [`ArgumentDeclaration`]s and
[`OptionDeclaration`]s, along with the [`Target`] that runs it and an opaque
pass-through payload.
*/

use core::{
    any,
    fmt::{self, Display},
};
use std::{collections::HashSet, sync::Arc};

use joinery::JoinableIterator as _;
use lazy_format::lazy_format;

use crate::{errors::DefinitionError, scalar::Scalar};

/// The method that runs a command, bound to a shared command file.
pub struct Target<T> {
    file: Arc<T>,
    method: String,
}

impl<T> Target<T> {
    pub fn new(file: Arc<T>, method: impl Into<String>) -> Self {
        Self {
            file,
            method: method.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn file(&self) -> &Arc<T> {
        &self.file
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl<T> Clone for Target<T> {
    fn clone(&self) -> Self {
        Self {
            file: Arc::clone(&self.file),
            method: self.method.clone(),
        }
    }
}

/// Targets are equal when they name the same method on the same command file
/// instance.
impl<T> PartialEq for Target<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.file, &other.file) && self.method == other.method
    }
}

impl<T> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("file", &any::type_name::<T>())
            .field("method", &self.method)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentMode {
    Required,
    Optional,
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMode {
    /// No value is accepted
    Flag,

    /// A value may be given; if it isn't, the default is used
    ValuedOptional,
}

/// The default of a declared argument.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultValue {
    #[default]
    None,
    Single(Scalar),
    Sequence(Vec<Scalar>),
}

impl DefaultValue {
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(*self, DefaultValue::None)
    }
}

impl Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DefaultValue::None => Ok(()),
            DefaultValue::Single(ref value) => value.fmt(f),
            DefaultValue::Sequence(ref values) => {
                write!(f, "[{}]", values.iter().join_with(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDeclaration {
    name: String,
    mode: ArgumentMode,
    description: String,
    default: DefaultValue,
}

impl ArgumentDeclaration {
    /// A required argument. Required arguments have no default.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: ArgumentMode::Required,
            description: description.into(),
            default: DefaultValue::None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        description: impl Into<String>,
        default: Scalar,
    ) -> Self {
        Self {
            name: name.into(),
            mode: ArgumentMode::Optional,
            description: description.into(),
            default: DefaultValue::Single(default),
        }
    }

    pub fn variadic(
        name: impl Into<String>,
        description: impl Into<String>,
        default: Vec<Scalar>,
    ) -> Self {
        Self {
            name: name.into(),
            mode: ArgumentMode::Variadic,
            description: description.into(),
            default: DefaultValue::Sequence(default),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ArgumentMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn default(&self) -> &DefaultValue {
        &self.default
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionDeclaration {
    long: String,
    shortcut: String,
    mode: OptionMode,
    description: String,
    default: Option<Scalar>,
}

impl OptionDeclaration {
    /// A flag. Flags have no default; presence is the whole signal.
    pub fn flag(
        long: impl Into<String>,
        shortcut: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            long: long.into(),
            shortcut: shortcut.into(),
            mode: OptionMode::Flag,
            description: description.into(),
            default: None,
        }
    }

    pub fn valued(
        long: impl Into<String>,
        shortcut: impl Into<String>,
        description: impl Into<String>,
        default: Scalar,
    ) -> Self {
        Self {
            long: long.into(),
            shortcut: shortcut.into(),
            mode: OptionMode::ValuedOptional,
            description: description.into(),
            default: Some(default),
        }
    }

    #[inline]
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The shortcut, or an empty string if there isn't one.
    #[inline]
    #[must_use]
    pub fn shortcut(&self) -> &str {
        &self.shortcut
    }

    #[inline]
    #[must_use]
    pub fn has_shortcut(&self) -> bool {
        !self.shortcut.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> OptionMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The default for a valued option; always `None` for flags.
    #[inline]
    #[must_use]
    pub fn default(&self) -> Option<&Scalar> {
        self.default.as_ref()
    }
}

/**
A fully configured command, ready to be registered with a command-line
framework.

`P` is the pass-through payload. It is cloned into every definition produced
by a single factory call and never inspected by `docket`.
*/
pub struct CommandDefinition<T, P = ()> {
    name: String,
    aliases: Vec<String>,
    description: String,
    help: String,
    usages: Vec<String>,
    arguments: Vec<ArgumentDeclaration>,
    options: Vec<OptionDeclaration>,
    target: Target<T>,
    pass_through: P,
}

impl<T, P> CommandDefinition<T, P> {
    pub fn new(name: impl Into<String>, target: Target<T>, pass_through: P) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            help: String::new(),
            usages: Vec::new(),
            arguments: Vec::new(),
            options: Vec::new(),
            target,
            pass_through,
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = help.into();
    }

    pub fn set_aliases(&mut self, aliases: impl IntoIterator<Item = impl Into<String>>) {
        self.aliases = aliases.into_iter().map(Into::into).collect();
    }

    pub fn add_usage(&mut self, usage: impl Into<String>) {
        self.usages.push(usage.into());
    }

    pub fn add_argument(&mut self, argument: ArgumentDeclaration) {
        self.arguments.push(argument);
    }

    pub fn add_option(&mut self, option: OptionDeclaration) {
        self.options.push(option);
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[inline]
    #[must_use]
    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentDeclaration] {
        &self.arguments
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &[OptionDeclaration] {
        &self.options
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> &Target<T> {
        &self.target
    }

    #[inline]
    #[must_use]
    pub fn pass_through(&self) -> &P {
        &self.pass_through
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDeclaration> {
        self.arguments.iter().find(|argument| argument.name == name)
    }

    pub fn option(&self, long: &str) -> Option<&OptionDeclaration> {
        self.options.iter().find(|option| option.long == long)
    }

    /**
    The one-line synopsis of this command, like
    `deploy [options] [--] <target> [<count>] [<files>...]`.
    */
    pub fn synopsis(&self) -> impl Display + '_ {
        let options = lazy_format!(match (self.options.is_empty()) {
            true => "",
            false => " [options]",
        });

        let separator = lazy_format!(
            match (self.options.is_empty() || self.arguments.is_empty()) {
                true => "",
                false => " [--]",
            }
        );

        let arguments = lazy_format!(
            " {synopsis}" for synopsis in self.arguments.iter().map(argument_synopsis)
        );

        lazy_format!("{name}{options}{separator}{arguments}", name = self.name)
    }

    /**
    Check this definition for problems a command-line framework would reject:
    empty names, duplicate arguments, options or shortcuts, a variadic
    argument that isn't last, or a required argument after an optional one.

    Assembly never calls this itself; the factory does when
    [`FactoryConfig::validate`][crate::FactoryConfig::validate] is set.
    */
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        let mut names = HashSet::new();
        let mut seen_optional = false;
        let mut variadic: Option<&str> = None;

        for argument in &self.arguments {
            if argument.name.is_empty() {
                return Err(DefinitionError::EmptyParameterName);
            }

            if !names.insert(argument.name.as_str()) {
                return Err(DefinitionError::DuplicateArgument {
                    argument: argument.name.clone(),
                });
            }

            if let Some(variadic) = variadic {
                return Err(match argument.mode {
                    ArgumentMode::Variadic => DefinitionError::MultipleVariadic {
                        argument: argument.name.clone(),
                    },
                    _ => DefinitionError::VariadicNotLast {
                        argument: variadic.to_owned(),
                    },
                });
            }

            match argument.mode {
                ArgumentMode::Required if seen_optional => {
                    return Err(DefinitionError::RequiredAfterOptional {
                        argument: argument.name.clone(),
                    });
                }
                ArgumentMode::Required => {}
                ArgumentMode::Optional => seen_optional = true,
                ArgumentMode::Variadic => variadic = Some(argument.name.as_str()),
            }
        }

        let mut longs = HashSet::new();
        let mut shortcuts = HashSet::new();

        for option in &self.options {
            if option.long.is_empty() {
                return Err(DefinitionError::EmptyParameterName);
            }

            if !longs.insert(option.long.as_str()) {
                return Err(DefinitionError::DuplicateOption {
                    option: option.long.clone(),
                });
            }

            if option.has_shortcut() && !shortcuts.insert(option.shortcut.as_str()) {
                return Err(DefinitionError::DuplicateShortcut {
                    shortcut: option.shortcut.clone(),
                });
            }
        }

        Ok(())
    }
}

pub(crate) fn argument_synopsis(argument: &ArgumentDeclaration) -> impl Display + '_ {
    let name = argument.name.as_str();

    lazy_format!(match (argument.mode) {
        ArgumentMode::Required => "<{name}>",
        ArgumentMode::Optional => "[<{name}>]",
        ArgumentMode::Variadic => "[<{name}>...]",
    })
}

impl<T, P: Clone> Clone for CommandDefinition<T, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            description: self.description.clone(),
            help: self.help.clone(),
            usages: self.usages.clone(),
            arguments: self.arguments.clone(),
            options: self.options.clone(),
            target: self.target.clone(),
            pass_through: self.pass_through.clone(),
        }
    }
}

impl<T, P: PartialEq> PartialEq for CommandDefinition<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.aliases == other.aliases
            && self.description == other.description
            && self.help == other.help
            && self.usages == other.usages
            && self.arguments == other.arguments
            && self.options == other.options
            && self.target == other.target
            && self.pass_through == other.pass_through
    }
}

impl<T, P: fmt::Debug> fmt::Debug for CommandDefinition<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("help", &self.help)
            .field("usages", &self.usages)
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .field("target", &self.target)
            .field("pass_through", &self.pass_through)
            .finish()
    }
}
