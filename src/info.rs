/*!
The per-method metadata record.

A [`CommandInfo`] describes one command before it is assembled: its names,
help text, usage examples, and the declared shape of its arguments and
options. Records are normally produced by `#[docket::command_file]`, but they
can also be built by hand, and they can be freely edited between discovery and
assembly (see [`CommandFactory`][crate::CommandFactory]).
*/

use crate::scalar::Scalar;

/// How a positional argument is declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentKind {
    /// The argument must be given.
    Required,

    /// The argument may be omitted, in which case it takes this default.
    Optional(Scalar),

    /// The argument collects every remaining positional value. These are the
    /// defaults when none are given.
    Variadic(Vec<Scalar>),
}

/// How an option is declared.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// The option takes no value; only its presence matters.
    Flag,

    /// The option accepts an optional value, falling back to this default.
    Valued(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentInfo {
    pub name: String,
    pub kind: ArgumentKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionInfo {
    /// Either `long` or `long|s`.
    pub specifier: String,
    pub kind: OptionKind,
    pub description: String,
}

impl OptionInfo {
    #[inline]
    #[must_use]
    pub fn long(&self) -> &str {
        split_specifier(&self.specifier).0
    }

    #[inline]
    #[must_use]
    pub fn shortcut(&self) -> &str {
        split_specifier(&self.specifier).1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageExample {
    pub usage: String,
    pub description: String,
}

/**
Split an option specifier into its long name and shortcut.

`"verbose|v"` is `("verbose", "v")`; a specifier without a `|` has an empty
shortcut. Only the first `|` separates; anything after it belongs to the
shortcut. A `|` at the very start doesn't count as a separator, so `"|v"` is
a long name.
*/
#[must_use]
pub fn split_specifier(specifier: &str) -> (&str, &str) {
    match specifier.find('|') {
        Some(0) | None => (specifier, ""),
        Some(idx) => (&specifier[..idx], &specifier[idx + 1..]),
    }
}

/// The metadata record for a single command method.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInfo {
    name: String,
    method_name: String,
    description: String,
    help: String,
    aliases: Vec<String>,
    example_usages: Vec<UsageExample>,
    arguments: Vec<ArgumentInfo>,
    options: Vec<OptionInfo>,
}

impl CommandInfo {
    /// Create an empty record for the command `name`, invoked through the
    /// method `method_name`.
    pub fn new(name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method_name: method_name.into(),
            description: String::new(),
            help: String::new(),
            aliases: Vec::new(),
            example_usages: Vec::new(),
            arguments: Vec::new(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn with_usage(
        mut self,
        usage: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.example_usages.push(UsageExample {
            usage: usage.into(),
            description: description.into(),
        });
        self
    }

    /// Add a positional argument. Arguments are declared in the order they
    /// are added.
    #[must_use]
    pub fn with_argument(
        mut self,
        name: impl Into<String>,
        kind: ArgumentKind,
        description: impl Into<String>,
    ) -> Self {
        self.arguments.push(ArgumentInfo {
            name: name.into(),
            kind,
            description: description.into(),
        });
        self
    }

    /// Add an option. `specifier` is either `long` or `long|s`.
    #[must_use]
    pub fn with_option(
        mut self,
        specifier: impl Into<String>,
        kind: OptionKind,
        description: impl Into<String>,
    ) -> Self {
        self.options.push(OptionInfo {
            specifier: specifier.into(),
            kind,
            description: description.into(),
        });
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
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
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Usage examples, as `(usage, description)` pairs.
    pub fn example_usages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.example_usages
            .iter()
            .map(|example| (example.usage.as_str(), example.description.as_str()))
    }

    /// Arguments in declaration order, as `(name, kind)` pairs.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &ArgumentKind)> {
        self.arguments
            .iter()
            .map(|argument| (argument.name.as_str(), &argument.kind))
    }

    /// The description of the argument `name`; empty if there's no such
    /// argument or it has no description.
    #[must_use]
    pub fn argument_description(&self, name: &str) -> &str {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| argument.description.as_str())
            .unwrap_or("")
    }

    /// Options in declaration order, as `(specifier, kind)` pairs.
    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionKind)> {
        self.options
            .iter()
            .map(|option| (option.specifier.as_str(), &option.kind))
    }

    /// The description of the option with the long name `name`; empty if
    /// there's no such option or it has no description.
    #[must_use]
    pub fn option_description(&self, name: &str) -> &str {
        self.options
            .iter()
            .find(|option| option.long() == name)
            .map(|option| option.description.as_str())
            .unwrap_or("")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = help.into();
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    /// Mutable access to the arguments, for callers that adjust records
    /// between discovery and assembly.
    pub fn arguments_mut(&mut self) -> &mut Vec<ArgumentInfo> {
        &mut self.arguments
    }

    /// Mutable access to the options.
    pub fn options_mut(&mut self) -> &mut Vec<OptionInfo> {
        &mut self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::bare("format", ("format", ""))]
    #[case::shortcut("verbose|v", ("verbose", "v"))]
    #[case::first_separator_only("a|b|c", ("a", "b|c"))]
    #[case::leading_separator("|v", ("|v", ""))]
    #[case::trailing_separator("quiet|", ("quiet", ""))]
    #[case::empty("", ("", ""))]
    fn splits_specifiers(#[case] specifier: &str, #[case] expected: (&str, &str)) {
        assert_eq!(split_specifier(specifier), expected);
    }

    fn record() -> CommandInfo {
        CommandInfo::new("deploy", "deploy")
            .with_argument("target", ArgumentKind::Required, "Where to deploy")
            .with_argument("count", ArgumentKind::Optional(Scalar::from(3)), "")
            .with_option("force|f", OptionKind::Flag, "Skip checks")
            .with_option("output", OptionKind::Valued(Scalar::from("text")), "")
    }

    #[test]
    fn descriptions_are_queryable_by_name() {
        let info = record();

        assert_eq!(info.argument_description("target"), "Where to deploy");
        assert_eq!(info.argument_description("count"), "");
        assert_eq!(info.argument_description("missing"), "");

        assert_eq!(info.option_description("force"), "Skip checks");
        assert_eq!(info.option_description("force|f"), "");
        assert_eq!(info.option_description("output"), "");
    }

    #[test]
    fn arguments_keep_declaration_order() {
        let info = record();
        let names: Vec<&str> = info.arguments().map(|(name, _)| name).collect();

        assert_eq!(names, ["target", "count"]);
    }

    #[test]
    fn records_can_be_edited() {
        let mut info = record();
        info.set_name("ship");
        info.add_alias("s");
        info.options_mut().retain(|option| option.long() != "force");

        assert_eq!(info.name(), "ship");
        assert_eq!(info.aliases(), ["s"]);
        assert_eq!(info.options().count(), 1);
    }
}
