/*!
Plain-text help for assembled commands.

Frameworks usually render their own help, but it's handy to be able to see
exactly what was declared, so this module can print a definition on its own.
*/

use core::fmt::Display;
use std::io::{self, Write as _};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator as _;
use lazy_format::lazy_format;
use textwrap::core::display_width;

use crate::{
    command::{
        ArgumentDeclaration, CommandDefinition, DefaultValue, OptionDeclaration, OptionMode,
        argument_synopsis,
    },
    scalar::Scalar,
};

/// Descriptions start at this column, if the item is short enough.
const COLUMN: usize = 24;

/// Width of wrapped paragraphs, not counting indentation.
const WIDTH: usize = 72;

/*
Overall structure:

DESCRIPTION

Usage:
  command [options] [--] <arg>
  example usage

Aliases:
  a, b

Arguments:
  arg                   description [default: 3]

Options:
  -f, --flag            description

Help:
  long help
 */
pub fn print_help<T, P>(
    out: &mut (impl io::Write + ?Sized),
    command: &CommandDefinition<T, P>,
) -> io::Result<()> {
    if !command.description().is_empty() {
        writeln!(out, "{}", command.description())?;
    }

    section(out, "Usage", |mut out| {
        writeln!(out, "{}", command.synopsis())?;
        command
            .usages()
            .iter()
            .try_for_each(|usage| writeln!(out, "{usage}"))
    })?;

    if !command.aliases().is_empty() {
        section(out, "Aliases", |mut out| {
            writeln!(out, "{}", command.aliases().iter().join_with(", "))
        })?;
    }

    maybe_section(out, "Arguments", command.arguments(), |out, argument| {
        print_argument(out, argument)
    })?;

    maybe_section(out, "Options", command.options(), |out, option| {
        print_option(out, option)
    })?;

    if !command.help().is_empty() {
        section(out, "Help", |mut out| {
            writeln!(out, "{}", textwrap::fill(command.help(), WIDTH))
        })?;
    }

    Ok(())
}

/// Render the help for a command into a string.
pub fn help_text<T, P>(command: &CommandDefinition<T, P>) -> String {
    let mut out = Vec::new();
    print_help(&mut out, command).expect("writing to a Vec<u8> doesn't fail");
    String::from_utf8(out).expect("help text is built from UTF-8 strings")
}

/// Print a summary list of commands: each name with its description.
pub fn print_command_list<'a, T: 'a, P: 'a>(
    out: &mut (impl io::Write + ?Sized),
    commands: impl IntoIterator<Item = &'a CommandDefinition<T, P>>,
) -> io::Result<()> {
    maybe_section(out, "Available commands", commands, |out, command| {
        describe(out, command.name(), command.description())
    })
}

fn print_argument(
    out: &mut (impl io::Write + ?Sized),
    argument: &ArgumentDeclaration,
) -> io::Result<()> {
    let description = with_default(argument.description(), argument_default(argument));
    describe(out, argument_synopsis(argument), &description)
}

fn print_option(out: &mut (impl io::Write + ?Sized), option: &OptionDeclaration) -> io::Result<()> {
    let long = option.long();
    let shortcut = option.shortcut();

    let tags = lazy_format!(match (option.has_shortcut()) {
        true => "-{shortcut}, --{long}",
        false => "    --{long}",
    });

    let placeholder = long.to_uppercase();
    let tags = lazy_format!(match (option.mode()) {
        OptionMode::Flag => "{tags}",
        OptionMode::ValuedOptional => "{tags}[={placeholder}]",
    });

    let default = option.default().filter(|default| !default.is_null());
    let description = with_default(option.description(), default);
    describe(out, tags, &description)
}

/// Defaults worth mentioning: not null, not an empty list.
fn argument_default(argument: &ArgumentDeclaration) -> Option<&DefaultValue> {
    match *argument.default() {
        DefaultValue::None | DefaultValue::Single(Scalar::Null) => None,
        DefaultValue::Sequence(ref values) if values.is_empty() => None,
        ref default => Some(default),
    }
}

fn with_default(description: &str, default: Option<impl Display>) -> String {
    match (description.is_empty(), default) {
        (_, None) => description.to_owned(),
        (true, Some(default)) => format!("[default: {default}]"),
        (false, Some(default)) => format!("{description} [default: {default}]"),
    }
}

/// Write a section by writing a newline, then the `header`, then an
/// indented `body`.
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "\n{header}:")?;
    body(IndentWriter::new("  ", out))
}

/// Write an optional section, only if the iterator is not empty.
/// Otherwise identical to `section`.
fn maybe_section<O: io::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    items: I,
    body: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
) -> io::Result<()> {
    let mut items = items.into_iter();

    match items.next() {
        None => Ok(()),
        Some(first) => section(out, header, |mut out| {
            body(&mut out, first)?;
            items.try_for_each(|item| body(&mut out, item))
        }),
    }
}

/// Describe an item by printing the item, followed by its description. Short
/// items get the description on the same line, aligned to `COLUMN`; long ones
/// get it on the next line, indented.
fn describe(
    out: &mut (impl io::Write + ?Sized),
    item: impl Display,
    description: &str,
) -> io::Result<()> {
    let item = item.to_string();
    write!(out, "{item}")?;

    let description = textwrap::fill(description, WIDTH - COLUMN);

    if description.is_empty() {
        writeln!(out)
    } else if let Some(space) = COLUMN.checked_sub(display_width(&item))
        && space >= 2
        && !description.contains('\n')
    {
        writeln!(out, "{:space$}{description}", "")
    } else {
        let mut out = IndentWriter::new("                        ", out);
        writeln!(out, "\n{description}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::command::Target;

    fn deploy() -> CommandDefinition<()> {
        let target = Target::new(Arc::new(()), "deploy");
        let mut command = CommandDefinition::new("deploy", target, ());
        command.set_description("Deploy the site");
        command.set_help("Pushes the current build to the chosen environment.");
        command.set_aliases(["d", "ship"]);
        command.add_usage("deploy prod --force");
        command.add_argument(ArgumentDeclaration::required("target", "Where to deploy"));
        command.add_argument(ArgumentDeclaration::optional("count", "", Scalar::from(3)));
        command.add_argument(ArgumentDeclaration::variadic("hosts", "Hosts to skip", vec![]));
        command.add_option(OptionDeclaration::flag("force", "f", "Skip checks"));
        command.add_option(OptionDeclaration::valued(
            "output",
            "",
            "Output format",
            Scalar::from("text"),
        ));
        command
    }

    #[test]
    fn full_help() {
        let expected = "\
Deploy the site

Usage:
  deploy [options] [--] <target> [<count>] [<hosts>...]
  deploy prod --force

Aliases:
  d, ship

Arguments:
  <target>                Where to deploy
  [<count>]               [default: 3]
  [<hosts>...]            Hosts to skip

Options:
  -f, --force             Skip checks
      --output[=OUTPUT]   Output format [default: \"text\"]

Help:
  Pushes the current build to the chosen environment.
";

        assert_eq!(help_text(&deploy()), expected);
    }

    #[test]
    fn minimal_help() {
        let command = CommandDefinition::new("noop", Target::new(Arc::new(()), "noop"), ());

        assert_eq!(help_text(&command), "\nUsage:\n  noop\n");
    }

    #[test]
    fn long_items_wrap_to_next_line() {
        let mut command = CommandDefinition::new("sync", Target::new(Arc::new(()), "sync"), ());
        command.add_option(OptionDeclaration::valued(
            "remote-directory",
            "r",
            "Where to sync to",
            Scalar::Null,
        ));

        let expected = "\n\
Usage:
  sync [options]

Options:
  -r, --remote-directory[=REMOTE-DIRECTORY]
                          Where to sync to
";

        assert_eq!(help_text(&command), expected);
    }

    #[test]
    fn wide_characters_align_by_width() {
        let mut command =
            CommandDefinition::new("resize", Target::new(Arc::new(()), "resize"), ());
        command.add_argument(ArgumentDeclaration::required("größe", "New size"));

        let expected = format!(
            "\nUsage:\n  resize <größe>\n\nArguments:\n  <größe>{}New size\n",
            " ".repeat(COLUMN - 7)
        );

        assert_eq!(help_text(&command), expected);
    }

    #[test]
    fn command_list() {
        let mut status =
            CommandDefinition::new("status", Target::new(Arc::new(()), "status"), ());
        status.set_description("Show status");

        let commands = [deploy(), status];
        let mut out = Vec::new();
        print_command_list(&mut out, &commands).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nAvailable commands:\n  deploy                  Deploy the site\n  status                  Show status\n"
        );
    }
}
