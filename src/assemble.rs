/*!
Turning one [`CommandInfo`] into one [`CommandDefinition`].

This is where every classification decision is made. Arguments become
required, optional, or variadic positional declarations; option specifiers
are split into long name and shortcut, and become either flags or options
with an optional value. Nothing is validated here: odd names and defaults are
passed through for the command-line framework to accept or reject.
*/

use std::sync::Arc;

use crate::{
    command::{ArgumentDeclaration, CommandDefinition, OptionDeclaration, Target},
    info::{ArgumentKind, CommandInfo, OptionKind, split_specifier},
};

/**
Build the command definition for `info`, bound to `file`.

`pass_through` is cloned into the definition as-is.
*/
pub fn assemble<T, P: Clone>(
    info: &CommandInfo,
    file: &Arc<T>,
    pass_through: &P,
) -> CommandDefinition<T, P> {
    let target = Target::new(Arc::clone(file), info.method_name());
    let mut command = CommandDefinition::new(info.name(), target, pass_through.clone());

    set_command_info(&mut command, info);
    set_command_arguments(&mut command, info);
    set_command_options(&mut command, info);

    log::debug!(
        "assembled command `{}` from method `{}`",
        command.name(),
        info.method_name(),
    );

    command
}

fn set_command_info<T, P>(command: &mut CommandDefinition<T, P>, info: &CommandInfo) {
    command.set_description(info.description());
    command.set_help(info.help());
    command.set_aliases(info.aliases());

    // Only the usage string is kept; the framework has nowhere to put the
    // description.
    info.example_usages()
        .for_each(|(usage, _description)| command.add_usage(usage));
}

fn set_command_arguments<T, P>(command: &mut CommandDefinition<T, P>, info: &CommandInfo) {
    for (name, kind) in info.arguments() {
        let description = info.argument_description(name);

        let argument = match *kind {
            ArgumentKind::Required => ArgumentDeclaration::required(name, description),
            ArgumentKind::Variadic(ref defaults) => {
                ArgumentDeclaration::variadic(name, description, defaults.clone())
            }
            ArgumentKind::Optional(ref default) => {
                ArgumentDeclaration::optional(name, description, default.clone())
            }
        };

        log::trace!("{}: argument {argument:?}", info.name());
        command.add_argument(argument);
    }
}

fn set_command_options<T, P>(command: &mut CommandDefinition<T, P>, info: &CommandInfo) {
    for (specifier, kind) in info.options() {
        let (long, shortcut) = split_specifier(specifier);
        let description = info.option_description(long);

        let option = match *kind {
            OptionKind::Flag => OptionDeclaration::flag(long, shortcut, description),
            OptionKind::Valued(ref default) => {
                OptionDeclaration::valued(long, shortcut, description, default.clone())
            }
        };

        log::trace!("{}: option {option:?}", info.name());
        command.add_option(option);
    }
}
