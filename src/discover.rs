/*!
Method discovery: which methods of a command file become commands.

Everything public is a candidate except names that look like internals or
accessors: a leading `_`, or `get`/`set` followed by an uppercase letter
(`getName`, `setUp`) or an underscore (`get_name`, `set_up`). Plain `set`,
`setup`, `settings` and `getaway` are all commands.
*/

use crate::CommandFile;

fn is_accessor(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase() || c == '_')
}

/// Check if a method with this name is eligible to become a command.
#[must_use]
pub fn is_command_method(name: &str) -> bool {
    !(name.starts_with('_') || is_accessor(name, "get") || is_accessor(name, "set"))
}

/// Filter a sequence of method names down to the eligible ones, preserving
/// their order.
pub fn eligible<'a>(names: impl IntoIterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    names.into_iter().filter(|&name| {
        let keep = is_command_method(name);
        if !keep {
            log::debug!("skipping method `{name}`: reserved name");
        }
        keep
    })
}

/// Get the names of the methods of `T` that should become commands, in
/// declaration order.
pub fn discover<T: CommandFile + ?Sized>() -> Vec<&'static str> {
    eligible(T::METHODS.iter().copied()).collect()
}
