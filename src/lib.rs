/*!
Turn plain methods into command-line command definitions.

A *command file* is any type whose `impl` block is annotated with
[`#[docket::command_file]`][command_file]. Every public method that takes
`self` becomes a candidate command; the macro records the method names and,
for each one, a [`CommandInfo`] built from the method's doc comments,
parameters, and `#[docket(...)]` attributes.

The [`CommandFactory`] then runs the pipeline:

1. [`discover`] filters out reserved names (`_private`, `get_foo`, `setFoo`
   and friends),
2. [`CommandFile::command_info`] supplies one record per method,
3. [`assemble`] classifies every argument (required, optional, variadic) and
   option (flag, valued) into a [`CommandDefinition`].

The definitions are handed to a command-line framework through the
[`Registrar`] trait. `docket` doesn't parse command lines itself.

```ignore
use std::sync::Arc;

struct Site;

#[docket::command_file]
impl Site {
    /// Deploy the site.
    #[docket(alias = "d")]
    pub fn deploy(
        &self,
        #[docket(help = "Environment to deploy to")] target: String,
        #[docket(option, short = 'f')] force: bool,
    ) {
    }
}

let commands = docket::CommandFactory::new().build(&Arc::new(Site))?;
```
*/

pub mod assemble;
pub mod command;
pub mod discover;
pub mod errors;
pub mod factory;
pub mod info;
pub mod printers;
pub mod registrar;
pub mod scalar;

pub use assemble::assemble;
pub use command::{
    ArgumentDeclaration, ArgumentMode, CommandDefinition, DefaultValue, OptionDeclaration,
    OptionMode, Target,
};
pub use discover::discover;
pub use docket_derive::command_file;
pub use errors::{DefinitionError, FactoryError, InfoError};
pub use factory::{CommandFactory, FactoryConfig};
pub use info::{ArgumentKind, CommandInfo, OptionKind};
pub use registrar::Registrar;
pub use scalar::Scalar;

/**
A type whose public methods can be turned into commands.

Usually implemented by [`#[docket::command_file]`][command_file]; a manual
implementation needs to list the method names and produce a [`CommandInfo`]
for each of them.
*/
pub trait CommandFile {
    /// The public method names of this type, in declaration order. Reserved
    /// names are included here and filtered out by [`discover`].
    const METHODS: &'static [&'static str];

    /// Get the metadata record for one method. Unknown methods are an error.
    fn command_info(method: &str) -> Result<CommandInfo, InfoError>;
}
