/*!
The command factory: discovery, metadata, and assembly in one place.

[`CommandFactory::build`] runs the whole pipeline. The two halves are also
available separately, so that records can be filtered or edited before they
are assembled:

```ignore
let factory = CommandFactory::new();
let mut infos = factory.command_infos::<Site>()?;
infos.retain(|info| info.name() != "internal");
let commands = factory.assemble_all(&infos, &site, &())?;
```
*/

use std::sync::Arc;

use crate::{
    CommandFile,
    assemble::assemble,
    command::CommandDefinition,
    discover::discover,
    errors::{FactoryError, InfoError},
    info::CommandInfo,
};

/// Configuration for a [`CommandFactory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Check each assembled definition with
    /// [`CommandDefinition::validate`], failing on the first problem. Off by
    /// default, leaving validation to the command-line framework.
    pub validate: bool,
}

impl FactoryConfig {
    #[must_use]
    pub const fn validate(self, validate: bool) -> Self {
        Self { validate }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandFactory {
    config: FactoryConfig,
}

impl CommandFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: FactoryConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Build every command of `file`, with no pass-through payload.
    pub fn build<T: CommandFile>(
        &self,
        file: &Arc<T>,
    ) -> Result<Vec<CommandDefinition<T>>, FactoryError> {
        self.build_with(file, ())
    }

    /// Build every command of `file`; each definition gets a clone of
    /// `pass_through`.
    pub fn build_with<T: CommandFile, P: Clone>(
        &self,
        file: &Arc<T>,
        pass_through: P,
    ) -> Result<Vec<CommandDefinition<T, P>>, FactoryError> {
        let infos = self.command_infos::<T>()?;
        log::debug!(
            "discovered {} command(s) on `{}`",
            infos.len(),
            core::any::type_name::<T>(),
        );

        self.assemble_all(&infos, file, &pass_through)
    }

    /// Discover the command methods of `T` and get the metadata record for
    /// each, in declaration order. Provider errors are returned unchanged.
    pub fn command_infos<T: CommandFile>(&self) -> Result<Vec<CommandInfo>, InfoError> {
        discover::<T>()
            .into_iter()
            .map(T::command_info)
            .collect()
    }

    /// Assemble one definition per record, in order.
    pub fn assemble_all<'a, T, P: Clone>(
        &self,
        infos: impl IntoIterator<Item = &'a CommandInfo>,
        file: &Arc<T>,
        pass_through: &P,
    ) -> Result<Vec<CommandDefinition<T, P>>, FactoryError> {
        infos
            .into_iter()
            .map(|info| self.assemble_one(info, file, pass_through))
            .collect()
    }

    /// Assemble the definition for a single record.
    pub fn assemble_one<T, P: Clone>(
        &self,
        info: &CommandInfo,
        file: &Arc<T>,
        pass_through: &P,
    ) -> Result<CommandDefinition<T, P>, FactoryError> {
        let command = assemble(info, file, pass_through);

        if self.config.validate {
            command
                .validate()
                .map_err(|error| FactoryError::Definition {
                    command: command.name().to_owned(),
                    error,
                })?;
        }

        Ok(command)
    }
}
