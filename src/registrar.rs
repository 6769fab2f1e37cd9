/*!
The seam between `docket` and a command-line framework.

A [`Registrar`] receives the pieces of a [`CommandDefinition`] one at a time,
in declaration order, and translates them into whatever the framework needs.
*/

use crate::command::{ArgumentDeclaration, CommandDefinition, OptionDeclaration};

/// Receiver for command definitions. Every method has a no-op default, so
/// implementors only need the ones they care about.
pub trait Registrar {
    type Err;

    /// A new command is being registered. Everything up to the next call to
    /// `command` belongs to it.
    #[expect(unused_variables)]
    #[inline(always)]
    fn command(&mut self, name: &str, description: &str, help: &str) -> Result<(), Self::Err> {
        Ok(())
    }

    #[expect(unused_variables)]
    #[inline(always)]
    fn alias(&mut self, alias: &str) -> Result<(), Self::Err> {
        Ok(())
    }

    /// A usage example. There's no description here, only the usage string
    /// itself.
    #[expect(unused_variables)]
    #[inline(always)]
    fn usage(&mut self, usage: &str) -> Result<(), Self::Err> {
        Ok(())
    }

    #[expect(unused_variables)]
    #[inline(always)]
    fn argument(&mut self, argument: &ArgumentDeclaration) -> Result<(), Self::Err> {
        Ok(())
    }

    #[expect(unused_variables)]
    #[inline(always)]
    fn option(&mut self, option: &OptionDeclaration) -> Result<(), Self::Err> {
        Ok(())
    }
}

impl<T, P> CommandDefinition<T, P> {
    /// Describe this command to a [`Registrar`]. Stops at the first error.
    pub fn register<R>(&self, registrar: &mut R) -> Result<(), R::Err>
    where
        R: Registrar + ?Sized,
    {
        registrar.command(self.name(), self.description(), self.help())?;

        self.aliases()
            .iter()
            .try_for_each(|alias| registrar.alias(alias))?;

        self.usages()
            .iter()
            .try_for_each(|usage| registrar.usage(usage))?;

        self.arguments()
            .iter()
            .try_for_each(|argument| registrar.argument(argument))?;

        self.options()
            .iter()
            .try_for_each(|option| registrar.option(option))
    }
}

/// Register every command in `commands`, in order.
pub fn register_all<'a, T, P, R>(
    commands: impl IntoIterator<Item = &'a CommandDefinition<T, P>>,
    registrar: &mut R,
) -> Result<(), R::Err>
where
    T: 'a,
    P: 'a,
    R: Registrar + ?Sized,
{
    commands
        .into_iter()
        .try_for_each(|command| command.register(registrar))
}
