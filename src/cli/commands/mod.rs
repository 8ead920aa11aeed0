use std::collections::HashMap;

pub mod calendar;
pub mod finance;
pub mod property;
pub mod session;
pub mod system;
pub mod theme;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(session::definitions());
    commands.extend(property::definitions());
    commands.extend(calendar::definitions());
    commands.extend(finance::definitions());
    commands.extend(theme::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands by name, remembering registration order for `help`.
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Parses a required positional argument.
pub(crate) fn parse_arg<T: std::str::FromStr>(
    args: &[&str],
    index: usize,
    label: &str,
) -> Result<T, CommandError> {
    let raw = args
        .get(index)
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing {}", label)))?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid {}: `{}`", label, raw)))
}
