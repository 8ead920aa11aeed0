use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    calendar::CalendarMonth,
    config::{Config, ConfigManager},
    currency::AmountFormat,
    errors::LedgerError,
    ledger::{LedgerStore, Property, User},
    utils::clock::{Clock, FixedClock, SystemClock},
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output::{self, OutputPreferences};

/// Overrides "today" for the shell, in `YYYY-MM-DD` form.
pub const TODAY_ENV: &str = "RENT_LEDGER_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type CommandResult = Result<(), CommandError>;

/// Property and month currently shown by `calendar`, so `next`/`prev` can
/// move relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalendarCursor {
    pub property: Uuid,
    pub month: CalendarMonth,
}

pub struct ShellContext {
    mode: CliMode,
    pub(crate) registry: CommandRegistry,
    store: LedgerStore,
    config: Config,
    format: AmountFormat,
    clock: Box<dyn Clock>,
    pub(crate) theme: ColorfulTheme,
    pub(crate) cursor: Option<CalendarCursor>,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Context over the profile in the configured data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load_or_init()?;
        let profile = manager.open_profile(&config)?;
        let clock: Box<dyn Clock> = match std::env::var(TODAY_ENV) {
            Ok(raw) => Box::new(FixedClock(crate::calendar::parse_civil_date(&raw)?)),
            Err(_) => Box::new(SystemClock),
        };
        Self::with_parts(mode, LedgerStore::new(Box::new(profile)), config, clock)
    }

    pub fn with_parts(
        mode: CliMode,
        store: LedgerStore,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
            theme: store.theme()?,
        });
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            format: AmountFormat::from_config(&config),
            store,
            config,
            clock,
            theme: ColorfulTheme::default(),
            cursor: None,
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn format(&self) -> &AmountFormat {
        &self.format
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn require_user(&self) -> Result<User, CommandError> {
        Ok(self.store.require_user()?)
    }

    /// Resolves a list position (1-based), a full id or a unique id prefix.
    pub(crate) fn resolve_property(&self, token: &str) -> Result<Property, CommandError> {
        let properties = self.store.list_properties()?;
        if let Ok(position) = token.parse::<usize>() {
            if position >= 1 && position <= properties.len() && token.len() < 8 {
                return Ok(properties[position - 1].clone());
            }
        }
        if let Ok(id) = Uuid::parse_str(token) {
            return Ok(self.store.get_property(id)?);
        }

        let needle = token.to_ascii_lowercase().replace('-', "");
        if needle.len() < 4 {
            return Err(CommandError::InvalidArguments(format!(
                "`{}` is neither a list position nor an id prefix of 4+ characters",
                token
            )));
        }
        let mut matches = properties
            .into_iter()
            .filter(|property| property.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(property), None) => Ok(property),
            (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
                "id prefix `{}` matches several properties",
                token
            ))),
            (None, _) => Err(LedgerError::NotFound(format!("property `{}`", token)).into()),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(definition) = self.registry.get(command) {
            let handler = definition.handler;
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::NotLoggedIn) => {
                output::error("No user is logged in.");
                output::hint("Use `login <user> <password>` first.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }
}
