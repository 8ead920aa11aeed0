use super::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::errors::LedgerError;
use crate::ledger::Theme;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "theme",
        "Show or change the colour theme",
        "theme [light|dark|toggle]",
        cmd_theme,
    )]
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let store = context.store();
    let theme = match args.first().map(|raw| raw.to_ascii_lowercase()) {
        None => {
            output::info(format!("Theme: {}", store.theme()?));
            return Ok(());
        }
        Some(raw) if raw == "toggle" => store.toggle_theme()?,
        Some(raw) => {
            let theme: Theme = raw
                .parse()
                .map_err(|err: LedgerError| CommandError::InvalidArguments(err.to_string()))?;
            store.set_theme(theme)?;
            theme
        }
    };
    output::set_theme(theme);
    output::success(format!("Theme set to {}.", theme));
    Ok(())
}
