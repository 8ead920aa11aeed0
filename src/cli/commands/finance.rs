use super::CommandDefinition;
use crate::calendar::parse_civil_date;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::{output, render};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "finance",
        "Show property count and monthly income",
        "finance [YYYY-MM-DD]",
        cmd_finance,
    )]
}

fn cmd_finance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_user()?;
    let date = match args.first() {
        Some(raw) => parse_civil_date(raw)?,
        None => context.today(),
    };

    let summary = context.store().finance_summary()?;
    output::section("Finance");
    for line in render::finance_lines(&summary, context.format()) {
        output::info(line);
    }
    let projected = context.store().projected_income(date)?;
    output::info(format!(
        "Projected on {} : {}",
        date,
        context.format().format(projected)
    ));
    Ok(())
}
