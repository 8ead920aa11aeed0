use super::CommandDefinition;
use crate::calendar::{build_view_for, escalation_schedule, CalendarMonth};
use crate::cli::core::{CalendarCursor, CommandError, CommandResult, ShellContext};
use crate::cli::{output, render};
use crate::ledger::Property;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "calendar",
            "Show a property's rent calendar for a month",
            "calendar <id> [YYYY-MM] | calendar next | calendar prev",
            cmd_calendar,
        ),
        CommandDefinition::new(
            "schedule",
            "List every escalation inside a property's contract",
            "schedule <id>",
            cmd_schedule,
        ),
    ]
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_user()?;
    let cursor = match args {
        [] => {
            return Err(CommandError::InvalidArguments(
                "usage: calendar <id> [YYYY-MM]".into(),
            ))
        }
        [step] if step.eq_ignore_ascii_case("next") => {
            let cursor = current_cursor(context)?;
            CalendarCursor {
                month: cursor.month.next(),
                ..cursor
            }
        }
        [step] if step.eq_ignore_ascii_case("prev") => {
            let cursor = current_cursor(context)?;
            CalendarCursor {
                month: cursor.month.previous(),
                ..cursor
            }
        }
        [token, rest @ ..] => {
            let property = context.resolve_property(token)?;
            let month = match rest.first() {
                Some(raw) => raw.parse::<CalendarMonth>()?,
                None => CalendarMonth::containing(context.today()),
            };
            CalendarCursor {
                property: property.id,
                month,
            }
        }
    };

    let property = context.store().get_property(cursor.property)?;
    show_month(context, &property, cursor.month)?;
    context.cursor = Some(cursor);
    Ok(())
}

fn current_cursor(context: &ShellContext) -> Result<CalendarCursor, CommandError> {
    context.cursor.ok_or_else(|| {
        CommandError::InvalidArguments("no calendar is open; use `calendar <id>` first".into())
    })
}

fn show_month(context: &ShellContext, property: &Property, month: CalendarMonth) -> CommandResult {
    let view = build_view_for(property, month, context.today())?;
    output::section(format!("{} · {}", property.address, month.label()));
    for line in render::month_grid(&view, context.config().week_start, context.format()) {
        output::info(line);
    }
    output::hint(render::LEGEND);
    Ok(())
}

fn cmd_schedule(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_user()?;
    let token = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: schedule <id>".into()))?;
    let property = context.resolve_property(token)?;
    let steps = escalation_schedule(&property)?;

    output::section(format!("Escalations · {}", property.address));
    output::info(format!(
        "  Base {} from {} ({})",
        context.format().format(property.price),
        property.contract_start_date,
        property.escalation_label()
    ));
    if steps.is_empty() {
        output::info("  No escalation falls inside the contract.");
        return Ok(());
    }
    for line in render::escalation_table(&steps, context.format()) {
        output::info(line);
    }
    Ok(())
}
