use std::path::Path;

use chrono::NaiveDate;
use dialoguer::{Confirm, Input};

use super::{parse_arg, CommandDefinition};
use crate::calendar::{compute_rent_for_date, escalation_steps, parse_civil_date};
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::{output, render};
use crate::ledger::{attachment, Attachment, PropertyDraft};

const ADD_USAGE: &str = "property add <address> <tenant> <price> <rate> <frequency> <start> <end> <due-day> [--photo <file>] [--contract <file>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "property",
        "Register, list, inspect or delete properties",
        "property <add|list|show|delete> ...",
        cmd_property,
    )]
}

fn cmd_property(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_user()?;
    let Some(subcommand) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: property <add|list|show|delete> ...".into(),
        ));
    };

    match subcommand.to_lowercase().as_str() {
        "add" => {
            if context.mode() == CliMode::Interactive && args.len() == 1 {
                add_wizard(context)
            } else {
                add_from_args(context, &args[1..])
            }
        }
        "list" => list(context),
        "show" => show(context, &args[1..]),
        "delete" | "rm" => delete(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown property subcommand `{}`",
            other
        ))),
    }
}

/// Options accepted after the positional fields of `property add`.
#[derive(Debug, Default, PartialEq)]
struct AddOptions<'a> {
    photo: Option<&'a str>,
    contract: Option<&'a str>,
}

fn split_options<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, AddOptions<'a>), CommandError> {
    let mut positional = Vec::new();
    let mut options = AddOptions::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        let slot = match arg {
            "--photo" => &mut options.photo,
            "--contract" => &mut options.contract,
            flag if flag.starts_with("--") => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{}`",
                    flag
                )))
            }
            value => {
                positional.push(value);
                continue;
            }
        };
        let value = iter.next().ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` needs a file path", arg))
        })?;
        *slot = Some(value);
    }
    Ok((positional, options))
}

fn parse_date(args: &[&str], index: usize, label: &str) -> Result<NaiveDate, CommandError> {
    let raw = args
        .get(index)
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing {}", label)))?;
    Ok(parse_civil_date(raw)?)
}

fn draft_from_args(args: &[&str]) -> Result<PropertyDraft, CommandError> {
    let (positional, options) = split_options(args)?;
    if positional.len() != 8 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {}",
            ADD_USAGE
        )));
    }

    let photo = options.photo.map(|path| attachment::encode_file(Path::new(path)));
    let contract = options
        .contract
        .map(|path| attachment::encode_file(Path::new(path)));

    Ok(PropertyDraft {
        address: positional[0].to_string(),
        tenant_name: positional[1].to_string(),
        price: parse_arg(&positional, 2, "price")?,
        increase_rate: parse_arg(&positional, 3, "increase rate")?,
        increase_frequency: parse_arg(&positional, 4, "increase frequency")?,
        contract_start_date: parse_date(&positional, 5, "contract start date")?,
        contract_end_date: parse_date(&positional, 6, "contract end date")?,
        rent_due_day: parse_arg(&positional, 7, "rent due day")?,
        photo_url: photo.transpose()?.map(|attachment| attachment.data),
        contract: contract.transpose()?,
    })
}

fn add_from_args(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = draft_from_args(args)?;
    save(context, draft)
}

fn save(context: &mut ShellContext, draft: PropertyDraft) -> CommandResult {
    let property = context.store().add_property(draft)?;
    output::success(format!(
        "Property {} added: {} ({}).",
        property.short_id(),
        property.address,
        property.tenant_name
    ));
    Ok(())
}

fn add_wizard(context: &mut ShellContext) -> CommandResult {
    output::section("New property");
    let theme = &context.theme;

    let address: String = Input::with_theme(theme)
        .with_prompt("Address")
        .interact_text()?;
    let tenant_name: String = Input::with_theme(theme)
        .with_prompt("Tenant name")
        .interact_text()?;
    let price: f64 = Input::with_theme(theme)
        .with_prompt("Monthly price")
        .validate_with(|value: &f64| {
            if value.is_finite() && *value > 0.0 {
                Ok(())
            } else {
                Err("price must be greater than 0")
            }
        })
        .interact_text()?;
    let increase_rate: f64 = Input::with_theme(theme)
        .with_prompt("Increase rate (%)")
        .default(0.0)
        .interact_text()?;
    let increase_frequency: u32 = Input::with_theme(theme)
        .with_prompt("Increase every (months)")
        .default(12)
        .validate_with(|value: &u32| {
            if *value > 0 {
                Ok(())
            } else {
                Err("must be at least 1")
            }
        })
        .interact_text()?;
    let contract_start_date = prompt_date(context, "Contract start (YYYY-MM-DD)")?;
    let contract_end_date = prompt_date(context, "Contract end (YYYY-MM-DD)")?;
    let rent_due_day: u32 = Input::with_theme(&context.theme)
        .with_prompt("Rent due day (1-31)")
        .default(1)
        .validate_with(|value: &u32| {
            if (1..=31).contains(value) {
                Ok(())
            } else {
                Err("must be between 1 and 31")
            }
        })
        .interact_text()?;
    let photo = prompt_attachment(context, "Photo file (blank for placeholder)")?;
    let contract = prompt_attachment(context, "Contract document (blank for none)")?;

    let draft = PropertyDraft {
        address,
        tenant_name,
        price,
        increase_rate,
        increase_frequency,
        contract_start_date,
        contract_end_date,
        rent_due_day,
        photo_url: photo.map(|attachment| attachment.data),
        contract,
    };

    let confirmed = Confirm::with_theme(&context.theme)
        .with_prompt("Save this property?")
        .default(true)
        .interact()?;
    if !confirmed {
        output::info("Property discarded.");
        return Ok(());
    }
    save(context, draft)
}

fn prompt_date(context: &ShellContext, prompt: &str) -> Result<NaiveDate, CommandError> {
    let raw: String = Input::with_theme(&context.theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| {
            parse_civil_date(value)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .interact_text()?;
    Ok(parse_civil_date(&raw)?)
}

fn prompt_attachment(
    context: &ShellContext,
    prompt: &str,
) -> Result<Option<Attachment>, CommandError> {
    let raw: String = Input::with_theme(&context.theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let path = raw.trim();
    if path.is_empty() {
        return Ok(None);
    }
    Ok(Some(attachment::encode_file(Path::new(path))?))
}

fn list(context: &mut ShellContext) -> CommandResult {
    let properties = context.store().list_properties()?;
    if properties.is_empty() {
        output::info("No properties registered yet.");
        output::hint("Use `property add` to register one.");
        return Ok(());
    }
    output::section("Properties");
    for line in render::property_table(&properties, context.format()) {
        output::info(line);
    }
    Ok(())
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let token = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: property show <id>".into()))?;
    let property = context.resolve_property(token)?;
    output::section(&property.address);
    for line in render::property_details(&property, context.format()) {
        output::info(line);
    }
    let today = context.today();
    let steps = escalation_steps(&property, today)?;
    let rent = compute_rent_for_date(&property, today)?;
    output::info(format!(
        "Rent today   : {} after {} escalation{}",
        context.format().format(rent),
        steps,
        if steps == 1 { "" } else { "s" }
    ));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let token = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: property delete <id>".into()))?;
    let property = context.resolve_property(token)?;

    if context.mode() == CliMode::Interactive {
        let confirmed = Confirm::with_theme(&context.theme)
            .with_prompt(format!("Delete {}?", property.address))
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Nothing deleted.");
            return Ok(());
        }
    }

    context.store().delete_property(property.id)?;
    if context.cursor.map(|cursor| cursor.property) == Some(property.id) {
        context.cursor = None;
    }
    output::success(format!("Deleted {}.", property.address));
    Ok(())
}
