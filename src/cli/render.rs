//! Plain-text layouts for properties, month grids and finance figures.

use chrono::{Datelike, Weekday};

use crate::calendar::{CalendarCell, EscalationStep, MonthView};
use crate::currency::AmountFormat;
use crate::ledger::{FinanceSummary, Property};

const CELL_WIDTH: usize = 6;

pub const LEGEND: &str = "@ today   # contract start/end   $ rent due   ^ escalation";

fn markers(cell: &CalendarCell) -> String {
    let mut markers = String::new();
    if cell.is_today {
        markers.push('@');
    }
    if cell.is_contract_boundary {
        markers.push('#');
    }
    if cell.is_rent_due {
        markers.push('$');
    }
    if cell.is_escalation_anniversary {
        markers.push('^');
    }
    markers
}

/// Seven-column grid starting on `week_start`, followed by one line per
/// annotated day.
pub fn month_grid(view: &MonthView, week_start: Weekday, format: &AmountFormat) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = String::new();
    let mut weekday = week_start;
    for _ in 0..7 {
        header.push_str(&format!("{:<width$}", weekday.to_string(), width = CELL_WIDTH));
        weekday = weekday.succ();
    }
    lines.push(header.trim_end().to_string());

    let mut row = " ".repeat(view.leading_blanks_from(week_start) as usize * CELL_WIDTH);
    let mut column = view.leading_blanks_from(week_start);
    for cell in &view.cells {
        row.push_str(&format!(
            "{:>2}{:<width$}",
            cell.day,
            markers(cell),
            width = CELL_WIDTH - 2
        ));
        column += 1;
        if column == 7 {
            lines.push(row.trim_end().to_string());
            row.clear();
            column = 0;
        }
    }
    if !row.trim().is_empty() {
        lines.push(row.trim_end().to_string());
    }

    for cell in view.cells.iter().filter(|cell| !markers(cell).is_empty()) {
        let mut notes = Vec::new();
        if cell.is_today {
            notes.push("today".to_string());
        }
        if cell.is_contract_boundary {
            notes.push("contract boundary".to_string());
        }
        if let Some(amount) = cell.amount_due {
            notes.push(format!("rent due {}", format.format(amount)));
        }
        if cell.is_escalation_anniversary {
            notes.push("escalation".to_string());
        }
        lines.push(format!("  {}  {}", cell.date, notes.join(", ")));
    }
    lines
}

pub fn property_table(properties: &[Property], format: &AmountFormat) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<3} {:<8}  {:<28} {:<20} {:>12}  {}",
        "#", "ID", "Address", "Tenant", "Price", "Escalation"
    )];
    for (idx, property) in properties.iter().enumerate() {
        lines.push(format!(
            "{:<3} {:<8}  {:<28} {:<20} {:>12}  {}",
            idx + 1,
            property.short_id(),
            truncate(&property.address, 28),
            truncate(&property.tenant_name, 20),
            format.format(property.price),
            property.escalation_label()
        ));
    }
    lines
}

pub fn property_details(property: &Property, format: &AmountFormat) -> Vec<String> {
    let mut lines = vec![
        format!("ID           : {}", property.id),
        format!("Address      : {}", property.address),
        format!("Tenant       : {}", property.tenant_name),
        format!("Price        : {}", format.format(property.price)),
        format!("Escalation   : {}", property.escalation_label()),
        format!("Rent due day : {}", property.rent_due_day),
        format!(
            "Contract     : {} to {}",
            property.contract_start_date, property.contract_end_date
        ),
        format!("Photo        : {}", abbreviate_data_url(&property.photo_url)),
    ];
    match &property.contract {
        Some(document) => lines.push(format!(
            "Document     : {} ({})",
            document.name,
            abbreviate_data_url(&document.data)
        )),
        None => lines.push("Document     : none".to_string()),
    }
    lines
}

pub fn escalation_table(steps: &[EscalationStep], format: &AmountFormat) -> Vec<String> {
    steps
        .iter()
        .map(|step| {
            format!(
                "  #{:<3} {}  {} ({})",
                step.step,
                step.date,
                format.format(step.amount),
                step.date.weekday()
            )
        })
        .collect()
}

pub fn finance_lines(summary: &FinanceSummary, format: &AmountFormat) -> Vec<String> {
    let mut lines = vec![
        format!("Properties   : {}", summary.property_count),
        format!("Total income : {}", format.format(summary.total_income)),
    ];
    for line in &summary.breakdown {
        lines.push(format!(
            "  {:<32} {:>12}",
            truncate(&line.address, 32),
            format.format(line.price)
        ));
    }
    lines
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Data URLs are shown by their media type and size only.
fn abbreviate_data_url(url: &str) -> String {
    match url.strip_prefix("data:") {
        Some(rest) => {
            let media = rest.split(';').next().unwrap_or("unknown");
            format!("embedded {} ({} chars)", media, url.len())
        }
        None => url.to_string(),
    }
}
