use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::ledger::Theme;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// Disables colour and symbols (script mode).
    pub plain: bool,
    pub theme: Theme,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    match color_override(prefs.plain) {
        Some(enabled) => colored::control::set_override(enabled),
        None => colored::control::unset_override(),
    }
}

/// Plain output forces colour off; otherwise `colored` decides from the
/// terminal and `NO_COLOR`/`CLICOLOR` variables.
fn color_override(plain: bool) -> Option<bool> {
    if plain {
        Some(false)
    } else {
        None
    }
}

pub fn set_theme(theme: Theme) {
    let mut prefs = preferences();
    prefs.theme = theme;
    set_preferences(prefs);
}

pub fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

pub fn styled(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        MessageKind::Success if prefs.plain => text,
        MessageKind::Success => format!("✓ {text}"),
        MessageKind::Warning => format!("warning: {text}"),
        MessageKind::Error => format!("error: {text}"),
        MessageKind::Hint => format!("hint: {text}"),
    };
    if prefs.plain {
        return base;
    }

    // Light terminals wash out the bright palette.
    match (kind, prefs.theme) {
        (MessageKind::Success, Theme::Dark) => base.bright_green().to_string(),
        (MessageKind::Success, Theme::Light) => base.green().to_string(),
        (MessageKind::Warning, Theme::Dark) => base.bright_yellow().to_string(),
        (MessageKind::Warning, Theme::Light) => base.yellow().to_string(),
        (MessageKind::Error, Theme::Dark) => base.bright_red().to_string(),
        (MessageKind::Error, Theme::Light) => base.red().to_string(),
        (MessageKind::Hint, _) => base.dimmed().to_string(),
        (MessageKind::Section, _) => base.bold().to_string(),
        (MessageKind::Info, _) => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
