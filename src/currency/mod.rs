//! Plain currency formatting for amounts shown by the shell.

use crate::config::Config;

/// Symbol and separators applied to displayed amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormat {
    pub symbol: String,
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AmountFormat {
    pub fn from_config(config: &Config) -> Self {
        let decimal_separator = if config.grouping_separator == '.' {
            ','
        } else {
            '.'
        };
        Self {
            symbol: config.currency_symbol.clone(),
            grouping_separator: config.grouping_separator,
            decimal_separator,
        }
    }

    /// Formats `value` with grouped thousands and at most two decimals;
    /// whole amounts carry no decimal part (`$1,100`, `$1,750.5`).
    pub fn format(&self, value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        let cents = (value.abs() * 100.0).round() as u64;
        let whole = group_digits(cents / 100, self.grouping_separator);
        let fraction = match cents % 100 {
            0 => String::new(),
            f if f % 10 == 0 => format!("{}{}", self.decimal_separator, f / 10),
            f => format!("{}{:02}", self.decimal_separator, f),
        };
        format!("{}{}{}{}", sign, self.symbol, whole, fraction)
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
