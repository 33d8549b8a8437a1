//! Formatting utilities used for CLI and export outputs.

/// `1234.5` → `$1,234.50`
pub fn money(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{symbol}{grouped}.{frac:02}")
}

pub fn hours(h: f64) -> String {
    format!("{:.2}h", h)
}

pub fn percent(p: f64) -> String {
    format!("{:.1}%", p)
}
