//! Text formatting for explanations and recommendations.

/// Formats a dollar amount as `$1,234.56`.
pub(crate) fn usd(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (k, ch) in digits.chars().enumerate() {
        if k > 0 && (digits.len() - k) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Formats a fraction as a percentage, e.g. `0.1` → `10%`, `0.025` → `2.5%`.
pub(crate) fn percent(rate: f64) -> String {
    let text = format!("{:.2}", rate * 100.0);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}%")
}
