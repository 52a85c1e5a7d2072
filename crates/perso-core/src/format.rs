//! Amount formatting

/// Signed amount with thousands separators: `+1,234.56 €`, `-42.00 €`
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "+" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{dec_part} {symbol}")
}

/// Amount suffix used in cheque group keys: `-100.00 €`
pub fn group_amount(amount: f64) -> String {
    format!("{:.2} €", amount)
}
