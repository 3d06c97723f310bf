use rust_decimal::Decimal;

/// Format an amount for display: symbol prefix plus digit grouping.
/// INR uses Indian grouping (`₹12,34,567`), everything else Western
/// grouping. Unknown codes fall back to a bare code prefix.
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let text = amount.normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let grouped = if currency == "INR" {
        group_indian(int_part)
    } else {
        group_western(int_part)
    };
    let mut out = format!("{sign}{}{grouped}", symbol_prefix(currency));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn symbol_prefix(currency: &str) -> String {
    match currency {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "AUD" => "A$".into(),
        "CAD" => "C$".into(),
        "SGD" => "S$".into(),
        other => format!("{other} "),
    }
}

/// Groups of three from the right: 1,234,567.
fn group_western(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Last three digits, then groups of two: 12,34,567.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping_for_inr() {
        assert_eq!(format_price(Decimal::from(999), "INR"), "₹999");
        assert_eq!(format_price(Decimal::from(9999), "INR"), "₹9,999");
        assert_eq!(format_price(Decimal::from(119_999), "INR"), "₹1,19,999");
        assert_eq!(format_price(Decimal::from(1_234_567), "INR"), "₹12,34,567");
    }

    #[test]
    fn western_grouping_elsewhere() {
        assert_eq!(format_price(Decimal::from(129), "USD"), "$129");
        assert_eq!(format_price(Decimal::from(1_234_567), "USD"), "$1,234,567");
        assert_eq!(format_price(Decimal::from(10_999), "EUR"), "€10,999");
    }

    #[test]
    fn unknown_code_prefixes_the_code() {
        assert_eq!(format_price(Decimal::from(4500), "KWD"), "KWD 4,500");
    }

    #[test]
    fn fractions_survive() {
        let v = Decimal::from_str_exact("1234.50").unwrap();
        assert_eq!(format_price(v, "USD"), "$1,234.5");
    }
}
