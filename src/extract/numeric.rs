/// Parse a raw text fragment into a finite amount.
///
/// Currency symbols/codes and whitespace are dropped (only digits, dots and
/// commas survive). Commas are grouping separators, except in the European
/// form `1.299,00` where the trailing comma is the decimal point. With
/// multiple dots, only the last one is the decimal point. A lone dot followed
/// by exactly three digits at the end is a thousands separator (`1.299`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // European style: a comma after the last dot is the decimal separator
    let euro = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) => c > d,
        _ => false,
    };

    let mut num = String::with_capacity(cleaned.len());
    if euro {
        for ch in cleaned.chars() {
            match ch {
                '.' => {}
                ',' => num.push('.'),
                _ => num.push(ch),
            }
        }
    } else {
        num.extend(cleaned.chars().filter(|c| *c != ','));
    }

    // all but the last dot are grouping
    if num.matches('.').count() > 1 {
        let last = num.rfind('.').unwrap_or(0);
        let mut out = String::with_capacity(num.len());
        for (i, ch) in num.char_indices() {
            if ch == '.' && i != last {
                continue;
            }
            out.push(ch);
        }
        num = out;
    }

    // "1.299" is almost always a grouped integer, not a sub-cent price
    if !euro {
        if let Some(pos) = num.find('.') {
            if num.len() - pos - 1 == 3 && num[pos + 1..].chars().all(|c| c.is_ascii_digit()) {
                num.remove(pos);
            }
        }
    }

    let v: f64 = num.parse().ok()?;
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupee_with_grouping() {
        assert_eq!(parse_amount("₹1,299"), Some(1299.0));
    }

    #[test]
    fn dollar_decimal() {
        assert_eq!(parse_amount("$99.99"), Some(99.99));
    }

    #[test]
    fn currency_code_prefix() {
        assert_eq!(parse_amount("INR 2,499.50"), Some(2499.5));
        assert_eq!(parse_amount("Rs. 750"), Some(750.0));
    }

    #[test]
    fn single_dot_three_digits_is_grouping() {
        assert_eq!(parse_amount("1.299"), Some(1299.0));
    }

    #[test]
    fn european_format() {
        assert_eq!(parse_amount("1.299,00"), Some(1299.0));
        assert_eq!(parse_amount("€2.499,95"), Some(2499.95));
    }

    #[test]
    fn multiple_dots_keep_last() {
        assert_eq!(parse_amount("2.499.00"), Some(2499.0));
    }

    #[test]
    fn digits_only() {
        assert_eq!(parse_amount("4999"), Some(4999.0));
    }

    #[test]
    fn two_decimal_digits_stay_decimal() {
        assert_eq!(parse_amount("99.99"), Some(99.99));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("₹"), None);
        assert_eq!(parse_amount(",."), None);
    }

    #[test]
    fn zero_parses_downstream_filters() {
        // zero is a valid parse; positivity is the resolver's concern
        assert_eq!(parse_amount("0"), Some(0.0));
    }
}
