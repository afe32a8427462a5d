use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a decimal string with two fractional digits.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_amount(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
///
/// Accepts at most two fractional digits; "100.999" is an error, not a
/// truncation, so no entered amount silently loses precision.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    if digits.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (units_str, frac_str) = match digits.split_once('.') {
        Some((units, frac)) => (units, frac),
        None => (digits, ""),
    };

    if units_str.is_empty() && frac_str.is_empty() {
        return Err(ParseAmountError::Malformed);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else if units_str.bytes().all(|b| b.is_ascii_digit()) {
        units_str.parse().map_err(|_| ParseAmountError::OutOfRange)?
    } else {
        return Err(ParseAmountError::Malformed);
    };

    if !frac_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::Malformed);
    }
    let frac: i64 = match frac_str.len() {
        0 => 0,
        // Single digit like "5" means 50 cents
        1 => frac_str.parse::<i64>().map_err(|_| ParseAmountError::Malformed)? * 10,
        2 => frac_str.parse().map_err(|_| ParseAmountError::Malformed)?,
        _ => return Err(ParseAmountError::TooPrecise),
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or(ParseAmountError::OutOfRange)?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    Malformed,
    TooPrecise,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::Malformed => write!(f, "invalid amount format"),
            ParseAmountError::TooPrecise => write!(f, "amounts use at most two decimal places"),
            ParseAmountError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5000), "50.00");
        assert_eq!(format_amount(1234), "12.34");
        assert_eq!(format_amount(100), "1.00");
        assert_eq!(format_amount(1), "0.01");
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(-5000), "-50.00");
        assert_eq!(format_amount(-1), "-0.01");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(5000));
        assert_eq!(parse_amount("50"), Ok(5000));
        assert_eq!(parse_amount("12.34"), Ok(1234));
        assert_eq!(parse_amount("12.5"), Ok(1250));
        assert_eq!(parse_amount("0.01"), Ok(1));
        assert_eq!(parse_amount(".50"), Ok(50));
        assert_eq!(parse_amount("3."), Ok(300));
        assert_eq!(parse_amount(" 20.00 "), Ok(2000));
        assert_eq!(parse_amount("-50.00"), Ok(-5000));
        assert_eq!(parse_amount("-0.50"), Ok(-50));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("-"), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("."), Err(ParseAmountError::Malformed));
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::Malformed));
        assert_eq!(parse_amount("12.34.56"), Err(ParseAmountError::Malformed));
        assert_eq!(parse_amount("--3"), Err(ParseAmountError::Malformed));
        assert_eq!(parse_amount("1 2"), Err(ParseAmountError::Malformed));
        assert_eq!(parse_amount("100.999"), Err(ParseAmountError::TooPrecise));
    }

    #[test]
    fn test_parse_amount_overflow() {
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(ParseAmountError::OutOfRange)
        );
    }

    #[test]
    fn test_roundtrip() {
        for cents in [0, 1, 99, 100, 12345, -12345] {
            assert_eq!(parse_amount(&format_amount(cents)), Ok(cents));
        }
    }
}
