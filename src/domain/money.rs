use std::fmt;

/// Amounts are signed integer cents to avoid floating-point precision issues.
/// 1 currency unit = 100 cents, so 120.00 = 12000 cents.
pub type Cents = i64;

/// Cents per whole currency unit.
pub const CENTS_PER_UNIT: Cents = 100;

/// Format cents as a human-readable decimal string.
/// Example: 12000 -> "120.00", -950 -> "-9.50"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!(
        "{}{}.{:02}",
        sign,
        abs / CENTS_PER_UNIT,
        abs % CENTS_PER_UNIT
    )
}

/// Parse a decimal string into cents.
/// Example: "120.00" -> 12000, "9.5" -> 950, "-40" -> -4000
/// Fractions beyond two digits are truncated.
pub fn parse_cents(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, fraction_str) = match digits.split_once('.') {
        Some((u, f)) => (u, f),
        None => (digits, ""),
    };
    if fraction_str.contains('.') {
        return Err(ParseAmountError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseAmountError::InvalidFormat)?
    };

    let fraction: i64 = match fraction_str.len() {
        0 => 0,
        1 => {
            // One fractional digit means tens of cents: "9.5" -> 50 cents
            fraction_str
                .parse::<i64>()
                .map_err(|_| ParseAmountError::InvalidFormat)?
                * 10
        }
        _ => fraction_str[..2]
            .parse()
            .map_err(|_| ParseAmountError::InvalidFormat)?,
    };

    let cents = units * CENTS_PER_UNIT + fraction;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
