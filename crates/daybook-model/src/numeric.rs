use regex::Regex;

/// Parse free-form decimal text the way the sheets read it.
///
/// Surrounding whitespace is ignored and blank text reads as `0`. Anything that is
/// not a plain decimal (optionally signed, optionally in scientific notation) yields
/// `None`. Non-finite spellings such as `inf` or `NaN` parse, but are rejected later
/// by [`to_number`].
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

/// Coerce a raw field to a number for aggregation.
///
/// Finite parse results are returned as-is; empty, partial (`"-"`) or invalid
/// (`"abc"`) text, and non-finite values, all coerce to `0`.
pub fn to_number(raw: &str) -> f64 {
    parse_number(raw).filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Whether `raw` is acceptable (possibly partial) decimal input for a sales cell.
///
/// Accepts an optional leading minus, ASCII digits, an optional single decimal point
/// and more ASCII digits. The empty string is always valid, and so are in-progress values
/// like `"-"`, `"."` or `"3."`.
pub fn is_valid_decimal_input(raw: &str) -> bool {
    static DECIMAL_INPUT_RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = DECIMAL_INPUT_RE.get_or_init(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").expect("valid regex"));
    raw.is_empty() || re.is_match(raw)
}

/// Non-empty text that reads as exactly zero (`"0"`, `"0.00"`, `"-0"`, `"  "`).
pub fn is_explicit_zero(raw: &str) -> bool {
    !raw.is_empty() && parse_number(raw) == Some(0.0)
}
