//! Presentation helpers for derived totals.
//!
//! Totals that are zero render as blank cells; this is a display rule only, the
//! numbers returned by [`crate::totals`] stay `0.0`.

/// Which aggregate values are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayPolicy {
    /// Everything except exactly zero.
    #[default]
    NonZero,
    /// Strictly positive values only (the statement's closing summary).
    PositiveOnly,
}

impl DisplayPolicy {
    pub fn shows(self, value: f64) -> bool {
        match self {
            DisplayPolicy::NonZero => value != 0.0 && value.is_finite(),
            DisplayPolicy::PositiveOnly => value > 0.0 && value.is_finite(),
        }
    }
}

/// Render a total for a sheet footer, or an empty string when the policy hides it.
pub fn format_total(value: f64, policy: DisplayPolicy) -> String {
    if policy.shows(value) {
        format_amount(value)
    } else {
        String::new()
    }
}

/// Group thousands with `,` and keep at most three fraction digits:
/// `1234.5 -> "1,234.5"`, `-1000000 -> "-1,000,000"`, `0.12345 -> "0.123"`.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_totals_render_blank() {
        assert_eq!(format_total(0.0, DisplayPolicy::NonZero), "");
        assert_eq!(format_total(-0.0, DisplayPolicy::NonZero), "");
        assert_eq!(format_total(12.0, DisplayPolicy::NonZero), "12");
        assert_eq!(format_total(-3.0, DisplayPolicy::NonZero), "-3");
    }

    #[test]
    fn positive_only_hides_negative_values() {
        assert_eq!(format_total(-3.0, DisplayPolicy::PositiveOnly), "");
        assert_eq!(format_total(250.0, DisplayPolicy::PositiveOnly), "250");
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(-1_000_000.0), "-1,000,000");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(0.12345), "0.123");
        assert_eq!(format_amount(100.1), "100.1");
        assert_eq!(format_amount(-0.0001), "0");
    }
}
