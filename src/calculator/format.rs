//! Result formatting for the display.

/// Significant digits used when no configuration overrides it.
pub const DEFAULT_PRECISION: usize = 10;

/// Largest precision that still maps to distinct `f64` digits.
pub const MAX_PRECISION: usize = 17;

/// Format a number for display.
///
/// Values that are integral after rounding to `precision` significant
/// digits render as plain integers, so a displayed result parses back to
/// the same numeral. Other values keep at most `precision` significant
/// digits with trailing zeros trimmed, switching to scientific notation
/// (`1.5e-05`) below `1e-4`.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value.fract() == 0.0 {
        return format_integer(value);
    }
    format_significant(value, precision.clamp(1, MAX_PRECISION))
}

fn format_integer(value: f64) -> String {
    // -0.0 included
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value:.0}")
}

fn format_significant(value: f64, digits: usize) -> String {
    let scientific = format!("{:.*e}", digits - 1, value);
    let rounded: f64 = scientific.parse().unwrap_or(value);
    if rounded.fract() == 0.0 {
        return format_integer(rounded);
    }

    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 {
        format!("{}e-{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}
