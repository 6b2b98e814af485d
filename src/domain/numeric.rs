//! Lenient text ⇄ number conversions for stored values.
//!
//! Readers consume the longest leading numeric prefix (after optional leading
//! whitespace) and ignore anything after it. Text with no numeric prefix reads
//! as zero. Writers produce canonical decimal text that reads back exactly.

/// Byte length of the leading decimal floating-point literal in `s`
/// (sign, digits, fraction, exponent, or `inf`/`infinity`/`nan`).
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let rest = &s[pos..];
    for word in ["infinity", "inf", "nan"] {
        if rest.get(..word.len()).is_some_and(|w| w.eq_ignore_ascii_case(word)) {
            return pos + word.len();
        }
    }

    let mut digits = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
        digits += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            pos = exp;
        }
    }
    pos
}

/// The leading decimal literal of `s`, or `None` when there is none.
fn float_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    match float_prefix_len(s) {
        0 => None,
        len => Some(&s[..len]),
    }
}

/// Leading integer literal (sign and digits only).
fn integer_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    (digits > 0).then(|| &s[..sign + digits])
}

pub fn parse_double(s: &str) -> f64 {
    float_prefix(s)
        .and_then(|p| p.parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn parse_float(s: &str) -> f32 {
    float_prefix(s)
        .and_then(|p| p.parse::<f32>().ok())
        .unwrap_or(0.0)
}

/// Reads the whole literal as an integer when it is one, otherwise truncates
/// the floating-point reading toward zero. Results saturate at the type bounds.
pub fn parse_long(s: &str) -> i64 {
    let Some(float) = float_prefix(s) else {
        return 0;
    };
    if integer_prefix(s) == Some(float) {
        if let Ok(v) = float.parse::<i64>() {
            return v;
        }
    }
    parse_double(s) as i64
}

pub fn parse_int(s: &str) -> i32 {
    parse_long(s).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Base-16 reading: optional sign, optional `0x`/`0X`, then hex digits.
pub fn parse_hex(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .filter(|r| r.starts_with(|c: char| c.is_ascii_hexdigit()))
        .unwrap_or(rest);

    let magnitude = rest
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold(0i64, |acc, d| acc.saturating_mul(16).saturating_add(i64::from(d)));
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub fn format_double(v: f64) -> String {
    v.to_string()
}

pub fn format_int(v: i32) -> String {
    v.to_string()
}

pub fn format_long(v: i64) -> String {
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn double_reads_plain_numbers() {
        assert_relative_eq!(parse_double("3456.32552"), 3456.32552);
        assert_relative_eq!(parse_double("-24.567"), -24.567);
        assert_relative_eq!(parse_double("45"), 45.0);
        assert_relative_eq!(parse_double("1.5e3"), 1500.0);
        assert_relative_eq!(parse_double(".5"), 0.5);
    }

    #[test]
    fn double_consumes_leading_prefix_only() {
        assert_relative_eq!(parse_double("12.5volts"), 12.5);
        assert_relative_eq!(parse_double("  7"), 7.0);
        assert_relative_eq!(parse_double("2e"), 2.0);
        assert_relative_eq!(parse_double("2e+x"), 2.0);
    }

    #[test]
    fn garbage_reads_as_zero() {
        assert_eq!(parse_double("forty"), 0.0);
        assert_eq!(parse_double(""), 0.0);
        assert_eq!(parse_double("-"), 0.0);
        assert_eq!(parse_double("."), 0.0);
        assert_eq!(parse_int("HelloYouSucker"), 0);
        assert_eq!(parse_long("bob"), 0);
    }

    #[test]
    fn special_values() {
        assert!(parse_double("inf").is_infinite());
        assert!(parse_double("-Infinity").is_sign_negative());
        assert!(parse_double("NaN").is_nan());
    }

    #[test]
    fn float_matches_single_precision_literal() {
        assert_eq!(parse_float("3.7"), 3.7f32);
        assert_eq!(parse_float("-24.567"), -24.567f32);
    }

    #[test]
    fn int_truncates_toward_zero() {
        assert_eq!(parse_int("45"), 45);
        assert_eq!(parse_int("-2"), -2);
        assert_eq!(parse_int("45.95"), 45);
        assert_eq!(parse_int("-2.045"), -2);
        assert_eq!(parse_int("1e3"), 1000);
    }

    #[test]
    fn int_saturates() {
        assert_eq!(parse_int("99999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999"), i32::MIN);
    }

    #[test]
    fn long_keeps_full_precision() {
        assert_eq!(parse_long("9007199254740993"), 9_007_199_254_740_993);
        assert_eq!(parse_long("-42abc"), -42);
        assert_eq!(parse_long("1e30"), i64::MAX);
    }

    #[test]
    fn hex_reads_base_sixteen() {
        assert_eq!(parse_hex("ff"), 255);
        assert_eq!(parse_hex("0x1F"), 31);
        assert_eq!(parse_hex("0X10"), 16);
        assert_eq!(parse_hex("-a"), -10);
        assert_eq!(parse_hex("10"), 16);
        assert_eq!(parse_hex("7fzz"), 127);
    }

    #[test]
    fn hex_garbage_reads_as_zero() {
        assert_eq!(parse_hex("zz"), 0);
        assert_eq!(parse_hex("0x"), 0);
        assert_eq!(parse_hex(""), 0);
    }

    #[test]
    fn hex_saturates() {
        assert_eq!(parse_hex("ffffffffff"), i32::MAX);
    }

    #[test]
    fn formatted_values_read_back() {
        for v in [0.1, -2.045, 3456.32552, 1e-9, 1e300] {
            assert_eq!(parse_double(&format_double(v)), v);
        }
        assert_eq!(parse_int(&format_int(i32::MIN)), i32::MIN);
        assert_eq!(parse_long(&format_long(i64::MAX)), i64::MAX);
    }
}
