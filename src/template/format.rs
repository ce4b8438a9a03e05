// ABOUTME: Renders resolved values through format(path, spec) directives
// ABOUTME: Implements standard and custom number and date format codes in the invariant culture

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Timelike,
};
use serde_json::{Number, Value};

use super::error::{Result, TemplateError};

/// Render `value` using `spec`. A missing value renders as an empty string.
pub fn format_value(value: Option<&Value>, spec: &str) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Number(n)) => format_number(n, spec),
        Some(Value::String(s)) => match parse_datetime(s) {
            Some(dt) => format_datetime(&dt, spec),
            None => Ok(s.clone()),
        },
        Some(other) => Ok(other.to_string()),
    }
}

/// Plain string form of a node, as used in compound strings.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Recognize the date shapes a JSON serializer typically writes.
pub fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn invalid(spec: &str, reason: impl Into<String>) -> TemplateError {
    TemplateError::InvalidFormat {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

/// Split a standard code such as `N2` into its letter and precision.
fn standard_code(spec: &str) -> Option<(char, Option<usize>)> {
    let mut chars = spec.chars();
    let code = chars.next().filter(char::is_ascii_alphabetic)?;
    let digits = chars.as_str();
    if digits.is_empty() {
        return Some((code, None));
    }
    if digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|precision| (code, Some(precision)))
}

fn format_number(n: &Number, spec: &str) -> Result<String> {
    if spec.is_empty() {
        return Ok(n.to_string());
    }
    let Some((code, precision)) = standard_code(spec) else {
        return format_custom_number(n, spec);
    };
    let value = n.as_f64().unwrap_or_default();

    match code.to_ascii_uppercase() {
        'D' => {
            let integer = n
                .as_i64()
                .ok_or_else(|| invalid(spec, "D requires an integral value"))?;
            let digits = pad_left(&integer.unsigned_abs().to_string(), precision.unwrap_or(0));
            Ok(if integer < 0 {
                format!("-{}", digits)
            } else {
                digits
            })
        }
        'X' => {
            let integer = n
                .as_i64()
                .ok_or_else(|| invalid(spec, "X requires an integral value"))?;
            let hex = if code.is_ascii_uppercase() {
                format!("{:X}", integer)
            } else {
                format!("{:x}", integer)
            };
            Ok(pad_left(&hex, precision.unwrap_or(0)))
        }
        'F' => Ok(fixed(value, precision.unwrap_or(2), false)),
        'N' => Ok(fixed(value, precision.unwrap_or(2), true)),
        'P' => Ok(format!("{} %", fixed(value * 100.0, precision.unwrap_or(2), true))),
        'C' => {
            let amount = fixed(value.abs(), precision.unwrap_or(2), true);
            Ok(if value < 0.0 {
                format!("-¤{}", amount)
            } else {
                format!("¤{}", amount)
            })
        }
        'E' => Ok(exponential(value, precision.unwrap_or(6), code.is_ascii_uppercase())),
        'G' | 'R' => Ok(n.to_string()),
        _ => Err(invalid(spec, "unknown numeric format code")),
    }
}

fn pad_left(digits: &str, width: usize) -> String {
    format!("{:0>width$}", digits, width = width)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn fixed(value: f64, decimals: usize, grouped: bool) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered.clone(), None),
    };
    let int_part = if grouped { group_thousands(&int_part) } else { int_part };
    let body = match frac_part {
        Some(frac) => format!("{}.{}", int_part, frac),
        None => int_part,
    };
    let is_zero = body.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-{}", body)
    } else {
        body
    }
}

fn exponential(value: f64, decimals: usize, upper: bool) -> String {
    let rendered = format!("{:.*e}", decimals, value);
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((&rendered, "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let sign = if exponent < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:03}", mantissa, marker, sign, exponent.unsigned_abs())
}

/// Custom numeric patterns such as `#,##0.00`, `0000` or `0.#%`.
fn format_custom_number(n: &Number, spec: &str) -> Result<String> {
    let is_placeholder = |c: char| matches!(c, '0' | '#' | ',' | '.');
    let body_start = spec
        .find(is_placeholder)
        .ok_or_else(|| invalid(spec, "pattern has no digit placeholders"))?;
    let body_len = spec[body_start..]
        .find(|c: char| !is_placeholder(c))
        .unwrap_or(spec.len() - body_start);
    let prefix = &spec[..body_start];
    let body = &spec[body_start..body_start + body_len];
    let suffix = &spec[body_start + body_len..];

    let mut value = n.as_f64().unwrap_or_default();
    if prefix.contains('%') || suffix.contains('%') {
        value *= 100.0;
    }

    let (int_pattern, frac_pattern) = body.split_once('.').unwrap_or((body, ""));
    let grouped = int_pattern.contains(',');
    let min_int = int_pattern.chars().filter(|&c| c == '0').count();
    let max_frac = frac_pattern.chars().filter(|&c| c == '0' || c == '#').count();
    let min_frac = frac_pattern.chars().filter(|&c| c == '0').count();

    let rendered = format!("{:.*}", max_frac, value.abs());
    let (int_digits, frac_digits) = rendered.split_once('.').unwrap_or((&rendered, ""));

    let mut frac = frac_digits.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }
    let int_digits = if int_digits == "0" && min_int == 0 {
        String::new()
    } else {
        pad_left(int_digits, min_int)
    };
    let int_digits = if grouped { group_thousands(&int_digits) } else { int_digits };

    let mut number = int_digits;
    if !frac.is_empty() {
        number.push('.');
        number.push_str(&frac);
    }
    let is_zero = number.chars().all(|c| matches!(c, '0' | '.' | ','));
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    Ok(format!("{}{}{}{}", sign, prefix, number, suffix))
}

fn format_datetime(dt: &DateTime<FixedOffset>, spec: &str) -> Result<String> {
    if spec.is_empty() {
        return Ok(dt.to_rfc3339());
    }
    let mut chars = spec.chars();
    let (Some(code), None) = (chars.next(), chars.next()) else {
        return Ok(format_custom_datetime(dt, spec));
    };

    let pattern = match code {
        'd' => "MM/dd/yyyy",
        'D' => "dddd, dd MMMM yyyy",
        'f' => "dddd, dd MMMM yyyy HH:mm",
        'F' => "dddd, dd MMMM yyyy HH:mm:ss",
        'g' => "MM/dd/yyyy HH:mm",
        'G' => "MM/dd/yyyy HH:mm:ss",
        'm' | 'M' => "MMMM dd",
        's' => "yyyy-MM-dd'T'HH:mm:ss",
        't' => "HH:mm",
        'T' => "HH:mm:ss",
        'y' | 'Y' => "yyyy MMMM",
        'o' | 'O' => return Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        'u' => {
            let utc = dt.naive_utc().and_utc().fixed_offset();
            return Ok(format_custom_datetime(&utc, "yyyy-MM-dd HH:mm:ss'Z'"));
        }
        'U' => {
            let utc = dt.naive_utc().and_utc().fixed_offset();
            return Ok(format_custom_datetime(&utc, "dddd, dd MMMM yyyy HH:mm:ss"));
        }
        _ => return Err(invalid(spec, "unknown date format code")),
    };

    Ok(format_custom_datetime(dt, pattern))
}

/// Custom date patterns built from `y M d h H m s f F t z K` runs.
fn format_custom_datetime(dt: &DateTime<FixedOffset>, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                let close = chars[i + 1..].iter().position(|&q| q == c);
                let end = close.map_or(chars.len(), |offset| i + 1 + offset);
                out.extend(&chars[i + 1..end]);
                i = end + 1;
                continue;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                }
                i += 2;
                continue;
            }
            '%' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let run = chars[i..].iter().take_while(|&&r| r == c).count();
        i += run;

        match c {
            'y' => {
                let year = dt.year();
                match run {
                    1 => out.push_str(&(year % 100).to_string()),
                    2 => out.push_str(&format!("{:02}", year % 100)),
                    _ => out.push_str(&format!("{:0width$}", year, width = run)),
                }
            }
            'M' => match run {
                1 => out.push_str(&dt.month().to_string()),
                2 => out.push_str(&format!("{:02}", dt.month())),
                3 => out.push_str(&dt.format("%b").to_string()),
                _ => out.push_str(&dt.format("%B").to_string()),
            },
            'd' => match run {
                1 => out.push_str(&dt.day().to_string()),
                2 => out.push_str(&format!("{:02}", dt.day())),
                3 => out.push_str(&dt.format("%a").to_string()),
                _ => out.push_str(&dt.format("%A").to_string()),
            },
            'H' => push_two(&mut out, dt.hour(), run),
            'h' => push_two(&mut out, dt.hour12().1, run),
            'm' => push_two(&mut out, dt.minute(), run),
            's' => push_two(&mut out, dt.second(), run),
            'f' | 'F' => {
                let digits = format!("{:09}", dt.nanosecond() % 1_000_000_000);
                let mut fraction = digits[..run.min(9)].to_string();
                if c == 'F' {
                    while fraction.ends_with('0') {
                        fraction.pop();
                    }
                }
                out.push_str(&fraction);
            }
            't' => {
                let designator = if dt.hour12().0 { "PM" } else { "AM" };
                out.push_str(if run == 1 { &designator[..1] } else { designator });
            }
            'z' => {
                let seconds = dt.offset().local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let hours = seconds.abs() / 3600;
                let minutes = (seconds.abs() % 3600) / 60;
                match run {
                    1 => out.push_str(&format!("{}{}", sign, hours)),
                    2 => out.push_str(&format!("{}{:02}", sign, hours)),
                    _ => out.push_str(&format!("{}{:02}:{:02}", sign, hours, minutes)),
                }
            }
            'K' => {
                if dt.offset().local_minus_utc() == 0 {
                    out.push('Z');
                } else {
                    out.push_str(&dt.format("%:z").to_string());
                }
            }
            other => out.extend(std::iter::repeat(other).take(run)),
        }
    }

    out
}

fn push_two(out: &mut String, value: u32, run: usize) {
    if run == 1 {
        out.push_str(&value.to_string());
    } else {
        out.push_str(&format!("{:02}", value));
    }
}
