//! Metric point values and their string rendering
//!
//! Points arrive with their native type but are always stored as strings.
//! The rendering follows the monitoring agent's conventions so values look the
//! same as in its other outputs: floats keep a fractional part (`7.0`), large
//! and tiny magnitudes switch to exponent form (`1e+16`, `1e-05`), booleans are
//! `True`/`False` and a missing value is `None`.

use std::fmt;

use serde::Deserialize;

/// Below this magnitude floats render in exponent form
const EXP_LOWER: f64 = 1e-4;
/// At or above this magnitude floats render in exponent form
const EXP_UPPER: f64 = 1e16;

/// A single metric point
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl PointValue {
    /// Parse a command-line value: int, then float, then bool, else text
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return PointValue::Int(i);
        }
        if let Ok(u) = trimmed.parse::<u64>() {
            return PointValue::UInt(u);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return PointValue::from(f);
        }
        match trimmed {
            "true" | "True" => PointValue::Bool(true),
            "false" | "False" => PointValue::Bool(false),
            "None" | "null" => PointValue::Null,
            _ => PointValue::from(s),
        }
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointValue::Null => f.write_str("None"),
            PointValue::Bool(true) => f.write_str("True"),
            PointValue::Bool(false) => f.write_str("False"),
            PointValue::Int(i) => write!(f, "{}", i),
            PointValue::UInt(u) => write!(f, "{}", u),
            PointValue::Float(v) => f.write_str(&format_float(*v)),
            PointValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PointValue {
    fn from(v: f64) -> Self {
        PointValue::Float(v)
    }
}

impl From<&str> for PointValue {
    fn from(v: &str) -> Self {
        PointValue::Text(v.to_string())
    }
}

/// Render a float using the shortest round-trip digits.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = v.abs();
    if abs != 0.0 && !(EXP_LOWER..EXP_UPPER).contains(&abs) {
        return format_exponent(v);
    }

    let s = v.to_string();
    if s.contains('.') { s } else { format!("{}.0", s) }
}

/// `1e16` -> `1e+16`, `1.5e-7` -> `1.5e-07`
fn format_exponent(v: f64) -> String {
    let s = format!("{:e}", v);
    let Some((mantissa, exponent)) = s.split_once('e') else {
        return s;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_keeps_fraction() {
        assert_eq!(PointValue::Float(12.5).to_string(), "12.5");
        assert_eq!(PointValue::Float(7.0).to_string(), "7.0");
        assert_eq!(PointValue::Float(0.0).to_string(), "0.0");
        assert_eq!(PointValue::Float(-3.0).to_string(), "-3.0");
        assert_eq!(PointValue::Float(0.1).to_string(), "0.1");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(PointValue::Float(1e16).to_string(), "1e+16");
        assert_eq!(PointValue::Float(1.5e20).to_string(), "1.5e+20");
        assert_eq!(PointValue::Float(1e-5).to_string(), "1e-05");
        assert_eq!(PointValue::Float(-2.5e-7).to_string(), "-2.5e-07");
        assert_eq!(PointValue::Float(1e100).to_string(), "1e+100");
    }

    #[test]
    fn test_float_exponent_boundaries() {
        assert_eq!(PointValue::Float(1e-4).to_string(), "0.0001");
        assert_eq!(
            PointValue::Float(9999999999999998.0).to_string(),
            "9999999999999998.0"
        );
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(PointValue::Float(f64::NAN).to_string(), "nan");
        assert_eq!(PointValue::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(PointValue::Float(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_other_variants() {
        assert_eq!(PointValue::Int(42).to_string(), "42");
        assert_eq!(PointValue::Bool(true).to_string(), "True");
        assert_eq!(PointValue::Bool(false).to_string(), "False");
        assert_eq!(PointValue::Null.to_string(), "None");
        assert_eq!(PointValue::from("eth0").to_string(), "eth0");
    }

    #[test]
    fn test_deserialize_untagged() {
        let points: Vec<PointValue> =
            serde_json::from_str(r#"[12.5, 7, true, "up", null]"#).unwrap();
        assert_eq!(
            points,
            vec![
                PointValue::Float(12.5),
                PointValue::Int(7),
                PointValue::Bool(true),
                PointValue::Text("up".to_string()),
                PointValue::Null,
            ]
        );
    }

    #[test]
    fn test_deserialize_integers_beyond_i64_keep_digits() {
        let points: Vec<PointValue> =
            serde_json::from_str("[18446744073709551615, 9223372036854775808, -9223372036854775808]")
                .unwrap();
        assert_eq!(points[0], PointValue::UInt(u64::MAX));
        assert_eq!(points[1], PointValue::UInt(9223372036854775808));
        assert_eq!(points[2], PointValue::Int(i64::MIN));

        let rendered: Vec<String> = points.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "18446744073709551615",
                "9223372036854775808",
                "-9223372036854775808"
            ]
        );
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(PointValue::parse_lenient("12"), PointValue::Int(12));
        assert_eq!(PointValue::parse_lenient("12.5"), PointValue::Float(12.5));
        assert_eq!(PointValue::parse_lenient("7.0").to_string(), "7.0");
        assert_eq!(PointValue::parse_lenient("True"), PointValue::Bool(true));
        assert_eq!(PointValue::parse_lenient("null"), PointValue::Null);
        assert_eq!(
            PointValue::parse_lenient("18446744073709551615").to_string(),
            "18446744073709551615"
        );
        assert_eq!(
            PointValue::parse_lenient("eth0"),
            PointValue::Text("eth0".to_string())
        );
    }
}
