//! Values produced by evaluating an expression, and their canonical
//! string rendering.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Text(_) => "string",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Canonical rendering: integers print without a fractional part, other
/// numbers use the shortest decimal that round-trips. Magnitudes at or above
/// `1e21` or below `1e-4` switch to exponent form (`1e+21`, `1.5e-07`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[allow(clippy::float_cmp)]
fn format_number(n: f64) -> String {
    // Also folds -0 into 0.
    if n == 0.0 {
        return "0".to_owned();
    }

    let abs = n.abs();
    if !(1e-4..1e21).contains(&abs) {
        let sci = format!("{n:e}");
        if let Some((mantissa, exp)) = sci.split_once('e') {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            return format!("{mantissa}e{sign}{digits:0>2}");
        }
        return sci;
    }

    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(n: f64) -> String {
        Value::Number(n).to_string()
    }

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(render(4.0), "4");
        assert_eq!(render(-7.0), "-7");
        assert_eq!(render(1e6), "1000000");
        assert_eq!(render(1e20), "100000000000000000000");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        assert_eq!(render(-0.0), "0");
    }

    #[test]
    fn fractions_use_shortest_round_trip() {
        assert_eq!(render(0.5), "0.5");
        assert_eq!(render(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(render(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(render(1e21), "1e+21");
        assert_eq!(render(2.5e-5), "2.5e-05");
        assert_eq!(render(-1.5e-7), "-1.5e-07");
        assert_eq!(render(1.234e100), "1.234e+100");
    }

    #[test]
    fn booleans_and_text() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Text("abc".to_owned()).to_string(), "abc");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Text(String::new()).type_name(), "string");
    }
}
