use std::fmt;

use super::formula::parse_number_or_zero;

/// What a cell shows once evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayValue {
    Empty,
    Integer(i64),
    Float(f64),
    Text(String),
    /// Sentinel for division by zero and integer overflow, shown as `nan`.
    NotANumber,
}

impl DisplayValue {
    /// Numeric value for use as an arithmetic operand. Anything that does not
    /// render as an integer counts as 0.
    pub fn as_number_or_zero(&self) -> i64 {
        match self {
            DisplayValue::Integer(n) => *n,
            DisplayValue::Empty | DisplayValue::NotANumber => 0,
            other => parse_number_or_zero(&other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DisplayValue::Empty)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Empty => Ok(()),
            DisplayValue::Integer(n) => write!(f, "{}", n),
            DisplayValue::Float(n) => f.write_str(&format_number(*n)),
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::NotANumber => f.write_str("nan"),
        }
    }
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{}inf", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rendering() {
        assert_eq!(DisplayValue::Empty.to_string(), "");
        assert_eq!(DisplayValue::Integer(-4).to_string(), "-4");
        assert_eq!(DisplayValue::Float(2.5).to_string(), "2.5");
        assert_eq!(DisplayValue::Text("hi".into()).to_string(), "hi");
        assert_eq!(DisplayValue::NotANumber.to_string(), "nan");
    }

    #[test]
    fn test_operand_coercion() {
        assert_eq!(DisplayValue::Integer(9).as_number_or_zero(), 9);
        assert_eq!(DisplayValue::Text("12".into()).as_number_or_zero(), 12);
        assert_eq!(DisplayValue::Text("twelve".into()).as_number_or_zero(), 0);
        assert_eq!(DisplayValue::Float(0.5).as_number_or_zero(), 0);
        assert_eq!(DisplayValue::NotANumber.as_number_or_zero(), 0);
        assert_eq!(DisplayValue::Empty.as_number_or_zero(), 0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }
}
