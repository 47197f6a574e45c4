//! Formula parsing.
//!
//! A formula is an operator token followed by up to two cell references,
//! separated by whitespace:
//!
//! ```text
//! sum A1 B3     + A1 B1     - A1 B1     * A1 B1     / A1 B1     = A1
//! ```
//!
//! Operators are case-insensitive. Text whose first token is not an operator
//! is a literal and displays unchanged. Tokens after the second reference
//! are ignored.

use std::fmt;

use super::cell_ref::CellRef;

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parsed form of a cell's raw text.
///
/// Reference slots are `None` when the token is missing or does not decode;
/// the evaluator treats those as empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    Empty,
    Literal(String),
    Sum {
        from: Option<CellRef>,
        to: Option<CellRef>,
    },
    Binary {
        op: BinaryOp,
        lhs: Option<CellRef>,
        rhs: Option<CellRef>,
    },
    Alias(Option<CellRef>),
}

impl Formula {
    /// Every cell this formula reads, in argument order. Ranges are reported
    /// by their corners only.
    pub fn references(&self) -> Vec<CellRef> {
        match self {
            Formula::Empty | Formula::Literal(_) => vec![],
            Formula::Sum { from, to } => [*from, *to].into_iter().flatten().collect(),
            Formula::Binary { lhs, rhs, .. } => [*lhs, *rhs].into_iter().flatten().collect(),
            Formula::Alias(target) => target.iter().copied().collect(),
        }
    }
}

/// Classify raw cell text.
pub fn parse(raw: &str) -> Formula {
    let mut tokens = raw.split_whitespace();
    let Some(op) = tokens.next() else {
        return Formula::Empty;
    };
    let first = tokens.next().and_then(CellRef::from_str);
    let second = tokens.next().and_then(CellRef::from_str);

    let binary = |op| Formula::Binary {
        op,
        lhs: first,
        rhs: second,
    };

    match op.to_ascii_lowercase().as_str() {
        "sum" => Formula::Sum {
            from: first,
            to: second,
        },
        "+" => binary(BinaryOp::Add),
        "-" => binary(BinaryOp::Sub),
        "*" => binary(BinaryOp::Mul),
        "/" => binary(BinaryOp::Div),
        "=" => Formula::Alias(first),
        _ => Formula::Literal(raw.to_string()),
    }
}

/// Lenient numeric coercion: a base-10 integer, or 0 for anything else.
pub fn parse_number_or_zero(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}
