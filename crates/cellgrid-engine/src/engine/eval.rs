//! Pull-based formula evaluation.
//!
//! Every call re-evaluates from raw text; nothing is cached. Circular
//! references are broken by a visiting set that lives for one evaluation
//! pass: re-entering a cell already on the call stack yields an empty
//! result, and every cell on that cycle displays as empty. Cells that merely
//! read a cycle see the blank as the operand 0.

use std::collections::HashSet;

use super::cell::Grid;
use super::cell_ref::{CellRange, CellRef};
use super::format::DisplayValue;
use super::formula::{BinaryOp, Formula, parse};

/// Raised when evaluation re-enters `origin`. Unwinds to the frame that
/// first entered `origin`.
#[derive(Debug)]
struct CycleHit {
    origin: CellRef,
}

/// Marks a cell as being evaluated. The mark is removed on drop, so every
/// exit path releases it.
struct VisitGuard<'a> {
    visiting: &'a mut HashSet<CellRef>,
    at: CellRef,
}

impl<'a> VisitGuard<'a> {
    fn enter(visiting: &'a mut HashSet<CellRef>, at: CellRef) -> Option<VisitGuard<'a>> {
        if visiting.insert(at) {
            Some(VisitGuard { visiting, at })
        } else {
            None
        }
    }
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.visiting.remove(&self.at);
    }
}

/// Display value of the cell at `at`.
pub fn evaluate(grid: &Grid, at: &CellRef) -> DisplayValue {
    let mut visiting = HashSet::new();
    // A hit always unwinds to its origin's frame, which is on this stack.
    eval_cell(grid, *at, &mut visiting).unwrap_or(DisplayValue::Empty)
}

fn eval_cell(
    grid: &Grid,
    at: CellRef,
    visiting: &mut HashSet<CellRef>,
) -> Result<DisplayValue, CycleHit> {
    let Some(raw) = grid.raw_text(&at) else {
        return Ok(DisplayValue::Empty);
    };
    let Some(guard) = VisitGuard::enter(visiting, at) else {
        return Err(CycleHit { origin: at });
    };

    log::trace!("evaluating {} ({:?})", at, raw);
    match eval_formula(grid, at, &parse(&raw), &mut *guard.visiting) {
        Err(hit) if hit.origin == at => {
            log::debug!("circular reference through {}, showing empty", at);
            Ok(DisplayValue::Empty)
        }
        result => result,
    }
}

fn eval_formula(
    grid: &Grid,
    at: CellRef,
    formula: &Formula,
    visiting: &mut HashSet<CellRef>,
) -> Result<DisplayValue, CycleHit> {
    match formula {
        Formula::Empty => Ok(DisplayValue::Empty),
        Formula::Literal(text) => Ok(DisplayValue::Text(text.clone())),
        Formula::Alias(target) => Ok(target
            .and_then(|target| grid.raw_text(&target))
            .map(DisplayValue::Text)
            .unwrap_or(DisplayValue::Empty)),
        Formula::Sum { from, to } => {
            let (Some(from), Some(to)) = (from, to) else {
                return Ok(DisplayValue::Integer(0));
            };
            sum_range(grid, at, &CellRange::new(*from, *to), visiting)
        }
        Formula::Binary { op, lhs, rhs } => {
            let lhs = operand(grid, *lhs, visiting)?;
            let rhs = operand(grid, *rhs, visiting)?;
            Ok(apply(*op, lhs, rhs))
        }
    }
}

/// Numeric value of a referenced cell; missing references count as 0.
fn operand(
    grid: &Grid,
    target: Option<CellRef>,
    visiting: &mut HashSet<CellRef>,
) -> Result<i64, CycleHit> {
    match target {
        Some(target) => Ok(eval_cell(grid, target, visiting)?.as_number_or_zero()),
        None => Ok(0),
    }
}

/// Sum of every populated cell in `range`, skipping `at` itself. Blank cells
/// contribute 0, so only populated ones are visited.
fn sum_range(
    grid: &Grid,
    at: CellRef,
    range: &CellRange,
    visiting: &mut HashSet<CellRef>,
) -> Result<DisplayValue, CycleHit> {
    let mut total: i64 = 0;
    for cell in grid.populated() {
        if cell == at || !range.contains(&cell) {
            continue;
        }
        let value = eval_cell(grid, cell, visiting)?.as_number_or_zero();
        match total.checked_add(value) {
            Some(sum) => total = sum,
            None => return Ok(DisplayValue::NotANumber),
        }
    }
    Ok(DisplayValue::Integer(total))
}

fn apply(op: BinaryOp, lhs: i64, rhs: i64) -> DisplayValue {
    let result = match op {
        BinaryOp::Add => lhs.checked_add(rhs),
        BinaryOp::Sub => lhs.checked_sub(rhs),
        BinaryOp::Mul => lhs.checked_mul(rhs),
        BinaryOp::Div => return divide(lhs, rhs),
    };
    result
        .map(DisplayValue::Integer)
        .unwrap_or(DisplayValue::NotANumber)
}

fn divide(lhs: i64, rhs: i64) -> DisplayValue {
    if rhs == 0 {
        return DisplayValue::NotANumber;
    }
    match lhs.checked_rem(rhs) {
        Some(0) => lhs
            .checked_div(rhs)
            .map(DisplayValue::Integer)
            .unwrap_or(DisplayValue::NotANumber),
        Some(_) => DisplayValue::Float(lhs as f64 / rhs as f64),
        None => DisplayValue::NotANumber,
    }
}
