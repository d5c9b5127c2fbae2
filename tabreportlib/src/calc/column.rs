//! Elementwise column arithmetic.

use super::Calculation;
use crate::error::ReportError;
use crate::Result;

/// Compute a derived number column from `sources`.
///
/// - ADD / PROD take at least two sources and fold across all of them.
/// - SUB / DIV take exactly two sources: `sources[0] op sources[1]`.
///
/// The result has the length of `sources[0]`. Sources are expected to have
/// equal lengths; a shorter source simply stops contributing past its end.
/// DIV checks every divisor before producing output, so a zero divisor
/// fails with [`ReportError::DivisionByZero`] at its first row and no
/// partial result escapes.
pub fn compute_column(sources: &[&[f64]], op: Calculation) -> Result<Vec<f64>> {
    let arity = op.arity();
    if !arity.accepts(sources.len()) {
        return Err(ReportError::InvalidArity {
            operation: op,
            expected: arity,
            actual: sources.len(),
        });
    }

    let first = sources[0];
    let result = match op {
        Calculation::Add => fold(first, &sources[1..], |acc, v| acc + v),
        Calculation::Prod => fold(first, &sources[1..], |acc, v| acc * v),
        Calculation::Sub => {
            let rhs = sources[1];
            first
                .iter()
                .enumerate()
                .map(|(i, a)| a - rhs.get(i).copied().unwrap_or(0.0))
                .collect()
        }
        Calculation::Div => {
            let rhs = sources[1];
            if let Some(row) = (0..first.len()).find(|&i| rhs.get(i).copied() == Some(0.0)) {
                return Err(ReportError::DivisionByZero { row });
            }
            first
                .iter()
                .enumerate()
                .map(|(i, a)| a / rhs.get(i).copied().unwrap_or(1.0))
                .collect()
        }
    };

    Ok(result)
}

fn fold(first: &[f64], rest: &[&[f64]], combine: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    first
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            rest.iter()
                .filter_map(|column| column.get(i).copied())
                .fold(start, &combine)
        })
        .collect()
}
