//! Arithmetic problem generation
//!
//! Every drop carries one problem. Operands are constructed so results are
//! always exact: division picks the dividend as a multiple of the divisor,
//! subtraction orders operands so the difference is non-negative.

use rand::Rng;

/// Arithmetic operator carried by a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// All operators, drawn with equal probability at spawn
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    /// Largest operand value for this operator (small tables for mul/div)
    pub fn max_operand(self) -> u32 {
        match self {
            Op::Mul | Op::Div => 10,
            Op::Add | Op::Sub => 20,
        }
    }

    /// Unicode glyph used when rendering the problem
    pub fn glyph(self) -> char {
        match self {
            Op::Add => '\u{002B}',
            Op::Sub => '\u{2212}',
            Op::Mul => '\u{00D7}',
            Op::Div => '\u{00F7}',
        }
    }

    /// Evaluate `a op b` exactly (f64 so division needs no rounding)
    pub fn apply(self, a: u32, b: u32) -> f64 {
        let (a, b) = (a as f64, b as f64);
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }
}

/// One arithmetic challenge with its precomputed answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Problem {
    pub a: u32,
    pub b: u32,
    pub op: Op,
    /// Exact evaluation of `a op b`
    pub result: f64,
}

impl Problem {
    /// Generate a problem with a uniformly chosen operator
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let op = Op::ALL[rng.random_range(0..Op::ALL.len())];
        Self::with_op(op, rng)
    }

    /// Generate a problem for a specific operator
    pub fn with_op<R: Rng>(op: Op, rng: &mut R) -> Self {
        let max = op.max_operand();
        let b = rng.random_range(1..=max);
        let (a, b) = match op {
            // Dividend is a multiple of the divisor, quotient stays in [1, max]
            Op::Div => (b * rng.random_range(1..=max), b),
            // Larger operand first, difference never negative
            Op::Sub => {
                let a = rng.random_range(1..=max);
                if a < b { (b, a) } else { (a, b) }
            }
            Op::Add | Op::Mul => (rng.random_range(1..=max), b),
        };

        Self {
            a,
            b,
            op,
            result: op.apply(a, b),
        }
    }
}
