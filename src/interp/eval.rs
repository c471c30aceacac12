use crate::algebra::{ExpSym, MulSym};

/// Overflow in the integer evaluator. Carries the operands that overflowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    NegOverflow(i64),
    AddOverflow(i64, i64),
    MulOverflow(i64, i64),
}

impl std::fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticError::NegOverflow(a) => write!(f, "integer overflow negating {}", a),
            ArithmeticError::AddOverflow(a, b) => {
                write!(f, "integer overflow adding {} and {}", a, b)
            }
            ArithmeticError::MulOverflow(a, b) => {
                write!(f, "integer overflow multiplying {} by {}", a, b)
            }
        }
    }
}

impl std::error::Error for ArithmeticError {}

/// Integer evaluator over `i64` with checked arithmetic.
///
/// An overflow anywhere in the program poisons the result; when both operands
/// already failed, the left one is reported.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eval;

impl ExpSym for Eval {
    type Repr = Result<i64, ArithmeticError>;

    fn lit(&self, n: i64) -> Self::Repr {
        Ok(n)
    }

    fn neg(&self, e: Self::Repr) -> Self::Repr {
        let a = e?;
        a.checked_neg().ok_or(ArithmeticError::NegOverflow(a))
    }

    fn add(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr {
        let (a, b) = (e1?, e2?);
        a.checked_add(b).ok_or(ArithmeticError::AddOverflow(a, b))
    }
}

impl MulSym for Eval {
    fn mul(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr {
        let (a, b) = (e1?, e2?);
        a.checked_mul(b).ok_or(ArithmeticError::MulOverflow(a, b))
    }
}
