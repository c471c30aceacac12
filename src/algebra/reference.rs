//! Initial encoding: expressions as plain data.
//!
//! `Exp` is the reference semantics the tagless interpretations are checked
//! against. The tagless path never builds one unless asked to through the
//! `Initial` interpretation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exp {
    Lit(i64),
    Neg(Box<Exp>),
    Add(Box<Exp>, Box<Exp>),
    Mul(Box<Exp>, Box<Exp>),
}

impl Exp {
    pub fn lit(n: i64) -> Self {
        Exp::Lit(n)
    }

    pub fn neg(e: Exp) -> Self {
        Exp::Neg(Box::new(e))
    }

    pub fn add(e1: Exp, e2: Exp) -> Self {
        Exp::Add(Box::new(e1), Box::new(e2))
    }

    pub fn mul(e1: Exp, e2: Exp) -> Self {
        Exp::Mul(Box::new(e1), Box::new(e2))
    }

    /// Direct structural evaluation with checked arithmetic.
    /// Returns `None` on overflow.
    pub fn eval(&self) -> Option<i64> {
        match self {
            Exp::Lit(n) => Some(*n),
            Exp::Neg(e) => e.eval()?.checked_neg(),
            Exp::Add(a, b) => a.eval()?.checked_add(b.eval()?),
            Exp::Mul(a, b) => a.eval()?.checked_mul(b.eval()?),
        }
    }

    /// True if any node in the expression is a multiplication.
    pub fn uses_mul(&self) -> bool {
        match self {
            Exp::Lit(_) => false,
            Exp::Neg(e) => e.uses_mul(),
            Exp::Add(a, b) => a.uses_mul() || b.uses_mul(),
            Exp::Mul(..) => true,
        }
    }

    /// Number of operator applications (every node except literals).
    pub fn operators(&self) -> usize {
        match self {
            Exp::Lit(_) => 0,
            Exp::Neg(e) => e.operators() + 1,
            Exp::Add(a, b) | Exp::Mul(a, b) => a.operators() + b.operators() + 1,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Exp::Lit(_) => 1,
            Exp::Neg(e) => e.depth() + 1,
            Exp::Add(a, b) | Exp::Mul(a, b) => a.depth().max(b.depth()) + 1,
        }
    }
}

/// Fully parenthesized rendering, identical to the `View` interpretation.
impl std::fmt::Display for Exp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exp::Lit(n) => write!(f, "{}", n),
            Exp::Neg(e) => write!(f, "(- {})", e),
            Exp::Add(a, b) => write!(f, "({} + {})", a, b),
            Exp::Mul(a, b) => write!(f, "({} * {})", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ti1() -> Exp {
        Exp::add(
            Exp::lit(8),
            Exp::neg(Exp::add(Exp::lit(1), Exp::lit(2))),
        )
    }

    #[test]
    fn test_eval_ti1() {
        assert_eq!(ti1().eval(), Some(5));
    }

    #[test]
    fn test_display_ti1() {
        assert_eq!(ti1().to_string(), "(8 + (- (1 + 2)))");
    }

    #[test]
    fn test_eval_mul() {
        let e = Exp::mul(Exp::add(Exp::lit(42), Exp::neg(Exp::lit(10))), Exp::lit(7));
        assert_eq!(e.eval(), Some(224));
        assert!(e.uses_mul());
        assert!(!ti1().uses_mul());
    }

    #[test]
    fn test_eval_overflow() {
        assert_eq!(Exp::neg(Exp::lit(i64::MIN)).eval(), None);
        assert_eq!(Exp::add(Exp::lit(i64::MAX), Exp::lit(1)).eval(), None);
        assert_eq!(Exp::mul(Exp::lit(i64::MAX), Exp::lit(2)).eval(), None);
    }

    #[test]
    fn test_operators_and_depth() {
        let e = ti1();
        assert_eq!(e.operators(), 3);
        assert_eq!(e.depth(), 4);
        assert_eq!(Exp::lit(0).operators(), 0);
        assert_eq!(Exp::lit(0).depth(), 1);
    }
}
