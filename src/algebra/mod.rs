//! The expression algebra: the operations every interpretation provides.
//!
//! A program is written once against these traits and runs under any type
//! that implements them. The result type of an interpretation is its
//! associated `Repr`:
//!
//! ```text
//! Eval    → Result<i64, ArithmeticError>
//! View    → String
//! Build   → Tree
//! Count   → usize
//! Initial → Exp
//! ```
//!
//! New operators extend the algebra through a subtrait (`MulSym`), so
//! existing interpretations and programs keep compiling untouched.

pub mod reference;

pub use reference::Exp;

/// Base algebra: literals, negation and addition.
pub trait ExpSym {
    /// What a program denotes under this interpretation.
    type Repr;

    fn lit(&self, n: i64) -> Self::Repr;
    fn neg(&self, e: Self::Repr) -> Self::Repr;
    fn add(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr;
}

/// Extended algebra: the base operations plus multiplication.
///
/// Anything that implements `MulSym` is accepted wherever an `ExpSym` is.
pub trait MulSym: ExpSym {
    fn mul(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr;
}

impl<S: ExpSym + ?Sized> ExpSym for &S {
    type Repr = S::Repr;

    fn lit(&self, n: i64) -> Self::Repr {
        (**self).lit(n)
    }

    fn neg(&self, e: Self::Repr) -> Self::Repr {
        (**self).neg(e)
    }

    fn add(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr {
        (**self).add(e1, e2)
    }
}

impl<S: MulSym + ?Sized> MulSym for &S {
    fn mul(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr {
        (**self).mul(e1, e2)
    }
}
