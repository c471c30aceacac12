//! Generic programs: expressions written once, run under any interpretation.
//!
//! A program over the base algebra implements `Program<S>` for every
//! `S: ExpSym`; a program that multiplies implements it only for
//! `S: MulSym`, so running it under a base-only interpretation is a type
//! error rather than a runtime failure.

use crate::algebra::{Exp, ExpSym, MulSym};

/// A program runnable under the interpretation `S`.
pub trait Program<S: ExpSym> {
    fn run(&self, sym: &S) -> S::Repr;
}

impl<S: ExpSym, P: Program<S> + ?Sized> Program<S> for &P {
    fn run(&self, sym: &S) -> S::Repr {
        (**self).run(sym)
    }
}

/// `8 + -(1 + 2)`
pub fn tf1<S: ExpSym>(s: &S) -> S::Repr {
    s.add(s.lit(8), s.neg(s.add(s.lit(1), s.lit(2))))
}

/// `8 + -(1 * 2)`
pub fn tfm1<S: MulSym>(s: &S) -> S::Repr {
    s.add(s.lit(8), s.neg(s.mul(s.lit(1), s.lit(2))))
}

/// `7 * tf1`
pub fn tfm2<S: MulSym>(s: &S) -> S::Repr {
    s.mul(s.lit(7), tf1(s))
}

/// `(42 + -10) * 7`
pub fn q<S: MulSym>(s: &S) -> S::Repr {
    s.mul(s.add(s.lit(42), s.neg(s.lit(10))), s.lit(7))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Tf1;

#[derive(Clone, Copy, Debug, Default)]
pub struct Tfm1;

#[derive(Clone, Copy, Debug, Default)]
pub struct Tfm2;

#[derive(Clone, Copy, Debug, Default)]
pub struct Q;

impl<S: ExpSym> Program<S> for Tf1 {
    fn run(&self, sym: &S) -> S::Repr {
        tf1(sym)
    }
}

impl<S: MulSym> Program<S> for Tfm1 {
    fn run(&self, sym: &S) -> S::Repr {
        tfm1(sym)
    }
}

impl<S: MulSym> Program<S> for Tfm2 {
    fn run(&self, sym: &S) -> S::Repr {
        tfm2(sym)
    }
}

impl<S: MulSym> Program<S> for Q {
    fn run(&self, sym: &S) -> S::Repr {
        q(sym)
    }
}

/// Replays an initial-encoded expression through an interpretation.
impl<S: MulSym> Program<S> for Exp {
    fn run(&self, sym: &S) -> S::Repr {
        match self {
            Exp::Lit(n) => sym.lit(*n),
            Exp::Neg(e) => {
                let e = (**e).run(sym);
                sym.neg(e)
            }
            Exp::Add(a, b) => {
                let a = (**a).run(sym);
                let b = (**b).run(sym);
                sym.add(a, b)
            }
            Exp::Mul(a, b) => {
                let a = (**a).run(sym);
                let b = (**b).run(sym);
                sym.mul(a, b)
            }
        }
    }
}

/// The named programs shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Tf1,
    Tfm1,
    Tfm2,
    Q,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [Builtin::Tf1, Builtin::Tfm1, Builtin::Tfm2, Builtin::Q];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Tf1 => "tf1",
            Builtin::Tfm1 => "tfm1",
            Builtin::Tfm2 => "tfm2",
            Builtin::Q => "q",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Whether the program needs the extended algebra.
    pub fn uses_mul(self) -> bool {
        !matches!(self, Builtin::Tf1)
    }
}

impl<S: MulSym> Program<S> for Builtin {
    fn run(&self, sym: &S) -> S::Repr {
        match self {
            Builtin::Tf1 => tf1(sym),
            Builtin::Tfm1 => tfm1(sym),
            Builtin::Tfm2 => tfm2(sym),
            Builtin::Q => q(sym),
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
