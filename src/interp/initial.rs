use crate::algebra::{Exp, ExpSym, MulSym};

/// Rebuilds the initial encoding of a program.
#[derive(Clone, Copy, Debug, Default)]
pub struct Initial;

impl ExpSym for Initial {
    type Repr = Exp;

    fn lit(&self, n: i64) -> Exp {
        Exp::lit(n)
    }

    fn neg(&self, e: Exp) -> Exp {
        Exp::neg(e)
    }

    fn add(&self, e1: Exp, e2: Exp) -> Exp {
        Exp::add(e1, e2)
    }
}

impl MulSym for Initial {
    fn mul(&self, e1: Exp, e2: Exp) -> Exp {
        Exp::mul(e1, e2)
    }
}
