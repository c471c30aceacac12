use crate::algebra::{ExpSym, MulSym};

/// Counts operator applications; literals count as zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl ExpSym for Count {
    type Repr = usize;

    fn lit(&self, _n: i64) -> usize {
        0
    }

    fn neg(&self, e: usize) -> usize {
        e + 1
    }

    fn add(&self, e1: usize, e2: usize) -> usize {
        e1 + e2 + 1
    }
}

impl MulSym for Count {
    fn mul(&self, e1: usize, e2: usize) -> usize {
        e1 + e2 + 1
    }
}
