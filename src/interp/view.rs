use crate::algebra::{ExpSym, MulSym};

/// Pretty-printer: every operator application is wrapped in parentheses.
#[derive(Clone, Copy, Debug, Default)]
pub struct View;

impl ExpSym for View {
    type Repr = String;

    fn lit(&self, n: i64) -> String {
        n.to_string()
    }

    fn neg(&self, e: String) -> String {
        format!("(- {})", e)
    }

    fn add(&self, e1: String, e2: String) -> String {
        format!("({} + {})", e1, e2)
    }
}

impl MulSym for View {
    fn mul(&self, e1: String, e2: String) -> String {
        format!("({} * {})", e1, e2)
    }
}
