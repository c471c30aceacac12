use crate::algebra::{ExpSym, MulSym};

/// Two interpretations run in lockstep.
///
/// Every operation is forwarded to both components and the results are
/// paired, so one traversal of a program (or of a decoded tree) yields both
/// denotations. Products nest: `Product<A, Product<B, C>>` has representation
/// `(A::Repr, (B::Repr, C::Repr))`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Product<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Product<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: ExpSym, B: ExpSym> ExpSym for Product<A, B> {
    type Repr = (A::Repr, B::Repr);

    fn lit(&self, n: i64) -> Self::Repr {
        (self.first.lit(n), self.second.lit(n))
    }

    fn neg(&self, (e1, e2): Self::Repr) -> Self::Repr {
        (self.first.neg(e1), self.second.neg(e2))
    }

    fn add(&self, (a1, a2): Self::Repr, (b1, b2): Self::Repr) -> Self::Repr {
        (self.first.add(a1, b1), self.second.add(a2, b2))
    }
}

impl<A: MulSym, B: MulSym> MulSym for Product<A, B> {
    fn mul(&self, (a1, a2): Self::Repr, (b1, b2): Self::Repr) -> Self::Repr {
        (self.first.mul(a1, b1), self.second.mul(a2, b2))
    }
}

/// Right-nested product of any number of interpretations.
///
/// `product!(a, b, c)` is `Product::new(a, Product::new(b, c))`.
#[macro_export]
macro_rules! product {
    ($a:expr $(,)?) => {
        $a
    };
    ($a:expr, $b:expr $(,)?) => {
        $crate::interp::Product::new($a, $b)
    };
    ($a:expr, $($rest:expr),+ $(,)?) => {
        $crate::interp::Product::new($a, $crate::product!($($rest),+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::{Count, Eval, View};

    #[test]
    fn test_pair_ops() {
        let p = Product::new(Eval, View);
        let r = p.add(p.lit(8), p.neg(p.lit(3)));
        assert_eq!(r, (Ok(5), "(8 + (- 3))".to_string()));
    }

    #[test]
    fn test_pair_mul() {
        let p = Product::new(View, Count);
        let r = p.mul(p.lit(2), p.lit(3));
        assert_eq!(r, ("(2 * 3)".to_string(), 1));
    }

    #[test]
    fn test_nested_macro() {
        let p = product!(Eval, View, Count);
        let r = p.neg(p.lit(4));
        let (v, (s, c)) = r;
        assert_eq!(v, Ok(-4));
        assert_eq!(s, "(- 4)");
        assert_eq!(c, 1);
    }

    #[test]
    fn test_left_nesting() {
        let p = Product::new(Product::new(Count, Eval), View);
        let ((c, v), s) = p.add(p.lit(1), p.lit(2));
        assert_eq!((c, v, s.as_str()), (1, Ok(3), "(1 + 2)"));
    }

    #[test]
    fn test_into_inner() {
        let (a, b) = Product::new(Eval, View).into_inner();
        assert_eq!(a.lit(1), Ok(1));
        assert_eq!(b.lit(1), "1");
    }
}
