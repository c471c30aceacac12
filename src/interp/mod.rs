//! Concrete interpretations of the expression algebra.
//!
//! Each interpretation is an independent type; none of them knows about the
//! others. The tree builder lives with the tree type in `crate::tree`.

mod count;
mod eval;
mod initial;
mod product;
mod view;

pub use count::Count;
pub use eval::{ArithmeticError, Eval};
pub use initial::Initial;
pub use product::Product;
pub use view::View;
