//! Tagless-final embedding of a small arithmetic language.
//!
//! Programs are generic functions over an algebra trait rather than syntax
//! trees. Running a program under a different interpretation evaluates it,
//! prints it, serializes it to a generic tree, or does anything else a new
//! `ExpSym` implementation defines:
//!
//! ```
//! use tagless::{build, decode, Eval, Program, Tf1, View};
//!
//! assert_eq!(Tf1.run(&Eval), Ok(5));
//! assert_eq!(Tf1.run(&View), "(8 + (- (1 + 2)))");
//!
//! let tree = build(&Tf1);
//! assert_eq!(tree.to_string(), "(Add (Lit 8) (Neg (Add (Lit 1) (Lit 2))))");
//! assert_eq!(decode(&tree, &Eval).unwrap(), Ok(5));
//! ```

pub mod algebra;
pub mod diagnostic;
pub mod interp;
pub mod program;
pub mod span;
pub mod tree;

pub use algebra::{Exp, ExpSym, MulSym};
pub use interp::{ArithmeticError, Count, Eval, Initial, Product, View};
pub use program::{Builtin, Program, Q, Tf1, Tfm1, Tfm2};
pub use tree::{build, decode, decode_mul, Build, DecodeError, DecodeOptions, Decoder, Tree};
