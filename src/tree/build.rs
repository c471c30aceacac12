use super::{Tree, ADD, LIT, MUL, NEG};
use crate::algebra::{ExpSym, MulSym};
use crate::program::Program;

/// Serializing interpretation: a program denotes its own generic tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct Build;

impl ExpSym for Build {
    type Repr = Tree;

    fn lit(&self, n: i64) -> Tree {
        Tree::node(LIT, vec![Tree::leaf(n.to_string())])
    }

    fn neg(&self, e: Tree) -> Tree {
        Tree::node(NEG, vec![e])
    }

    fn add(&self, e1: Tree, e2: Tree) -> Tree {
        Tree::node(ADD, vec![e1, e2])
    }
}

impl MulSym for Build {
    fn mul(&self, e1: Tree, e2: Tree) -> Tree {
        Tree::node(MUL, vec![e1, e2])
    }
}

/// Serialize a program into its generic tree.
pub fn build<P: Program<Build>>(program: &P) -> Tree {
    program.run(&Build)
}
