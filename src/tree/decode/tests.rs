use super::*;
use crate::interp::{ArithmeticError, Count, Eval, Initial, Product, View};
use crate::program::{Program, Q, Tf1, Tfm1, Tfm2};
use crate::tree::build;

fn lit(n: &str) -> Tree {
    Tree::node(LIT, vec![Tree::leaf(n)])
}

#[test]
fn test_decode_tf1_round_trip() {
    let tree = build(&Tf1);
    assert_eq!(decode(&tree, &Eval), Ok(Ok(5)));
    assert_eq!(decode(&tree, &View).unwrap(), "(8 + (- (1 + 2)))");
}

#[test]
fn test_decode_q_with_mul_tier() {
    let tree = build(&Q);
    assert_eq!(decode_mul(&tree, &Eval), Ok(Ok(224)));
    assert_eq!(decode_mul(&tree, &View).unwrap(), "((42 + (- 10)) * 7)");
}

#[test]
fn test_base_tier_rejects_mul() {
    let err = decode(&build(&Q), &Eval).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::UnknownTag {
            tag: MUL.to_string(),
            expected: vec![LIT, NEG, ADD],
        }
    );
    assert!(err.path.is_empty());
    assert_eq!(err.to_string(), "unknown tag `Mul` at /");
}

#[test]
fn test_mul_nested_under_base_tags() {
    // Neg and Add are handled by Base, their Mul operands by the top tier.
    let tree = build(&Tfm1);
    assert_eq!(decode_mul(&tree, &Eval), Ok(Ok(6)));
    let err = decode(&tree, &Eval).unwrap_err();
    assert_eq!(err.path, vec![1, 0]);
}

#[test]
fn test_with_mul_lists_every_known_tag() {
    let tree = Tree::node("Sub", vec![lit("1"), lit("2")]);
    let err = decode_mul(&tree, &View).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::UnknownTag {
            tag: "Sub".to_string(),
            expected: vec![LIT, NEG, ADD, MUL],
        }
    );
}

#[test]
fn test_decode_into_product() {
    let tree = build(&Tfm2);
    let (v, (s, c)) = decode_mul(&tree, &crate::product!(Eval, View, Count)).unwrap();
    assert_eq!(v, Ok(35));
    assert_eq!(s, "(7 * (8 + (- (1 + 2))))");
    assert_eq!(c, 4);
}

#[test]
fn test_decode_into_initial_then_replay() {
    let exp = decode_mul(&build(&Q), &Initial).unwrap();
    assert_eq!(exp.run(&Eval), Ok(224));
    assert_eq!(build(&exp), build(&Q));
}

#[test]
fn test_decode_overflow_is_a_value_not_a_decode_error() {
    let tree = Tree::node(NEG, vec![lit(&i64::MIN.to_string())]);
    assert_eq!(
        decode(&tree, &Eval),
        Ok(Err(ArithmeticError::NegOverflow(i64::MIN)))
    );
}

// ─── Malformed trees ───────────────────────────────────────────────

#[test]
fn test_add_with_one_child() {
    let tree = Tree::node(ADD, vec![Tree::leaf("x")]);
    let err = decode(&tree, &Eval).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::Arity {
            tag: ADD.to_string(),
            expected: 2,
            found: 1,
        }
    );
    assert_eq!(err.to_string(), "`Add` expects 2 children, found 1 at /");
}

#[test]
fn test_lit_not_a_number() {
    let tree = lit("notanumber");
    let err = decode(&tree, &Eval).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::BadLiteral {
            text: "notanumber".to_string()
        }
    );
    assert_eq!(err.path, vec![0]);
}

#[test]
fn test_lit_out_of_range() {
    let err = decode(&lit("9223372036854775808"), &Eval).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::BadLiteral { .. }));
    assert_eq!(decode(&lit("-9223372036854775808"), &Eval), Ok(Ok(i64::MIN)));
}

#[test]
fn test_lit_arity_and_payload_shape() {
    let err = decode(&Tree::node(LIT, vec![]), &Eval).unwrap_err();
    assert!(matches!(
        err.kind,
        DecodeErrorKind::Arity {
            expected: 1,
            found: 0,
            ..
        }
    ));

    let err = decode(&Tree::node(LIT, vec![lit("1")]), &Eval).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::ExpectedLeaf {
            tag: LIT.to_string()
        }
    );
    assert_eq!(err.path, vec![0]);
}

#[test]
fn test_leaf_in_expression_position() {
    let err = decode(&Tree::leaf("8"), &Eval).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::ExpectedNode {
            leaf: "8".to_string()
        }
    );

    let tree = Tree::node(NEG, vec![Tree::leaf("8")]);
    let err = decode(&tree, &Eval).unwrap_err();
    assert_eq!(err.path, vec![0]);
}

#[test]
fn test_neg_with_two_children() {
    let tree = Tree::node(NEG, vec![lit("1"), lit("2")]);
    let err = decode(&tree, &View).unwrap_err();
    assert!(matches!(
        err.kind,
        DecodeErrorKind::Arity {
            expected: 1,
            found: 2,
            ..
        }
    ));
}

#[test]
fn test_left_child_error_reported_first() {
    let tree = Tree::node(ADD, vec![lit("a"), Tree::node("Bogus", vec![])]);
    let err = decode(&tree, &Eval).unwrap_err();
    assert_eq!(err.path, vec![0, 0]);
}

#[test]
fn test_error_path_deep_in_tree() {
    let tree = Tree::node(
        ADD,
        vec![
            lit("1"),
            Tree::node(NEG, vec![Tree::node(ADD, vec![lit("2"), lit("x")])]),
        ],
    );
    let err = decode(&tree, &Eval).unwrap_err();
    assert_eq!(err.path, vec![1, 0, 1, 0]);
    assert_eq!(format_path(&err.path), "/1/0/1/0");
    assert_eq!(tree.at(&err.path), Some(&Tree::leaf("x")));
}

// ─── Depth limit ───────────────────────────────────────────────────

fn neg_chain(depth: usize) -> Tree {
    let mut tree = lit("1");
    for _ in 1..depth {
        tree = Tree::node(NEG, vec![tree]);
    }
    tree
}

#[test]
fn test_depth_limit_counts_nodes() {
    let tree = neg_chain(10);
    let exact = Decoder::base().with_max_depth(10);
    assert_eq!(exact.decode(&tree, &Count), Ok(9));

    let short = Decoder::base().with_max_depth(9);
    let err = short.decode(&tree, &Count).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::TooDeep { limit: 9 });
    assert_eq!(err.path.len(), 9);
}

#[test]
fn test_default_depth_is_512_nodes() {
    assert_eq!(DEFAULT_MAX_DEPTH, 512);
    assert_eq!(DecodeOptions::default().max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(Decoder::base().options().max_depth, DEFAULT_MAX_DEPTH);

    assert_eq!(decode(&neg_chain(512), &Eval), Ok(Ok(1)));
    let err = decode(&neg_chain(513), &Eval).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::TooDeep { limit: 512 });
}

#[test]
fn test_with_options() {
    let options = DecodeOptions { max_depth: 3 };
    let decoder = Decoder::with_mul().with_options(options);
    assert_eq!(decoder.options(), &options);
    assert!(decoder.decode(&build(&Q), &Eval).is_err());
    let ok = Decoder::with_mul().with_max_depth(4);
    assert_eq!(ok.decode(&build(&Q), &Eval), Ok(Ok(224)));
}

// ─── Diagnostics ───────────────────────────────────────────────────

#[test]
fn test_to_diagnostic_uses_source_map() {
    let src = "(Add (Lit 1) (Mul (Lit 2) (Lit 3)))";
    let (tree, map) = crate::tree::parse_tree(src).unwrap();
    let err = decode(&tree, &Eval).unwrap_err();
    let diag = err.to_diagnostic(Some(&map));
    assert_eq!(diag.span, crate::span::Span::new(13, 34));
    assert_eq!(diag.help.as_deref(), Some("expected one of: Lit, Neg, Add"));
}

#[test]
fn test_to_diagnostic_without_map() {
    let err = decode(&Tree::node(ADD, vec![]), &Eval).unwrap_err();
    let diag = err.to_diagnostic(None);
    assert_eq!(diag.span, crate::span::Span::dummy());
    assert_eq!(diag.notes, vec!["`Add` takes 2 operands"]);
}

// ─── Extending the decoder ─────────────────────────────────────────

/// A third operator added without touching the algebra, `Base` or `WithMul`.
trait SubSym: MulSym {
    fn sub(&self, e1: Self::Repr, e2: Self::Repr) -> Self::Repr;
}

impl SubSym for View {
    fn sub(&self, e1: String, e2: String) -> String {
        format!("({} - {})", e1, e2)
    }
}

struct WithSub<I>(I);

impl<S: SubSym, I: Tier<S>> Tier<S> for WithSub<I> {
    fn decode_node<T: Tier<S>>(
        &self,
        cx: &mut Cursor<'_, T, S>,
        tag: &str,
        children: &[Tree],
    ) -> Result<S::Repr, DecodeError> {
        if tag != "Sub" {
            return self.0.decode_node(cx, tag, children);
        }
        let [e1, e2] = cx.operands::<2>("Sub", children)?;
        let e1 = cx.child(0, e1)?;
        let e2 = cx.child(1, e2)?;
        Ok(cx.sym().sub(e1, e2))
    }

    fn known_tags(&self, tags: &mut Vec<&'static str>) {
        self.0.known_tags(tags);
        tags.push("Sub");
    }
}

#[test]
fn test_third_tier_composes() {
    let tree = Tree::node(
        "Sub",
        vec![
            Tree::node(MUL, vec![lit("2"), lit("3")]),
            Tree::node(NEG, vec![Tree::node("Sub", vec![lit("1"), lit("0")])]),
        ],
    );
    let decoder = Decoder::new(WithSub(WithMul(Base)));
    assert_eq!(
        decoder.decode(&tree, &View).unwrap(),
        "((2 * 3) - (- (1 - 0)))"
    );
    // The narrower decoders still reject the new tag.
    assert!(decode_mul(&tree, &View).is_err());
}

#[test]
fn test_product_of_products_round_trip() {
    let p = Product::new(Product::new(Eval, Count), View);
    let direct = Q.run(&p);
    let decoded = decode_mul(&build(&Q), &p).unwrap();
    assert_eq!(decoded, direct);
}
