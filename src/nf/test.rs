use crate::expr::Formula;
use crate::parser::ParseContext;

use super::{nnf, simplify};

struct Ctx {
    pc: ParseContext
}

impl Ctx {
    fn new() -> Self {
        Self { pc: ParseContext::new() }
    }

    fn f(&mut self, str: &str) -> Formula {
        self.pc.formula(str).unwrap()
    }
}

#[test]
fn negated_box_becomes_diamond() {
    let mut ctx = Ctx::new();

    assert_eq!(nnf(ctx.f("~[r]p")), ctx.f("<r>~p"));
    assert_eq!(nnf(ctx.f("~<r>p")), ctx.f("[r]~p"));
}

#[test]
fn modal_duality_preserves_relation_ids() {
    let mut ctx = Ctx::new();

    assert_eq!(nnf(ctx.f("~[a][b]p")), ctx.f("<a><b>~p"));
    assert_ne!(nnf(ctx.f("~[a]p")), ctx.f("<b>~p"));
}

#[test]
fn demorgan() {
    let mut ctx = Ctx::new();

    assert_eq!(nnf(ctx.f("~(p & q)")), ctx.f("~p | ~q"));
    assert_eq!(nnf(ctx.f("~(p | q)")), ctx.f("~p & ~q"));
}

#[test]
fn implication_elimination() {
    let mut ctx = Ctx::new();

    assert_eq!(nnf(ctx.f("p => q")), ctx.f("~p | q"));
    assert_eq!(nnf(ctx.f("~(p => q)")), ctx.f("p & ~q"));
}

#[test]
fn equivalence_elimination() {
    let mut ctx = Ctx::new();

    assert_eq!(nnf(ctx.f("p <=> q")), ctx.f("(p & q) | (~p & ~q)"));
    assert_eq!(nnf(ctx.f("~(p <=> q)")), ctx.f("(p & ~q) | (~p & q)"));
}

#[test]
fn double_negation() {
    let mut ctx = Ctx::new();

    assert_eq!(nnf(ctx.f("~~p")), ctx.f("p"));
    assert_eq!(nnf(ctx.f("~~~p")), ctx.f("~p"));
}

#[test]
fn nnf_output_is_nnf() {
    let mut ctx = Ctx::new();

    fn is_nnf(f: &Formula) -> bool {
        match f {
            Formula::Not(rhs) => matches!(rhs.as_ref(), Formula::Atom(_)),
            Formula::And(lhs, rhs) | Formula::Or(lhs, rhs) => is_nnf(lhs) && is_nnf(rhs),
            Formula::Imp(_, _) | Formula::Iff(_, _) => false,
            Formula::Modal(_, rhs) => is_nnf(rhs),
            _ => true
        }
    }

    for input in [
        "~(p <=> (q => [r](s & ~t)))",
        "~(~p => ~<r>~(a | ~b))",
        "~([a](p => q) & <b>~(p <=> q))",
    ] {
        let out = nnf(ctx.f(input));
        assert!(is_nnf(&out), "Not in NNF: {out}");
    }
}

#[test]
fn constants_fold() {
    let mut ctx = Ctx::new();

    assert_eq!(simplify(ctx.f("p & True")), ctx.f("p"));
    assert_eq!(simplify(ctx.f("p & False")), Formula::False);
    assert_eq!(simplify(ctx.f("p | True")), Formula::True);
    assert_eq!(simplify(ctx.f("p | False")), ctx.f("p"));
    assert_eq!(simplify(ctx.f("~True")), Formula::False);
    assert_eq!(simplify(ctx.f("False => p")), Formula::True);
    assert_eq!(simplify(ctx.f("p <=> True")), ctx.f("p"));
    assert_eq!(simplify(ctx.f("p <=> False")), ctx.f("~p"));
}

#[test]
fn simplify_removes_double_negation() {
    let mut ctx = Ctx::new();

    assert_eq!(simplify(ctx.f("~~p")), ctx.f("p"));
}

#[test]
fn modalities_are_not_folded() {
    let mut ctx = Ctx::new();

    assert_eq!(simplify(ctx.f("[r](p & True)")), ctx.f("[r]p"));
    assert_eq!(simplify(ctx.f("[r]True")), ctx.f("[r]True"));
}
