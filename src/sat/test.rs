use crate::expr::Literal;
use crate::sat::{Oracle, Valuation};
use crate::test::TestContext;

#[test]
fn unit_clauses_force_the_model() {
    let mut ctx = TestContext::new();
    let oracle = Oracle::new();

    let (p, q) = (ctx.lit("p"), ctx.lit("q"));

    let model = oracle
        .solve(&[vec![p], vec![q.negated()]], &[], &[])
        .unwrap()
        .expect("Satisfiable");

    assert!(model.satisfies(&p));
    assert!(model.satisfies(&q.negated()));
}

#[test]
fn contradiction_is_unsat() {
    let mut ctx = TestContext::new();
    let oracle = Oracle::new();

    let p = ctx.lit("p");

    let found = oracle.solve(&[vec![p], vec![p.negated()]], &[], &[]).unwrap();
    assert!(found.is_none());
}

#[test]
fn constants_translate() {
    let oracle = Oracle::new();

    assert!(oracle.solve(&[vec![Literal::True]], &[], &[]).unwrap().is_some());
    assert!(oracle.solve(&[vec![Literal::False]], &[], &[]).unwrap().is_none());
}

#[test]
fn blocking_enumerates_models() {
    let mut ctx = TestContext::new();
    let oracle = Oracle::new();

    let (p, q) = (ctx.lit("p"), ctx.lit("q"));
    let hard = [vec![p, q]];

    // p | q has three models; each found model is blocked in the next round.
    let mut blocked: Vec<Valuation> = Vec::new();

    for _ in 0..3 {
        let model = oracle.solve(&hard, &blocked, &[]).unwrap().expect("Expected another model");
        assert!(model.satisfies(&p) || model.satisfies(&q));
        blocked.push(model);
    }

    assert!(oracle.solve(&hard, &blocked, &[]).unwrap().is_none());
}

#[test]
fn blocking_an_empty_valuation_closes_the_query() {
    let oracle = Oracle::new();

    let found = oracle.solve(&[], &[Valuation::new()], &[]).unwrap();
    assert!(found.is_none());
}

#[test]
fn soft_literals_steer_the_model() {
    let mut ctx = TestContext::new();
    let oracle = Oracle::new();

    let (p, q) = (ctx.lit("p"), ctx.lit("q"));

    // Exactly one of p, q; prefer q.
    let hard = [vec![p, q], vec![p.negated(), q.negated()]];

    let model = oracle.solve(&hard, &[], &[(q, 1)]).unwrap().expect("Satisfiable");

    assert!(model.satisfies(&q));
    assert!(model.satisfies(&p.negated()));
}

#[test]
fn weights_break_ties() {
    let mut ctx = TestContext::new();
    let oracle = Oracle::new();

    let (p, q) = (ctx.lit("p"), ctx.lit("q"));

    // p and q exclude each other; the heavier preference wins.
    let hard = [vec![p.negated(), q.negated()]];

    let model = oracle
        .solve(&hard, &[], &[(p, 1), (q, 3)])
        .unwrap()
        .expect("Satisfiable");

    assert!(model.satisfies(&q));
}
