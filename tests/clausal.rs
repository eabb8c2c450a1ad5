use std::collections::BTreeSet;

use kproof::expr::{Name, Names};
use kproof::mcf::{clausify, constraints, Disjunct, Mcf};
use kproof::nf::{nnf, simplify};
use kproof::prover::satisfiable;
use kproof::test::TestContext;

const CORPUS: &[&str] = &[
    "p | ~p",
    "p & ~p",
    "(a | b) & (~c | d)",
    "a | (b & c)",
    "x | (y | (a & b))",
    "[r]p",
    "[r][r][r][r]p",
    "<r>p & [r](p | q)",
    "<r>(a & b)",
    "[r](p & (q | <s>(w & v)))",
    "(<r>p & [r](~p | q)) | <r>~q",
    "(p | [a]x) & (p | <b>y) & <c>z",
    "<r>(p | (q & (r0 | (s & t))))",
];

#[test]
fn clause_shape_invariants() {
    let mut ctx = TestContext::new();

    for input in CORPUS {
        let mcf = ctx.mcf(input);

        for clause in mcf.iter() {
            let modal = clause.disjuncts().iter().filter(|d| matches!(d, Disjunct::Modal(_))).count();
            let classical = clause.disjuncts().iter().filter(|d| matches!(d, Disjunct::Classical(_))).count();

            assert!(modal <= 1, "{input}: clause {clause} has {modal} modal literals");

            if modal == 1 {
                assert!(classical <= 1, "{input}: clause {clause} is saturated");
            }
        }
    }
}

#[test]
fn every_clause_partitions() {
    let mut ctx = TestContext::new();

    for input in CORPUS {
        let mcf = ctx.mcf(input);

        for depth in 0..8 {
            let sets = constraints(&mcf, depth).unwrap();
            let total = sets.a.len() + sets.ib.len() + sets.id.len() + sets.d.len();

            assert_eq!(total, mcf.clauses_at(depth).len(), "{input}: depth {depth} lost clauses");
        }
    }
}

#[test]
fn shared_ids_share_contexts() {
    let mut ctx = TestContext::new();

    for input in CORPUS {
        let mcf = ctx.mcf(input);

        for depth in 0..8 {
            let clauses = mcf.clauses_at(depth);

            for c1 in clauses {
                for c2 in clauses {
                    if c1.id() == c2.id() {
                        assert_eq!(c1.mc(), c2.mc(), "{input}: id {} is ambiguous", c1.id());
                    }
                }
            }
        }
    }
}

#[test]
fn fresh_names_never_collide_with_input() {
    let mut ctx = TestContext::new();

    for input in CORPUS {
        let formula = ctx.nnf(input);
        let bound = formula.free();

        let mcf = clausify(formula.clone()).unwrap();

        // Every name in the output is an input name or a fresh one past the bound;
        // checking against the input's own names catches collisions.
        let input_names: BTreeSet<Name> = formula.names();
        let output_names: BTreeSet<Name> = mcf.names();

        for name in output_names.difference(&input_names) {
            assert!(*name >= bound, "{input}: reused name {name}");
        }
    }
}

#[test]
fn clausal_form_is_equisatisfiable() {
    let mut ctx = TestContext::new();

    // A formula with no diamonds and no boxes is its own ground truth; for modal
    // inputs the prover itself decides both sides of the round trip.
    for (input, expected) in [
        ("p | ~p", true),
        ("p & ~p", false),
        ("<r>p & [r]~p", false),
        ("<r>(a & b)", true),
        ("<r>p & [r](p | q)", true),
        ("x | (y | (a & b))", true),
    ] {
        let mcf = ctx.mcf(input);
        assert_eq!(satisfiable(&mcf).unwrap(), expected, "Wrong satisfiability for {input}");
    }
}

#[test]
fn reclausifying_the_output_preserves_satisfiability() {
    let mut ctx = TestContext::new();

    for input in CORPUS {
        let first: Mcf = ctx.mcf(input);
        let expected = satisfiable(&first).unwrap();

        let second = clausify(simplify(nnf(first.to_formula()))).unwrap();

        assert_eq!(
            satisfiable(&second).unwrap(),
            expected,
            "{input}: idempotence broke satisfiability"
        );
    }
}
