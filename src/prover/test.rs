use crate::prover::satisfiable;
use crate::test::TestContext;

#[test]
fn tautological_clause_is_satisfiable() {
    let mut ctx = TestContext::new();

    assert!(satisfiable(&ctx.mcf("p | ~p")).unwrap());
}

#[test]
fn classical_contradiction_is_not() {
    let mut ctx = TestContext::new();

    assert!(!satisfiable(&ctx.mcf("p & ~p")).unwrap());
}

#[test]
fn box_without_diamond_never_spawns_a_successor() {
    let mut ctx = TestContext::new();

    // Vacuously satisfiable: nothing forces a successor world.
    assert!(satisfiable(&ctx.mcf("[r]p & [r]~p")).unwrap());
}

#[test]
fn diamond_against_box_closes() {
    let mut ctx = TestContext::new();

    // The successor would have to satisfy p and ~p at once.
    assert!(!satisfiable(&ctx.mcf("<r>p & [r]~p")).unwrap());
}

#[test]
fn depth_clauses_bind_every_successor() {
    let mut ctx = TestContext::new();

    // Clauses at depth 1 bind any world one universal step from the root, whatever
    // relation spawned it.
    assert!(satisfiable(&ctx.mcf("<a>p & [b]q")).unwrap());
    assert!(!satisfiable(&ctx.mcf("<a>p & [b]~p")).unwrap());
}

#[test]
fn named_modal_bodies_survive_the_round_trip() {
    let mut ctx = TestContext::new();

    // The placeholder False introduced for the complex diamond body must not make
    // this satisfiable formula unsatisfiable.
    assert!(satisfiable(&ctx.mcf("<r>(a & b)")).unwrap());
    assert!(satisfiable(&ctx.mcf("<r>(a & b) & [r]a")).unwrap());
    assert!(!satisfiable(&ctx.mcf("<r>(a & b) & [r]~a")).unwrap());
}
