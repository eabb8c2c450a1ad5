use std::fmt::Display;

use crate::expr::{Formula, Literal, Mode, Modality, Name, Names};
use crate::log::targets;

use super::{Clause, Disjunct, McId, Mcf, ModalAtom, ModalContext};

/// A formula that reached the clausifier in a shape negation normal form does not
/// allow. This is an invariant violation in the pipeline, not a user error.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ClausifyError {
    pub formula: Formula
}

impl Display for ClausifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot transform to clausal form: {}", self.formula)
    }
}

impl std::error::Error for ClausifyError {
}


/// The mutable counters threaded through one clausification: the fresh-name supply
/// and the high-water mark for clause ids.
struct ClausifyContext {
    fresh: Name,
    max_mc_id: McId
}

impl ClausifyContext {
    /// Creates a context whose fresh names do not collide with the names of `formula`.
    fn for_formula(formula: &Formula) -> Self {
        Self {
            fresh: formula.free(),
            max_mc_id: 0
        }
    }

    /// Yields a fresh propositional name, distinct from every input atom and from
    /// every name yielded before.
    fn fresh_atom(&mut self) -> Name {
        self.fresh.incr()
    }

    /// Records that a clause id is in use, so freshly allocated ids stay above it.
    fn note(&mut self, id: McId) {
        self.max_mc_id = self.max_mc_id.max(id);
    }

    /// Allocates a clause id no context used before.
    fn next_mc_id(&mut self) -> McId {
        self.max_mc_id += 1;
        self.max_mc_id
    }
}


/// Transforms a formula in negation normal form into modal clausal form. The result
/// is equisatisfiable with the input, not equivalent: conjunctions under disjunctions
/// and nested modalities are named with fresh atoms, Tseitin style.
pub fn clausify(formula: Formula) -> Result<Mcf, ClausifyError> {
    let mut ctx = ClausifyContext::for_formula(&formula);
    let mut mcf = Mcf::new();

    // Strip the outermost box chain, then dispatch on what is underneath.
    let (mc, stripped) = strip_box(formula, ModalContext::root());
    emit(&mut mcf, &mut ctx, mc, stripped, 0, false)?;

    log::debug!(target: targets::CLAUSIFY, "Clausified into {} clauses", mcf.len());

    Ok(mcf)
}

/// Splits a formula `[i1]...[in]G` into its modal context `[i1]...[in]` and the
/// remainder `G`, which is not a top-level box. The context may be empty.
fn strip_box(formula: Formula, mut mc: ModalContext) -> (ModalContext, Formula) {
    let mut rest = formula;

    while let Formula::Modal(Modality { mode: Mode::Box, rel }, inner) = rest {
        mc.push(rel);
        rest = *inner;
    }

    (mc, rest)
}

/// Recursive emission: files `formula` into the clause keyed by `(mc, id)`, splitting
/// or naming subformulas as the clausal shape requires. `distributive` records whether
/// the formula sits inside a disjunct, in which case a conjunction or modality cannot
/// be split off directly and is named instead.
fn emit(mcf: &mut Mcf, ctx: &mut ClausifyContext, mc: ModalContext, formula: Formula, id: McId, distributive: bool) -> Result<(), ClausifyError> {
    ctx.note(id);

    if let Some(lit) = formula.as_literal() {
        return insert(mcf, ctx, &mc, id, Disjunct::Classical(lit));
    }

    match formula {
        Formula::Or(lhs, rhs) => emit_or(mcf, ctx, mc, *lhs, *rhs, id),
        Formula::And(lhs, rhs) => emit_and(mcf, ctx, mc, *lhs, *rhs, id, distributive),
        Formula::Modal(modality, rhs) => emit_modality(mcf, ctx, mc, modality, *rhs, id, distributive),

        formula => Err(ClausifyError { formula })
    }
}

/// The disjunction rule. A modal context does not distribute over `|`, so both sides
/// belong to the same clause; complex sides are reshaped or named until they fit.
fn emit_or(mcf: &mut Mcf, ctx: &mut ClausifyContext, mc: ModalContext, lhs: Formula, rhs: Formula, id: McId) -> Result<(), ClausifyError> {
    match (lhs.is_literal(), rhs.is_literal()) {
        // Two literals, both join the clause.
        (true, true) => {
            emit(mcf, ctx, mc.clone(), lhs, id, false)?;
            emit(mcf, ctx, mc, rhs, id, false)
        }

        // Both sides are complex; each is named within the clause.
        (false, false) => {
            emit(mcf, ctx, mc.clone(), lhs, id, true)?;
            emit(mcf, ctx, mc, rhs, id, true)
        }

        // One literal next to one complex side.
        _ => {
            let (simple, complex) = if rhs.is_literal() { (rhs, lhs) } else { (lhs, rhs) };

            match complex {
                // The clause keeps accumulating through the nested disjunction.
                Formula::Or(_, _) => {
                    emit(mcf, ctx, mc.clone(), simple, id, false)?;
                    emit(mcf, ctx, mc, complex, id, false)
                }

                Formula::And(com_lhs, com_rhs) => {
                    // Whether this clause already holds exactly the literal being
                    // paired with the conjunction, filed by an enclosing disjunction.
                    let accumulated = mcf
                        .clause(&mc, id)
                        .zip(simple.as_literal())
                        .is_some_and(|(clause, lit)| clause.sole_disjunct_is(&lit));

                    if mcf.clause(&mc, id).is_none() {
                        // Nothing accumulated yet: distribute | over & on the fly.
                        let dist = (simple.clone() | *com_lhs) & (simple | *com_rhs);
                        emit(mcf, ctx, mc, dist, id, false)
                    } else {
                        // The clause has content already; splitting the conjunction
                        // off would assert its halves unconditionally. Name it
                        // instead, so the name joins the disjunction.
                        if !accumulated {
                            emit(mcf, ctx, mc.clone(), simple, id, false)?;
                        }

                        emit_and(mcf, ctx, mc, *com_lhs, *com_rhs, id, true)
                    }
                }

                Formula::Modal(_, _) => {
                    emit(mcf, ctx, mc.clone(), simple, id, false)?;
                    emit(mcf, ctx, mc, complex, id, false)
                }

                formula => Err(ClausifyError { formula })
            }
        }
    }
}

/// The conjunction rule. At the top of a modal context the conjuncts split into two
/// fresh sibling contexts; inside a disjunct the conjunction is named so it can live
/// in a clause of its own.
fn emit_and(mcf: &mut Mcf, ctx: &mut ClausifyContext, mc: ModalContext, lhs: Formula, rhs: Formula, id: McId, distributive: bool) -> Result<(), ClausifyError> {
    ctx.note(id);

    if !distributive {
        // The context distributes over &. Each side re-strips its own box prefix and
        // gets an id no sibling shares.
        let (mc_lhs, lhs) = strip_box(lhs, mc.clone());
        let id_lhs = ctx.next_mc_id();
        emit(mcf, ctx, mc_lhs, lhs, id_lhs, false)?;

        let (mc_rhs, rhs) = strip_box(rhs, mc.clone());
        let id_rhs = ctx.next_mc_id();
        emit(mcf, ctx, mc_rhs, rhs, id_rhs, false)
    } else {
        let p = ctx.fresh_atom();
        log::trace!(target: targets::CLAUSIFY, "Naming conjunction under {p}");

        emit(mcf, ctx, mc.clone(), Formula::atom(p), id, false)?;

        let renamed = Literal::Neg(p).to_formula() | (lhs & rhs);
        let id_renamed = ctx.next_mc_id();
        emit(mcf, ctx, mc, renamed, id_renamed, false)
    }
}

/// The modality rule. A modal literal joins the clause directly; a complex body is
/// named with a fresh atom that is constrained one universal step deeper. The
/// universal counterpart of the modality extends the context regardless of its mode:
/// the name propagated into a successor world must hold at every one of them.
fn emit_modality(mcf: &mut Mcf, ctx: &mut ClausifyContext, mc: ModalContext, modality: Modality, body: Formula, id: McId, distributive: bool) -> Result<(), ClausifyError> {
    ctx.note(id);

    if !distributive {
        if let Some(lit) = body.as_literal() {
            return insert(mcf, ctx, &mc, id, Disjunct::Modal(ModalAtom::new(modality, lit)));
        }

        let saturation = mcf.clause(&mc, id).map(|clause| clause.saturation()).unwrap_or(0);

        // A modal literal never stands alone in an implication clause; without a
        // classical disjunct the unsatisfiable placeholder takes that spot.
        if saturation == 0 {
            insert(mcf, ctx, &mc, id, Disjunct::Classical(Literal::False))?;
        }

        if saturation <= 1 {
            let p = ctx.fresh_atom();
            log::trace!(target: targets::CLAUSIFY, "Naming modal body under {p}");

            let id_body = ctx.next_mc_id();
            insert(mcf, ctx, &mc, id, Disjunct::Modal(ModalAtom::new(modality, Literal::Pos(p))))?;

            let mc_body = mc.extended(modality.rel);
            let renamed = Literal::Neg(p).to_formula() | body;
            emit(mcf, ctx, mc_body, renamed, id_body, false)
        } else {
            // No room in this clause; name the whole modal formula instead.
            emit_modality(mcf, ctx, mc, modality, body, id, true)
        }
    } else {
        let p = ctx.fresh_atom();

        emit(mcf, ctx, mc.clone(), Formula::atom(p), id, false)?;

        let renamed = Literal::Neg(p).to_formula() | Formula::modal(modality, body);
        let id_renamed = ctx.next_mc_id();
        emit(mcf, ctx, mc, renamed, id_renamed, false)
    }
}

/// Files one disjunct into the clause keyed by `(mc, id)`, creating the clause if
/// this is its first disjunct. An insertion the clause refuses comes back as a modal
/// literal, which is extruded: a fresh atom takes its place and the clause
/// `~p | modal` is emitted under a freshly bumped id.
fn insert(mcf: &mut Mcf, ctx: &mut ClausifyContext, mc: &ModalContext, id: McId, disjunct: Disjunct) -> Result<(), ClausifyError> {
    ctx.note(id);

    let extruded = match mcf.clause_mut(mc, id) {
        None => {
            mcf.push_clause(Clause::new(mc.clone(), id, disjunct));
            None
        }

        Some(clause) => match disjunct {
            Disjunct::Classical(lit) => clause.push_classical(lit),
            Disjunct::Modal(modal) => clause.push_modal(modal),
        }
    };

    if let Some(modal) = extruded {
        let p = ctx.fresh_atom();
        log::trace!(target: targets::CLAUSIFY, "Extruding {} under {p}", modal.to_formula());

        // The clause just lost (or refused) its modal literal; the fresh atom cannot
        // be refused in its place.
        let clause = mcf.clause_mut(mc, id).unwrap_or_else(|| unreachable!());
        clause.push_classical(Literal::Pos(p));

        let moved = Literal::Neg(p).to_formula() | modal.to_formula();
        let id_moved = ctx.next_mc_id();
        emit(mcf, ctx, mc.clone(), moved, id_moved, false)?;
    }

    Ok(())
}
