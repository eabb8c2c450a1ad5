use std::collections::{BTreeMap, BTreeSet};

use crate::expr::{Literal, Mode};
use crate::log::targets;
use crate::mcf::{constraints, Constraints, Implication, Mcf};
use crate::sat::{Oracle, PropClause, Valuation};

use super::{Expansion, ProverError};

/// The per-world state of the search, dropped when the stack unwinds past the world.
#[derive(Default)]
struct World {
    /// Extractor output, memoised on first use.
    constraints: Option<Constraints>,

    /// The last propositional model proposed at this world.
    current: Option<Valuation>,

    /// Models already exhausted at this world, kept as blocking clauses.
    used: Vec<Valuation>
}

/// A tableau search over one modal clausal form. Each tableau node asks the SAT
/// oracle for a valuation of its classical constraints, spawns a successor world for
/// every active diamond, and enumerates further valuations when a successor closes.
pub struct Search<'mcf> {
    mcf: &'mcf Mcf,
    oracle: Oracle,
    worlds: BTreeMap<usize, World>
}

impl<'mcf> Search<'mcf> {
    pub fn new(mcf: &'mcf Mcf) -> Self {
        Self {
            mcf,
            oracle: Oracle::new(),
            worlds: BTreeMap::new()
        }
    }

    /// Runs the search from the root world.
    pub fn run(&mut self) -> Result<Expansion, ProverError> {
        self.prove(&BTreeSet::new(), 0)
    }

    /// Looks for a propositional valuation at depth `w` that satisfies the inherited
    /// modal atoms and the world's classical disjunctions, then checks its modal
    /// consequences. Without a valuation, reports which inherited atoms are
    /// individually at fault.
    fn prove(&mut self, active: &BTreeSet<Literal>, w: usize) -> Result<Expansion, ProverError> {
        let cons = self.constraints(w)?.clone();

        if cons.is_empty() && active.is_empty() {
            return Ok(Expansion::Sat);
        }

        log::debug!(
            target: targets::TABLEAU,
            "World {w}: {} inherited atoms, {} classical clauses", active.len(), cons.a.len()
        );

        // Hard constraints: every inherited modal atom, plus each A-disjunction.
        let mut hard: Vec<PropClause> = active.iter().map(|lit| vec![*lit]).collect();
        hard.extend(cons.a.iter().cloned());

        match self.next_valuation(w, &hard, &[])? {
            Some(val) => self.check(w, &hard, &cons, val),
            None => {
                let offenders = self.offenders(&cons.a, active)?;
                log::debug!(target: targets::TABLEAU, "World {w} unsat, {} offenders", offenders.len());

                Ok(Expansion::Offenders(offenders))
            }
        }
    }

    /// Determines the modal consequences of the current valuation at depth `w` and
    /// expands every active diamond into a successor world. A contradictory
    /// successor blocks the valuation and retries with a new one; the world closes
    /// when no genuinely new valuation remains.
    fn check(&mut self, w: usize, hard: &[PropClause], cons: &Constraints, val: Valuation) -> Result<Expansion, ProverError> {
        let mut val = val;

        'search: loop {
            let implied = self.activate(cons, &val)?;

            let boxes: BTreeSet<Literal> = implied
                .iter()
                .filter(|imp| imp.modal.modality.mode == Mode::Box)
                .map(|imp| imp.modal.body)
                .collect();

            // Implied diamonds, plus every unconditional one.
            let diamonds: BTreeSet<Literal> = implied
                .iter()
                .filter(|imp| imp.modal.modality.mode == Mode::Dia)
                .map(|imp| imp.modal.body)
                .chain(cons.d.iter().map(|modal| modal.body))
                .collect();

            if diamonds.is_empty() {
                return Ok(Expansion::Sat);
            }

            log::debug!(
                target: targets::TABLEAU,
                "World {w}: {} boxes, {} diamonds", boxes.len(), diamonds.len()
            );

            // Antecedents to discourage when asking for replacement valuations.
            let mut discouraged: BTreeSet<Literal> = BTreeSet::new();

            // Every diamond spawns its own successor: AND-branching.
            for diamond in &diamonds {
                let mut propagated = boxes.clone();
                propagated.insert(*diamond);

                match self.prove(&propagated, w + 1)? {
                    Expansion::Sat => {
                        self.reset(w + 1);
                    }

                    // A closed subtree closes this branch outright.
                    Expansion::Closed => return Ok(Expansion::Closed),

                    Expansion::Offenders(offending) => {
                        // Prefer valuations that satisfy the antecedents whose
                        // implications activated the clashing modal atoms.
                        discouraged.extend(
                            implied
                                .iter()
                                .filter(|imp| offending.contains(&imp.modal.body))
                                .map(|imp| imp.ante)
                                .filter(|ante| !ante.is_const())
                        );

                        let soft: Vec<(Literal, u64)> = discouraged.iter().map(|lit| (*lit, 1)).collect();

                        self.reset_used(w + 1);

                        match self.next_valuation(w, hard, &soft)? {
                            Some(next) if !next.is_empty() => {
                                log::debug!(target: targets::TABLEAU, "World {w}: retrying with a new valuation");

                                val = next;
                                continue 'search;
                            }

                            _ => return Ok(Expansion::Closed)
                        }
                    }
                }
            }

            // Every diamond branch stayed open.
            return Ok(Expansion::Sat);
        }
    }

    /// The active modal implications under a valuation: those whose classical
    /// antecedent is not satisfied, minus those the MaxSAT pass can deactivate by
    /// flipping atoms the valuation left unassigned.
    fn activate(&self, cons: &Constraints, val: &Valuation) -> Result<Vec<Implication>, ProverError> {
        let mut active: Vec<Implication> = cons
            .implications()
            .filter(|imp| !val.satisfies(&imp.ante))
            .copied()
            .collect();

        if active.is_empty() {
            return Ok(active);
        }

        // Ask for a model that agrees with everything assigned, maximising the
        // number of satisfied antecedents; only antecedents that still fail are
        // genuinely active.
        let hard: Vec<PropClause> = val
            .iter()
            .map(|(atom, value)| vec![if value { Literal::Pos(atom) } else { Literal::Neg(atom) }])
            .collect();

        let soft: Vec<(Literal, u64)> = active
            .iter()
            .map(|imp| imp.ante)
            .filter(|ante| !ante.is_const())
            .map(|ante| (ante, 1))
            .collect();

        if soft.is_empty() {
            return Ok(active);
        }

        if let Some(relaxed) = self.oracle.solve(&hard, &[], &soft)? {
            active.retain(|imp| !relaxed.satisfies(&imp.ante));
        }

        Ok(active)
    }

    /// Which of the inherited modal atoms clash with the world's A-set on their own.
    /// Each atom is tested in isolation against the classical disjunctions.
    fn offenders(&self, a: &[PropClause], active: &BTreeSet<Literal>) -> Result<BTreeSet<Literal>, ProverError> {
        let mut offenders = BTreeSet::new();

        for atom in active {
            let mut hard = a.to_vec();
            hard.push(vec![*atom]);

            if self.oracle.solve(&hard, &[], &[])?.is_none() {
                offenders.insert(*atom);
            }
        }

        Ok(offenders)
    }

    /// Asks the oracle for a model of `hard` at depth `w`, blocking every valuation
    /// already proposed there. The previous valuation joins the blocked set first, so
    /// each call yields a genuinely different model.
    fn next_valuation(&mut self, w: usize, hard: &[PropClause], soft: &[(Literal, u64)]) -> Result<Option<Valuation>, ProverError> {
        let world = self.worlds.entry(w).or_default();

        if let Some(prev) = world.current.take() {
            world.used.push(prev);
        }

        let found = self.oracle.solve(hard, &world.used, soft)?;

        if let Some(val) = &found {
            world.current = Some(val.clone());
        }

        Ok(found)
    }

    /// The constraint sets of depth `w`, extracted once.
    fn constraints(&mut self, w: usize) -> Result<&Constraints, ProverError> {
        let world = self.worlds.entry(w).or_default();

        if world.constraints.is_none() {
            world.constraints = Some(constraints(self.mcf, w)?);
        }

        Ok(world.constraints.as_ref().unwrap_or_else(|| unreachable!()))
    }

    /// Forgets the proposed and exhausted valuations of depth `w`.
    fn reset(&mut self, w: usize) {
        if let Some(world) = self.worlds.get_mut(&w) {
            world.current = None;
            world.used.clear();
        }
    }

    /// Forgets only the exhausted valuations of depth `w`, so its next visit starts a
    /// fresh enumeration.
    fn reset_used(&mut self, w: usize) {
        if let Some(world) = self.worlds.get_mut(&w) {
            world.used.clear();
        }
    }
}
