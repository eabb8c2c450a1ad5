use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use z3::ast::{Bool, Int};
use z3::{Config, Context, Optimize, SatResult};

use crate::expr::{Literal, Name};
use crate::log::targets;

#[cfg(test)]
mod test;

/// A disjunction of classical literals. A hard constraint set is a conjunction of
/// these.
pub type PropClause = Vec<Literal>;

/// A propositional model: a partial assignment of truth values to atoms. Atoms the
/// solver left unconstrained stay unassigned, and an unassigned atom satisfies no
/// literal.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Valuation {
    assign: BTreeMap<Name, bool>
}

impl Valuation {
    pub fn new() -> Self {
        Self {
            assign: BTreeMap::new()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assign.is_empty()
    }

    pub fn set(&mut self, atom: Name, value: bool) {
        self.assign.insert(atom, value);
    }

    pub fn get(&self, atom: &Name) -> Option<bool> {
        self.assign.get(atom).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Name, bool)> + '_ {
        self.assign.iter().map(|(name, value)| (*name, *value))
    }

    /// Whether the given literal is known to hold under this valuation.
    pub fn satisfies(&self, lit: &Literal) -> bool {
        match lit {
            Literal::True => true,
            Literal::False => false,
            Literal::Pos(atom) => self.get(atom) == Some(true),
            Literal::Neg(atom) => self.get(atom) == Some(false),
        }
    }
}


/// The solver failed to decide a query. Unsatisfiability is a regular answer and is
/// never reported through this; this is the fatal kind of failure.
#[derive(Debug, Clone)]
pub struct OracleError {
    pub msg: String
}

impl Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solver failure: {}", self.msg)
    }
}

impl std::error::Error for OracleError {
}


/// The narrow gateway to the underlying SAT/MaxSAT solver. One query = one fresh Z3
/// context; no solver state survives between calls.
#[derive(Default)]
pub struct Oracle;

impl Oracle {
    pub fn new() -> Self {
        Self
    }

    /// Finds a model of the conjunction of `hard` clauses that differs from every
    /// valuation in `blocked` on at least one assigned atom. Among such models, one
    /// maximising the total weight of satisfied `soft` literals is preferred.
    ///
    /// Returns `Ok(None)` when no such model exists.
    pub fn solve(&self, hard: &[PropClause], blocked: &[Valuation], soft: &[(Literal, u64)]) -> Result<Option<Valuation>, OracleError> {
        let cfg = Config::new();
        let z3 = Context::new(&cfg);
        let opt = Optimize::new(&z3);

        for clause in hard {
            opt.assert(&clause_bool(&z3, clause));
        }

        for used in blocked {
            opt.assert(&blocking_bool(&z3, used));
        }

        if !soft.is_empty() {
            let zero = Int::from_i64(&z3, 0);

            let reward = soft
                .iter()
                .map(|(lit, weight)| {
                    let weight = Int::from_i64(&z3, *weight as i64);
                    lit_bool(&z3, lit).ite(&weight, &zero)
                })
                .reduce(|acc, term| acc + term)
                .unwrap_or_else(|| Int::from_i64(&z3, 0));

            opt.maximize(&reward);
        }

        match opt.check(&[]) {
            SatResult::Sat => {
                let model = opt.get_model().ok_or_else(|| OracleError {
                    msg: "sat without a model".into()
                })?;

                let mut val = Valuation::new();

                // Only atoms the model actually constrains end up assigned.
                for atom in atoms_of(hard, soft) {
                    let constant = atom_bool(&z3, &atom);

                    if let Some(value) = model.eval(&constant, false).and_then(|it| it.as_bool()) {
                        val.set(atom, value);
                    }
                }

                log::trace!(target: targets::ORACLE, "Model over {} atoms", val.iter().count());

                Ok(Some(val))
            }

            SatResult::Unsat => Ok(None),

            SatResult::Unknown => Err(OracleError {
                msg: "solver returned unknown".into()
            })
        }
    }
}

/// Every atom mentioned by the query.
fn atoms_of(hard: &[PropClause], soft: &[(Literal, u64)]) -> BTreeSet<Name> {
    hard.iter()
        .flatten()
        .chain(soft.iter().map(|(lit, _)| lit))
        .filter_map(|lit| lit.atom())
        .collect()
}

/// The Z3 constant standing for an atom.
fn atom_bool<'z3>(z3: &'z3 Context, atom: &Name) -> Bool<'z3> {
    Bool::new_const(z3, format!("{atom}"))
}

/// Translates a literal. The constants translate to the Z3 booleans.
fn lit_bool<'z3>(z3: &'z3 Context, lit: &Literal) -> Bool<'z3> {
    match lit {
        Literal::True => Bool::from_bool(z3, true),
        Literal::False => Bool::from_bool(z3, false),
        Literal::Pos(atom) => atom_bool(z3, atom),
        Literal::Neg(atom) => atom_bool(z3, atom).not(),
    }
}

/// Translates a disjunction of literals. The empty disjunction is unsatisfiable.
fn clause_bool<'z3>(z3: &'z3 Context, clause: &PropClause) -> Bool<'z3> {
    match clause.as_slice() {
        [] => Bool::from_bool(z3, false),
        [lit] => lit_bool(z3, lit),
        lits => {
            let bools: Vec<Bool> = lits.iter().map(|lit| lit_bool(z3, lit)).collect();
            let refs: Vec<&Bool> = bools.iter().collect();
            Bool::or(z3, &refs)
        }
    }
}

/// Translates a blocking clause: the next model must flip at least one atom the given
/// valuation assigned. Blocking an empty valuation is unsatisfiable, which makes the
/// solver report that no different model exists.
fn blocking_bool<'z3>(z3: &'z3 Context, val: &Valuation) -> Bool<'z3> {
    let bools: Vec<Bool> = val
        .iter()
        .map(|(atom, value)| {
            let constant = atom_bool(z3, &atom);
            if value { constant.not() } else { constant }
        })
        .collect();

    if bools.is_empty() {
        return Bool::from_bool(z3, false);
    }

    let refs: Vec<&Bool> = bools.iter().collect();
    Bool::or(z3, &refs)
}
