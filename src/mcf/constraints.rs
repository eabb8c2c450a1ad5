use std::fmt::Display;

use crate::expr::{Literal, Mode};

use super::{Clause, Disjunct, Mcf, ModalAtom};

/// A clause that fits none of the four well-formed shapes. The clausifier never
/// produces one; meeting it is an invariant violation that aborts the prove call.
#[derive(Debug, Clone)]
pub struct MalformedClause {
    pub clause: Clause
}

impl Display for MalformedClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incorrectly formed modal clause: {}", self.clause)
    }
}

impl std::error::Error for MalformedClause {
}


/// A modal implication: a clause of one classical literal next to one modal literal,
/// read as "if the antecedent fails, the modal literal holds".
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub struct Implication {
    pub ante: Literal,
    pub modal: ModalAtom
}

/// The clauses of one world, partitioned by shape into the four sets the prover
/// consumes.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    /// Purely classical disjunctions, of any arity.
    pub a: Vec<Vec<Literal>>,

    /// Implications whose modal literal is a box.
    pub ib: Vec<Implication>,

    /// Implications whose modal literal is a diamond.
    pub id: Vec<Implication>,

    /// Bare diamond literals.
    pub d: Vec<ModalAtom>
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.ib.is_empty() && self.id.is_empty() && self.d.is_empty()
    }

    /// The box and diamond implications together.
    pub fn implications(&self) -> impl Iterator<Item = &Implication> {
        self.ib.iter().chain(self.id.iter())
    }
}

/// Partitions the clauses at depth `w` into the four constraint sets. This is a pure
/// function of the clausal form and the depth.
pub fn constraints(mcf: &Mcf, w: usize) -> Result<Constraints, MalformedClause> {
    let mut sets = Constraints::default();

    for clause in mcf.clauses_at(w) {
        match clause.disjuncts() {
            // A lone classical literal is a unit A-clause; a lone modal literal is
            // only well formed as a diamond.
            [Disjunct::Classical(lit)] => sets.a.push(vec![*lit]),

            [Disjunct::Modal(modal)] if modal.modality.mode == Mode::Dia => sets.d.push(*modal),

            [Disjunct::Classical(ante), Disjunct::Modal(modal)]
            | [Disjunct::Modal(modal), Disjunct::Classical(ante)] => {
                let implication = Implication { ante: *ante, modal: *modal };

                match modal.modality.mode {
                    Mode::Box => sets.ib.push(implication),
                    Mode::Dia => sets.id.push(implication),
                }
            }

            disjuncts => {
                // Everything else must be purely classical, of whatever arity.
                let mut lits = Vec::with_capacity(disjuncts.len());

                for disjunct in disjuncts {
                    match disjunct {
                        Disjunct::Classical(lit) => lits.push(*lit),
                        Disjunct::Modal(_) => return Err(MalformedClause { clause: clause.clone() })
                    }
                }

                sets.a.push(lits);
            }
        }
    }

    Ok(sets)
}
