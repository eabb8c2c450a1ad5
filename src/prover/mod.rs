use std::collections::BTreeSet;
use std::fmt::Display;

use crate::expr::{Formula, Literal};
use crate::mcf::{clausify, ClausifyError, MalformedClause, Mcf};
use crate::nf::{nnf, simplify};
use crate::sat::OracleError;

/// The SAT-guided tableau search.
mod tableau;

#[cfg(test)]
mod test;

pub use tableau::*;

/// The result of expanding one world of the tableau.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Expansion {
    /// The world and every successor it demands are consistent.
    Sat,

    /// The subtree is closed: no valuation of this world extends to a model.
    Closed,

    /// No valuation exists at all, and these inherited modal atoms each clash with
    /// the world's classical constraints on their own. Learning signal for the
    /// caller, not an error.
    Offenders(BTreeSet<Literal>)
}

/// The verdict on an input formula.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Validity {
    Valid,
    NotValid
}

impl Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validity::Valid => write!(f, "Psi is valid"),
            Validity::NotValid => write!(f, "Psi is NOT valid"),
        }
    }
}


/// Everything that can go wrong after parsing.
#[derive(Debug)]
pub enum ProverError {
    /// Negation normal form was violated on the way into the clausifier.
    Clausify(ClausifyError),

    /// A clause of the clausal form fit none of the four well-formed shapes.
    Malformed(MalformedClause),

    /// The SAT oracle failed.
    Oracle(OracleError)
}

impl From<ClausifyError> for ProverError {
    fn from(value: ClausifyError) -> Self {
        Self::Clausify(value)
    }
}

impl From<MalformedClause> for ProverError {
    fn from(value: MalformedClause) -> Self {
        Self::Malformed(value)
    }
}

impl From<OracleError> for ProverError {
    fn from(value: OracleError) -> Self {
        Self::Oracle(value)
    }
}

impl Display for ProverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProverError::Clausify(e) => e.fmt(f),
            ProverError::Malformed(e) => e.fmt(f),
            ProverError::Oracle(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ProverError {
}


/// Decides whether the clausal form of a formula is satisfiable.
pub fn satisfiable(mcf: &Mcf) -> Result<bool, ProverError> {
    let mut search = Search::new(mcf);

    Ok(search.run()? == Expansion::Sat)
}

/// Decides validity of a formula by refutation: the formula is negated, normalized,
/// clausified, and handed to the tableau search. The formula is valid exactly when
/// its negation has no model.
pub fn prove(formula: Formula) -> Result<Validity, ProverError> {
    let negated = simplify(nnf(!formula));
    let mcf = clausify(negated)?;

    if satisfiable(&mcf)? {
        Ok(Validity::NotValid)
    } else {
        Ok(Validity::Valid)
    }
}
