use std::fmt::Display;
use std::ops::{BitAnd, BitOr, Not};

use crate::fmt::{DisplayNamed, NameTable};

use super::{Literal, Modality, Name, Names};

/// A modal formula, i.e. any expression that evaluates to true or false at a world of
/// a Kripke model.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub enum Formula {
    /// The true constant.
    True,

    /// The false constant.
    False,

    /// A propositional atom.
    Atom(Name),

    /// The inverse of a subformula. In negation normal form this appears only directly
    /// in front of an atom.
    Not(Box<Formula>),

    /// A conjunction of two subformulas.
    And(Box<Formula>, Box<Formula>),

    /// A disjunction of two subformulas.
    Or(Box<Formula>, Box<Formula>),

    /// An implication. Exists only between parsing and conversion to negation normal
    /// form, which eliminates it.
    Imp(Box<Formula>, Box<Formula>),

    /// An equivalence. Exists only between parsing and conversion to negation normal
    /// form, which eliminates it.
    Iff(Box<Formula>, Box<Formula>),

    /// A subformula under a modal operator: `[i]F` or `<i>F`.
    Modal(Modality, Box<Formula>)
}

impl Formula {
    pub fn atom(name: Name) -> Formula {
        Formula::Atom(name)
    }

    pub fn imp(lhs: Formula, rhs: Formula) -> Formula {
        Formula::Imp(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: Formula, rhs: Formula) -> Formula {
        Formula::Iff(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the formula `[rel]rhs`.
    pub fn bx(rel: Name, rhs: Formula) -> Formula {
        Formula::Modal(Modality::bx(rel), Box::new(rhs))
    }

    /// Creates the formula `<rel>rhs`.
    pub fn dia(rel: Name, rhs: Formula) -> Formula {
        Formula::Modal(Modality::dia(rel), Box::new(rhs))
    }

    pub fn modal(modality: Modality, rhs: Formula) -> Formula {
        Formula::Modal(modality, Box::new(rhs))
    }

    /// Tests whether this formula is a classical literal: an atom, a constant, or a
    /// negated atom. `~~p` and `~True` are not literals.
    pub fn is_literal(&self) -> bool {
        self.as_literal().is_some()
    }

    /// Views this formula as a classical [Literal], if it is one.
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Formula::True => Some(Literal::True),
            Formula::False => Some(Literal::False),
            Formula::Atom(name) => Some(Literal::Pos(*name)),
            Formula::Not(rhs) => match rhs.as_ref() {
                Formula::Atom(name) => Some(Literal::Neg(*name)),
                _ => None
            },
            _ => None
        }
    }
}

impl Default for Formula {
    fn default() -> Self {
        Formula::False
    }
}

impl BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Formula {
    type Output = Formula;

    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self))
    }
}


impl Names for Formula {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        match self {
            Formula::True | Formula::False => None.into_iter().collect(),
            Formula::Atom(name) => name.names(),
            Formula::Not(rhs) => rhs.names(),
            Formula::And(lhs, rhs) => (lhs, rhs).names(),
            Formula::Or(lhs, rhs) => (lhs, rhs).names(),
            Formula::Imp(lhs, rhs) => (lhs, rhs).names(),
            Formula::Iff(lhs, rhs) => (lhs, rhs).names(),
            Formula::Modal(modality, rhs) => (&modality.rel, rhs).names(),
        }
    }
}

impl DisplayNamed for Formula {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        match self {
            Formula::True => write!(f, "True"),
            Formula::False => write!(f, "False"),
            Formula::Atom(name) => name.fmt_named(f, names),
            Formula::Not(rhs) => write!(f, "~{}", rhs.with_table(names)),
            Formula::And(lhs, rhs) => write!(f, "({} & {})", lhs.with_table(names), rhs.with_table(names)),
            Formula::Or(lhs, rhs) => write!(f, "({} | {})", lhs.with_table(names), rhs.with_table(names)),
            Formula::Imp(lhs, rhs) => write!(f, "({} => {})", lhs.with_table(names), rhs.with_table(names)),
            Formula::Iff(lhs, rhs) => write!(f, "({} <=> {})", lhs.with_table(names), rhs.with_table(names)),
            Formula::Modal(modality, rhs) => write!(f, "{}{}", modality.with_table(names), rhs.with_table(names)),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_table(&NameTable::new()).fmt(f)
    }
}
