use std::fmt::Display;

use crate::fmt::{DisplayNamed, NameTable};

use super::{Formula, Name, Names};

/// A classical literal: a propositional atom, a negated propositional atom, or one of
/// the constants.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Literal {
    True,
    False,
    Pos(Name),
    Neg(Name)
}

impl Literal {
    /// The negation of this literal.
    pub fn negated(&self) -> Literal {
        match self {
            Literal::True => Literal::False,
            Literal::False => Literal::True,
            Literal::Pos(name) => Literal::Neg(*name),
            Literal::Neg(name) => Literal::Pos(*name),
        }
    }

    /// Whether this literal is one of the constants.
    pub fn is_const(&self) -> bool {
        matches!(self, Literal::True | Literal::False)
    }

    /// The atom under this literal, unless it is a constant.
    pub fn atom(&self) -> Option<Name> {
        match self {
            Literal::Pos(name) | Literal::Neg(name) => Some(*name),
            _ => None
        }
    }

    /// Rebuilds the formula this literal stands for.
    pub fn to_formula(&self) -> Formula {
        match self {
            Literal::True => Formula::True,
            Literal::False => Formula::False,
            Literal::Pos(name) => Formula::Atom(*name),
            Literal::Neg(name) => !Formula::Atom(*name),
        }
    }
}

impl Names for Literal {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        self.atom().into_iter().collect()
    }
}

impl DisplayNamed for Literal {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        match self {
            Literal::True => write!(f, "True"),
            Literal::False => write!(f, "False"),
            Literal::Pos(name) => name.fmt_named(f, names),
            Literal::Neg(name) => {
                write!(f, "~")?;
                name.fmt_named(f, names)
            }
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_table(&NameTable::new()).fmt(f)
    }
}
