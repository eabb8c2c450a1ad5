use std::collections::BTreeSet;
use std::fmt::Display;
use std::mem::replace;

use crate::fmt::{DisplayNamed, NameTable};

/// A name is a numeric value that stands in for an identifier. Names have a full order.
/// To obtain a name, use [Name::any]. To obtain a name that is distinct from another
/// name, call [Name::succ].
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Clone, Copy)]
pub struct Name(u64);

impl Name {
    /// Creates any name.
    pub const fn any() -> Self {
        Self(0)
    }

    /// Get this name's successor.
    pub fn succ(&self) -> Name {
        Name(self.0 + 1)
    }

    /// Increments this name and returns what it was before the increment.
    pub fn incr(&mut self) -> Name {
        replace(self, self.succ())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::any()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DisplayNamed for Name {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        match names.get(self) {
            Some(str) => write!(f, "{str}"),
            None => write!(f, "{}", self.0),
        }
    }
}


/// A value that has [Name]s. Typically this is some sort of expression.
pub trait Names {
    /// Collects all the names used in this named object. It may repeat the same name
    /// multiple times, collect into some sort of set to avoid this.
    fn names<A>(&self) -> A where A : FromIterator<Name>;

    /// Test whether a specific name is used in this named object.
    fn has_name(&self, name: &Name) -> bool {
        let names: BTreeSet<Name> = self.names();
        names.contains(name)
    }

    /// Returns the highest ordered name in this named object.
    fn max(&self) -> Option<Name> {
        let names: BTreeSet<Name> = self.names();
        names.into_iter().next_back()
    }

    /// Returns a name not used in this named object.
    fn free(&self) -> Name {
        match self.max() {
            Some(name) => name.succ(),
            None => Name::any(),
        }
    }
}

impl Names for Name {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        Some(*self).into_iter().collect()
    }

    fn has_name(&self, name: &Name) -> bool {
        *self == *name
    }

    fn max(&self) -> Option<Name> {
        Some(*self)
    }

    fn free(&self) -> Name {
        self.succ()
    }
}

impl<N> Names for &N where N : Names {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        (*self).names()
    }
}

impl<N> Names for Box<N> where N : Names {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        self.as_ref().names()
    }
}

impl<N> Names for Vec<N> where N : Names {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        self.iter().flat_map(|it| it.names::<Vec<_>>()).collect()
    }
}

impl<N> Names for BTreeSet<N> where N : Names {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        self.iter().flat_map(|it| it.names::<Vec<_>>()).collect()
    }
}

impl<N1, N2> Names for (N1, N2) where N1 : Names, N2 : Names {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        let l: Vec<Name> = self.0.names();
        let r: Vec<Name> = self.1.names();

        l.into_iter().chain(r.into_iter()).collect()
    }
}
