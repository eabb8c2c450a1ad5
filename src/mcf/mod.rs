use std::collections::BTreeMap;
use std::fmt::Display;

use crate::expr::{Formula, Literal, Modality, Name, Names};
use crate::fmt::{write_separated, DisplayNamed, NameTable};

/// Translation from negation normal form into modal clausal form.
mod clausify;

/// Partitioning of the clauses of a world into the prover's constraint sets.
mod constraints;


pub use clausify::*;
pub use constraints::*;

/// Disambiguates clauses that share a modal context but were produced by different
/// AND-branches during clausification.
pub type McId = u64;

/// A modal context: the prefix of universal modalities under which a clause is
/// asserted. Every entry is a box, so only the relation names are kept.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Default)]
pub struct ModalContext(Vec<Name>);

impl ModalContext {
    /// The empty context of the root world.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// The number of universal steps this context is away from the root world.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// This context extended by one universal step along `rel`.
    pub fn extended(&self, rel: Name) -> Self {
        let mut inner = self.0.clone();
        inner.push(rel);
        Self(inner)
    }

    /// Appends a universal step along `rel`.
    pub fn push(&mut self, rel: Name) {
        self.0.push(rel);
    }

    pub fn rels(&self) -> &[Name] {
        &self.0
    }
}

impl Names for ModalContext {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        self.0.names()
    }
}

impl DisplayNamed for ModalContext {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        for rel in &self.0 {
            write!(f, "[{}]", rel.with_table(names))?;
        }

        Ok(())
    }
}


/// A modal literal: a single modality applied directly to a classical literal, such as
/// `[r]p` or `<r>~q`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ModalAtom {
    pub modality: Modality,
    pub body: Literal
}

impl ModalAtom {
    pub fn new(modality: Modality, body: Literal) -> Self {
        Self { modality, body }
    }

    /// Rebuilds the formula this modal literal stands for.
    pub fn to_formula(&self) -> Formula {
        Formula::modal(self.modality, self.body.to_formula())
    }
}

impl DisplayNamed for ModalAtom {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        write!(f, "{}{}", self.modality.with_table(names), self.body.with_table(names))
    }
}


/// One disjunct of a clause, tagged by kind.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Disjunct {
    Classical(Literal),
    Modal(ModalAtom)
}

impl Disjunct {
    pub fn to_formula(&self) -> Formula {
        match self {
            Disjunct::Classical(lit) => lit.to_formula(),
            Disjunct::Modal(modal) => modal.to_formula(),
        }
    }
}

impl DisplayNamed for Disjunct {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        match self {
            Disjunct::Classical(lit) => lit.fmt_named(f, names),
            Disjunct::Modal(modal) => modal.fmt_named(f, names),
        }
    }
}


/// A clause of the modal clausal form: a disjunction of literals asserted under a
/// modal context. The context sequence together with the [McId] is the clause's
/// logical key.
///
/// A well-formed clause holds at most one modal literal, and at most one classical
/// literal once a modal literal is present. The growth operations below maintain
/// this by refusing insertions that would break it; the clausifier then extrudes
/// the modal literal under a fresh name.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct Clause {
    mc: ModalContext,
    id: McId,
    disjuncts: Vec<Disjunct>
}

impl Clause {
    /// Creates a clause with a single disjunct.
    pub fn new(mc: ModalContext, id: McId, first: Disjunct) -> Self {
        Self {
            mc,
            id,
            disjuncts: vec![first]
        }
    }

    pub fn mc(&self) -> &ModalContext {
        &self.mc
    }

    pub fn id(&self) -> McId {
        self.id
    }

    pub fn disjuncts(&self) -> &[Disjunct] {
        &self.disjuncts
    }

    /// Whether this clause is keyed by the given context and id. Contexts compare
    /// structurally, ids numerically.
    pub fn matches(&self, mc: &ModalContext, id: McId) -> bool {
        self.id == id && self.mc == *mc
    }

    fn num_classical(&self) -> usize {
        self.disjuncts.iter().filter(|d| matches!(d, Disjunct::Classical(_))).count()
    }

    fn num_modal(&self) -> usize {
        self.disjuncts.iter().filter(|d| matches!(d, Disjunct::Modal(_))).count()
    }

    /// How saturated the classical side of this disjunction is, capped at 2. A modal
    /// literal saturates the clause outright.
    pub fn saturation(&self) -> usize {
        let mut classical = 0;

        for disjunct in &self.disjuncts {
            match disjunct {
                Disjunct::Classical(_) => {
                    classical += 1;
                    if classical > 1 {
                        return 2;
                    }
                }
                Disjunct::Modal(_) => return 2
            }
        }

        classical
    }

    /// Whether this clause currently holds exactly the given classical literal and
    /// nothing else.
    pub fn sole_disjunct_is(&self, lit: &Literal) -> bool {
        self.disjuncts.len() == 1 && self.disjuncts[0] == Disjunct::Classical(*lit)
    }

    /// Adds a classical literal. If the clause holds a modal literal and would now
    /// exceed one classical disjunct, the modal literal is removed and handed back so
    /// the caller can extrude it into a clause of its own.
    pub fn push_classical(&mut self, lit: Literal) -> Option<ModalAtom> {
        self.disjuncts.push(Disjunct::Classical(lit));

        if self.num_modal() >= 1 && self.num_classical() > 1 {
            self.take_modal()
        } else {
            None
        }
    }

    /// Adds a modal literal, unless the clause already holds one or holds more than
    /// one classical literal; in that case the literal is handed back unchanged for
    /// the caller to extrude.
    pub fn push_modal(&mut self, modal: ModalAtom) -> Option<ModalAtom> {
        if self.num_modal() == 0 && self.num_classical() <= 1 {
            self.disjuncts.push(Disjunct::Modal(modal));
            None
        } else {
            Some(modal)
        }
    }

    /// Removes and returns the modal literal, if present.
    fn take_modal(&mut self) -> Option<ModalAtom> {
        let at = self.disjuncts.iter().position(|d| matches!(d, Disjunct::Modal(_)))?;

        match self.disjuncts.remove(at) {
            Disjunct::Modal(modal) => Some(modal),
            _ => unreachable!()
        }
    }

    /// Rebuilds this clause as a formula: the disjunction under its box prefix.
    pub fn to_formula(&self) -> Formula {
        let mut iter = self.disjuncts.iter();

        let first = match iter.next() {
            Some(d) => d.to_formula(),
            None => Formula::False,
        };

        let body = iter.fold(first, |acc, d| acc | d.to_formula());

        self.mc.rels().iter().rev().fold(body, |acc, rel| Formula::bx(*rel, acc))
    }
}

impl Names for Clause {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        let mut all: Vec<Name> = self.mc.names();

        for disjunct in &self.disjuncts {
            match disjunct {
                Disjunct::Classical(lit) => all.extend(lit.names::<Vec<_>>()),
                Disjunct::Modal(modal) => {
                    all.push(modal.modality.rel);
                    all.extend(modal.body.names::<Vec<_>>());
                }
            }
        }

        all.into_iter().collect()
    }
}

impl DisplayNamed for Clause {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        write!(f, "(")?;

        if self.mc.depth() > 0 {
            self.mc.fmt_named(f, names)?;
            write!(f, " (")?;
            write_separated(f, names, " | ", self.disjuncts.iter())?;
            write!(f, ")")?;
        } else {
            write_separated(f, names, " | ", self.disjuncts.iter())?;
        }

        write!(f, ")")
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_table(&NameTable::new()).fmt(f)
    }
}


/// A formula in modal clausal form: clauses grouped by modal-context depth.
/// Clauses at depth 0 bind propositions at the root world; clauses at depth `d` bind
/// propositions at any world reachable by `d` universal steps from the root.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Mcf {
    by_depth: BTreeMap<usize, Vec<Clause>>
}

impl Mcf {
    pub fn new() -> Self {
        Self {
            by_depth: BTreeMap::new()
        }
    }

    /// The clauses at the given depth. Depths with no clauses yield an empty slice.
    pub fn clauses_at(&self, depth: usize) -> &[Clause] {
        self.by_depth.get(&depth).map(|it| it.as_slice()).unwrap_or(&[])
    }

    /// All clauses, shallowest depth first.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.by_depth.values().flat_map(|it| it.iter())
    }

    /// The number of clauses across all depths.
    pub fn len(&self) -> usize {
        self.by_depth.values().map(|it| it.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_depth.values().all(|it| it.is_empty())
    }

    /// Finds the clause keyed by the given context and id, if it was created before.
    /// The candidates at one depth are few, a linear scan suffices.
    pub fn clause_mut(&mut self, mc: &ModalContext, id: McId) -> Option<&mut Clause> {
        self.by_depth
            .get_mut(&mc.depth())?
            .iter_mut()
            .find(|clause| clause.matches(mc, id))
    }

    /// Finds the clause keyed by the given context and id, if it was created before.
    pub fn clause(&self, mc: &ModalContext, id: McId) -> Option<&Clause> {
        self.by_depth
            .get(&mc.depth())?
            .iter()
            .find(|clause| clause.matches(mc, id))
    }

    /// Appends a clause at the depth of its context.
    pub fn push_clause(&mut self, clause: Clause) {
        self.by_depth.entry(clause.mc().depth()).or_default().push(clause);
    }

    /// Rebuilds the conjunction this clausal form stands for. An empty form is `True`.
    pub fn to_formula(&self) -> Formula {
        let mut iter = self.iter();

        let first = match iter.next() {
            Some(clause) => clause.to_formula(),
            None => return Formula::True,
        };

        iter.fold(first, |acc, clause| acc & clause.to_formula())
    }
}

impl Names for Mcf {
    fn names<A>(&self) -> A where A : FromIterator<Name> {
        self.iter().flat_map(|it| it.names::<Vec<_>>()).collect()
    }
}

impl DisplayNamed for Mcf {
    fn fmt_named(&self, f: &mut std::fmt::Formatter<'_>, names: &NameTable) -> std::fmt::Result {
        write_separated(f, names, " & ", self.iter())
    }
}

impl Display for Mcf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_table(&NameTable::new()).fmt(f)
    }
}
