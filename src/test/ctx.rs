use crate::expr::{Formula, Literal, Name};
use crate::fmt::DisplayNamed;
use crate::mcf::{clausify, Mcf};
use crate::nf::{nnf, simplify};
use crate::parser::ParseContext;

/// A [TestContext] creates the deeply structured instances tests need from fixture
/// strings, keeping names consistent across parsing calls: if `p` resolves to some
/// numeric name once, every later fixture in the same context resolves `p` to the
/// same name.
pub struct TestContext {
    pc: ParseContext
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            pc: ParseContext::new()
        }
    }

    pub fn display<D>(&self, elem: D) where D : DisplayNamed {
        println!("{}", elem.with_table(self.pc.name_table()))
    }

    pub fn render<D>(&self, elem: D) -> String where D : DisplayNamed {
        format!("{}", elem.with_table(self.pc.name_table()))
    }

    /// Parses a formula.
    pub fn formula(&mut self, str: &str) -> Formula {
        self.pc.formula(str).unwrap()
    }

    /// Parses a formula and brings it into simplified negation normal form.
    pub fn nnf(&mut self, str: &str) -> Formula {
        simplify(nnf(self.formula(str)))
    }

    /// Parses a formula and clausifies its simplified negation normal form.
    pub fn mcf(&mut self, str: &str) -> Mcf {
        clausify(self.nnf(str)).unwrap()
    }

    /// Resolves an identifier to its interned name.
    pub fn name(&mut self, str: &str) -> Name {
        match self.pc.formula(str).unwrap() {
            Formula::Atom(name) => name,
            other => panic!("Not an atom: {other}")
        }
    }

    /// Resolves an identifier to a positive literal over its interned name.
    pub fn lit(&mut self, str: &str) -> Literal {
        match self.pc.formula(str).unwrap().as_literal() {
            Some(lit) => lit,
            None => panic!("Not a literal: {str}")
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
