use crate::expr::Formula;
use crate::fmt::NameTable;

pub use error::*;
pub use namer::*;

use parser::Parser;

mod error;
mod token;
mod namer;

mod lexer;
mod parser;

#[cfg(test)]
mod test;


/// Owns the name interning state across parsing calls, so that the same identifier
/// resolves to the same [Name](crate::expr::Name) every time.
pub struct ParseContext {
    nc: NameContext
}

impl ParseContext {
    pub fn new() -> Self {
        Self { nc: NameContext::new() }
    }

    pub fn name_table(&self) -> &NameTable {
        self.nc.rev_table()
    }

    /// Parses a full formula, requiring the whole input to be consumed.
    pub fn formula(&mut self, input: &str) -> Result<Formula, SyntaxError> {
        let mut parser = Parser::new(input.chars());

        let result = parser.exp(&mut self.nc).and_then(|formula| {
            parser.eof()?;
            Ok(formula)
        });

        result.map_err(|miss| miss.into_error("exp"))
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}
