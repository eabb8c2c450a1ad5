/// Conversion to negation normal form.
mod nnf;

/// Elimination of propositional constants and double negations.
mod simplify;

#[cfg(test)]
mod test;

pub use nnf::*;
pub use simplify::*;
