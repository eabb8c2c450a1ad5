/// Expression trees: names, modalities, literals and formulas.
pub mod expr;

/// Negation normal form and propositional simplification.
pub mod nf;

/// Modal clausal form: the clausifier and the constraint extractor.
pub mod mcf;

/// The SAT/MaxSAT oracle adapter.
pub mod sat;

/// The SAT-guided tableau prover.
pub mod prover;

/// Formatting module that resolves numeric names to human-readable names.
pub mod fmt;

/// Parsing module.
pub mod parser;

/// Log targets.
pub mod log;

/// Testing utilities.
pub mod test;
