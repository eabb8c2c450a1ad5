use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use kproof::parser::ParseContext;
use kproof::prover::prove;

/// A validity prover for the modal logic K.
///
/// Reads a formula, negates it, transforms the negation into modal clausal form and
/// searches for a Kripke model with a SAT-guided tableau. Prints whether the formula
/// is valid.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print wall-clock timing of the pipeline stages to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// The formula to decide; read from standard input when omitted.
    formula: Option<String>
}

fn main() -> ExitCode {
    // Logging is configured from file, when a configuration is present.
    let _ = log4rs::init_file("config/log4rs.yaml", Default::default());

    let cli = Cli::parse();

    let input = match cli.formula {
        Some(raw) => raw,
        None => match io::read_to_string(io::stdin()) {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("Cannot read input: {err}");
                return ExitCode::FAILURE;
            }
        }
    };

    let mut pc = ParseContext::new();

    let start = Instant::now();
    let parsed = pc.formula(&input);

    if cli.verbose {
        eprintln!("parse completed in {:?}.", start.elapsed());
    }

    let formula = match parsed {
        Ok(formula) => formula,
        Err(err) => {
            eprintln!("Syntax error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let verdict = prove(formula);

    if cli.verbose {
        eprintln!("prove completed in {:?}.", start.elapsed());
    }

    match verdict {
        Ok(validity) => {
            println!("{validity}");
            ExitCode::SUCCESS
        }

        Err(err) => {
            eprintln!("Internal error: {err}");
            ExitCode::FAILURE
        }
    }
}
