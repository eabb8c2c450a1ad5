use std::fmt::Display;

/// A location in the input: character offset, line and column.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Position {
    /// The character index, starting at 0
    pub offset: usize,

    /// The line number, starting at 1
    pub line: usize,

    /// The column number, starting at 1 and resetting whenever the line advances
    pub col: usize
}

impl Position {
    /// The position of the very first character.
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            col: 1
        }
    }

    /// Steps past one character, starting a new line after a line feed.
    pub fn advance(&mut self, c: char) {
        self.offset += 1;

        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}


/// A syntax error in the input formula, pinned to the position where it was
/// detected. This is the user-facing member of the crate's error catalogue; the
/// invariant violations and oracle failures of the later pipeline stages live with
/// the prover.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct SyntaxError {
    /// What the parser expected or could not make sense of
    pub msg: String,

    /// Where the offending token starts
    pub at: Position
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.at.line, self.at.col, self.msg)
    }
}

impl std::error::Error for SyntaxError {
}


/// How a production failed. The distinction drives backtracking: a production that
/// never consumed anything leaves room for an alternative, one that broke off
/// mid-way commits the whole parse to failure.
#[derive(PartialEq, Eq, Clone, Debug)]
pub(super) enum Miss {
    /// The production never started; an alternative may still match here.
    Soft(Position),

    /// The production consumed input and then broke off; the failure is final.
    Hard(SyntaxError)
}

impl Miss {
    /// Commits a soft miss into a hard `Expected {rule}` failure. A hard miss keeps
    /// the message of the deeper production that raised it.
    pub(super) fn expected(self, rule: &str) -> Miss {
        match self {
            Miss::Soft(at) => Miss::Hard(SyntaxError {
                msg: format!("Expected {rule}"),
                at
            }),

            hard => hard
        }
    }

    /// Unwraps into the user-facing error at the outermost production.
    pub(super) fn into_error(self, rule: &str) -> SyntaxError {
        match self {
            Miss::Soft(at) => SyntaxError {
                msg: format!("Expected {rule}"),
                at
            },

            Miss::Hard(err) => err
        }
    }
}

/// The outcome of trying one production.
pub(super) type Attempt<T> = Result<T, Miss>;
