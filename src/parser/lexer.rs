use super::error::Position;
use super::token::{TKind, Token};

/// The lexical analyzer
pub struct Lexer<I> where I : Iterator<Item = char> {
    /// The current position
    pos: Position,

    /// A text buffer
    buf: String,

    /// The lookahead character, or [None] at end
    la: Option<char>,

    /// The character stream
    itr: I
}

impl<I> Lexer<I> where I : Iterator<Item = char> {
    /// Creates a new [Lexer]
    pub fn new(mut itr: I) -> Self {
        Self {
            pos: Position::start(),
            buf: String::new(),
            la: itr.next(),
            itr
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Shift one character. Does nothing at the end of the stream.
    fn shift(&mut self) {
        if let Some(c) = self.la {
            self.pos.advance(c);
            self.la = self.itr.next();
        }
    }

    /// Pushes the current lookahead onto the text buffer, and then shifts as by [Self::shift].
    fn push_shift(&mut self) {
        match self.la {
            Some(c) => self.buf.push(c),
            None => panic!("Can't push EOF")
        }

        self.shift();
    }

    /// Skips skippable characters: whitespaces and the double quote.
    fn skip(&mut self) {
        while let Some(' ' | '\n' | '\r' | '\t' | '"') = self.la {
            self.shift();
        }
    }

    /// Classify the [TKind] of an identifier.
    fn classify_ident(ident: String) -> (String, TKind) {
        let kind = match ident.as_str() {
            // Keywords, exact spelling
            "True" => TKind::True,
            "False" => TKind::False,

            _ => TKind::Ident
        };

        return (ident, kind);
    }

    /// Read an identifier and classify it.
    fn ident(&mut self) -> (String, TKind) {
        while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = self.la {
            self.push_shift();
        }

        return Self::classify_ident(self.buf.clone());
    }

    /// Reads a modality id up to the given closing character. The id may be empty.
    /// Returns the given kind when the closing character is found, [TKind::Illegal]
    /// otherwise.
    fn modality(&mut self, close: char, kind: TKind) -> (String, TKind) {
        while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = self.la {
            self.push_shift();
        }

        let kind = if self.la == Some(close) {
            self.push_shift();
            kind
        } else {
            TKind::Illegal
        };

        return (self.buf.clone(), kind);
    }

    /// Classify a token that starts with `<`: either `<=>` or a diamond modality.
    fn lt(&mut self) -> (String, TKind) {
        // We had a <, what now?
        self.push_shift();

        match self.la {
            // <=>
            Some('=') => {
                self.push_shift();

                let kind = if let Some('>') = self.la {
                    self.push_shift();
                    TKind::Iff
                } else {
                    TKind::Illegal
                };

                (self.buf.clone(), kind)
            }

            // <id>
            _ => self.modality('>', TKind::DiaMod)
        }
    }

    /// Classify a token that starts with `[`: a box modality.
    fn bracket(&mut self) -> (String, TKind) {
        // We had a [, what now?
        self.push_shift();

        self.modality(']', TKind::BoxMod)
    }

    /// Classify a token that starts with `=`.
    fn eq(&mut self) -> (String, TKind) {
        // We had an =, what now?
        self.push_shift();

        let kind = match self.la {
            // =>
            Some('>') => {
                self.push_shift();
                TKind::Imp
            }

            _ => TKind::Illegal
        };

        return (self.buf.clone(), kind);
    }

    /// Classify a token by the given kind
    fn sym(&mut self, kind: TKind) -> (String, TKind) {
        self.push_shift();
        return (self.buf.clone(), kind);
    }

    /// Read a token. Returns [None] at the end of stream. Bad tokens are given as a token of [TKind::Illegal].
    pub fn token(&mut self) -> Option<Token> {
        self.skip();
        self.buf.clear();

        let at = self.pos;

        let (text, kind) = match self.la {
            Some('a'..='z' | 'A'..='Z' | '_') => self.ident(),

            Some('=') => self.eq(),
            Some('<') => self.lt(),
            Some('[') => self.bracket(),

            Some('~') => self.sym(TKind::Tilde),
            Some('&') => self.sym(TKind::Amp),
            Some('|') => self.sym(TKind::Bar),

            Some('(') => self.sym(TKind::LPar),
            Some(')') => self.sym(TKind::RPar),

            Some(_) => self.sym(TKind::Illegal),

            None => return None,
        };

        return Some(Token {
            kind,
            text,
            at
        });
    }
}
