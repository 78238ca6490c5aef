use logos::Logos;

/// Represents a raw lexeme in the source input.
///
/// The lexer only splits the input into runs of characters; deciding what a
/// run means (a valid number, a function name, a unary or binary minus) is
/// left to the tokenizer, which has the surrounding context.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawToken {
    /// A run of digits and decimal points, such as `3.14`, `.5` or `1.2.3`.
    #[regex(r"[0-9.]+")]
    Number,
    /// Identifiers; function names such as `sin` or `sqrt`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
}

impl RawToken {
    /// Returns the operator symbol for operator lexemes.
    #[must_use]
    pub const fn operator_symbol(self) -> Option<char> {
        match self {
            Self::Plus => Some('+'),
            Self::Minus => Some('-'),
            Self::Star => Some('*'),
            Self::Slash => Some('/'),
            Self::Caret => Some('^'),
            Self::Number | Self::Identifier | Self::LParen | Self::RParen => None,
        }
    }
}
