/// Lexical hint so the classifier can distinguish ints vs floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    Integer(&'a str), // no '.' and no exponent
    Float(&'a str),   // has '.' or exponent
}

/// A classified numeric literal, ready to be handed to a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int64(i64),
    UInt64(u64),
    Double(f64),
}

impl NumberLexeme<'_> {
    /// Classifies a grammatically valid literal.
    ///
    /// Integers that fit `i64` become `Int64`; non-negative integers above
    /// `i64::MAX` that fit `u64` become `UInt64`; every other literal is a
    /// `Double`. Returns `None` when the double is not finite (`1e400`).
    pub fn classify(self) -> Option<Number> {
        match self {
            NumberLexeme::Integer(text) if text.starts_with('-') => match text.parse::<i64>() {
                Ok(n) => Some(Number::Int64(n)),
                Err(_) => parse_double(text),
            },
            NumberLexeme::Integer(text) => match text.parse::<u64>() {
                Ok(n) => Some(match i64::try_from(n) {
                    Ok(signed) => Number::Int64(signed),
                    Err(_) => Number::UInt64(n),
                }),
                Err(_) => parse_double(text),
            },
            NumberLexeme::Float(text) => parse_double(text),
        }
    }
}

fn parse_double(text: &str) -> Option<Number> {
    text.parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .map(Number::Double)
}
