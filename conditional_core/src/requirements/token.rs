//! Content tokens - the entries of a requirement's `content` list.

/// How a content token should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentToken<'a> {
    /// `"text"`: used verbatim, without the quotes.
    Literal(&'a str),
    /// `$name$` or `$name`: a runtime variable reference.
    Variable(&'a str),
    /// Anything else: the name of a reply field.
    Field(&'a str),
}

impl<'a> ContentToken<'a> {
    pub fn parse(token: &'a str) -> Self {
        if let Some(rest) = token.strip_prefix('"') {
            ContentToken::Literal(rest.strip_suffix('"').unwrap_or(rest))
        } else if let Some(rest) = token.strip_prefix('$') {
            ContentToken::Variable(rest.strip_suffix('$').unwrap_or(rest))
        } else {
            ContentToken::Field(token)
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ContentToken::Literal(_))
    }
}
