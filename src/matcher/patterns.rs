//! Recognizers compiled once from registry settings.
//!
//! Every marker (prefix, delimiter, flag prefix, quotes) is matched as a plain
//! substring, so no character in the settings is ever interpreted as syntax.
//!
//! All positions are byte offsets into the text being scanned. A token is always
//! terminated by a *boundary*: a delimiter or the end of the text. The delimiter is
//! consumed together with the token, so [`Token::end`] points at the start of the
//! next token.

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Delimiter {
    /// One or more whitespace characters.
    Whitespace,
    /// An explicit marker, with any whitespace around it.
    Marker(String),
}

/// The kind of token under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted text. Never reinterpreted or split.
    Literal,
    /// Flag prefix followed by a flag name.
    Flag,
    /// Plain text.
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Literal inner text, flag name, or raw value.
    pub text: &'a str,
    /// Byte offset just past the token and its terminating delimiter.
    pub end: usize,
}

/// A message split into command name and argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseMatch<'a> {
    pub name: &'a str,
    pub rest: &'a str,
}

/// Recognizers derived from [`Settings`].
#[derive(Debug, Clone)]
pub struct Patterns {
    prefix: String,
    delimiter: Delimiter,
    flag_prefix: String,
    quote_open: String,
    quote_close: String,
}

impl Patterns {
    /// Compile recognizers from settings. Settings are expected to be validated.
    pub fn compile(settings: &Settings) -> Self {
        let delimiter = match &settings.delimiter {
            Some(marker) => Delimiter::Marker(marker.clone()),
            None => Delimiter::Whitespace,
        };

        Self {
            prefix: settings.prefix.clone(),
            delimiter,
            flag_prefix: settings.flag_prefix.clone(),
            quote_open: settings.quote.open().to_string(),
            quote_close: settings.quote.close().to_string(),
        }
    }

    /// Match `prefix`, the shortest command name ending at a boundary, and the rest.
    pub fn base<'a>(&self, message: &'a str) -> Option<BaseMatch<'a>> {
        let body = message.strip_prefix(self.prefix.as_str())?;
        let (name_end, rest_start) = self.next_boundary(body, 0);

        Some(BaseMatch {
            name: &body[..name_end],
            rest: &body[rest_start..],
        })
    }

    /// If a delimiter starts at `pos`, return the offset just past it.
    pub fn delimiter_at(&self, text: &str, pos: usize) -> Option<usize> {
        let rest = &text[pos..];

        match &self.delimiter {
            Delimiter::Whitespace => {
                let skipped = rest.len() - rest.trim_start().len();
                (skipped > 0).then_some(pos + skipped)
            }
            Delimiter::Marker(marker) => {
                // A marker that starts with whitespace may begin inside the leading run,
                // so try the longest run first and back off one char at a time.
                let lead = rest.len() - rest.trim_start().len();
                let after = std::iter::once(lead)
                    .chain(rest[..lead].char_indices().rev().map(|(i, _)| i))
                    .find_map(|skip| rest[skip..].strip_prefix(marker.as_str()))?;
                Some(text.len() - after.trim_start().len())
            }
        }
    }

    /// Skip any run of delimiters starting at `pos`.
    pub fn skip_delimiters(&self, text: &str, mut pos: usize) -> usize {
        while let Some(end) = self.delimiter_at(text, pos) {
            pos = end;
        }
        pos
    }

    /// Recognize the token at `pos` with precedence literal → flag → value.
    ///
    /// Returns `None` only at the end of the text.
    pub fn token_at<'a>(&self, text: &'a str, pos: usize) -> Option<Token<'a>> {
        self.literal_at(text, pos)
            .or_else(|| self.flag_at(text, pos))
            .or_else(|| self.value_at(text, pos))
    }

    /// `quote_open`, the shortest inner text, then `quote_close` followed by a boundary.
    ///
    /// Stray quotes are tolerated: in `""a"` the first closing candidate is not
    /// followed by a boundary, so the literal extends to the last quote.
    pub fn literal_at<'a>(&self, text: &'a str, pos: usize) -> Option<Token<'a>> {
        if !text[pos..].starts_with(self.quote_open.as_str()) {
            return None;
        }

        let inner_start = pos + self.quote_open.len();
        let mut search = inner_start;

        while let Some(offset) = text[search..].find(self.quote_close.as_str()) {
            let close = search + offset;
            if let Some(end) = self.boundary_at(text, close + self.quote_close.len()) {
                return Some(Token {
                    kind: TokenKind::Literal,
                    text: &text[inner_start..close],
                    end,
                });
            }
            // Retry from the next character so overlapping markers are found.
            search = close + text[close..].chars().next().map_or(1, char::len_utf8);
        }

        None
    }

    /// `flag_prefix` followed by a non-empty name ending at a boundary.
    pub fn flag_at<'a>(&self, text: &'a str, pos: usize) -> Option<Token<'a>> {
        if !text[pos..].starts_with(self.flag_prefix.as_str()) {
            return None;
        }

        let name_start = pos + self.flag_prefix.len();
        let (name_end, end) = self.next_boundary(text, name_start);
        if name_end == name_start {
            return None;
        }

        Some(Token {
            kind: TokenKind::Flag,
            text: &text[name_start..name_end],
            end,
        })
    }

    /// The shortest non-empty run of text ending at a boundary.
    pub fn value_at<'a>(&self, text: &'a str, pos: usize) -> Option<Token<'a>> {
        let first = text[pos..].chars().next()?;
        let (value_end, end) = self.next_boundary(text, pos + first.len_utf8());

        Some(Token {
            kind: TokenKind::Value,
            text: &text[pos..value_end],
            end,
        })
    }

    /// A delimiter or the end of the text at `pos`.
    fn boundary_at(&self, text: &str, pos: usize) -> Option<usize> {
        if pos == text.len() {
            return Some(pos);
        }
        self.delimiter_at(text, pos)
    }

    /// Earliest boundary at or after `from`: `(content_end, next_token_start)`.
    fn next_boundary(&self, text: &str, from: usize) -> (usize, usize) {
        let rest = &text[from..];

        let start = match &self.delimiter {
            Delimiter::Whitespace => rest.find(char::is_whitespace).map(|i| from + i),
            // Whitespace in front of the marker belongs to the delimiter.
            Delimiter::Marker(marker) => rest
                .find(marker.as_str())
                .map(|i| from + rest[..i].trim_end().len()),
        };

        match start.and_then(|start| Some((start, self.delimiter_at(text, start)?))) {
            Some(found) => found,
            None => (text.len(), text.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quote;

    fn patterns() -> Patterns {
        Patterns::compile(&Settings::default())
    }

    fn comma_patterns() -> Patterns {
        Patterns::compile(&Settings {
            delimiter: Some(",".to_string()),
            ..Settings::default()
        })
    }

    #[test]
    fn test_base_splits_name_and_rest() {
        let base = patterns().base("!ban   member reason").unwrap();
        assert_eq!(base.name, "ban");
        assert_eq!(base.rest, "member reason");

        let bare = patterns().base("!simple").unwrap();
        assert_eq!(bare.name, "simple");
        assert_eq!(bare.rest, "");
    }

    #[test]
    fn test_base_requires_prefix() {
        assert!(patterns().base("?simple").is_none());
        assert!(patterns().base("simple").is_none());
    }

    #[test]
    fn test_base_with_marker_delimiter_trims_whitespace() {
        let base = comma_patterns().base("!ban  , member, reason").unwrap();
        assert_eq!(base.name, "ban");
        assert_eq!(base.rest, "member, reason");
    }

    #[test]
    fn test_value_stops_at_delimiter() {
        let p = patterns();
        let token = p.token_at("member reason", 0).unwrap();
        assert_eq!(token.kind, TokenKind::Value);
        assert_eq!(token.text, "member");
        assert_eq!(token.end, 7);
    }

    #[test]
    fn test_value_with_marker_delimiter_trims_trailing_whitespace() {
        let p = comma_patterns();
        let text = "This is the reason , next";
        let token = p.token_at(text, 0).unwrap();
        assert_eq!(token.text, "This is the reason");
        assert_eq!(&text[token.end..], "next");
    }

    #[test]
    fn test_literal_may_contain_markers() {
        let p = patterns();
        let token = p.token_at("\"a --b c\" d", 0).unwrap();
        assert_eq!(token.kind, TokenKind::Literal);
        assert_eq!(token.text, "a --b c");
        assert_eq!(token.end, 10);
    }

    #[test]
    fn test_literal_tolerates_stray_quotes() {
        let p = patterns();
        assert_eq!(p.literal_at("\"reason\"\"", 0).unwrap().text, "reason\"");
        assert_eq!(p.literal_at("\"\"reason\"", 0).unwrap().text, "\"reason");
        assert_eq!(p.literal_at("\"\"reason\"\"", 0).unwrap().text, "\"reason\"");
    }

    #[test]
    fn test_unclosed_literal_is_a_value() {
        let p = patterns();
        assert!(p.literal_at("\"reason\"s", 0).is_none());

        let token = p.token_at("\"reason\"s", 0).unwrap();
        assert_eq!(token.kind, TokenKind::Value);
        assert_eq!(token.text, "\"reason\"s");
    }

    #[test]
    fn test_custom_quote_pair() {
        let p = Patterns::compile(&Settings {
            quote: Quote::Pair("[(".into(), ")]".into()),
            ..Settings::default()
        });
        let token = p.token_at("[(This is the reason)]", 0).unwrap();
        assert_eq!(token.kind, TokenKind::Literal);
        assert_eq!(token.text, "This is the reason");
    }

    #[test]
    fn test_flag_name() {
        let p = patterns();
        let token = p.token_at("--delay 10", 0).unwrap();
        assert_eq!(token.kind, TokenKind::Flag);
        assert_eq!(token.text, "delay");
        assert_eq!(token.end, 8);
    }

    #[test]
    fn test_bare_flag_prefix_is_a_value() {
        let p = patterns();
        let token = p.token_at("-- x", 0).unwrap();
        assert_eq!(token.kind, TokenKind::Value);
        assert_eq!(token.text, "--");
    }

    #[test]
    fn test_skip_delimiters() {
        let p = comma_patterns();
        assert_eq!(p.skip_delimiters(", ,  x", 0), 5);
        assert_eq!(patterns().skip_delimiters("x", 0), 0);
    }

    #[test]
    fn test_marker_starting_with_whitespace() {
        let p = Patterns::compile(&Settings {
            delimiter: Some(" | ".to_string()),
            ..Settings::default()
        });
        assert_eq!(p.delimiter_at("a | b", 1), Some(4));
        assert_eq!(p.delimiter_at("a   |   b", 1), Some(8));
        assert_eq!(p.delimiter_at("a |b", 1), None);

        let base = p.base("!ban | member | reason").unwrap();
        assert_eq!(base.name, "ban");
        assert_eq!(base.rest, "member | reason");

        let tab = Patterns::compile(&Settings {
            delimiter: Some("\t".to_string()),
            ..Settings::default()
        });
        let base = tab.base("!ban\t\tsome member").unwrap();
        assert_eq!(base.name, "ban");
        assert_eq!(base.rest, "some member");
    }

    #[test]
    fn test_markers_are_literal_text() {
        let p = Patterns::compile(&Settings {
            prefix: ".*".to_string(),
            delimiter: Some("|".to_string()),
            flag_prefix: "$".to_string(),
            quote: Quote::Pair("(".into(), ")".into()),
        });

        let base = p.base(".*ban a | $delay|(x | y)").unwrap();
        assert_eq!(base.name, "ban a");

        let flag = p.token_at(base.rest, 0).unwrap();
        assert_eq!(flag.kind, TokenKind::Flag);
        assert_eq!(flag.text, "delay");

        let literal = p.token_at(base.rest, flag.end).unwrap();
        assert_eq!(literal.kind, TokenKind::Literal);
        assert_eq!(literal.text, "x | y");
        assert!(p.base("xxban").is_none());
    }
}
