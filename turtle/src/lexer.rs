//! Lexical scanner for [Turtle](https://www.w3.org/TR/turtle/).

use crate::utils::*;
use rdfio_api::error::{TextPosition, TokenizerError};
use std::fmt;

/// The kinds of lexical tokens of the Turtle grammar.
///
/// Escape sequences are resolved: `IriRef`, `String` and `PrefixedName` hold the unescaped text.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TokenKind {
    /// `@prefix`
    PrefixDirective,
    /// `@base`
    BaseDirective,
    /// `PREFIX`, case-insensitive
    SparqlPrefix,
    /// `BASE`, case-insensitive
    SparqlBase,
    /// `<...>`, without the brackets
    IriRef(String),
    /// `prefix:local`. `local` is empty for a bare `prefix:`.
    PrefixedName { prefix: String, local: String },
    /// `_:label`, without the `_:`
    BlankNodeLabel(String),
    /// A short or long string, single or double quoted
    String(String),
    /// `@en-US`, without the `@`. Only produced right after a string.
    LangTag(String),
    /// `^^`
    DatatypeMarker,
    Integer(String),
    Decimal(String),
    Double(String),
    True,
    False,
    /// The `a` keyword
    A,
    Dot,
    Comma,
    Semicolon,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::PrefixDirective => f.write_str("'@prefix'"),
            TokenKind::BaseDirective => f.write_str("'@base'"),
            TokenKind::SparqlPrefix => f.write_str("'PREFIX'"),
            TokenKind::SparqlBase => f.write_str("'BASE'"),
            TokenKind::IriRef(iri) => write!(f, "IRI <{}>", iri),
            TokenKind::PrefixedName { prefix, local } => {
                write!(f, "prefixed name '{}:{}'", prefix, local)
            }
            TokenKind::BlankNodeLabel(label) => write!(f, "blank node '_:{}'", label),
            TokenKind::String(value) => write!(f, "string {:?}", value),
            TokenKind::LangTag(tag) => write!(f, "language tag '@{}'", tag),
            TokenKind::DatatypeMarker => f.write_str("'^^'"),
            TokenKind::Integer(value) | TokenKind::Decimal(value) | TokenKind::Double(value) => {
                write!(f, "number {}", value)
            }
            TokenKind::True => f.write_str("'true'"),
            TokenKind::False => f.write_str("'false'"),
            TokenKind::A => f.write_str("'a'"),
            TokenKind::Dot => f.write_str("'.'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::OpenBracket => f.write_str("'['"),
            TokenKind::CloseBracket => f.write_str("']'"),
            TokenKind::OpenParen => f.write_str("'('"),
            TokenKind::CloseParen => f.write_str("')'"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

/// A token with the position of its first char.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub position: TextPosition,
}

/// Splits a Turtle document into tokens.
///
/// Whitespace and comments are skipped. The last token is always [`TokenKind::Eof`].
///
/// ```
/// use rdfio_turtle::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("ex:s a \"v\"@en . # done")?;
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![
///     TokenKind::PrefixedName { prefix: "ex".into(), local: "s".into() },
///     TokenKind::A,
///     TokenKind::String("v".into()),
///     TokenKind::LangTag("en".into()),
///     TokenKind::Dot,
///     TokenKind::Eof,
/// ]);
/// # Result::<_, rdfio_api::error::TokenizerError>::Ok(())
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    let mut lexer = Lexer {
        read: LookAheadCharReader::new(input),
        after_string: false,
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = token.kind == TokenKind::Eof;
        lexer.after_string = matches!(token.kind, TokenKind::String(_));
        tokens.push(token);
        if is_eof {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    read: LookAheadCharReader<'a>,
    after_string: bool,
}

impl Lexer<'_> {
    fn next_token(&mut self) -> Result<Token, TokenizerError> {
        self.skip_whitespace();
        let position = self.read.position();
        let kind = match self.read.current() {
            None => TokenKind::Eof,
            Some('<') => TokenKind::IriRef(self.parse_iriref()?),
            Some('"') | Some('\'') => TokenKind::String(self.parse_string()?),
            Some('@') => self.parse_at_keyword()?,
            Some('^') => {
                self.read.consume();
                self.read.check_is_current('^')?;
                self.read.consume();
                TokenKind::DatatypeMarker
            }
            Some('_') if self.read.next() == Some(':') => {
                TokenKind::BlankNodeLabel(self.parse_blank_node_label()?)
            }
            Some('.') if matches!(self.read.next(), Some('0'..='9')) => {
                self.parse_numeric_literal()?
            }
            Some('0'..='9') | Some('+') | Some('-') => self.parse_numeric_literal()?,
            Some('.') => self.punctuation(TokenKind::Dot),
            Some(',') => self.punctuation(TokenKind::Comma),
            Some(';') => self.punctuation(TokenKind::Semicolon),
            Some('[') => self.punctuation(TokenKind::OpenBracket),
            Some(']') => self.punctuation(TokenKind::CloseBracket),
            Some('(') => self.punctuation(TokenKind::OpenParen),
            Some(')') => self.punctuation(TokenKind::CloseParen),
            Some(_) => self.parse_name_or_keyword()?,
        };
        Ok(Token { kind, position })
    }

    fn punctuation(&mut self, kind: TokenKind) -> TokenKind {
        self.read.consume();
        kind
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.read.current() {
                Some(' ') | Some('\t') | Some('\n') | Some('\r') => self.read.consume(),
                Some('#') => {
                    while !matches!(self.read.current(), Some('\r') | Some('\n') | None) {
                        self.read.consume();
                    }
                }
                _ => return,
            }
        }
    }

    fn parse_iriref(&mut self) -> Result<String, TokenizerError> {
        // [18] 	IRIREF 	::= 	'<' ([^#x00-#x20<>"{}|^`\] | UCHAR)* '>' /* #x00=NULL #01-#x1F=control codes #x20=space */
        let start = self.read.position();
        self.read.check_is_current('<')?;
        let mut buffer = String::new();
        loop {
            self.read.consume();
            match self.read.current() {
                Some('>') => {
                    self.read.consume();
                    return Ok(buffer);
                }
                None => {
                    return Err(TokenizerError::new("unterminated IRI", start));
                }
                Some('\\') => {
                    self.read.consume();
                    let c = match self.read.current() {
                        Some('u') => self.read_hexa_char(4)?,
                        Some('U') => self.read_hexa_char(8)?,
                        _ => return Err(self.read.error("invalid escape sequence in IRI")),
                    };
                    if is_forbidden_in_iri(c) {
                        return Err(self.read.error(format!(
                            "the character {:?} is not allowed in IRIs",
                            c
                        )));
                    }
                    buffer.push(c)
                }
                Some(c) if is_forbidden_in_iri(c) => {
                    return Err(self.read.error(format!(
                        "the character {:?} is not allowed in IRIs",
                        c
                    )));
                }
                Some(c) => buffer.push(c),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, TokenizerError> {
        let mut buffer = String::new();
        match self.read.current() {
            Some('"') => {
                if self.read.starts_with("\"\"\"") {
                    // [25] 	STRING_LITERAL_LONG_QUOTE 	::= 	'"""' (('"' | '""')? ([^"\] | ECHAR | UCHAR))* '"""'
                    self.parse_string_literal_long_quote_inner(&mut buffer, '"')?
                } else {
                    // [22] 	STRING_LITERAL_QUOTE 	::= 	'"' ([^#x22#x5C#xA#xD] | ECHAR | UCHAR)* '"' /* #x22=" #x5C=\ #xA=new line #xD=carriage return */
                    self.parse_string_literal_quote_inner(&mut buffer, '"')?
                }
            }
            Some('\'') => {
                if self.read.starts_with("'''") {
                    // [24] 	STRING_LITERAL_LONG_SINGLE_QUOTE 	::= 	"'''" (("'" | "''")? ([^'\] | ECHAR | UCHAR))* "'''"
                    self.parse_string_literal_long_quote_inner(&mut buffer, '\'')?
                } else {
                    // [23] 	STRING_LITERAL_SINGLE_QUOTE 	::= 	"'" ([^#x27#x5C#xA#xD] | ECHAR | UCHAR)* "'" /* #x27=' #x5C=\ #xA=new line #xD=carriage return */
                    self.parse_string_literal_quote_inner(&mut buffer, '\'')?
                }
            }
            _ => self.read.unexpected_char_error()?,
        }
        Ok(buffer)
    }

    fn parse_string_literal_quote_inner(
        &mut self,
        buffer: &mut String,
        quote: char,
    ) -> Result<(), TokenizerError> {
        let start = self.read.position();
        self.read.check_is_current(quote)?;
        loop {
            self.read.consume();
            match self.read.current() {
                Some(c) if c == quote => {
                    self.read.consume();
                    return Ok(());
                }
                Some('\\') => self.parse_echar_or_uchar(buffer)?,
                Some('\n') | Some('\r') | None => {
                    return Err(TokenizerError::new("unterminated string", start))
                }
                Some(c) => buffer.push(c),
            }
        }
    }

    fn parse_string_literal_long_quote_inner(
        &mut self,
        buffer: &mut String,
        quote: char,
    ) -> Result<(), TokenizerError> {
        let start = self.read.position();
        let delimiter: String = [quote; 3].iter().collect();
        self.read.consume_many(2);
        loop {
            self.read.consume();
            match self.read.current() {
                Some(c) if c == quote && self.read.starts_with(&delimiter) => {
                    self.read.consume_many(3);
                    return Ok(());
                }
                Some('\\') => self.parse_echar_or_uchar(buffer)?,
                Some(c) => buffer.push(c),
                None => return Err(TokenizerError::new("unterminated long string", start)),
            }
        }
    }

    fn parse_echar_or_uchar(&mut self, buffer: &mut String) -> Result<(), TokenizerError> {
        // [159s] 	ECHAR 	::= 	'\' [tbnrf"'\]
        self.read.check_is_current('\\')?;
        self.read.consume();
        match self.read.current() {
            Some('t') => buffer.push('\t'),
            Some('b') => buffer.push('\u{8}'),
            Some('n') => buffer.push('\n'),
            Some('r') => buffer.push('\r'),
            Some('f') => buffer.push('\u{C}'),
            Some('"') => buffer.push('"'),
            Some('\'') => buffer.push('\''),
            Some('\\') => buffer.push('\\'),
            Some('u') => buffer.push(self.read_hexa_char(4)?),
            Some('U') => buffer.push(self.read_hexa_char(8)?),
            _ => return Err(self.read.error("invalid escape sequence")),
        }
        Ok(())
    }

    fn read_hexa_char(&mut self, len: usize) -> Result<char, TokenizerError> {
        // [26] 	UCHAR 	::= 	'\u' HEX HEX HEX HEX | '\U' HEX HEX HEX HEX HEX HEX HEX HEX
        let start = self.read.position();
        let mut point = 0;
        for _ in 0..len {
            self.read.consume();
            match self.read.current().and_then(|c| c.to_digit(16)) {
                Some(d) => point = point * 16 + d,
                None => return Err(self.read.error("invalid escape sequence")),
            }
        }
        char::from_u32(point).ok_or_else(|| {
            TokenizerError::new(format!("invalid unicode code point U+{:X}", point), start)
        })
    }

    fn parse_at_keyword(&mut self) -> Result<TokenKind, TokenizerError> {
        if self.after_string {
            return Ok(TokenKind::LangTag(self.parse_langtag()?));
        }
        if self.read.starts_with("@prefix") && !self.is_name_char_at(7) {
            self.read.consume_many(7);
            Ok(TokenKind::PrefixDirective)
        } else if self.read.starts_with("@base") && !self.is_name_char_at(5) {
            self.read.consume_many(5);
            Ok(TokenKind::BaseDirective)
        } else {
            Err(self
                .read
                .error("'@' is only allowed in '@prefix', '@base' and after a string"))
        }
    }

    fn parse_langtag(&mut self) -> Result<String, TokenizerError> {
        // [144s] 	LANGTAG 	::= 	'@' [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
        self.read.check_is_current('@')?;
        self.read.consume();
        let mut buffer = String::new();
        match self.read.current() {
            Some(c) if c.is_ascii_alphabetic() => buffer.push(c),
            _ => return Err(self.read.error("invalid language tag")),
        }
        loop {
            self.read.consume();
            match self.read.current() {
                Some(c) if c.is_ascii_alphabetic() => buffer.push(c),
                Some('-') => break,
                _ => return Ok(buffer),
            }
        }
        loop {
            match self.read.current() {
                Some(c) if c.is_ascii_alphanumeric() => buffer.push(c),
                Some('-') if matches!(self.read.next(), Some(n) if n.is_ascii_alphanumeric()) => {
                    buffer.push('-')
                }
                _ => return Ok(buffer),
            }
            self.read.consume();
        }
    }

    fn parse_blank_node_label(&mut self) -> Result<String, TokenizerError> {
        // [141s] 	BLANK_NODE_LABEL 	::= 	'_:' (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?
        self.read.check_is_current('_')?;
        self.read.consume();
        self.read.check_is_current(':')?;
        self.read.consume();

        let mut buffer = String::new();
        match self.read.current() {
            Some(c) if is_possible_pn_chars_u(c) || c.is_ascii_digit() => buffer.push(c),
            _ => return Err(self.read.error("invalid blank node label")),
        }
        loop {
            self.read.consume();
            match self.read.current() {
                Some('.') => match self.read.next() {
                    Some(c) if is_possible_pn_chars(c) || c == '.' => buffer.push('.'),
                    _ => return Ok(buffer),
                },
                Some(c) if is_possible_pn_chars(c) => buffer.push(c),
                _ => return Ok(buffer),
            }
        }
    }

    fn parse_numeric_literal(&mut self) -> Result<TokenKind, TokenizerError> {
        // [16] 	NumericLiteral 	::= 	INTEGER | DECIMAL | DOUBLE
        // [19] 	INTEGER 	::= 	[+-]? [0-9]+
        // [20] 	DECIMAL 	::= 	[+-]? [0-9]* '.' [0-9]+
        // [21] 	DOUBLE 	::= 	[+-]? ([0-9]+ '.' [0-9]* EXPONENT | '.' [0-9]+ EXPONENT | [0-9]+ EXPONENT)
        // merged [+-] [0-9]* ('.' [0-9]*)? EXPONENT?
        let mut buffer = String::new();
        if let Some(c @ ('+' | '-')) = self.read.current() {
            buffer.push(c);
            self.read.consume();
        }

        let mut count_before: usize = 0;
        while let Some(c @ '0'..='9') = self.read.current() {
            buffer.push(c);
            self.read.consume();
            count_before += 1;
        }

        let count_after = if self.read.current() == Some('.')
            && matches!(self.read.next(), Some('0'..='9' | 'e' | 'E'))
        {
            buffer.push('.');
            self.read.consume();
            let mut count_after = 0;
            while let Some(c @ '0'..='9') = self.read.current() {
                buffer.push(c);
                self.read.consume();
                count_after += 1;
            }
            Some(count_after)
        } else {
            None
        };

        match self.read.current() {
            Some('e') | Some('E') if count_before > 0 || count_after.unwrap_or(0) > 0 => {
                self.parse_exponent(&mut buffer)?;
                Ok(TokenKind::Double(buffer))
            }
            _ => match count_after {
                None if count_before > 0 => Ok(TokenKind::Integer(buffer)),
                Some(count_after) if count_after > 0 => Ok(TokenKind::Decimal(buffer)),
                _ => Err(self.read.error("invalid numeric literal")),
            },
        }
    }

    fn parse_exponent(&mut self, buffer: &mut String) -> Result<(), TokenizerError> {
        // [154s] 	EXPONENT 	::= 	[eE] [+-]? [0-9]+
        match self.read.current() {
            Some(c @ ('e' | 'E')) => buffer.push(c),
            _ => self.read.unexpected_char_error()?,
        }
        self.read.consume();
        if let Some(c @ ('+' | '-')) = self.read.current() {
            buffer.push(c);
            self.read.consume();
        }
        match self.read.current() {
            Some(c @ '0'..='9') => buffer.push(c),
            _ => return Err(self.read.error("invalid exponent in numeric literal")),
        }
        self.read.consume();
        while let Some(c @ '0'..='9') = self.read.current() {
            buffer.push(c);
            self.read.consume();
        }
        Ok(())
    }

    fn parse_name_or_keyword(&mut self) -> Result<TokenKind, TokenizerError> {
        // [136s] 	PrefixedName 	::= 	PNAME_LN | PNAME_NS
        // [139s] 	PNAME_NS 	::= 	PN_PREFIX? ':'
        let start = self.read.position();
        let prefix = self.parse_pn_prefix()?;
        if self.read.current() == Some(':') {
            self.read.consume();
            let local = self.parse_pn_local()?;
            return Ok(TokenKind::PrefixedName { prefix, local });
        }
        match prefix.as_str() {
            "a" => Ok(TokenKind::A),
            "true" => Ok(TokenKind::True),
            "false" => Ok(TokenKind::False),
            p if p.eq_ignore_ascii_case("PREFIX") => Ok(TokenKind::SparqlPrefix),
            p if p.eq_ignore_ascii_case("BASE") => Ok(TokenKind::SparqlBase),
            "" => self.read.unexpected_char_error(),
            _ => Err(TokenizerError::new(
                format!("unexpected name '{}', a ':' is missing", prefix),
                start,
            )),
        }
    }

    fn parse_pn_prefix(&mut self) -> Result<String, TokenizerError> {
        // [167s] 	PN_PREFIX 	::= 	PN_CHARS_BASE ((PN_CHARS | '.')* PN_CHARS)?
        let mut buffer = String::new();
        match self.read.current() {
            Some(c) if is_possible_pn_chars_base(c) => buffer.push(c),
            _ => return Ok(buffer), //PN_PREFIX is always optional
        }
        loop {
            self.read.consume();
            match self.read.current() {
                Some('.') => match self.read.next() {
                    Some(c) if is_possible_pn_chars(c) || c == '.' => buffer.push('.'),
                    _ => return Ok(buffer),
                },
                Some(c) if is_possible_pn_chars(c) => buffer.push(c),
                _ => return Ok(buffer),
            }
        }
    }

    fn parse_pn_local(&mut self) -> Result<String, TokenizerError> {
        // [168s] 	PN_LOCAL 	::= 	(PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
        let mut buffer = String::new();
        match self.read.current() {
            Some('\\') => self.parse_pn_local_esc(&mut buffer)?,
            Some('%') => self.parse_percent(&mut buffer)?,
            Some(c) if is_possible_pn_chars_u(c) || c == ':' || c.is_ascii_digit() => {
                buffer.push(c)
            }
            _ => return Ok(buffer),
        }
        loop {
            self.read.consume();
            match self.read.current() {
                Some('.') => {
                    if self.has_future_char_valid_pname_local() {
                        buffer.push('.')
                    } else {
                        return Ok(buffer);
                    }
                }
                Some('\\') => self.parse_pn_local_esc(&mut buffer)?,
                Some('%') => self.parse_percent(&mut buffer)?,
                Some(c) if is_possible_pn_chars(c) || c == ':' => buffer.push(c),
                _ => return Ok(buffer),
            }
        }
    }

    fn has_future_char_valid_pname_local(&self) -> bool {
        let mut i = 1;
        loop {
            match self.read.ahead(i) {
                Some(':') | Some('%') | Some('\\') => return true,
                Some(c) if is_possible_pn_chars(c) => return true,
                Some('.') => (),
                _ => return false,
            }
            i += 1;
        }
    }

    fn parse_pn_local_esc(&mut self, buffer: &mut String) -> Result<(), TokenizerError> {
        self.read.check_is_current('\\')?;
        self.read.consume();
        match self.read.current() {
            Some(c) if is_pn_local_escapable(c) => {
                buffer.push(c);
                Ok(())
            }
            _ => Err(self.read.error("invalid escape sequence in local name")),
        }
    }

    fn parse_percent(&mut self, buffer: &mut String) -> Result<(), TokenizerError> {
        // [170s] 	PERCENT 	::= 	'%' HEX HEX
        self.read.check_is_current('%')?;
        buffer.push('%');
        for _ in 0..2 {
            self.read.consume();
            match self.read.current() {
                Some(c) if c.is_ascii_hexdigit() => buffer.push(c),
                _ => return Err(self.read.error("invalid percent encoding in local name")),
            }
        }
        Ok(())
    }

    fn is_name_char_at(&self, count: usize) -> bool {
        matches!(self.read.ahead(count), Some(c) if is_possible_pn_chars(c) || c == ':')
    }
}

fn is_forbidden_in_iri(c: char) -> bool {
    matches!(
        c,
        '\0'..=' ' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn error_position(input: &str) -> TextPosition {
        tokenize(input).unwrap_err().position()
    }

    #[test]
    fn directives() {
        assert_eq!(
            kinds("@prefix ex: <http://example.org/> .\nprefix foo: <x> Base <y> @base <z> ."),
            vec![
                TokenKind::PrefixDirective,
                TokenKind::PrefixedName {
                    prefix: "ex".into(),
                    local: "".into()
                },
                TokenKind::IriRef("http://example.org/".into()),
                TokenKind::Dot,
                TokenKind::SparqlPrefix,
                TokenKind::PrefixedName {
                    prefix: "foo".into(),
                    local: "".into()
                },
                TokenKind::IriRef("x".into()),
                TokenKind::SparqlBase,
                TokenKind::IriRef("y".into()),
                TokenKind::BaseDirective,
                TokenKind::IriRef("z".into()),
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = tokenize("<a>\n  <b> .").unwrap();
        assert_eq!(tokens[0].position, TextPosition::new(1, 1));
        assert_eq!(tokens[1].position, TextPosition::new(2, 3));
        assert_eq!(tokens[2].position, TextPosition::new(2, 7));
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(
            kinds("# header\n<a>#inline\n\t<b>\r\n# end"),
            vec![
                TokenKind::IriRef("a".into()),
                TokenKind::IriRef("b".into()),
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn strings_with_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n" 'cé' """multi
"line""" '''x'''"#),
            vec![
                TokenKind::String("a\"b\n".into()),
                TokenKind::String("cé".into()),
                TokenKind::String("multi\n\"line".into()),
                TokenKind::String("x".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn literal_annotations() {
        assert_eq!(
            kinds("\"chat\"@fr-BE \"1\"^^xsd:integer"),
            vec![
                TokenKind::String("chat".into()),
                TokenKind::LangTag("fr-BE".into()),
                TokenKind::String("1".into()),
                TokenKind::DatatypeMarker,
                TokenKind::PrefixedName {
                    prefix: "xsd".into(),
                    local: "integer".into()
                },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn numbers_and_booleans() {
        assert_eq!(
            kinds("1 -2.5 .5 1e3 +4.0E-2 true false 3."),
            vec![
                TokenKind::Integer("1".into()),
                TokenKind::Decimal("-2.5".into()),
                TokenKind::Decimal(".5".into()),
                TokenKind::Double("1e3".into()),
                TokenKind::Double("+4.0E-2".into()),
                TokenKind::True,
                TokenKind::False,
                TokenKind::Integer("3".into()),
                TokenKind::Dot,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn names_and_punctuation() {
        assert_eq!(
            kinds("[ a :b ; ex:c\\-d _:x.y , ( ex:e.f ) ] ."),
            vec![
                TokenKind::OpenBracket,
                TokenKind::A,
                TokenKind::PrefixedName {
                    prefix: "".into(),
                    local: "b".into()
                },
                TokenKind::Semicolon,
                TokenKind::PrefixedName {
                    prefix: "ex".into(),
                    local: "c-d".into()
                },
                TokenKind::BlankNodeLabel("x.y".into()),
                TokenKind::Comma,
                TokenKind::OpenParen,
                TokenKind::PrefixedName {
                    prefix: "ex".into(),
                    local: "e.f".into()
                },
                TokenKind::CloseParen,
                TokenKind::CloseBracket,
                TokenKind::Dot,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn percent_encodings_are_kept() {
        assert_eq!(
            kinds("ex:a%20b"),
            vec![
                TokenKind::PrefixedName {
                    prefix: "ex".into(),
                    local: "a%20b".into()
                },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn unterminated_tokens() {
        assert_eq!(error_position("<a> \"abc"), TextPosition::new(1, 5));
        assert_eq!(error_position("\n<http://example.org/"), TextPosition::new(2, 1));
        assert_eq!(error_position("'''abc''"), TextPosition::new(1, 1));
        assert!(tokenize("\"abc\ndef\"").is_err());
    }

    #[test]
    fn invalid_escapes() {
        assert!(tokenize(r#""\q""#).is_err());
        assert!(tokenize(r#""\u12""#).is_err());
        assert!(tokenize(r#""\uD800""#).is_err());
        assert!(tokenize(r"<a b>").is_err());
        assert!(tokenize(r"ex:a\b").is_err());
    }

    #[test]
    fn forbidden_characters() {
        assert!(tokenize("<a b>").is_err());
        assert!(tokenize("<a{b>").is_err());
        assert!(tokenize("@foo").is_err());
        assert!(tokenize("name").is_err());
        assert!(tokenize("ex:a ^ ex:b").is_err());
        assert!(tokenize("{").is_err());
    }
}
