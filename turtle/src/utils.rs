use rdfio_api::error::{TextPosition, TokenizerError};

/// Reads a string char by char with look-ahead, tracking the line and column of the current char.
pub struct LookAheadCharReader<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> LookAheadCharReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current char or `None` if the input is finished
    pub fn current(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// Returns the next char if available
    pub fn next(&self) -> Option<char> {
        self.ahead(1)
    }

    /// Returns a future char if available
    pub fn ahead(&self, count: usize) -> Option<char> {
        self.input[self.offset..].chars().nth(count)
    }

    /// Consumes the current char and moves to the next one
    pub fn consume(&mut self) {
        if let Some(c) = self.current() {
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes many chars and moves to the next one
    pub fn consume_many(&mut self, count: usize) {
        for _ in 0..count {
            self.consume()
        }
    }

    /// Returns if the remaining input starts with a given string
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.offset..].starts_with(prefix)
    }

    pub fn position(&self) -> TextPosition {
        TextPosition::new(self.line, self.column)
    }

    pub fn unexpected_char_error<T>(&self) -> Result<T, TokenizerError> {
        Err(match self.current() {
            Some(c) => self.error(format!("unexpected character '{}'", c.escape_debug())),
            None => self.error("premature end of file"),
        })
    }

    pub fn check_is_current(&self, expected: char) -> Result<(), TokenizerError> {
        if self.current() == Some(expected) {
            Ok(())
        } else {
            self.unexpected_char_error()
        }
    }

    pub fn error(&self, message: impl Into<String>) -> TokenizerError {
        TokenizerError::new(message, self.position())
    }
}

// [157s] 	PN_CHARS_BASE 	::= 	[A-Z] | [a-z] | [#x00C0-#x00D6] | [#x00D8-#x00F6] | [#x00F8-#x02FF] | [#x0370-#x037D] | [#x037F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
pub fn is_possible_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// [158s] 	PN_CHARS_U 	::= 	PN_CHARS_BASE | '_'
pub fn is_possible_pn_chars_u(c: char) -> bool {
    is_possible_pn_chars_base(c) || c == '_'
}

// [160s] 	PN_CHARS 	::= 	PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
pub fn is_possible_pn_chars(c: char) -> bool {
    is_possible_pn_chars_u(c)
        || matches!(c,
            '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

// [172s] 	PN_LOCAL_ESC 	::= 	'\' ('_' | '~' | '.' | '-' | '!' | '$' | '&' | "'" | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '/' | '?' | '#' | '@' | '%')
pub fn is_pn_local_escapable(c: char) -> bool {
    matches!(
        c,
        '_' | '~'
            | '.'
            | '-'
            | '!'
            | '$'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | ';'
            | '='
            | '/'
            | '?'
            | '#'
            | '@'
            | '%'
    )
}

/// Can `local` be written after `prefix:` without any escape?
///
/// The check is stricter than PN_LOCAL: escapes and percent encodings are never produced.
pub fn is_writable_pn_local(local: &str) -> bool {
    // [168s] 	PN_LOCAL 	::= 	(PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
    let mut chars = local.chars();
    match chars.next() {
        None => return true,
        Some(c) if is_possible_pn_chars_u(c) || c == ':' || c.is_ascii_digit() => (),
        Some(_) => return false,
    }
    if local.ends_with('.') {
        return false;
    }
    chars.all(|c| is_possible_pn_chars(c) || c == '.' || c == ':')
}

/// Can `prefix` be declared with `@prefix`?
pub fn is_writable_pn_prefix(prefix: &str) -> bool {
    // [167s] 	PN_PREFIX 	::= 	PN_CHARS_BASE ((PN_CHARS | '.')* PN_CHARS)?
    let mut chars = prefix.chars();
    match chars.next() {
        None => return true,
        Some(c) if is_possible_pn_chars_base(c) => (),
        Some(_) => return false,
    }
    !prefix.ends_with('.') && chars.all(|c| is_possible_pn_chars(c) || c == '.')
}
