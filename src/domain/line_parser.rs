//! Line grammar for parameter files.
//!
//! A single-pass state machine that classifies one line as a `key = value`
//! statement, a blank/comment-only line, or a malformed line. Everything from
//! the first `#` to the end of the line is captured as the comment.

/// Classification of a scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Statement,
    NoStatement,
    Malformed,
}

/// Result of scanning one line.
///
/// `key` and `value` are non-empty exactly when `status` is
/// [`LineStatus::Statement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub key: String,
    pub value: String,
    pub comment: String,
    pub status: LineStatus,
}

impl ParsedLine {
    pub fn is_statement(&self) -> bool {
        self.status == LineStatus::Statement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Variable,
    Equals,
    Value,
    End,
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '='
}

/// Scan `line` (without its trailing newline) and classify it.
pub fn parse(line: &str) -> ParsedLine {
    let mut state = State::Start;
    let mut key = String::new();
    let mut value = String::new();
    let mut comment = String::new();

    for (idx, ch) in line.char_indices() {
        if ch == '#' {
            comment.push_str(&line[idx..]);
            break;
        }

        match state {
            State::Start => {
                if !ch.is_whitespace() {
                    key.push(ch);
                    state = State::Variable;
                }
            }
            State::Variable => {
                if is_separator(ch) {
                    state = State::Equals;
                } else {
                    key.push(ch);
                }
            }
            State::Equals => {
                if !is_separator(ch) {
                    value.push(ch);
                    state = State::Value;
                }
            }
            State::Value => {
                if ch == '=' {
                    return malformed(comment);
                } else if ch.is_whitespace() {
                    state = State::End;
                } else {
                    value.push(ch);
                }
            }
            State::End => {
                if !ch.is_whitespace() {
                    return malformed(comment);
                }
            }
        }
    }

    match state {
        State::Value | State::End => ParsedLine {
            key,
            value,
            comment,
            status: LineStatus::Statement,
        },
        State::Start => ParsedLine {
            key: String::new(),
            value: String::new(),
            comment,
            status: LineStatus::NoStatement,
        },
        State::Variable | State::Equals => malformed(comment),
    }
}

/// Scan a raw line that may not be valid UTF-8.
///
/// Undecodable bytes are tolerated in comments. A statement whose key or value
/// contains them is malformed.
pub fn parse_bytes(line: &[u8]) -> ParsedLine {
    if let Ok(text) = std::str::from_utf8(line) {
        return parse(text);
    }
    let text = String::from_utf8_lossy(line);
    let parsed = parse(&text);
    let garbled = |s: &str| s.contains(char::REPLACEMENT_CHARACTER);
    if parsed.is_statement() && (garbled(&parsed.key) || garbled(&parsed.value)) {
        return malformed(parsed.comment);
    }
    parsed
}

fn malformed(comment: String) -> ParsedLine {
    ParsedLine {
        key: String::new(),
        value: String::new(),
        comment,
        status: LineStatus::Malformed,
    }
}

/// Whether `key` can be written and read back as a statement key.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(|c| is_separator(c) || c == '#')
}

/// Whether `value` can be written and read back as a statement value.
pub fn is_valid_value(value: &str) -> bool {
    is_valid_key(value)
}
