//! Word splitting for shell lines
//!
//! A line is a sequence of whitespace-separated words. Each word is one of:
//!
//! - a bare word, taken literally up to the next whitespace
//! - `"..."`, taken literally (no escapes, no substitution inside)
//! - `$name`, the value of a variable
//! - `[...]`, the result of the nested command line
//!
//! Brackets nest, and a `]` inside a quoted string does not close a bracket.

use crate::error::HostError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    Literal(String),
    Var(String),
    Command(Vec<Word>),
}

/// Split a line into words
pub fn parse_line(line: &str) -> Result<Vec<Word>, HostError> {
    let mut words = Vec::new();
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        let (word, tail) = parse_word(rest)?;
        words.push(word);
        rest = tail.trim_start();
    }
    Ok(words)
}

fn parse_word(input: &str) -> Result<(Word, &str), HostError> {
    if let Some(body) = input.strip_prefix('"') {
        let end = body
            .find('"')
            .ok_or_else(|| HostError::Syntax("missing \"".to_string()))?;
        let tail = expect_separator(&body[end + 1..], "close-quote")?;
        Ok((Word::Literal(body[..end].to_string()), tail))
    } else if let Some(body) = input.strip_prefix('[') {
        let end = matching_bracket(body)?;
        let inner = parse_line(&body[..end])?;
        let tail = expect_separator(&body[end + 1..], "close-bracket")?;
        Ok((Word::Command(inner), tail))
    } else if let Some(body) = input.strip_prefix('$') {
        let (name, tail) = split_bare(body);
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            let message = format!("invalid variable reference \"${}\"", name);
            return Err(HostError::Syntax(message));
        }
        Ok((Word::Var(name.to_string()), tail))
    } else {
        let (text, tail) = split_bare(input);
        Ok((Word::Literal(text.to_string()), tail))
    }
}

fn split_bare(input: &str) -> (&str, &str) {
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    input.split_at(end)
}

fn expect_separator<'a>(tail: &'a str, after: &str) -> Result<&'a str, HostError> {
    match tail.chars().next() {
        None => Ok(tail),
        Some(c) if c.is_whitespace() => Ok(tail),
        Some(_) => Err(HostError::Syntax(format!("extra characters after {}", after))),
    }
}

/// Byte offset of the `]` closing a bracket whose `[` has been consumed
fn matching_bracket(body: &str) -> Result<usize, HostError> {
    let mut depth = 0usize;
    let mut in_quote = false;
    for (i, c) in body.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '[' if !in_quote => depth += 1,
            ']' if !in_quote => {
                if depth == 0 {
                    return Ok(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Err(HostError::Syntax("missing close-bracket".to_string()))
}
