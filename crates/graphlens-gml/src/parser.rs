//! GML grammar using winnow.
//!
//! A document is a list of `key value` pairs. A value is an integer, a real,
//! a quoted string or a `[ ... ]` block holding another list. `#` starts a
//! comment that runs to the end of the line.

use winnow::{
    combinator::{alt, cut_err, eof, fail, not, opt, peek, preceded, repeat, terminated},
    error::{ContextError, StrContext},
    prelude::*,
    token::{one_of, take_till, take_while},
};

use crate::error::{Error, Result};
use crate::escape::unescape;
use crate::value::{Attributes, Value};

/// Maximum nesting depth of `[ ... ]` blocks.
///
/// Graph files nest three levels deep in practice; the limit only guards the
/// recursive descent against hostile input.
pub(crate) const MAX_DEPTH: usize = 64;

/// Parses a whole document into an untyped key/value tree.
pub(crate) fn parse_document(text: &str) -> Result<Attributes> {
    document
        .parse(text)
        .map_err(|e| syntax_error(text, e.offset(), e.inner()))
}

/// Turns a winnow failure into a line-tracked [`Error::Syntax`].
fn syntax_error(text: &str, offset: usize, error: &ContextError) -> Error {
    let (before, rest) = text.split_at(offset.min(text.len()));
    let line = before.matches('\n').count() + 1;
    let what = error
        .context()
        .find_map(|c| match c {
            StrContext::Label(label) => Some(*label),
            _ => None,
        })
        .unwrap_or("unexpected input");
    Error::syntax(line, format!("{what}, found {}", describe_found(rest)))
}

/// Short description of the text at an error position.
fn describe_found(rest: &str) -> String {
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '[' || c == ']')
        .unwrap_or(rest.len());
    match rest.chars().next() {
        None => "end of input".to_string(),
        Some(c) if end == 0 => format!("'{c}'"),
        Some(_) => format!("'{}'", &rest[..end]),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Top level: pairs up to end of input.
fn document(input: &mut &str) -> PResult<Attributes> {
    let attrs = entries(input, 0)?;
    let _: () = trivia.parse_next(input)?;
    if input.starts_with(']') {
        return cut_err(fail)
            .context(StrContext::Label("unmatched bracket"))
            .parse_next(input);
    }
    let _: &str = cut_err(eof)
        .context(StrContext::Label("expected a key"))
        .parse_next(input)?;
    Ok(attrs)
}

/// Skip whitespace and comments.
fn trivia(input: &mut &str) -> PResult<()> {
    repeat(
        0..,
        alt((
            take_while(1.., char::is_whitespace).void(),
            ('#', take_till(0.., '\n')).void(),
        )),
    )
    .parse_next(input)
}

/// Zero or more `key value` pairs. Repeated keys are kept in order.
fn entries(input: &mut &str, depth: usize) -> PResult<Attributes> {
    let pairs: Vec<(String, Value)> =
        repeat(0.., |i: &mut &str| entry(i, depth)).parse_next(input)?;
    Ok(pairs.into_iter().collect())
}

/// One pair. Once a key is read, a missing value is a hard error.
fn entry(input: &mut &str, depth: usize) -> PResult<(String, Value)> {
    let _: () = trivia.parse_next(input)?;
    let key = key.parse_next(input)?;
    let _: () = trivia.parse_next(input)?;
    let parsed = cut_err(|i: &mut &str| value(i, depth))
        .context(StrContext::Label("expected a value"))
        .parse_next(input)?;
    Ok((key.to_string(), parsed))
}

/// A key: ASCII letters, digits and `_`, not starting with a digit.
fn key<'i>(input: &mut &'i str) -> PResult<&'i str> {
    take_while(1.., is_word_char)
        .verify(|k: &str| !k.starts_with(|c: char| c.is_ascii_digit()))
        .parse_next(input)
}

fn value(input: &mut &str, depth: usize) -> PResult<Value> {
    alt((
        special_float.map(Value::Float),
        string.map(Value::Str),
        number,
        (|i: &mut &str| block(i, depth + 1)).map(Value::List),
    ))
    .parse_next(input)
}

/// `[ pairs ]`.
fn block(input: &mut &str, depth: usize) -> PResult<Attributes> {
    let _: char = '['.parse_next(input)?;
    if depth > MAX_DEPTH {
        return cut_err(fail)
            .context(StrContext::Label("block nesting limit exceeded"))
            .parse_next(input);
    }
    let attrs = entries(input, depth)?;
    let _: () = trivia.parse_next(input)?;
    let _: char = cut_err(']')
        .context(StrContext::Label("expected a key or ']'"))
        .parse_next(input)?;
    Ok(attrs)
}

/// `INF`, `NAN` and their signed forms, as networkx writes them.
fn special_float(input: &mut &str) -> PResult<f64> {
    terminated(
        alt((
            "-INF".value(f64::NEG_INFINITY),
            alt(("+INF", "INF")).value(f64::INFINITY),
            alt(("-NAN", "+NAN", "NAN")).value(f64::NAN),
        )),
        not(one_of(is_word_char)),
    )
    .parse_next(input)
}

/// A double-quoted string with HTML entities decoded.
fn string(input: &mut &str) -> PResult<String> {
    let start = *input;
    let body: &str = preceded('"', take_till(0.., '"')).parse_next(input)?;
    if opt('"').parse_next(input)?.is_none() {
        *input = start;
        return cut_err(fail)
            .context(StrContext::Label("unterminated string literal"))
            .parse_next(input);
    }
    Ok(unescape(body))
}

/// An integer, or a real when a `.` or exponent is present.
fn number(input: &mut &str) -> PResult<Value> {
    let start = *input;
    let text: &str = preceded(
        peek(one_of(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))),
        take_while(1.., |c: char| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
        }),
    )
    .parse_next(input)?;

    let parsed = if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        text.parse().ok().map(Value::Float)
    } else {
        text.parse().ok().map(Value::Int)
    };
    if let Some(value) = parsed {
        return Ok(value);
    }
    *input = start;
    cut_err(fail)
        .context(StrContext::Label("invalid or out-of-range number"))
        .parse_next(input)
}
