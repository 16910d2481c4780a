//! Message templates.
//!
//! A template is plain text with `{field}` or `{field:.N}` placeholders naming
//! a [`SnapshotField`]; `{prev.field}` reads from the previous snapshot.
//! `{{` and `}}` are literal braces. Templates are parsed once, when a rule is
//! built, so rendering never fails: a value that is absent at render time is
//! written as `n/a`.

use std::fmt;

use crate::models::indicators::{IndicatorSnapshot, SnapshotField};
use crate::signals::error::TemplateError;

const MISSING: &str = "n/a";
const PREVIOUS_PREFIX: &str = "prev.";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Value {
        field: SnapshotField,
        previous: bool,
        precision: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedBrace(pos)),
                '{' => {
                    let mut spec = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        spec.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(&spec)?);
                }
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, current: &IndicatorSnapshot, previous: Option<&IndicatorSnapshot>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value {
                    field,
                    previous: from_previous,
                    precision,
                } => {
                    let snapshot = if *from_previous { previous } else { Some(current) };
                    match (snapshot.and_then(|s| s.get(*field)), precision) {
                        (Some(value), Some(precision)) => {
                            out.push_str(&format!("{:.*}", precision, value))
                        }
                        (Some(value), None) => out.push_str(&value.to_string()),
                        (None, _) => out.push_str(MISSING),
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_placeholder(spec: &str) -> Result<Segment, TemplateError> {
    let (name, precision) = match spec.split_once(':') {
        Some((name, format)) => {
            let digits = format
                .strip_prefix('.')
                .ok_or_else(|| TemplateError::InvalidPrecision(format.to_string()))?;
            let precision = digits
                .parse::<usize>()
                .map_err(|_| TemplateError::InvalidPrecision(format.to_string()))?;
            (name.trim(), Some(precision))
        }
        None => (spec.trim(), None),
    };

    let (name, previous) = match name.strip_prefix(PREVIOUS_PREFIX) {
        Some(rest) => (rest, true),
        None => (name, false),
    };
    let field = name
        .parse::<SnapshotField>()
        .map_err(|_| TemplateError::UnknownField(spec.to_string()))?;

    Ok(Segment::Value {
        field,
        previous,
        precision,
    })
}
