//! Label template language for tooltip and grid formatting.
//!
//! Syntax: literal text with `{{ value | transform | transform }}`
//! placeholders. `value` is the only source. Templates are interpreted, never
//! compiled to code.
//!
//! | Transform   | Effect                          |
//! |-------------|---------------------------------|
//! | `fixed(n)`  | render with `n` decimals        |
//! | `round`     | round half away from zero       |
//! | `floor`     | round down                      |
//! | `ceil`      | round up                        |
//! | `abs`       | absolute value                  |
//! | `scale(k)`  | multiply by `k`                 |
//! | `offset(k)` | add `k`                         |

use rangeslider_core::Formatter;
use std::fmt;
use thiserror::Error;

/// Largest decimal count `fixed(n)` accepts.
pub const MAX_FIXED_DECIMALS: usize = 20;

/// A transform applied to the value inside a placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Render with a fixed number of decimals: `fixed(n)`
    Fixed(usize),
    /// Round half away from zero
    Round,
    /// Round down
    Floor,
    /// Round up
    Ceil,
    /// Absolute value
    Abs,
    /// Multiply: `scale(k)`
    Scale(f64),
    /// Add: `offset(k)`
    Offset(f64),
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text copied verbatim
    Literal(String),
    /// The value after a chain of transforms
    Value(Vec<Transform>),
}

/// Parsed label template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Template text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed pieces.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render a value.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Value(transforms) => render_value(value, transforms),
            })
            .collect()
    }
}

impl Formatter for Template {
    fn format(&self, value: f64) -> String {
        self.render(value)
    }
}

fn render_value(value: f64, transforms: &[Transform]) -> String {
    let mut value = value;
    let mut decimals = None;
    for transform in transforms {
        match *transform {
            Transform::Fixed(n) => decimals = Some(n),
            Transform::Round => value = value.round(),
            Transform::Floor => value = value.floor(),
            Transform::Ceil => value = value.ceil(),
            Transform::Abs => value = value.abs(),
            Transform::Scale(k) => value *= k,
            Transform::Offset(k) => value += k,
        }
    }
    match decimals {
        Some(n) => format!("{value:.n$}"),
        None => value.to_string(),
    }
}

/// Template parser.
#[derive(Debug, Default)]
pub struct TemplateParser;

impl TemplateParser {
    /// Create a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder is malformed.
    pub fn parse(&self, input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = input;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or(TemplateError::UnterminatedPlaceholder)?;
            segments.push(Segment::Value(
                self.parse_placeholder(&after_open[..close])?,
            ));
            rest = &after_open[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Template {
            source: input.to_string(),
            segments,
        })
    }

    fn parse_placeholder(&self, inner: &str) -> Result<Vec<Transform>, TemplateError> {
        let mut parts = inner.split('|').map(str::trim);

        match parts.next() {
            None | Some("") => return Err(TemplateError::EmptyPlaceholder),
            Some("value") => {}
            Some(other) => return Err(TemplateError::UnknownSource(other.to_string())),
        }

        parts.map(|part| self.parse_transform(part)).collect()
    }

    fn parse_transform(&self, input: &str) -> Result<Transform, TemplateError> {
        // Check for function call: name(args)
        if let Some(paren_pos) = input.find('(') {
            let name = input[..paren_pos].trim();
            let args = input[paren_pos + 1..]
                .strip_suffix(')')
                .ok_or_else(|| TemplateError::InvalidArgument(name.to_string()))?
                .trim();

            match name {
                "fixed" => args
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n <= MAX_FIXED_DECIMALS)
                    .map(Transform::Fixed)
                    .ok_or_else(|| TemplateError::InvalidArgument("fixed".to_string())),
                "scale" => self.parse_number("scale", args).map(Transform::Scale),
                "offset" => self.parse_number("offset", args).map(Transform::Offset),
                _ => Err(TemplateError::UnknownTransform(name.to_string())),
            }
        } else {
            match input {
                "round" => Ok(Transform::Round),
                "floor" => Ok(Transform::Floor),
                "ceil" => Ok(Transform::Ceil),
                "abs" => Ok(Transform::Abs),
                _ => Err(TemplateError::UnknownTransform(input.to_string())),
            }
        }
    }

    fn parse_number(&self, name: &str, args: &str) -> Result<f64, TemplateError> {
        args.parse::<f64>()
            .ok()
            .filter(|k| k.is_finite())
            .ok_or_else(|| TemplateError::InvalidArgument(name.to_string()))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Template parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `{{ }}` with nothing inside
    #[error("empty placeholder")]
    EmptyPlaceholder,
    /// `{{` without a matching `}}`
    #[error("unterminated placeholder")]
    UnterminatedPlaceholder,
    /// Placeholder source other than `value`
    #[error("unknown source: {0}")]
    UnknownSource(String),
    /// Unknown transform function
    #[error("unknown transform: {0}")]
    UnknownTransform(String),
    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
