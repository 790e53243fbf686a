// Selector - compiled query chain in Playwright's selector-engine syntax
//
// A selector is a chain of segments evaluated left to right: each query
// segment searches inside whatever the previous segments matched, and a
// position segment keeps a single element of the current match set. This
// is the same `a >> b >> nth=k` model Playwright's own locators use, so
// the rendered string can be handed to `page.locator()` unchanged.

use super::descriptor::{RoleOptions, Strategy};
use serde_json::Value;
use std::fmt;

/// Which element of the current match set to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// 0-based index
    Nth(usize),
    /// Last match
    Last,
}

/// One step of a selector chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Query(Strategy),
    Position(Position),
}

/// Compiled, engine-ready query. Cheap to clone; carries no live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    segments: Vec<Segment>,
}

impl Selector {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            segments: vec![Segment::Query(strategy)],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Narrows to the Nth match (0-indexed).
    pub fn nth(&self, index: usize) -> Selector {
        self.push(Segment::Position(Position::Nth(index)))
    }

    pub fn first(&self) -> Selector {
        self.nth(0)
    }

    pub fn last(&self) -> Selector {
        self.push(Segment::Position(Position::Last))
    }

    /// Scopes `child` inside whatever this selector matches.
    pub fn then(&self, child: &Selector) -> Selector {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        Selector { segments }
    }

    fn push(&self, segment: Segment) -> Selector {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Selector { segments }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            match segment {
                Segment::Query(strategy) => f.write_str(&render_strategy(strategy))?,
                Segment::Position(Position::Nth(index)) => write!(f, "nth={index}")?,
                Segment::Position(Position::Last) => f.write_str("nth=-1")?,
            }
        }
        Ok(())
    }
}

fn render_strategy(strategy: &Strategy) -> String {
    match strategy {
        Strategy::Raw(selector) => selector.clone(),
        Strategy::Role { role, options } => render_role(role, options),
        Strategy::Text(text) => format!("internal:text={}", escape_for_text(text, false)),
        Strategy::Label(text) => format!("internal:label={}", escape_for_text(text, false)),
        Strategy::Placeholder(text) => {
            format!("internal:attr=[placeholder={}]", escape_for_attribute(text, false))
        }
        Strategy::AltText(text) => {
            format!("internal:attr=[alt={}]", escape_for_attribute(text, false))
        }
        Strategy::Title(text) => {
            format!("internal:attr=[title={}]", escape_for_attribute(text, false))
        }
        Strategy::TestId(id) => {
            format!("internal:testid=[data-testid={}]", escape_for_attribute(id, true))
        }
    }
}

// Property order matches the selector engine's canonical form
fn render_role(role: &str, options: &RoleOptions) -> String {
    let mut out = format!("internal:role={role}");
    let mut prop = |name: &str, value: String| out.push_str(&format!("[{name}={value}]"));

    if let Some(checked) = options.checked {
        prop("checked", checked.to_string());
    }
    if let Some(disabled) = options.disabled {
        prop("disabled", disabled.to_string());
    }
    if let Some(selected) = options.selected {
        prop("selected", selected.to_string());
    }
    if let Some(expanded) = options.expanded {
        prop("expanded", expanded.to_string());
    }
    if let Some(include_hidden) = options.include_hidden {
        prop("include-hidden", include_hidden.to_string());
    }
    if let Some(level) = options.level {
        prop("level", level.to_string());
    }
    if let Some(name) = &options.name {
        prop("name", escape_for_attribute(name, options.exact));
    }
    if let Some(pressed) = options.pressed {
        prop("pressed", pressed.to_string());
    }
    out
}

/// JSON-quoted text with the case-sensitivity suffix (`i` or `s`).
fn escape_for_text(text: &str, exact: bool) -> String {
    format!("{}{}", Value::String(text.to_string()), suffix(exact))
}

fn escape_for_attribute(value: &str, exact: bool) -> String {
    format!(
        "\"{}\"{}",
        value.replace('\\', "\\\\").replace('"', "\\\""),
        suffix(exact)
    )
}

fn suffix(exact: bool) -> char {
    if exact { 's' } else { 'i' }
}
