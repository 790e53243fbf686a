// Locator descriptors - declarative, serializable element lookups
//
// A descriptor names exactly one lookup strategy plus an optional position.
// The strategy set is closed: the loosely-typed table format (bare string,
// [role, options] array, or single-key object) is validated when it is
// converted, so a descriptor can never satisfy two shapes at once.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Object keys that select a strategy, in dispatch order.
const STRATEGY_KEYS: [&str; 7] = [
    "css",
    "text",
    "label",
    "placeholder",
    "altText",
    "title",
    "testId",
];

/// Object keys that carry the match position.
const INDEX_KEYS: [&str; 2] = ["nth", "index"];

/// Options for role lookups (ARIA role plus accessible-name filters).
///
/// Mirrors the option bag accepted by Playwright's `getByRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleOptions {
    /// Accessible name to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Match the name case-sensitively and in full
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exact: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressed: Option<bool>,
    /// Heading level (1-6)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_hidden: Option<bool>,
}

impl RoleOptions {
    /// Options matching an accessible name (case-insensitive substring).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Requires the accessible name to match exactly.
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Restricts headings to the given level.
    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }
}

/// The lookup strategy of a descriptor. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Engine-native selector (CSS or XPath)
    Raw(String),
    /// ARIA role with accessible-name filters
    Role { role: String, options: RoleOptions },
    /// Visible text
    Text(String),
    /// Associated `<label>` text or `aria-label`
    Label(String),
    /// `placeholder` attribute
    Placeholder(String),
    /// `alt` attribute
    AltText(String),
    /// `title` attribute
    Title(String),
    /// `data-testid` attribute
    TestId(String),
}

impl Strategy {
    /// Short tag used in logs and error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::Raw(_) => "css",
            Strategy::Role { .. } => "role",
            Strategy::Text(_) => "text",
            Strategy::Label(_) => "label",
            Strategy::Placeholder(_) => "placeholder",
            Strategy::AltText(_) => "altText",
            Strategy::Title(_) => "title",
            Strategy::TestId(_) => "testId",
        }
    }
}

/// Immutable description of how to find zero or more UI elements.
///
/// # Example
///
/// ```ignore
/// use orangehrm_e2e::locator::{LocatorDescriptor, RoleOptions};
///
/// let save = LocatorDescriptor::role("button", RoleOptions::named("Save"));
/// let new_password = LocatorDescriptor::css("input[type='password']").nth(1);
///
/// let parsed: LocatorDescriptor = serde_json::from_str(r#"{"placeholder": "Username"}"#)?;
/// assert_eq!(parsed, LocatorDescriptor::placeholder("Username"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct LocatorDescriptor {
    strategy: Strategy,
    index: Option<usize>,
}

impl LocatorDescriptor {
    fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            index: None,
        }
    }

    /// Engine-native selector (CSS or XPath).
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Strategy::Raw(selector.into()))
    }

    pub fn role(role: impl Into<String>, options: RoleOptions) -> Self {
        Self::new(Strategy::Role {
            role: role.into(),
            options,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Strategy::Text(text.into()))
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self::new(Strategy::Label(label.into()))
    }

    pub fn placeholder(placeholder: impl Into<String>) -> Self {
        Self::new(Strategy::Placeholder(placeholder.into()))
    }

    pub fn alt_text(alt: impl Into<String>) -> Self {
        Self::new(Strategy::AltText(alt.into()))
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self::new(Strategy::Title(title.into()))
    }

    pub fn test_id(test_id: impl Into<String>) -> Self {
        Self::new(Strategy::TestId(test_id.into()))
    }

    /// Narrows the descriptor to the Nth match (0-based).
    pub fn nth(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for LocatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}

impl TryFrom<Value> for LocatorDescriptor {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match &value {
            Value::String(selector) => {
                if selector.trim().is_empty() {
                    return Err(Error::invalid_locator(&value, "empty selector"));
                }
                Ok(Self::css(selector.clone()))
            }
            Value::Array(items) => parse_role_array(&value, items),
            Value::Object(map) => parse_object(&value, map),
            _ => Err(Error::invalid_locator(
                &value,
                "expected a selector string, a [role, options] array or a single-strategy object",
            )),
        }
    }
}

impl From<LocatorDescriptor> for Value {
    fn from(descriptor: LocatorDescriptor) -> Self {
        let LocatorDescriptor { strategy, index } = descriptor;

        let (key, text) = match strategy {
            Strategy::Role { role, options } => return role_value(role, options, index),
            Strategy::Raw(selector) if index.is_none() => return Value::String(selector),
            Strategy::Raw(selector) => ("css", selector),
            Strategy::Text(text) => ("text", text),
            Strategy::Label(text) => ("label", text),
            Strategy::Placeholder(text) => ("placeholder", text),
            Strategy::AltText(text) => ("altText", text),
            Strategy::Title(text) => ("title", text),
            Strategy::TestId(text) => ("testId", text),
        };

        let mut map = Map::new();
        map.insert(key.into(), Value::String(text));
        if let Some(index) = index {
            map.insert("nth".into(), Value::from(index));
        }
        Value::Object(map)
    }
}

fn role_value(role: String, options: RoleOptions, index: Option<usize>) -> Value {
    // RoleOptions holds only strings, bools and integers
    let mut options = match serde_json::to_value(options) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if let Some(index) = index {
        options.insert("nth".into(), Value::from(index));
    }
    if options.is_empty() {
        Value::Array(vec![Value::String(role)])
    } else {
        Value::Array(vec![Value::String(role), Value::Object(options)])
    }
}

fn parse_role_array(value: &Value, items: &[Value]) -> Result<LocatorDescriptor> {
    let (role, options) = match items {
        [role] => (role, None),
        [role, options] => (role, Some(options)),
        _ => {
            return Err(Error::invalid_locator(
                value,
                "role locator must be [role] or [role, options]",
            ));
        }
    };

    let role = role
        .as_str()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| Error::invalid_locator(value, "role must be a non-empty string"))?;

    let (options, index) = match options {
        None | Some(Value::Null) => (RoleOptions::default(), None),
        Some(Value::Object(map)) => {
            let index = parse_index(value, map)?;
            let rest: Map<String, Value> = map
                .iter()
                .filter(|(k, _)| !INDEX_KEYS.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let options: RoleOptions = serde_json::from_value(Value::Object(rest))
                .map_err(|e| Error::invalid_locator(value, format!("bad role options: {e}")))?;
            (options, index)
        }
        Some(_) => {
            return Err(Error::invalid_locator(
                value,
                "role options must be an object",
            ));
        }
    };

    let mut descriptor = LocatorDescriptor::role(role, options);
    descriptor.index = index;
    Ok(descriptor)
}

fn parse_object(value: &Value, map: &Map<String, Value>) -> Result<LocatorDescriptor> {
    if let Some(unknown) = map
        .keys()
        .find(|k| !STRATEGY_KEYS.contains(&k.as_str()) && !INDEX_KEYS.contains(&k.as_str()))
    {
        return Err(Error::invalid_locator(
            value,
            format!("unknown key '{unknown}'"),
        ));
    }

    let present: Vec<&str> = STRATEGY_KEYS
        .iter()
        .copied()
        .filter(|k| map.contains_key(*k))
        .collect();

    let key = match present.as_slice() {
        [key] => *key,
        [] => return Err(Error::invalid_locator(value, "no locator strategy")),
        [first, second, ..] => {
            return Err(Error::invalid_locator(
                value,
                format!("ambiguous locator: both '{first}' and '{second}' are set"),
            ));
        }
    };

    let text = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::invalid_locator(value, format!("'{key}' must be a non-empty string")))?
        .to_string();

    let strategy = match key {
        "css" => Strategy::Raw(text),
        "text" => Strategy::Text(text),
        "label" => Strategy::Label(text),
        "placeholder" => Strategy::Placeholder(text),
        "altText" => Strategy::AltText(text),
        "title" => Strategy::Title(text),
        _ => Strategy::TestId(text),
    };

    Ok(LocatorDescriptor {
        strategy,
        index: parse_index(value, map)?,
    })
}

fn parse_index(value: &Value, map: &Map<String, Value>) -> Result<Option<usize>> {
    let mut found = INDEX_KEYS.iter().filter_map(|k| map.get(*k));
    let index = match (found.next(), found.next()) {
        (None, _) | (Some(Value::Null), None) => return Ok(None),
        (Some(_), Some(_)) => {
            return Err(Error::invalid_locator(
                value,
                "only one of 'nth' and 'index' may be set",
            ));
        }
        (Some(index), None) => index,
    };

    index
        .as_u64()
        .and_then(|i| usize::try_from(i).ok())
        .map(Some)
        .ok_or_else(|| Error::invalid_locator(value, "index must be a non-negative integer"))
}
