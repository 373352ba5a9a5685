//! Free-form entities placed on a map

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MapRect;

/// A single `name=value` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntAttr {
    pub name: String,
    pub value: String,
}

impl EntAttr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An entity placed on a map: an ordered bag of string attributes.
///
/// There is no schema. By convention `kind` names the entity type and
/// `x`, `y`, `w`, `h` give its footprint in tile coords.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ent {
    pub attrs: Vec<EntAttr>,
}

/// Attributes that [`Ent::label`] leaves out.
const GEOMETRY_ATTRS: [&str; 5] = ["x", "y", "w", "h", "kind"];

impl Ent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(EntAttr::new(name, value));
        self
    }

    /// Value of the first attribute called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing the first one with the same name or
    /// appending a new one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(EntAttr::new(name, value)),
        }
    }

    /// Integer attribute. Missing or unparsable values read as 0.
    pub fn get_int(&self, name: &str) -> i32 {
        self.get(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn kind(&self) -> &str {
        self.get("kind").unwrap_or("")
    }

    /// Footprint from the `x`, `y`, `w`, `h` attributes.
    pub fn geometry(&self) -> MapRect {
        MapRect::new(
            self.get_int("x"),
            self.get_int("y"),
            self.get_int("w"),
            self.get_int("h"),
        )
    }

    /// Move the footprint's top-left corner.
    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.set("x", x.to_string());
        self.set("y", y.to_string());
    }

    /// Shift the footprint by `(dx, dy)`. A zero delta leaves its attribute alone.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if dx != 0 {
            self.set("x", (self.get_int("x") + dx).to_string());
        }
        if dy != 0 {
            self.set("y", (self.get_int("y") + dy).to_string());
        }
    }

    /// Display text: the kind, then one `name=value` line per non-geometry attribute.
    pub fn label(&self) -> String {
        let mut label = self.kind().to_string();
        for attr in &self.attrs {
            if !GEOMETRY_ATTRS.contains(&attr.name.as_str()) {
                label.push_str(&format!("\n{}={}", attr.name, attr.value));
            }
        }
        label
    }
}

/// Space-separated `name=value` tokens.
///
/// Nothing is escaped: a value containing whitespace, or a name containing
/// `=`, will not parse back to the same ent.
impl fmt::Display for Ent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", attr.name, attr.value)?;
        }
        Ok(())
    }
}

/// Inverse of the `Display` form. Tokens split on whitespace, each on its
/// first `=`; a token with no `=` becomes an attribute with an empty value.
impl FromStr for Ent {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let attrs = s
            .split_whitespace()
            .map(|tok| match tok.split_once('=') {
                Some((name, value)) => EntAttr::new(name, value),
                None => EntAttr::new(tok, ""),
            })
            .collect();
        Ok(Ent { attrs })
    }
}
