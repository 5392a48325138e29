//! Hierarchical resource addresses.
//!
//! An address is a sequence of `(type, name)` elements, written as
//! `/security-realm=ManagementRealm/authorization=ldap`. The empty address is
//! the root of the tree. A name of `*` is a wildcard and is only meaningful in
//! address patterns used to register resource definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wildcard value matching any element name.
pub const WILDCARD: &str = "*";

/// One `(type, name)` segment of a resource address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathElement {
    key: String,
    value: String,
}

impl PathElement {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Element matching any name of the given type.
    pub fn wildcard(key: impl Into<String>) -> Self {
        Self::new(key, WILDCARD)
    }

    /// The resource type.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The instance name.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_wildcard(&self) -> bool {
        self.value == WILDCARD
    }

    /// Whether this element, used as a pattern, matches `other`.
    pub fn matches(&self, other: &PathElement) -> bool {
        self.key == other.key && (self.is_wildcard() || self.value == other.value)
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Address of a resource in the management tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourcePath {
    elements: Vec<PathElement>,
}

impl ResourcePath {
    /// The root address.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: impl IntoIterator<Item = PathElement>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// A new address with one more element.
    pub fn append(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::new(key, value));
        Self { elements }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The last element, absent for the root.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// The parent address, absent for the root.
    pub fn parent(&self) -> Option<ResourcePath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            elements: self.elements[..self.elements.len() - 1].to_vec(),
        })
    }

    /// Whether `self` is a direct child of `parent`.
    pub fn is_child_of(&self, parent: &ResourcePath) -> bool {
        self.len() == parent.len() + 1 && self.elements.starts_with(&parent.elements)
    }

    /// Whether this address, used as a pattern, matches `address`.
    pub fn matches(&self, address: &ResourcePath) -> bool {
        self.len() == address.len()
            && self
                .elements
                .iter()
                .zip(address.elements.iter())
                .all(|(pattern, element)| pattern.matches(element))
    }

    /// Whether any element is a wildcard.
    pub fn is_pattern(&self) -> bool {
        self.elements.iter().any(PathElement::is_wildcard)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "/");
        }
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

/// Error returned when an address string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid resource address '{input}': {reason}")]
pub struct PathParseError {
    pub input: String,
    pub reason: String,
}

impl FromStr for ResourcePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: &str| PathParseError {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Err(error("address must start with '/'"));
        };
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let elements = rest
            .split('/')
            .map(|segment| {
                let (key, value) = segment
                    .split_once('=')
                    .ok_or_else(|| error("each element must have the form type=name"))?;
                if key.is_empty() || value.is_empty() {
                    return Err(error("element type and name must not be empty"));
                }
                Ok(PathElement::new(key, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { elements })
    }
}
