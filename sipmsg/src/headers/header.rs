use std::fmt;

use itertools::Itertools;

use super::{normalize_name, HeaderValue};

/// A SIP header: a normalized name and its ordered values.
#[derive(Debug, PartialEq, Clone)]
pub struct Header {
    name: String,
    values: Vec<HeaderValue>,
}

impl Header {
    /// Creates a header, normalizing `name`.
    pub fn new(name: &str, values: Vec<HeaderValue>) -> Self {
        Self {
            name: normalize_name(name),
            values,
        }
    }

    /// The lowercase, long-form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[HeaderValue] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<HeaderValue> {
        &mut self.values
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.values.iter().join(", "))
    }
}
