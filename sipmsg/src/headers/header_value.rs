use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::message::Params;
use crate::parser;

/// One comma-separated element of a header: a value plus its
/// optional `;tag[=value]` map.
///
/// Tags are only looked for after an embedded bracketed URI, so the
/// `;transport=tcp` of `<sip:a@b;transport=tcp>` stays in the value.
///
/// # Examples
///
/// ```
/// use sipmsg::headers::HeaderValue;
///
/// let value = HeaderValue::parse("Bob <sip:bob@biloxi.com>;tag=a6c85cf");
///
/// assert_eq!(value.value(), "Bob <sip:bob@biloxi.com>");
/// assert_eq!(value.tag("tag").unwrap(), "a6c85cf");
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct HeaderValue {
    value: String,
    tags: Option<Params>,
}

impl HeaderValue {
    /// A value without tags; no tag detection is done.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tags: None,
        }
    }

    pub fn with_tags(value: &str, tags: Params) -> Self {
        Self {
            value: value.trim().to_string(),
            tags: Some(tags),
        }
    }

    /// Parses a raw element. Never fails: anything that is not a tag
    /// ends up in the value.
    pub fn parse(raw: &str) -> Self {
        let (value, tags) = parser::split_tags(raw.trim());

        Self {
            value: value.trim().to_string(),
            tags,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// `true` when nothing would be written for this value.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.tags.as_ref().is_none_or(Params::is_empty)
    }

    pub fn has_tags(&self) -> bool {
        self.tags.is_some()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.as_ref().is_some_and(|tags| tags.contains(name))
    }

    pub fn tags(&self) -> Result<&Params> {
        self.tags
            .as_ref()
            .ok_or_else(|| Error::NoTags(self.value.clone()))
    }

    /// The value of a tag, empty for a flag tag.
    pub fn tag(&self, name: &str) -> Result<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(name))
            .ok_or_else(|| Error::TagNotFound(name.to_string()))
    }

    /// Adds or replaces a tag.
    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tags.get_or_insert_with(Params::new).insert(name, value);
    }
}

impl FromStr for HeaderValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)?;
        if let Some(tags) = &self.tags {
            write!(f, "{}", tags)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_value() {
        let value = HeaderValue::parse("  70 ");

        assert_eq!(value.value(), "70");
        assert!(!value.has_tags());
        assert_matches!(value.tags(), Err(Error::NoTags(_)));
        assert_matches!(value.tag("tag"), Err(Error::TagNotFound(t)) if t == "tag");
    }

    #[test]
    fn test_contact_with_trailing_tag() {
        let value = HeaderValue::parse("<sip:3170@172.20.3.20:5060>;dt=544");

        assert_eq!(value.value(), "<sip:3170@172.20.3.20:5060>");
        assert_eq!(value.tag("dt").unwrap(), "544");
        assert_matches!(value.tag("expires"), Err(Error::TagNotFound(t)) if t == "expires");
        assert!(!value.has_tag("expires"));
    }

    #[test]
    fn test_uri_params_are_not_tags() {
        let value = HeaderValue::parse("<sip:alice@client.atlanta.example.com;transport=tcp>");

        assert_eq!(value.value(), "<sip:alice@client.atlanta.example.com;transport=tcp>");
        assert!(!value.has_tags());
    }

    #[test]
    fn test_quoted_name_after_leading_space() {
        let value = HeaderValue::parse(" \"Bob\" <sip:bob@b.com;lr>;tag=1");

        assert_eq!(value.value(), "\"Bob\" <sip:bob@b.com;lr>");
        assert_eq!(value.tags().unwrap().len(), 1);
        assert_eq!(value.tag("tag").unwrap(), "1");
    }

    #[test]
    fn test_tag_absent_without_tags() {
        let value = HeaderValue::parse("<sip:a@b>");

        assert_matches!(value.tag("tag"), Err(Error::TagNotFound(t)) if t == "tag");
        assert_matches!(value.tags(), Err(Error::NoTags(v)) if v == "<sip:a@b>");
    }

    #[test]
    fn test_add_tag() {
        let mut value = HeaderValue::new("Alice <sip:alice@atlanta.com>");
        value.add_tag("tag", "1928301774");
        value.add_tag("lr", "");

        assert_eq!(value.to_string(), "Alice <sip:alice@atlanta.com>;tag=1928301774;lr");

        value.add_tag("tag", "88sja8x");
        assert_eq!(value.tag("tag").unwrap(), "88sja8x");
        assert_eq!(value.tags().unwrap().len(), 2);
    }

    #[test]
    fn test_set_value_keeps_tags() {
        let mut value = HeaderValue::parse("70;x=y");
        value.set_value("69");

        assert_eq!(value.to_string(), "69;x=y");
    }

    #[test]
    fn test_with_tags() {
        let value = HeaderValue::with_tags(" application/sdp ", Params::from([("charset", "utf-8")]));

        assert_eq!(value.to_string(), "application/sdp;charset=utf-8");
    }
}
