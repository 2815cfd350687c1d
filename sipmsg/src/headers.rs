//! SIP Headers types
//!
//! The module provide the [`Headers`] struct that contains
//! an ordered list of [`Header`] and can be used to manipulate
//! SIP headers, plus the typed values ([`Via`], [`CSeq`]) built
//! on top of [`HeaderValue`].

mod cseq;
mod header;
mod header_value;
mod max_forwards;
mod via;

pub use cseq::CSeq;
pub use header::Header;
pub use header_value::HeaderValue;
pub use max_forwards::decrement_forwards;
pub use via::{generate_branch, Via, BRANCH_RANDOM_LEN, MAGIC_COOKIE};

use rand::Rng;

use crate::error::Result;
use crate::message::Message;

pub const VIA: &str = "via";
pub const FROM: &str = "from";
pub const TO: &str = "to";
pub const CALL_ID: &str = "call-id";
pub const CSEQ: &str = "cseq";
pub const CONTACT: &str = "contact";
pub const CONTENT_TYPE: &str = "content-type";
pub const CONTENT_LENGTH: &str = "content-length";
pub const MAX_FORWARDS: &str = "max-forwards";
pub const REFER_TO: &str = "refer-to";

/// The `tag` parameter of `From`/`To`.
pub const TAG_PARAM: &str = "tag";
/// Length of the random part of a generated `tag`.
pub const TAG_LEN: usize = 10;

/// Compact header forms (RFC 3261 section 7.3.3).
const SHORT_NAMES: [(&str, &str); 10] = [
    ("f", FROM),
    ("t", TO),
    ("m", CONTACT),
    ("i", CALL_ID),
    ("v", VIA),
    ("e", "content-encoding"),
    ("l", CONTENT_LENGTH),
    ("c", CONTENT_TYPE),
    ("s", "subject"),
    ("r", REFER_TO),
];

/// Lowercases a header name and expands its compact form.
///
/// ```
/// use sipmsg::headers::normalize_name;
///
/// assert_eq!(normalize_name("Call-ID"), "call-id");
/// assert_eq!(normalize_name("v"), "via");
/// ```
pub fn normalize_name(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();

    match SHORT_NAMES.iter().find(|(short, _)| *short == name) {
        Some((_, full)) => full.to_string(),
        None => name,
    }
}

/// Random lowercase letters, used for tags and branches.
pub(crate) fn random_token(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len).map(|_| rng.random_range('a'..='z')).collect()
}

/// Generates a random `tag` value for a `From` or `To` header.
pub fn generate_tag() -> String {
    random_token(TAG_LEN)
}

/// Trait to parse a typed header from a [`HeaderValue`].
pub trait SipHeaderParse: Sized {
    /// The normalized name of the SIP header (e.g., `"cseq"`).
    const NAME: &'static str;

    /// Parses this header from one of its values.
    fn parse(value: &HeaderValue) -> Result<Self>;

    /// Parses this header from the first value of the header in `msg`.
    ///
    /// Fails with `MissingHeader` if the message has no such header.
    fn from_message(msg: &Message) -> Result<Self> {
        Self::parse(msg.first_value(Self::NAME)?)
    }
}

/// A collection of SIP Headers.
///
/// A wrapper over Vec<[`Header`]> that keeps the insertion order.
/// Every name is normalized with [`normalize_name`], so lookups are
/// case-insensitive and accept compact forms.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Headers(Vec<Header>);

impl Headers {
    /// Create a new empty collection of headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Header> {
        let name = normalize_name(name);
        self.0.iter().find(|h| h.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Header> {
        let name = normalize_name(name);
        self.0.iter_mut().find(|h| h.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replaces the values of a header, appending it at the
    /// end if it does not exist.
    pub fn set(&mut self, name: &str, values: Vec<HeaderValue>) {
        match self.get_mut(name) {
            Some(header) => *header.values_mut() = values,
            None => self.0.push(Header::new(name, values)),
        }
    }

    /// Appends values to a header, creating it if it does not exist.
    pub fn push(&mut self, name: &str, values: Vec<HeaderValue>) {
        match self.get_mut(name) {
            Some(header) => header.values_mut().extend(values),
            None => self.0.push(Header::new(name, values)),
        }
    }

    /// Removes a header and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Header> {
        let name = normalize_name(name);
        let idx = self.0.iter().position(|h| h.name() == name)?;

        Some(self.0.remove(idx))
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
