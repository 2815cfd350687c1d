//! SIP Message types
//!
//! The module provide the [`SipMsg`] enum that can be an
//! [`SipMsg::Request`] or [`SipMsg::Response`] and represents a SIP
//! message, and the [`Message`] header/body container both of them
//! wrap.

mod method;
mod params;
mod request;
mod response;
mod transport;
mod uri;

pub use method::SipMethod;
pub use params::{Param, Params};
pub use request::{Request, FORWARDED_HEADERS, MANDATORY_HEADERS};
pub use response::{Response, RESPONSE_HEADERS};
pub use transport::{Destination, TransportKind, DEFAULT_PORT, MAX_DATAGRAM_SIZE};
pub use uri::{Uri, UriBuilder};

use std::fmt;
use std::ops::Deref;

use enum_as_inner::EnumAsInner;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::headers::{Header, HeaderValue, Headers, CONTENT_LENGTH, CONTENT_TYPE, VIA};

/// A SIP message as defined in [RFC 3261].
///
/// It can be either a request from a client to a server,
/// or a response from a server to a client.
///
/// See [`Request`] and [`Response`] for more details.
///
/// [RFC 3261]: https://datatracker.ietf.org/doc/html/rfc3261
#[derive(Debug, Clone, EnumAsInner)]
pub enum SipMsg {
    /// An SIP Request.
    Request(Request),
    /// An SIP Response.
    Response(Response),
}

impl SipMsg {
    /// The headers and body shared by both kinds.
    pub fn message(&self) -> &Message {
        match self {
            SipMsg::Request(req) => req.deref(),
            SipMsg::Response(res) => res.deref(),
        }
    }
}

impl fmt::Display for SipMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SipMsg::Request(req) => write!(f, "{}", req),
            SipMsg::Response(res) => write!(f, "{}", res),
        }
    }
}

/// The header section and body of a SIP message.
///
/// Headers keep their insertion order; `content-length` is computed
/// from the body and always written last.
///
/// # Examples
///
/// ```
/// use sipmsg::message::Message;
/// use sipmsg::header_values;
///
/// let mut msg = Message::new();
/// msg.set_header("Call-ID", header_values!["a84b4c76e66710"]);
/// msg.set_body("v=0\r\n", "application/sdp").unwrap();
///
/// assert_eq!(
///     msg.to_string(),
///     "call-id: a84b4c76e66710\r\ncontent-type: application/sdp\r\ncontent-length: 5\r\n\r\nv=0\r\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Message {
    headers: Headers,
    body: Option<String>,
    raw: Option<String>,
}

impl Message {
    /// Creates an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(headers: Headers, body: Option<String>, raw: Option<&str>) -> Self {
        Self {
            headers,
            body,
            raw: raw.map(String::from),
        }
    }

    /// The headers, in output order.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    /// Replaces the values of a header, appending it if absent.
    pub fn set_header(&mut self, name: &str, values: Vec<HeaderValue>) {
        self.headers.set(name, values);
    }

    /// Appends values to a header, creating it if absent.
    pub fn push_header(&mut self, name: &str, values: Vec<HeaderValue>) {
        self.headers.push(name, values);
    }

    /// Removes a header; returns whether it existed.
    pub fn delete_header(&mut self, name: &str) -> bool {
        self.headers.remove(name).is_some()
    }

    pub fn values(&self, name: &str) -> Result<&[HeaderValue]> {
        self.headers
            .get(name)
            .map(Header::values)
            .ok_or_else(|| Error::MissingHeader(name.to_string()))
    }

    pub fn values_mut(&mut self, name: &str) -> Result<&mut Vec<HeaderValue>> {
        self.headers
            .get_mut(name)
            .map(Header::values_mut)
            .ok_or_else(|| Error::MissingHeader(name.to_string()))
    }

    /// The first value of a header; a header without values counts
    /// as missing.
    pub fn first_value(&self, name: &str) -> Result<&HeaderValue> {
        self.values(name)?
            .first()
            .ok_or_else(|| Error::MissingHeader(name.to_string()))
    }

    pub fn first_value_mut(&mut self, name: &str) -> Result<&mut HeaderValue> {
        self.values_mut(name)?
            .first_mut()
            .ok_or_else(|| Error::MissingHeader(name.to_string()))
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn body(&self) -> Result<&str> {
        self.body.as_deref().ok_or(Error::NoBody)
    }

    /// Sets the body together with its `content-type` and
    /// `content-length`.
    pub fn set_body(&mut self, body: &str, content_type: &str) -> Result<()> {
        if body.is_empty() || content_type.is_empty() {
            return Err(Error::InvalidBody);
        }

        self.headers.set(CONTENT_TYPE, vec![HeaderValue::parse(content_type)]);
        self.headers.set(CONTENT_LENGTH, vec![HeaderValue::new(body.len().to_string())]);
        self.body = Some(body.to_string());

        Ok(())
    }

    /// The datagram this message was parsed from.
    ///
    /// Always `None` for messages built in code.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for header in self.headers.iter() {
            if header.values().iter().all(HeaderValue::is_empty) {
                continue;
            }
            match header.name() {
                CONTENT_LENGTH => continue,
                VIA => {
                    for value in header.values() {
                        write!(f, "{}: {}\r\n", VIA, value)?;
                    }
                }
                name => write!(f, "{}: {}\r\n", name, header.values().iter().join(", "))?,
            }
        }

        match &self.body {
            Some(body) => write!(f, "{}: {}\r\n\r\n{}", CONTENT_LENGTH, body.len(), body),
            None => write!(f, "{}: 0\r\n\r\n", CONTENT_LENGTH),
        }
    }
}
