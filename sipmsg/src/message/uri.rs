use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::headers::Via;
use crate::parser::Parser;

use super::Params;

const SIP_SCHEME: &str = "sip";

/// A SIP URI.
///
/// Accepts both the bracketed form, with an optional display name
/// (`"Bob" <sip:bob@biloxi.com;transport=tcp>`), and the naked form
/// (`sip:bob@biloxi.com`). It is always displayed bracketed.
///
/// Two URIs are equal when their user and host are equal; every
/// other component is ignored.
///
/// # Examples
///
/// ```
/// use sipmsg::message::Uri;
///
/// let uri: Uri = "\"Bob\" <sip:bob@biloxi.com:5060;transport=tcp>".parse().unwrap();
///
/// assert_eq!(uri.display_name(), Some("Bob"));
/// assert_eq!(uri.user(), Some("bob"));
/// assert_eq!(uri.port(), Some(5060));
/// assert_eq!(uri.as_naked(), "sip:bob@biloxi.com:5060;transport=tcp");
/// assert_eq!(uri, "sip:bob@biloxi.com".parse::<Uri>().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Uri {
    pub(crate) display_name: Option<String>,
    pub(crate) scheme: String,
    pub(crate) user: Option<String>,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) params: Params,
    pub(crate) headers: Option<String>,
}

impl Uri {
    /// Returns a builder to create an `Uri`.
    pub fn builder() -> UriBuilder {
        UriBuilder::new()
    }

    /// `true` if `s` parses as a URI.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Uri>().is_ok()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// The opaque `?headers` part, without the `?`.
    pub fn headers(&self) -> Option<&str> {
        self.headers.as_deref()
    }

    pub fn set_display_name(&mut self, display_name: Option<&str>) {
        self.display_name = display_name.map(String::from);
    }

    pub fn set_user(&mut self, user: Option<&str>) {
        self.user = user.map(String::from);
    }

    pub fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    pub fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    /// The URI without display name and brackets.
    pub fn as_naked(&self) -> String {
        let mut naked = self.request_target();
        if let Some(headers) = &self.headers {
            naked.push('?');
            naked.push_str(headers);
        }
        naked
    }

    /// The form used in a request line: `scheme:[user@]host[:port][;params]`.
    pub(crate) fn request_target(&self) -> String {
        let mut target = format!("{}:", self.scheme);
        if let Some(user) = &self.user {
            target.push_str(user);
            target.push('@');
        }
        target.push_str(&self.host);
        if let Some(port) = self.port {
            target.push(':');
            target.push_str(&port.to_string());
        }
        target.push_str(&self.params.to_string());
        target
    }
}

impl Default for Uri {
    fn default() -> Self {
        Self {
            display_name: None,
            scheme: SIP_SCHEME.to_string(),
            user: None,
            host: String::new(),
            port: None,
            params: Params::new(),
            headers: None,
        }
    }
}

impl FromStr for Uri {
    type Err = Error;

    /// Tries the bracketed grammar first, then the naked one.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        Parser::new(s)
            .parse_bracketed_uri()
            .or_else(|_| Parser::new(s).parse_naked_uri())
            .map_err(|_| Error::InvalidUri(s.to_string()))
    }
}

impl From<&Via> for Uri {
    /// `sip:host[:port]` of the `Via` sent-by.
    fn from(via: &Via) -> Self {
        Self {
            host: via.host().to_string(),
            port: via.port(),
            ..Default::default()
        }
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user && self.host == other.host
    }
}

impl Eq for Uri {}

impl PartialOrd for Uri {
    /// `Less` only when both user and host are lower, `Greater`
    /// only when both are greater.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.user < other.user && self.host < other.host {
            Some(Ordering::Less)
        } else if self.user > other.user && self.host > other.host {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(display_name) = &self.display_name {
            write!(f, "\"{}\" ", display_name)?;
        }
        write!(f, "<{}>", self.as_naked())
    }
}

/// Builder for creating a new SIP URI.
#[derive(Debug, Default)]
pub struct UriBuilder {
    uri: Uri,
}

impl UriBuilder {
    /// Returns a builder with the `sip` scheme and no host.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(mut self, scheme: &str) -> Self {
        self.uri.scheme = scheme.to_string();
        self
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.uri.display_name = Some(display_name.to_string());
        self
    }

    pub fn user(mut self, user: &str) -> Self {
        self.uri.user = Some(user.to_string());
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.uri.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.uri.port = Some(port);
        self
    }

    /// Adds a `;name[=value]` parameter; an empty value makes a flag.
    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.uri.params.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: &str) -> Self {
        self.uri.headers = Some(headers.to_string());
        self
    }

    /// Finalize the builder into a `Uri`.
    pub fn build(self) -> Uri {
        self.uri
    }
}
