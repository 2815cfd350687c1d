use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::headers::{
    CSeq, SipHeaderParse, CALL_ID, CONTACT, CONTENT_LENGTH, CONTENT_TYPE, CSEQ, FROM, REFER_TO, TAG_PARAM, TO,
    VIA,
};
use crate::parser::{Parser, SIPV2};

use super::{Destination, Message, SipMethod, Uri};

/// Headers every request must carry.
pub const MANDATORY_HEADERS: [&str; 5] = [TO, FROM, CSEQ, CALL_ID, VIA];

/// Headers kept by [`Request::forward`].
pub const FORWARDED_HEADERS: [&str; 9] = [
    VIA,
    CSEQ,
    CALL_ID,
    TO,
    FROM,
    CONTENT_LENGTH,
    CONTACT,
    CONTENT_TYPE,
    REFER_TO,
];

/// A SIP Request.
///
/// Header access goes through [`Message`], which `Request`
/// dereferences to.
///
/// # Examples
///
/// ```
/// use sipmsg::message::{Request, SipMethod};
///
/// let req = Request::parse(concat!(
///     "BYE sip:bob@192.0.2.4 SIP/2.0\r\n",
///     "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds10\r\n",
///     "To: Bob <sip:bob@biloxi.com>;tag=a6c85cf\r\n",
///     "From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n",
///     "Call-ID: a84b4c76e66710\r\n",
///     "CSeq: 231 BYE\r\n",
///     "Content-Length: 0\r\n\r\n",
/// ))
/// .unwrap();
///
/// assert_eq!(req.method(), SipMethod::Bye);
/// assert_eq!(req.first_value("call-id").unwrap().value(), "a84b4c76e66710");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: SipMethod,
    uri: Uri,
    msg: Message,
}

impl Request {
    /// Creates a request without headers.
    pub fn new(method: SipMethod, uri: Uri) -> Self {
        Self {
            method,
            uri,
            msg: Message::new(),
        }
    }

    pub(crate) fn from_parts(method: SipMethod, uri: Uri, msg: Message) -> Self {
        Self { method, uri, msg }
    }

    /// Parses and validates a request.
    pub fn parse(raw: &str) -> Result<Self> {
        Parser::new(raw).parse_request()
    }

    /// Copies only the headers a forwarded request needs,
    /// along with the request line and body.
    pub fn forward(other: &Request) -> Self {
        let mut msg = Message::new();

        for header in other.headers().iter().filter(|h| FORWARDED_HEADERS.contains(&h.name())) {
            msg.push_header(header.name(), header.values().to_vec());
        }
        msg.body = other.msg.body.clone();

        Self {
            method: other.method,
            uri: other.uri.clone(),
            msg,
        }
    }

    pub fn method(&self) -> SipMethod {
        self.method
    }

    /// Changes the method, rewriting the `CSeq` method if present.
    ///
    /// The request is left untouched if the `CSeq` does not parse.
    pub fn set_method(&mut self, method: SipMethod) -> Result<()> {
        if self.has_header(CSEQ) {
            let cseq = CSeq::from_message(self)?;
            let cseq = CSeq::new(cseq.cseq(), method);
            self.first_value_mut(CSEQ)?.set_value(cseq.to_string());
        }
        self.method = method;

        Ok(())
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = uri;
    }

    /// Where this request should be sent, from its request URI.
    pub fn destination(&self) -> Result<Destination> {
        Destination::try_from(&self.uri)
    }

    /// Checks the mandatory headers, the `From` tag of an INVITE and
    /// that the `CSeq` method matches the request method.
    pub(crate) fn validate(&self) -> Result<()> {
        self.check_rules()
            .inspect_err(|err| log::warn!("Rejecting {} request: {}", self.method, err))
    }

    fn check_rules(&self) -> Result<()> {
        if let Some(name) = MANDATORY_HEADERS.iter().find(|name| !self.has_header(name)) {
            return Err(Error::MissingHeader(name.to_string()));
        }

        if self.method.is_invite() && !self.first_value(FROM)?.has_tag(TAG_PARAM) {
            return Err(Error::MissingTag);
        }

        let cseq = CSeq::from_message(self)?;
        if cseq.method() != self.method {
            return Err(Error::MethodMismatch {
                method: self.method,
                cseq: cseq.method(),
            });
        }

        Ok(())
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new(SipMethod::Bye, Uri::default())
    }
}

impl FromStr for Request {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Deref for Request {
    type Target = Message;

    fn deref(&self) -> &Message {
        &self.msg
    }
}

impl DerefMut for Request {
    fn deref_mut(&mut self) -> &mut Message {
        &mut self.msg
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}\r\n{}",
            self.method,
            self.uri.request_target(),
            SIPV2,
            self.msg
        )
    }
}
