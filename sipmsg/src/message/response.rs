use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::headers::{SipHeaderParse, Via, CALL_ID, CSEQ, FROM, TO, VIA};
use crate::parser::{Parser, SIPV2};

use super::{Destination, Message, Request, Uri};

/// Headers a response copies from the request it answers.
pub const RESPONSE_HEADERS: [&str; 5] = [VIA, FROM, CALL_ID, CSEQ, TO];

/// A SIP Response.
///
/// # Examples
///
/// ```
/// use sipmsg::message::Response;
///
/// let res = Response::new(486, "Busy Here");
///
/// assert_eq!(res.to_string(), "SIP/2.0 486 Busy Here\r\ncontent-length: 0\r\n\r\n");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    code: u16,
    reason: String,
    msg: Message,
}

impl Response {
    pub fn new(code: u16, reason: &str) -> Self {
        Self {
            code,
            reason: reason.to_string(),
            msg: Message::new(),
        }
    }

    pub(crate) fn from_parts(code: u16, reason: String, msg: Message) -> Self {
        Self { code, reason, msg }
    }

    /// Builds a response to `request`, copying its `Via`, `From`,
    /// `Call-ID`, `CSeq` and `To` values verbatim.
    pub fn from_request(code: u16, reason: &str, request: &Request) -> Result<Self> {
        let mut response = Self::new(code, reason);

        for name in RESPONSE_HEADERS {
            let values = request
                .values(name)
                .map_err(|_| Error::ResponseConstruction(name.to_string()))?;
            response.set_header(name, values.to_vec());
        }

        Ok(response)
    }

    /// Parses a response. No header is mandatory.
    pub fn parse(raw: &str) -> Result<Self> {
        Parser::new(raw).parse_response()
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn set_code(&mut self, code: u16) {
        self.code = code;
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn set_reason(&mut self, reason: &str) {
        self.reason = reason.to_string();
    }

    /// Where this response should be sent, from its top `Via`.
    pub fn destination(&self) -> Result<Destination> {
        let via = Via::from_message(self)?;

        Destination::try_from(&Uri::from(&via))
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

impl FromStr for Response {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Deref for Response {
    type Target = Message;

    fn deref(&self) -> &Message {
        &self.msg
    }
}

impl DerefMut for Response {
    fn deref_mut(&mut self) -> &mut Message {
        &mut self.msg
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n{}", SIPV2, self.code, self.reason, self.msg)
    }
}
