//! # sipmsg
//!
//! A rust library that parses, models, validates and serializes
//! SIP (RFC 3261) messages.
//!
//! ```
//! use sipmsg::message::SipMethod;
//!
//! let msg = sipmsg::parse_message(concat!(
//!     "OPTIONS sip:carol@chicago.com SIP/2.0\r\n",
//!     "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKhjhs8ass877\r\n",
//!     "To: <sip:carol@chicago.com>\r\n",
//!     "From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n",
//!     "Call-ID: a84b4c76e66710\r\n",
//!     "CSeq: 63104 OPTIONS\r\n",
//!     "Content-Length: 0\r\n\r\n",
//! ))
//! .unwrap();
//!
//! let req = msg.as_request().unwrap();
//! assert_eq!(req.method(), SipMethod::Options);
//! ```

pub mod headers;
pub mod message;
pub mod parser;

pub(crate) mod error;
pub(crate) mod macros;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, Result, SipParserError};
pub use headers::{decrement_forwards, generate_branch, generate_tag, HeaderValue};
pub use message::{Destination, Message, Request, Response, SipMsg, Uri};
pub use parser::Parser;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

/// Parses one datagram into a request or a response.
///
/// A start line beginning with `SIP/2.0` is a response; anything
/// else must be a valid request. Non UTF-8 input is a parse error.
pub fn parse_message(raw: impl AsRef<[u8]>) -> Result<SipMsg> {
    Parser::parse_sip_msg(raw.as_ref())
}
