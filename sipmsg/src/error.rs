use std::fmt;
use std::str::Utf8Error;

use thiserror::Error;

use crate::message::SipMethod;

pub type Result<T> = std::result::Result<T, Error>;

/// Error on parsing
#[derive(Debug, PartialEq, Eq, Error)]
pub struct SipParserError {
    /// Message in error
    pub message: String,
}

impl fmt::Display for SipParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[allow(missing_docs)]
impl SipParserError {
    pub fn new<T>(s: T) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            message: s.as_ref().to_string(),
        }
    }
}

impl std::convert::From<&str> for SipParserError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::convert::From<String> for SipParserError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::convert::From<Utf8Error> for SipParserError {
    fn from(value: Utf8Error) -> Self {
        SipParserError {
            message: format!("{:#?}", value),
        }
    }
}

impl std::convert::From<sipmsg_util::Error> for SipParserError {
    fn from(err: sipmsg_util::Error) -> Self {
        SipParserError {
            message: format!(
                "Failed to parse at line:{} column:{} kind:{:?}",
                err.line, err.col, err.kind,
            ),
        }
    }
}

impl std::convert::From<sipmsg_util::Error> for Error {
    fn from(err: sipmsg_util::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl std::convert::From<Utf8Error> for Error {
    fn from(value: Utf8Error) -> Self {
        Self::Parse(value.into())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] SipParserError),

    #[error("Unsupported request method '{0}'")]
    UnsupportedMethod(String),

    #[error("Unsupported transport '{0}'")]
    UnsupportedTransport(String),

    #[error("Unsupported protocol '{0}'")]
    UnsupportedProtocol(String),

    #[error("Invalid URI '{0}'")]
    InvalidUri(String),

    #[error("Invalid Via header value '{0}'")]
    InvalidVia(String),

    #[error("Invalid CSeq '{0}'")]
    InvalidCSeq(String),

    #[error("Missing required '{0}' header")]
    MissingHeader(String),

    #[error("INVITE request without a 'from' tag")]
    MissingTag,

    #[error("CSeq method {cseq} does not match request method {method}")]
    MethodMismatch { method: SipMethod, cseq: SipMethod },

    #[error("Content-Length is {expected} but the body has {actual} bytes")]
    CorruptMessage { expected: usize, actual: usize },

    #[error("Header value '{0}' has no tags")]
    NoTags(String),

    #[error("Tag '{0}' not found")]
    TagNotFound(String),

    #[error("Message has no body")]
    NoBody,

    #[error("Both body and content type must be non-empty")]
    InvalidBody,

    #[error("Max-Forwards exhausted, request would loop")]
    LoopDetected,

    #[error("Malformed request, cannot build a response without '{0}'")]
    ResponseConstruction(String),
}
