use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::headers::{HeaderValue, SipHeaderParse, CSEQ};
use crate::message::SipMethod;

/// The `CSeq` SIP header.
///
/// Ensures order and tracking of SIP transactions within a session.
///
/// # Examples
///
/// ```
/// use sipmsg::headers::CSeq;
/// use sipmsg::message::SipMethod;
///
/// let cseq: CSeq = "3 REGISTER".parse().unwrap();
///
/// assert_eq!(cseq.cseq(), 3);
/// assert_eq!(cseq.method(), SipMethod::Register);
/// assert_eq!(cseq.increment().to_string(), "4 REGISTER");
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CSeq {
    cseq: u32,
    method: SipMethod,
}

impl CSeq {
    /// Creates a new `CSeq` instance.
    pub const fn new(cseq: u32, method: SipMethod) -> Self {
        Self { cseq, method }
    }

    pub fn cseq(&self) -> u32 {
        self.cseq
    }

    pub fn method(&self) -> SipMethod {
        self.method
    }

    /// Next sequence number for the same method.
    pub fn increment(&self) -> Self {
        Self::new(self.cseq.saturating_add(1), self.method)
    }

    pub fn to_header_value(&self) -> HeaderValue {
        HeaderValue::new(self.to_string())
    }
}

impl SipHeaderParse for CSeq {
    const NAME: &'static str = CSEQ;
    /*
     * CSeq  =  "CSeq" HCOLON 1*DIGIT LWS Method
     */
    fn parse(hv: &HeaderValue) -> Result<Self> {
        hv.value().parse()
    }
}

impl FromStr for CSeq {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidCSeq(s.to_string());

        let (cseq, method) = s.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let cseq: i64 = cseq.parse().map_err(|_| invalid())?;
        if cseq <= 0 {
            return Err(invalid());
        }
        let cseq = u32::try_from(cseq).map_err(|_| invalid())?;
        let method = method.trim_start().parse::<SipMethod>()?;

        Ok(Self { cseq, method })
    }
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.cseq, self.method)
    }
}
