use std::fmt;
use std::str::{self, FromStr};

use sipmsg_util::util::{is_whitespace, is_word};
use sipmsg_util::{digits, Scanner};

use crate::error::{Error, Result};
use crate::headers::{random_token, HeaderValue, SipHeaderParse, VIA};
use crate::message::TransportKind;

/// Prefix of every RFC 3261 branch.
pub const MAGIC_COOKIE: &str = "z9hG4bK";
/// Length of the random part of a generated branch.
pub const BRANCH_RANDOM_LEN: usize = 10;

const BRANCH_PARAM: &str = "branch";
const VIA_PROTOCOL: &str = "SIP/2.0/";

/// Generates an RFC 3261 compliant branch: the magic cookie
/// followed by random lowercase letters.
pub fn generate_branch() -> String {
    format!("{}{}", MAGIC_COOKIE, random_token(BRANCH_RANDOM_LEN))
}

/// The `Via` SIP header.
///
/// Indicates the path taken by the request so far and the
/// path that should be followed in routing responses.
///
/// # Examples
///
/// ```
/// use sipmsg::headers::Via;
/// use sipmsg::message::TransportKind;
///
/// let via: Via = "SIP/2.0/TCP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds"
///     .parse()
///     .unwrap();
///
/// assert_eq!(via.transport(), Some(TransportKind::Tcp));
/// assert_eq!(via.port(), Some(5060));
/// assert!(via.is_rfc3261_compliant());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Via {
    transport: Option<TransportKind>,
    host: String,
    port: Option<u16>,
    branch: Option<String>,
    rfc3261_compliant: bool,
}

impl Via {
    pub fn new(transport: TransportKind, host: &str, port: Option<u16>, branch: Option<String>) -> Self {
        let rfc3261_compliant = branch.as_deref().is_some_and(|b| b.starts_with(MAGIC_COOKIE));

        Self {
            transport: Some(transport),
            host: host.to_string(),
            port,
            branch,
            rfc3261_compliant,
        }
    }

    pub fn transport(&self) -> Option<TransportKind> {
        self.transport
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// `true` when the branch starts with [`MAGIC_COOKIE`].
    pub fn is_rfc3261_compliant(&self) -> bool {
        self.rfc3261_compliant
    }

    /// The value with its `branch` tag, ready to go into a message.
    pub fn to_header_value(&self) -> HeaderValue {
        let mut value = HeaderValue::new(self.to_string());
        if let Some(branch) = &self.branch {
            value.add_tag(BRANCH_PARAM, branch.as_str());
        }
        value
    }
}

impl SipHeaderParse for Via {
    const NAME: &'static str = VIA;
    /*
     * via-parm  =  sent-protocol LWS sent-by *( SEMI via-params )
     * sent-by   =  host [ COLON port ]
     */
    fn parse(hv: &HeaderValue) -> Result<Self> {
        let value = hv.value();
        let invalid = || Error::InvalidVia(value.to_string());

        let rest = value.strip_prefix(VIA_PROTOCOL).ok_or_else(invalid)?;
        let mut scanner = Scanner::new(rest.as_bytes());

        let transport = scanner.read_while(is_word);
        if transport.is_empty() || scanner.consume_if(is_whitespace).is_none() {
            return Err(invalid());
        }
        scanner.read_while(is_whitespace);

        let host = scanner.read_while(|b| !matches!(b, b':' | b'?' | b'<' | b'>' | b';') && !is_whitespace(b));
        if host.is_empty() {
            return Err(invalid());
        }

        let mut port = None;
        if scanner.consume_if(|b| b == b':').is_some() {
            let digits = digits!(scanner);
            if !digits.is_empty() {
                port = Some(Scanner::new(digits).read_num::<u16>().map_err(|_| invalid())?);
            }
        }

        let transport = str::from_utf8(transport)?.parse::<TransportKind>()?;
        let host = str::from_utf8(host)?.to_string();

        let branch = match hv.tag(BRANCH_PARAM) {
            Ok(branch) if branch.starts_with(MAGIC_COOKIE) => Some(branch.to_string()),
            Ok(branch) => {
                log::debug!("Via branch '{}' is not RFC 3261 compliant", branch);
                None
            }
            Err(_) => {
                log::debug!("Via without branch: {}", value);
                None
            }
        };

        Ok(Via {
            transport: Some(transport),
            host,
            port,
            rfc3261_compliant: branch.is_some(),
            branch,
        })
    }
}

impl FromStr for Via {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(&HeaderValue::parse(s))
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            VIA_PROTOCOL,
            self.transport.unwrap_or_default(),
            self.host
        )?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}
