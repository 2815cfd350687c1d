use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::message::Uri;

/// Port used when a destination does not name one.
pub const DEFAULT_PORT: u16 = 5060;

/// Largest datagram a transport is expected to hand to the parser.
pub const MAX_DATAGRAM_SIZE: usize = 2048;

const TP_UDP: &str = "UDP";
const TP_TCP: &str = "TCP";
const TP_TLS: &str = "TLS";
const TP_SCTP: &str = "SCTP";

const SIP_SCHEME: &str = "sip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// An SIP Transport Type.
pub enum TransportKind {
    #[default]
    /// `UDP` transport.
    Udp,
    /// `TCP` transport.
    Tcp,
    /// `TLS` transport.
    Tls,
    /// `SCTP` transport.
    Sctp,
}

impl TransportKind {
    /// Returns the transport string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Udp => TP_UDP,
            TransportKind::Tcp => TP_TCP,
            TransportKind::Tls => TP_TLS,
            TransportKind::Sctp => TP_SCTP,
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = Error;

    /// Only the uppercase wire tokens are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            TP_UDP => Ok(TransportKind::Udp),
            TP_TCP => Ok(TransportKind::Tcp),
            TP_TLS => Ok(TransportKind::Tls),
            TP_SCTP => Ok(TransportKind::Sctp),
            other => Err(Error::UnsupportedTransport(other.to_string())),
        }
    }
}

/// Where an outbound message should be sent.
///
/// Resolved from a request URI or from the top `Via` of a response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

impl TryFrom<&Uri> for Destination {
    type Error = Error;

    fn try_from(uri: &Uri) -> Result<Self> {
        if uri.scheme() != SIP_SCHEME {
            return Err(Error::UnsupportedProtocol(uri.scheme().to_string()));
        }
        if uri.host().is_empty() {
            return Err(Error::InvalidUri(uri.to_string()));
        }

        Ok(Destination {
            host: uri.host().to_string(),
            port: uri.port().unwrap_or(DEFAULT_PORT),
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
