use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// An SIP Method.
///
/// This enum declares SIP methods as described by RFC3261 and Others.
pub enum SipMethod {
    /// SIP REGISTER Method.
    Register,
    /// SIP INVITE Method.
    Invite,
    /// SIP SUBSCRIBE Method.
    Subscribe,
    /// SIP PUBLISH Method.
    Publish,
    /// SIP ACK Method.
    Ack,
    /// SIP PRACK Method.
    Prack,
    /// SIP CANCEL Method.
    Cancel,
    /// SIP BYE Method.
    Bye,
    /// SIP OPTIONS Method.
    Options,
    /// SIP MESSAGE Method.
    Message,
    /// SIP REFER Method.
    Refer,
    /// SIP NOTIFY Method.
    Notify,
    /// SIP INFO Method.
    Info,
    /// SIP FEATURE Method.
    Feature,
    /// SIP UPDATE Method.
    Update,
}

impl SipMethod {
    /// Returns the byte representation of a method.
    pub fn as_bytes(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    pub fn is_invite(&self) -> bool {
        matches!(self, Self::Invite)
    }

    /// Returns the string representation of a method.
    #[inline(always)]
    pub fn as_str(&self) -> &'static str {
        match self {
            SipMethod::Register => "REGISTER",
            SipMethod::Invite => "INVITE",
            SipMethod::Subscribe => "SUBSCRIBE",
            SipMethod::Publish => "PUBLISH",
            SipMethod::Ack => "ACK",
            SipMethod::Prack => "PRACK",
            SipMethod::Cancel => "CANCEL",
            SipMethod::Bye => "BYE",
            SipMethod::Options => "OPTIONS",
            SipMethod::Message => "MESSAGE",
            SipMethod::Refer => "REFER",
            SipMethod::Notify => "NOTIFY",
            SipMethod::Info => "INFO",
            SipMethod::Feature => "FEATURE",
            SipMethod::Update => "UPDATE",
        }
    }
}

impl FromStr for SipMethod {
    type Err = Error;

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s.to_ascii_uppercase().as_str() {
            "REGISTER" => SipMethod::Register,
            "INVITE" => SipMethod::Invite,
            "SUBSCRIBE" => SipMethod::Subscribe,
            "PUBLISH" => SipMethod::Publish,
            "ACK" => SipMethod::Ack,
            "PRACK" => SipMethod::Prack,
            "CANCEL" => SipMethod::Cancel,
            "BYE" => SipMethod::Bye,
            "OPTIONS" => SipMethod::Options,
            "MESSAGE" => SipMethod::Message,
            "REFER" => SipMethod::Refer,
            "NOTIFY" => SipMethod::Notify,
            "INFO" => SipMethod::Info,
            "FEATURE" => SipMethod::Feature,
            "UPDATE" => SipMethod::Update,
            _ => return Err(Error::UnsupportedMethod(s.to_string())),
        };

        Ok(method)
    }
}

impl fmt::Display for SipMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
