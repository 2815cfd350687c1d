//! Shared message fixtures for unit tests.

use crate::message::Request;

/// A REGISTER from a hardware phone, with compact header names
/// and no `Content-Length`.
pub const REGISTER_DATAGRAM: &str = concat!(
    "REGISTER sip:10.1.1.11 SIP/2.0\r\n",
    "v: SIP/2.0/UDP 172.20.3.20:5060\r\n",
    "t: <sip:3170@10.1.1.11>\r\n",
    "f: <sip:3170@10.1.1.11>\r\n",
    "i: e2d02388-01d6-0352-13c6-00e0bb36ca69\r\n",
    "CSeq: 3 REGISTER\r\n",
    "Max-Forwards: 70\r\n",
    "m: <sip:3170@172.20.3.20:5060>;dt=544\r\n",
    "Expires: 3600\r\n",
    "User-Agent: 3Com-SIP-Phone/V7.1.53.53\r\n",
    "X-3Com-PhoneInfo: firstRegistration=yes; primaryCallP=10.1.1.11; secondaryCallP=0.0.0.0;i\r\n",
    "\r\n",
);

pub const BYE_REQUEST: &str = concat!(
    "BYE sip:bob@192.0.2.4 SIP/2.0\r\n",
    "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds10\r\n",
    "Max-Forwards: 70\r\n",
    "From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n",
    "To: Bob <sip:bob@biloxi.com>;tag=a6c85cf\r\n",
    "Call-ID: a84b4c76e66710\r\n",
    "CSeq: 231 BYE\r\n",
    "Content-Length: 0\r\n",
    "\r\n",
);

pub const SDP_BODY: &str = concat!(
    "v=0\r\n",
    "o=alice 2890844526 2890844526 IN IP4 pc33.atlanta.com\r\n",
    "s=-\r\n",
    "c=IN IP4 192.0.2.101\r\n",
    "t=0 0\r\n",
    "m=audio 49172 RTP/AVP 0\r\n",
    "a=rtpmap:0 PCMU/8000\r\n",
);

/// An INVITE carrying [`SDP_BODY`], with a correct `Content-Length`.
pub fn invite_datagram() -> String {
    format!(
        concat!(
            "INVITE sip:bob@biloxi.com SIP/2.0\r\n",
            "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n",
            "Max-Forwards: 70\r\n",
            "To: Bob <sip:bob@biloxi.com>\r\n",
            "From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n",
            "Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n",
            "CSeq: 314159 INVITE\r\n",
            "Contact: <sip:alice@pc33.atlanta.com>\r\n",
            "Content-Type: application/sdp\r\n",
            "Content-Length: {}\r\n",
            "\r\n",
            "{}",
        ),
        SDP_BODY.len(),
        SDP_BODY
    )
}

pub fn invite_request() -> Request {
    Request::parse(&invite_datagram()).unwrap()
}
