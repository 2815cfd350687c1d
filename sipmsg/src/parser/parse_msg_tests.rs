use super::*;
use crate::headers::{decrement_forwards, CSeq, SipHeaderParse, Via};
use crate::message::TransportKind;
use crate::test_utils::{invite_datagram, BYE_REQUEST, REGISTER_DATAGRAM, SDP_BODY};
use crate::{generate_branch, generate_tag, header_values, parse_message, Error};

#[test]
fn test_parse_register_with_compact_headers() {
    let msg = Parser::parse_sip_msg(REGISTER_DATAGRAM).unwrap();
    let mut req = msg.into_request().unwrap();

    assert_eq!(req.method(), SipMethod::Register);
    assert_eq!(req.uri().host(), "10.1.1.11");
    assert_eq!(req.uri().user(), None);
    assert_eq!(req.raw(), Some(REGISTER_DATAGRAM));

    for name in ["to", "from", "call-id", "via", "contact"] {
        assert!(req.has_header(name), "missing {name}");
    }

    let to: Uri = req.first_value("to").unwrap().value().parse().unwrap();
    assert_eq!(to.user(), Some("3170"));
    assert_eq!(to.host(), "10.1.1.11");
    assert_eq!(to.port(), None);

    assert_eq!(
        req.first_value("Call-ID").unwrap().value(),
        "e2d02388-01d6-0352-13c6-00e0bb36ca69"
    );

    let via = Via::from_message(&req).unwrap();
    assert_eq!(via.transport(), Some(TransportKind::Udp));
    assert_eq!(via.host(), "172.20.3.20");
    assert_eq!(via.port(), Some(5060));
    assert!(!via.is_rfc3261_compliant());

    let contact = req.first_value("m").unwrap();
    assert_eq!(contact.value(), "<sip:3170@172.20.3.20:5060>");
    assert_eq!(contact.tag("dt").unwrap(), "544");

    let info = req.first_value("x-3com-phoneinfo").unwrap();
    assert_eq!(info.value(), "firstRegistration=yes");
    assert_eq!(info.tag("primaryCallP").unwrap(), "10.1.1.11");
    assert_eq!(info.tag("secondaryCallP").unwrap(), "0.0.0.0");
    assert_eq!(info.tag("i").unwrap(), "");

    assert!(!req.has_body());

    decrement_forwards(&mut req).unwrap();
    assert_eq!(req.first_value("max-forwards").unwrap().value(), "69");
}

#[test]
fn test_parse_invite_with_body() {
    let buf = invite_datagram();
    let req = Request::parse(&buf).unwrap();

    assert_eq!(req.method(), SipMethod::Invite);
    assert_eq!(req.uri().as_naked(), "sip:bob@biloxi.com");
    assert_eq!(req.body().unwrap(), SDP_BODY);
    assert_eq!(req.first_value("content-type").unwrap().value(), "application/sdp");

    let cseq = CSeq::from_message(&req).unwrap();
    assert_eq!(cseq, CSeq::new(314159, SipMethod::Invite));

    let from = req.first_value("from").unwrap();
    assert_eq!(from.value(), "Alice <sip:alice@atlanta.com>");
    assert_eq!(from.tag("tag").unwrap(), "1928301774");
}

#[test]
fn test_parse_response() {
    let buf = concat!(
        "SIP/2.0 200 OK\r\n",
        "Via: SIP/2.0/UDP server10.biloxi.com;branch=z9hG4bKnashds8;received=192.0.2.3\r\n",
        "Via: SIP/2.0/UDP bigbox3.site3.atlanta.com;branch=z9hG4bK77ef4c2312983.1;received=192.0.2.2\r\n",
        "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds;received=192.0.2.1\r\n",
        "To: Bob <sip:bob@biloxi.com>;tag=a6c85cf\r\n",
        "From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n",
        "Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n",
        "CSeq: 314159 INVITE\r\n",
        "Contact: <sip:bob@192.0.2.4>\r\n",
        "Content-Length: 0\r\n",
        "\r\n",
    );

    let msg = parse_message(buf).unwrap();
    let res = msg.as_response().unwrap();

    assert_eq!(res.code(), 200);
    assert_eq!(res.reason(), "OK");

    let vias = res.values("via").unwrap();
    assert_eq!(vias.len(), 3);
    assert_eq!(vias[0].tag("received").unwrap(), "192.0.2.3");
    assert_eq!(vias[2].tag("branch").unwrap(), "z9hG4bK776asdhds");

    let dest = res.destination().unwrap();
    assert_eq!(dest.host, "server10.biloxi.com");
    assert_eq!(dest.port, 5060);
}

#[test]
fn test_response_has_no_mandatory_headers() {
    let res = Response::parse("SIP/2.0 100 Trying\r\n\r\n").unwrap();

    assert_eq!(res.code(), 100);
    assert!(res.headers().is_empty());
}

#[test]
fn test_multi_value_header_lines_merge() {
    let buf = concat!(
        "SIP/2.0 200 OK\r\n",
        "Route: <sip:p1.example.com;lr>, <sip:p2.example.com;lr>\r\n",
        "Subject: lunch\r\n",
        "Route: \"Proxy, Three\" <sip:p3.example.com;lr>\r\n",
        "\r\n",
    );
    let res = Response::parse(buf).unwrap();

    let names: Vec<_> = res.headers().iter().map(|h| h.name()).collect();
    assert_eq!(names, ["route", "subject"]);

    let routes = res.values("route").unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[2].value(), "\"Proxy, Three\" <sip:p3.example.com;lr>");
    assert!(!routes[2].has_tags());
}

#[test]
fn test_quoted_display_names_in_later_values() {
    let buf = concat!(
        "SIP/2.0 200 OK\r\n",
        "Contact: \"Mr. Watson\" <sip:watson@worcester.com;transport=udp>;q=0.7, ",
        "\"Mr. Watson\" <sip:watson@bell.com;transport=udp>;q=0.1\r\n",
        "Route: <sip:p1.example.com;lr>, \"Proxy; Two\" <sip:p2.example.com;lr>\r\n",
        "\r\n",
    );
    let res = Response::parse(buf).unwrap();

    let contacts = res.values("m").unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].value(), "\"Mr. Watson\" <sip:watson@worcester.com;transport=udp>");
    assert_eq!(contacts[0].tag("q").unwrap(), "0.7");
    assert_eq!(contacts[1].value(), "\"Mr. Watson\" <sip:watson@bell.com;transport=udp>");
    assert_eq!(contacts[1].tags().unwrap().len(), 1);
    assert_eq!(contacts[1].tag("q").unwrap(), "0.1");

    let uri: Uri = contacts[1].value().parse().unwrap();
    assert_eq!(uri.host(), "bell.com");
    assert_eq!(uri.params().get("transport"), Some("udp"));

    let routes = res.values("route").unwrap();
    assert_eq!(routes[1].value(), "\"Proxy; Two\" <sip:p2.example.com;lr>");
    assert!(!routes[1].has_tags());
}

#[test]
fn test_content_length_mismatch() {
    let buf = concat!(
        "SIP/2.0 200 OK\r\n",
        "Content-Length: 10\r\n",
        "\r\n",
        "hello",
    );

    assert_matches!(
        Response::parse(buf),
        Err(Error::CorruptMessage { expected: 10, actual: 5 })
    );
}

#[test]
fn test_body_without_content_length_is_ignored() {
    let res = Response::parse("SIP/2.0 200 OK\r\nSubject: x\r\n\r\nstray").unwrap();

    assert!(!res.has_body());
}

#[test]
fn test_content_length_not_a_number() {
    let buf = "SIP/2.0 200 OK\r\nContent-Length: many\r\n\r\n";

    assert_matches!(Response::parse(buf), Err(Error::Parse(_)));
}

#[test_log::test]
fn test_missing_mandatory_header() {
    let buf = BYE_REQUEST.replace("Call-ID: a84b4c76e66710\r\n", "");

    assert_matches!(
        Request::parse(&buf),
        Err(Error::MissingHeader(name)) if name == "call-id"
    );
}

#[test]
fn test_max_forwards_is_not_mandatory() {
    let buf = BYE_REQUEST.replace("Max-Forwards: 70\r\n", "");

    assert!(Request::parse(&buf).is_ok());
}

#[test_log::test]
fn test_invite_without_from_tag() {
    let buf = invite_datagram().replace(";tag=1928301774", "");

    assert_matches!(Request::parse(&buf), Err(Error::MissingTag));
}

#[test]
fn test_bye_without_from_tag_is_accepted() {
    let buf = BYE_REQUEST.replace(";tag=1928301774", "");

    assert!(Request::parse(&buf).is_ok());
}

#[test_log::test]
fn test_cseq_method_mismatch() {
    let buf = BYE_REQUEST.replace("CSeq: 231 BYE", "CSeq: 231 INVITE");

    assert_matches!(
        Request::parse(&buf),
        Err(Error::MethodMismatch {
            method: SipMethod::Bye,
            cseq: SipMethod::Invite
        })
    );
}

#[test]
fn test_invalid_cseq() {
    let buf = BYE_REQUEST.replace("CSeq: 231 BYE", "CSeq: 0 BYE");

    assert_matches!(Request::parse(&buf), Err(Error::InvalidCSeq(_)));
}

#[test]
fn test_unknown_method() {
    let buf = BYE_REQUEST.replace("BYE sip:", "JUMP sip:");

    assert_matches!(parse_message(buf), Err(Error::UnsupportedMethod(m)) if m == "JUMP");
}

#[test]
fn test_non_utf8_input() {
    let buf = b"SIP/2.0 200 OK\r\nSubject: \xff\r\n\r\n";

    assert_matches!(parse_message(buf), Err(Error::Parse(_)));
}

#[test]
fn test_request_round_trip() {
    let uri = Uri::builder().user("bob").host("biloxi.com").build();
    let via = Via::new(TransportKind::Tcp, "pc33.atlanta.com", None, Some(generate_branch()));
    let from = format!("Alice <sip:alice@atlanta.com>;tag={}", generate_tag());

    let mut req = Request::new(SipMethod::Invite, uri);
    req.set_header("Via", vec![via.to_header_value()]);
    req.set_header("To", header_values!["Bob <sip:bob@biloxi.com>"]);
    req.set_header("From", header_values![from]);
    req.set_header("Call-ID", header_values!["a84b4c76e66710@pc33.atlanta.com"]);
    req.set_header("CSeq", vec![CSeq::new(1, SipMethod::Invite).to_header_value()]);
    req.set_header("Max-Forwards", header_values!["70"]);
    req.set_header(
        "Contact",
        header_values![
            "\"Alice A.\" <sip:alice@pc33.atlanta.com;transport=tcp>;q=0.7",
            "\"Alice; Mobile\" <sip:alice@mobile.atlanta.com;transport=udp>;expires=60",
        ],
    );
    req.set_header("X-Empty", header_values![""]);
    req.set_body(SDP_BODY, "application/sdp").unwrap();

    let wire = req.to_string();
    let parsed = Request::parse(&wire).unwrap();

    assert_eq!(parsed.method(), req.method());
    assert_eq!(parsed.uri().as_naked(), req.uri().as_naked());
    assert_eq!(parsed.body().unwrap(), SDP_BODY);
    for header in req.headers().iter().filter(|h| h.name() != "x-empty") {
        assert_eq!(parsed.values(header.name()).unwrap(), header.values(), "{}", header.name());
    }
    assert!(!parsed.has_header("x-empty"));
    assert_eq!(parsed.values("contact").unwrap()[1].tag("expires").unwrap(), "60");
    assert_eq!(parsed.to_string(), wire);
}

#[test]
fn test_response_round_trip() {
    let req = Request::parse(BYE_REQUEST).unwrap();
    let res = Response::from_request(200, "OK", &req).unwrap();

    let wire = res.to_string();
    let parsed = parse_message(&wire).unwrap().into_response().unwrap();

    assert_eq!(parsed.code(), 200);
    assert_eq!(parsed.reason(), "OK");
    assert_eq!(parsed.to_string(), wire);
}

#[test]
fn test_parsed_message_serializes_canonically() {
    let req = Request::parse(BYE_REQUEST).unwrap();

    assert_eq!(
        req.to_string(),
        concat!(
            "BYE sip:bob@192.0.2.4 SIP/2.0\r\n",
            "via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds10\r\n",
            "max-forwards: 70\r\n",
            "from: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n",
            "to: Bob <sip:bob@biloxi.com>;tag=a6c85cf\r\n",
            "call-id: a84b4c76e66710\r\n",
            "cseq: 231 BYE\r\n",
            "content-length: 0\r\n",
            "\r\n",
        )
    );
}
