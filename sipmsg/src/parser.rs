//! SIP Parser
//!
//! The module provides [`Parser`] struct for parsing SIP messages, including
//! requests and responses, as well as the grammars shared by header values
//! and URIs: the `;tag` micro-grammar and the quote-aware value splitter.

use std::str;

use sipmsg_util::util::{is_space, is_whitespace};
use sipmsg_util::{digits, space, until, until_newline, Scanner};

use crate::headers::{HeaderValue, Headers, CONTENT_LENGTH};
use crate::macros::{lookup_table, parse_error};
use crate::message::{Message, Params, Request, Response, SipMethod, SipMsg, Uri};
use crate::Result;

// ---------------------------------------------------------------------
// Parser constants
// ---------------------------------------------------------------------
/// Alphanumeric is valid in all sip message components.
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// The SIP version used in the parser.
pub(crate) const SIPV2: &str = "SIP/2.0";

const B_SIPV2: &[u8] = SIPV2.as_bytes();

const CRLF: &[u8] = b"\r\n";

const HEADERS_END: &str = "\r\n\r\n";

// ---------------------------------------------------------------------
// Lookup Tables
// ---------------------------------------------------------------------
// For reading methods and URI schemes.
lookup_table!(WORD_TAB => ALPHANUMERIC, b"_");
// For reading header names (RFC 3261 token).
lookup_table!(HDR_NAME_TAB => ALPHANUMERIC, b"-.!%*_+`'~");

/// A SIP message parser.
///
/// This struct provides methods for parsing the start lines, the header
/// section and the URIs of SIP messages.
pub struct Parser<'buf> {
    /// The whole input buffer.
    buf: &'buf [u8],
    /// The scanner used to read the input buffer.
    scanner: Scanner<'buf>,
}

impl<'buf> Parser<'buf> {
    /// Creates a new `Parser` from the given byte slice.
    #[inline]
    pub fn new<B>(buf: &'buf B) -> Self
    where
        B: AsRef<[u8]> + ?Sized,
    {
        let buf = buf.as_ref();

        Self {
            buf,
            scanner: Scanner::new(buf),
        }
    }

    /// Parses the `buf` into a [`SipMsg`].
    ///
    /// This is equivalent to `Parser::new(buf).parse()`.
    #[inline]
    pub fn parse_sip_msg<B>(buf: &'buf B) -> Result<SipMsg>
    where
        B: AsRef<[u8]> + ?Sized,
    {
        Self::new(buf.as_ref()).parse()
    }

    /// Parses the internal buffer into a [`SipMsg`].
    ///
    /// A start line beginning with `SIP/2.0` is a response, anything
    /// else is parsed as a request.
    ///
    /// # Examples
    ///
    /// ```
    /// use sipmsg::parser::Parser;
    ///
    /// let buf = b"SIP/2.0 200 OK\r\nContent-Length: 0\r\n\r\n";
    /// let msg = Parser::new(buf).parse().unwrap();
    /// let res = msg.as_response().unwrap();
    ///
    /// assert_eq!(res.code(), 200);
    /// assert_eq!(res.reason(), "OK");
    /// ```
    pub fn parse(&mut self) -> Result<SipMsg> {
        let (ws, _) = self.scanner.peek_while(is_whitespace);

        if self.buf[ws.len()..].starts_with(B_SIPV2) {
            Ok(SipMsg::Response(self.parse_response()?))
        } else {
            Ok(SipMsg::Request(self.parse_request()?))
        }
    }

    /// Parses and validates a SIP request.
    pub fn parse_request(&mut self) -> Result<Request> {
        let raw = str::from_utf8(self.buf)?;
        let (method, uri) = self.parse_request_line()?;
        let (headers, body) = self.parse_headers()?;

        let request = Request::from_parts(method, uri, Message::from_parts(headers, body, Some(raw)));
        request.validate()?;

        Ok(request)
    }

    /// Parses a SIP response. No header is mandatory in a response.
    pub fn parse_response(&mut self) -> Result<Response> {
        let raw = str::from_utf8(self.buf)?;
        let (code, reason) = self.parse_status_line()?;
        let (headers, body) = self.parse_headers()?;

        Ok(Response::from_parts(
            code,
            reason,
            Message::from_parts(headers, body, Some(raw)),
        ))
    }

    /// Parses `METHOD <ws> sip(s):URI <ws> SIP/2.0\r\n`.
    pub(crate) fn parse_request_line(&mut self) -> Result<(SipMethod, Uri)> {
        self.scanner.read_while(is_whitespace);

        let method = self.read_str(|b| WORD_TAB[b as usize])?;
        if method.is_empty() || self.scanner.consume_if(is_space).is_none() {
            return parse_error!("Invalid request line", self.scanner);
        }

        let uri = self.read_str(|b| !is_whitespace(b))?;
        if !(uri.starts_with("sip:") || uri.starts_with("sips:")) {
            return parse_error!("Request URI must be a sip(s) URI", self.scanner);
        }
        if self.scanner.consume_if(is_space).is_none() {
            return parse_error!("Invalid request line", self.scanner);
        }
        self.scanner.must_read_bytes(B_SIPV2)?;
        self.scanner.must_read_bytes(CRLF)?;

        let method = method.parse::<SipMethod>()?;
        let uri = uri.parse::<Uri>()?;
        log::trace!("Request line: {} {}", method, uri.as_naked());

        Ok((method, uri))
    }

    /// Parses `SIP/2.0 <3 digits> <reason>\r\n`.
    pub(crate) fn parse_status_line(&mut self) -> Result<(u16, String)> {
        self.scanner.read_while(is_whitespace);
        self.scanner.must_read_bytes(B_SIPV2)?;

        if self.scanner.consume_if(is_space).is_none() {
            return parse_error!("Invalid status line", self.scanner);
        }
        let digits = digits!(self.scanner);
        if digits.len() != 3 {
            return parse_error!("Invalid status code", self.scanner);
        }
        let code = Scanner::new(digits).read_num::<u16>()?;

        if self.scanner.consume_if(is_space).is_none() {
            return parse_error!("Invalid status line", self.scanner);
        }
        let reason = str::from_utf8(until_newline!(self.scanner))?;
        self.scanner.must_read_bytes(CRLF)?;
        log::trace!("Status line: {} {}", code, reason);

        Ok((code, reason.to_string()))
    }

    /// Parses everything after the start line.
    ///
    /// `content-length` is the only body delimiter: without it, or when
    /// it is zero, whatever follows the headers is ignored.
    pub(crate) fn parse_headers(&mut self) -> Result<(Headers, Option<String>)> {
        let rest = str::from_utf8(self.scanner.remaining())?;
        let (head, candidate_body) = match rest.find(HEADERS_END) {
            Some(idx) => (&rest[..idx], &rest[idx + HEADERS_END.len()..]),
            None => (rest, ""),
        };

        let mut headers = Headers::new();
        for line in header_lines(head) {
            let mut scanner = Scanner::new(line.as_bytes());

            let name = scanner.read_while(|b| HDR_NAME_TAB[b as usize]);
            space!(scanner);
            if name.is_empty() || scanner.must_read(b':').is_err() {
                log::trace!("Skipping non header line: {:?}", line);
                continue;
            }
            space!(scanner);

            let name = str::from_utf8(name)?;
            let values: Vec<HeaderValue> = split_values(str::from_utf8(scanner.remaining())?)
                .iter()
                .map(|element| HeaderValue::parse(element))
                .collect();

            log::trace!("Parsed header '{}' with {} value(s)", name, values.len());
            if !values.is_empty() {
                headers.push(name, values);
            }
        }
        self.scanner.read_while(|_| true);

        let body = read_body(&headers, candidate_body)?;

        Ok((headers, body))
    }

    /// Parses `[display-name] <scheme:[user@]host[:port][;params][?headers]>[;params]`.
    pub(crate) fn parse_bracketed_uri(&mut self) -> Result<Uri> {
        let display_name = match self.scanner.peek() {
            Some(b'"') => {
                self.scanner.next();
                let name = str::from_utf8(until!(self.scanner, b'"'))?;
                self.scanner.must_read(b'"')?;
                Some(name)
            }
            _ => Some(self.read_str(|b| b != b'<' && b != b'"')?),
        };
        self.scanner.read_while(is_whitespace);
        self.scanner.must_read(b'<')?;

        let mut uri = self.parse_addr(true)?;
        self.scanner.must_read(b'>')?;

        // Header parameters after the closing bracket,
        // as in `<sip:3170@172.20.3.20:5060>;dt=544`.
        self.scanner.read_while(is_whitespace);
        while self.scanner.consume_if(|b| b == b';').is_some() {
            let group = self.read_str(|b| b != b';' && b != b'?')?;
            if group.is_empty() {
                return parse_error!("Empty URI parameter", self.scanner);
            }
            insert_param(&mut uri.params, group);
        }
        if !self.scanner.is_eof() {
            return parse_error!("Unexpected data after URI", self.scanner);
        }

        uri.display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from);

        Ok(uri)
    }

    /// Parses `scheme:[user@]host[:port][;params][?headers]`.
    pub(crate) fn parse_naked_uri(&mut self) -> Result<Uri> {
        let uri = self.parse_addr(false)?;

        if !self.scanner.is_eof() {
            return parse_error!("Unexpected data after URI", self.scanner);
        }

        Ok(uri)
    }

    fn parse_addr(&mut self, in_brackets: bool) -> Result<Uri> {
        let scheme = self.read_str(|b| WORD_TAB[b as usize])?;
        if scheme.is_empty() {
            return parse_error!("Missing URI scheme", self.scanner);
        }
        self.scanner.must_read(b':')?;

        let (user, next) = self.scanner.peek_while(|b| !matches!(b, b'<' | b'>' | b'@' | b';' | b'?'));
        let user = if next == Some(b'@') && !user.is_empty() {
            let user = self.read_str(|b| b != b'@')?;
            self.scanner.must_read(b'@')?;
            Some(user.to_string())
        } else {
            None
        };

        let host = self.read_str(|b| !matches!(b, b'<' | b'>' | b';' | b':' | b'?') && !is_whitespace(b))?;
        if host.is_empty() {
            return parse_error!("Missing URI host", self.scanner);
        }

        let port = if self.scanner.consume_if(|b| b == b':').is_some() {
            Some(self.scanner.read_num::<u16>()?)
        } else {
            None
        };

        let mut params = Params::new();
        while self.scanner.consume_if(|b| b == b';').is_some() {
            let group = self.read_str(|b| b != b';' && b != b'?' && !(in_brackets && b == b'>'))?;
            if group.is_empty() {
                return parse_error!("Empty URI parameter", self.scanner);
            }
            insert_param(&mut params, group);
        }

        let headers = if self.scanner.consume_if(|b| b == b'?').is_some() {
            let headers = self.read_str(|b| !(in_brackets && b == b'>'))?;
            if headers.is_empty() {
                return parse_error!("Empty URI headers", self.scanner);
            }
            Some(headers.to_string())
        } else {
            None
        };

        Ok(Uri {
            display_name: None,
            scheme: scheme.to_string(),
            user,
            host: host.to_string(),
            port,
            params,
            headers,
        })
    }

    fn read_str<F>(&mut self, func: F) -> Result<&'buf str>
    where
        F: Fn(u8) -> bool,
    {
        let bytes = self.scanner.read_while(func);

        Ok(str::from_utf8(bytes)?)
    }
}

fn read_body(headers: &Headers, candidate: &str) -> Result<Option<String>> {
    let Some(clen) = headers.get(CONTENT_LENGTH).and_then(|h| h.values().first()) else {
        return Ok(None);
    };

    let expected = Scanner::new(clen.value().as_bytes()).read_num::<i64>()?;
    if expected <= 0 {
        return Ok(None);
    }

    let expected = expected as usize;
    if candidate.len() != expected {
        return Err(crate::Error::CorruptMessage {
            expected,
            actual: candidate.len(),
        });
    }

    Ok(Some(candidate.to_string()))
}

/// Splits the header section into header lines.
///
/// A line ends at a `CRLF` immediately followed by a word character;
/// any other `CRLF` stays inside the value.
fn header_lines(head: &str) -> Vec<&str> {
    let bytes = head.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut idx = 0;

    while idx + 2 < bytes.len() {
        if bytes[idx] == b'\r' && bytes[idx + 1] == b'\n' && WORD_TAB[bytes[idx + 2] as usize] {
            lines.push(&head[start..idx]);
            start = idx + 2;
            idx += 2;
        } else {
            idx += 1;
        }
    }
    lines.push(&head[start..]);

    lines
}

/// Splits a raw header value on top-level commas.
///
/// A double quote toggles the "inside quotes" state, commas inside
/// quotes are literal. CR and LF are removed first and a trailing empty
/// element is dropped. Elements are not trimmed.
///
/// # Examples
///
/// ```
/// use sipmsg::parser::split_values;
///
/// let values = split_values(r#""Doe, John" <sip:j@a.com>, <sip:b@a.com>"#);
///
/// assert_eq!(values, [r#""Doe, John" <sip:j@a.com>"#, " <sip:b@a.com>"]);
/// ```
pub fn split_values(raw: &str) -> Vec<String> {
    let cleaned: String = raw.chars().filter(|&c| c != '\r' && c != '\n').collect();
    let mut elements = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, c) in cleaned.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                elements.push(cleaned[start..idx].to_string());
                start = idx + 1;
            }
            _ => (),
        }
    }
    if start < cleaned.len() {
        elements.push(cleaned[start..].to_string());
    }

    elements
}

/// Splits a header element into its value and its trailing tags.
///
/// `;` inside a bracketed URI (`[display] <...>`) never starts a tag.
/// An unmatched `<` makes the whole element an opaque value.
pub(crate) fn split_tags(raw: &str) -> (&str, Option<Params>) {
    let offset = match uri_bracket(raw) {
        Some(lt) => match raw[lt..].find('>') {
            Some(gt) => lt + gt,
            None => {
                log::debug!("Unmatched '<' in {:?}, no tags parsed", raw);
                return (raw, None);
            }
        },
        None => 0,
    };

    let tail = &raw[offset..];
    let (start, end) = tag_area(tail);
    if start == end {
        return (raw, None);
    }

    let mut tags = Params::new();
    for group in tail[start..end].split(';').filter(|g| !g.is_empty()) {
        insert_param(&mut tags, group);
    }

    (&raw[..offset + start], Some(tags))
}

/// Index of the `<` opening an embedded URI, if `raw` starts with
/// an optional quoted or unquoted display name followed by `<`.
fn uri_bracket(raw: &str) -> Option<usize> {
    let lead = raw.len() - raw.trim_start().len();

    if let Some(quoted) = raw[lead..].strip_prefix('"') {
        let close = lead + quoted.find('"')? + 2;
        let after = &raw[close..];
        let lt = close + (after.len() - after.trim_start().len());

        return raw[lt..].starts_with('<').then_some(lt);
    }

    let idx = raw.find(['<', '"'])?;
    (raw.as_bytes()[idx] == b'<').then_some(idx)
}

/// Locates the leftmost suffix of `tail` made of `;`-groups
/// (free of `;` and `?`), optionally followed by `?anything`.
///
/// Returns the bounds of the groups, excluding the `?` part.
fn tag_area(tail: &str) -> (usize, usize) {
    let candidates = tail
        .bytes()
        .enumerate()
        .filter(|&(_, b)| b == b';' || b == b'?')
        .map(|(idx, _)| idx);

    for start in candidates {
        if let Some(len) = match_tag_groups(&tail.as_bytes()[start..]) {
            return (start, start + len);
        }
    }

    (tail.len(), tail.len())
}

fn match_tag_groups(src: &[u8]) -> Option<usize> {
    let mut idx = 0;

    loop {
        match src.get(idx) {
            None | Some(b'?') => return Some(idx),
            Some(b';') => {
                let run = src[idx + 1..]
                    .iter()
                    .take_while(|&&b| b != b';' && b != b'?')
                    .count();
                if run == 0 {
                    return None;
                }
                idx += 1 + run;
            }
            _ => return None,
        }
    }
}

/// Inserts a `name[=value]` group; a group without a name is ignored.
fn insert_param(params: &mut Params, group: &str) {
    let (name, value) = group.split_once('=').unwrap_or((group, ""));
    let name = name.trim();

    if !name.is_empty() {
        params.insert(name, value.trim());
    }
}

#[cfg(test)]
mod parse_msg_tests;
