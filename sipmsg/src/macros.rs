macro_rules! lookup_table {
    ($name:ident => $( $slice:expr ),+) => {
        const $name: [bool; 256] = {
            let mut arr = [false; 256];
            $(
                let mut i = 0;
                while i < $slice.len() {
                    arr[$slice[i] as usize] = true;
                    i += 1;
                }
            )*
            arr
        };
    };
}

macro_rules! parse_error {
    ($message:expr) => {
        Err($crate::error::Error::Parse($crate::error::SipParserError::new(
            $message,
        )))
    };
    ($message:expr, $scanner:expr) => {{
        let pos = $scanner.position();
        Err($crate::error::Error::Parse($crate::error::SipParserError::new(
            format!("{} (line:{} column:{})", $message, pos.line(), pos.col()),
        )))
    }};
}

/// Builds a `Vec<HeaderValue>` from anything convertible into one.
///
/// ```
/// use sipmsg::header_values;
///
/// let values = header_values!["<sip:bob@biloxi.com>;tag=1928301774"];
/// assert!(values[0].has_tag("tag"));
/// ```
#[macro_export]
macro_rules! header_values {
    () => (
        Vec::<$crate::headers::HeaderValue>::new()
    );
    ($($x:expr),+ $(,)?) => (
        vec![$($crate::headers::HeaderValue::from($x)),+]
    );
}

pub use header_values;
pub(crate) use lookup_table;
pub(crate) use parse_error;
