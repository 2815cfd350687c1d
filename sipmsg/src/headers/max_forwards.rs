use sipmsg_util::Scanner;

use crate::error::{Error, Result};
use crate::headers::MAX_FORWARDS;
use crate::message::Message;

/// Decrements the `Max-Forwards` of a message before forwarding it.
///
/// Does nothing when the header is absent. Fails with
/// [`Error::LoopDetected`], leaving the message untouched, when the
/// decremented value would be negative.
///
/// # Examples
///
/// ```
/// use sipmsg::headers::decrement_forwards;
/// use sipmsg::message::Message;
/// use sipmsg::header_values;
///
/// let mut msg = Message::new();
/// msg.set_header("Max-Forwards", header_values!["70"]);
///
/// decrement_forwards(&mut msg).unwrap();
/// assert_eq!(msg.first_value("max-forwards").unwrap().value(), "69");
/// ```
pub fn decrement_forwards(msg: &mut Message) -> Result<()> {
    if !msg.has_header(MAX_FORWARDS) {
        return Ok(());
    }

    let value = msg.first_value_mut(MAX_FORWARDS)?;
    let forwards = Scanner::new(value.value().trim().as_bytes()).read_num::<i64>()?.saturating_sub(1);
    if forwards < 0 {
        log::warn!("Max-Forwards exhausted, refusing to forward");
        return Err(Error::LoopDetected);
    }
    value.set_value(forwards.to_string());

    Ok(())
}
