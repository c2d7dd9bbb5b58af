pub mod fixtures;

use samudra::Reply;

/// Short label per reply, for asserting on the shape of a turn.
pub fn reply_kinds(replies: &[Reply]) -> Vec<&'static str> {
    replies
        .iter()
        .map(|reply| match reply {
            Reply::Text(_) => "text",
            Reply::Warning(_) => "warning",
            Reply::Chart(_) => "chart",
            Reply::Table(_) => "table",
        })
        .collect()
}

/// Text of the last plain-text reply.
pub fn last_text(replies: &[Reply]) -> &str {
    replies
        .iter()
        .rev()
        .find_map(|reply| match reply {
            Reply::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .expect("turn produced no text reply")
}
