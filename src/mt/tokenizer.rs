//! Block-4 tokenizer: splits an MT message body into an ordered sequence of
//! `(tag, value)` pairs, folding continuation lines into the preceding tag's
//! value (SPEC_FULL §4.1).

use super::fields::split_tag;

/// A single decoded tag/value pair. `value` may contain embedded `\n` when the
/// source had continuation lines (tag 86 in particular).
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedField {
    pub tag: String,
    pub value: String,
}

/// Tokenize a block-4 body into its tagged fields, in source order.
///
/// A line that doesn't open a new `:nn[a]:` tag is a continuation of the
/// previous tag's value; lines are CRLF- or LF-terminated (SPEC_FULL §6.1).
pub fn tokenize(body: &str) -> Vec<TaggedField> {
    let mut fields: Vec<TaggedField> = Vec::new();
    for raw_line in body.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        match split_tag(line) {
            Some((tag, rest)) => fields.push(TaggedField {
                tag: tag.to_string(),
                value: rest.to_string(),
            }),
            None => {
                if let Some(last) = fields.last_mut() {
                    last.value.push('\n');
                    last.value.push_str(line);
                }
            }
        }
    }
    fields
}
