//! Repairing the JavaScript object literal into strict JSON.
//!
//! The embedded literal's only irregularity is bare identifiers in key
//! position; every value is already a well-formed JSON literal. A global
//! textual substitution of each key spelling would also rewrite matching
//! text inside values, so the repair is a single-pass scanner that tracks
//! string state and container nesting and quotes identifiers only where a
//! key can actually occur.

use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Clone, Copy)]
enum Frame {
    Object { expecting_key: bool },
    Array,
}

/// Quote every bare identifier standing in key position, leaving all other
/// text untouched.
///
/// Key positions are: directly after `{`, and after a `,` inside an object,
/// up to the next `:`. Already-quoted keys pass through the string state
/// unchanged, which makes the repair idempotent.
pub fn quote_object_keys(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 64);
    let mut stack: Vec<Frame> = Vec::new();
    let mut chars = literal.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        match c {
            '"' => {
                out.push(c);
                copy_string_body(&mut chars, &mut out);
            }
            '{' => {
                out.push(c);
                stack.push(Frame::Object {
                    expecting_key: true,
                });
            }
            '[' => {
                out.push(c);
                stack.push(Frame::Array);
            }
            '}' | ']' => {
                out.push(c);
                stack.pop();
            }
            ',' => {
                out.push(c);
                if let Some(Frame::Object { expecting_key }) = stack.last_mut() {
                    *expecting_key = true;
                }
            }
            ':' => {
                out.push(c);
                if let Some(Frame::Object { expecting_key }) = stack.last_mut() {
                    *expecting_key = false;
                }
            }
            c if is_ident_char(c) && at_key_position(&stack) => {
                out.push('"');
                out.push(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    out.push(next);
                    chars.next();
                }
                out.push('"');
            }
            _ => out.push(c),
        }
    }

    out
}

fn at_key_position(stack: &[Frame]) -> bool {
    matches!(
        stack.last(),
        Some(Frame::Object {
            expecting_key: true
        })
    )
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Copy a string body (opening quote already emitted) through the closing
/// quote, honouring backslash escapes.
fn copy_string_body(chars: &mut Peekable<CharIndices<'_>>, out: &mut String) {
    while let Some((_, c)) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => break,
            _ => {}
        }
    }
}
