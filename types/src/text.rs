//! Text helpers for displaying service-provided strings in a terminal.

use std::borrow::Cow;

const ESC: char = '\x1b';

/// Strip escape sequences and control characters from untrusted text.
///
/// Newlines and tabs survive. CSI sequences (`ESC [ ... final`) are removed
/// whole; any other `ESC x` pair is dropped. Returns `Cow::Borrowed` when the
/// input is already clean.
#[must_use]
pub fn sanitize_display_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_unsafe) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESC {
            match chars.next() {
                Some('[') => {
                    // Parameters and intermediates run until a final byte in '@'..='~'.
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    // OSC runs until BEL or ST.
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        } else if !is_unsafe(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_unsafe(c: char) -> bool {
    (c.is_control() && c != '\n' && c != '\t') || c == ESC
}
