//! Best-effort narrative extraction from a scene JSON that is still streaming
//!
//! The generator streams the scene object token by token. Until the payload
//! is complete it cannot be decoded, but the narrative string can already be
//! shown as it grows.

use lazy_static::lazy_static;
use regex::Regex;
use std::str::Chars;

lazy_static! {
    static ref RE_NARRATIVE_KEY: Regex = Regex::new(r#""narrative"\s*:\s*""#).unwrap();
}

/// Narrative string value decoded so far; empty until the key has arrived
pub fn extract_partial_narrative(partial_json: &str) -> String {
    let start = match RE_NARRATIVE_KEY.find(partial_json) {
        Some(m) => m.end(),
        None => return String::new(),
    };

    let mut out = String::new();
    let mut chars = partial_json[start..].chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('u') => {
                    // escape cut off mid-stream
                    let Some(unit) = read_hex4(&mut chars) else { break };
                    if !(0xD800..0xDC00).contains(&unit) {
                        out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
                        continue;
                    }
                    let mut ahead = chars.clone();
                    match (ahead.next(), ahead.next()) {
                        (Some('\\'), Some('u')) => match read_hex4(&mut ahead) {
                            None => break,
                            Some(low) if (0xDC00..0xE000).contains(&low) => {
                                chars = ahead;
                                let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                                out.push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                            }
                            Some(_) => out.push(char::REPLACEMENT_CHARACTER),
                        },
                        // low half not streamed yet
                        (None, _) | (Some('\\'), None) => break,
                        _ => out.push(char::REPLACEMENT_CHARACTER),
                    }
                }
                Some(other) => out.push(other),
                None => break,
            },
            _ => out.push(c),
        }
    }
    out
}

/// Four hex digits as a UTF-16 unit; `None` when the input ends first.
/// Bad digits decode as U+FFFD.
fn read_hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() < 4 {
        return None;
    }
    Some(u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD))
}

// =============================================================================
// TESTS
// =============================================================================
