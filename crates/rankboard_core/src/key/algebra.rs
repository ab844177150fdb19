//! Key generation relative to existing neighbors.
//!
//! # Responsibility
//! - Mint keys before, after, or between existing keys.
//! - Keep every minted key inside the letter alphabet with room below it.
//!
//! # Invariants
//! - `key_before(k) < k < key_after(k)` for every key `k` with room.
//! - `k1 < key_between(k1, k2) < k2` whenever the gap holds any string.
//! - Output never ends with `A`.
//!
//! Letters are treated as digits of one 52-symbol alphabet,
//! `A..=Z` (0..=25) followed by `a..=z` (26..=51), so digit order equals
//! code-point order.

use super::{Key, KeyError, KeyResult};
use log::{debug, trace};

/// First letter of the lowercase alphabet.
const LOW: u8 = b'a';
/// Last letter of the lowercase alphabet.
const HIGH: u8 = b'z';
/// Lowest letter overall; sorts below the whole lowercase range.
const SENTINEL: u8 = b'A';
/// Canonical seed key.
const MIDDLE: u8 = b'm';
/// One past the highest digit, used as a virtual upper bound.
const TOP: u8 = 52;

/// Returns the canonical seed key used when a group has no items yet.
pub fn initial_key() -> Key {
    Key::from_letters(vec![MIDDLE])
}

/// Returns a key strictly less than `key`.
///
/// - An all-`a` key gets the sentinel `A` prepended, which repeats without
///   bound.
/// - Otherwise the first letter other than `a`/`A` is lowered and the key is
///   truncated after it.
/// - Keys made of `a`/`A` only lower their first `a` to `Z`.
///
/// # Errors
/// - `KeyError::NoRoom` when `key` is made only of `A` (nothing sorts below).
pub fn key_before(key: &Key) -> KeyResult<Key> {
    let bytes = key.as_bytes();
    if bytes.iter().all(|&b| b == LOW) {
        let mut out = Vec::with_capacity(bytes.len() + 1);
        out.push(SENTINEL);
        out.extend_from_slice(bytes);
        return Ok(Key::from_letters(out));
    }

    for (index, &current) in bytes.iter().enumerate() {
        match current {
            LOW | SENTINEL => continue,
            b'B' => {
                // `A` cannot end a key, so keep room with a filler after it.
                let mut out = bytes[..index].to_vec();
                out.push(SENTINEL);
                out.push(HIGH);
                return Ok(Key::from_letters(out));
            }
            _ => {
                let mut out = bytes[..index].to_vec();
                out.push(letter(digit(current) - 1));
                return Ok(Key::from_letters(out));
            }
        }
    }

    match bytes.iter().position(|&b| b == LOW) {
        Some(index) => {
            let mut out = bytes[..index].to_vec();
            out.push(b'Z');
            Ok(Key::from_letters(out))
        }
        None => {
            debug!(
                "event=key_before module=key status=no_room key_len={}",
                bytes.len()
            );
            Err(KeyError::NoRoom {
                before: None,
                after: Some(key.to_string()),
            })
        }
    }
}

/// Returns a key strictly greater than `key`.
///
/// Increments the last letter, or appends `a` when the last letter is `z`.
pub fn key_after(key: &Key) -> Key {
    let mut out = key.as_bytes().to_vec();
    match out.last_mut() {
        Some(last) if *last != HIGH => *last = letter(digit(*last) + 1),
        _ => out.push(LOW),
    }
    Key::from_letters(out)
}

/// Returns a key strictly between `before` and `after`.
///
/// # Errors
/// - `KeyError::InvalidOrder` when `before >= after`.
/// - `KeyError::NoRoom` when `after` is `before` followed only by `A`.
pub fn key_between(before: &Key, after: &Key) -> KeyResult<Key> {
    if before >= after {
        return Err(KeyError::InvalidOrder {
            before: before.to_string(),
            after: after.to_string(),
        });
    }

    let lower = before.as_bytes();
    let upper = after.as_bytes();
    let prefix_len = lower
        .iter()
        .zip(upper)
        .take_while(|(left, right)| left == right)
        .count();

    if prefix_len == lower.len() {
        return extend_below(before, after, prefix_len);
    }

    let low_digit = digit(lower[prefix_len]);
    let high_digit = digit(upper[prefix_len]);
    let mut out = lower[..prefix_len].to_vec();
    if high_digit - low_digit > 1 {
        out.push(letter((low_digit + high_digit) / 2));
    } else {
        // Adjacent letters: keep the lower one and rise above the rest of
        // `before`. Everything that starts with the lower letter sorts below
        // `after`, so only the lower bound constrains the tail.
        out.push(lower[prefix_len]);
        out.extend(above(&lower[prefix_len + 1..]));
    }
    Ok(Key::from_letters(out))
}

/// Dispatches to the generator matching the supplied neighbors.
///
/// # Errors
/// - `KeyError::InvalidOrder` when both are given and `before >= after`.
/// - `KeyError::NoRoom` when the gap holds no string.
pub fn generate_key(before: Option<&Key>, after: Option<&Key>) -> KeyResult<Key> {
    let generated = match (before, after) {
        (None, None) => Ok(initial_key()),
        (Some(before), None) => Ok(key_after(before)),
        (None, Some(after)) => key_before(after),
        (Some(before), Some(after)) => key_between(before, after),
    };
    if let Ok(key) = &generated {
        trace!(
            "event=key_generate module=key status=ok has_before={} has_after={} key_len={}",
            before.is_some(),
            after.is_some(),
            key.len()
        );
    }
    generated
}

/// Handles `before` being a strict prefix of `after`.
fn extend_below(before: &Key, after: &Key, prefix_len: usize) -> KeyResult<Key> {
    let upper = after.as_bytes();
    let mut out = before.as_bytes().to_vec();
    let mut position = prefix_len;
    loop {
        let Some(&next) = upper.get(position) else {
            debug!("event=key_between module=key status=no_room");
            return Err(KeyError::NoRoom {
                before: Some(before.to_string()),
                after: Some(after.to_string()),
            });
        };
        let next_digit = digit(next);
        if next > LOW {
            out.push(letter((digit(LOW) + next_digit) / 2));
        } else if next_digit >= 2 {
            out.push(letter(next_digit / 2));
        } else if next_digit == 1 {
            out.push(SENTINEL);
            out.extend(above(&[]));
        } else {
            // `A` leaves no room at this depth; descend one level.
            out.push(SENTINEL);
            position += 1;
            continue;
        }
        return Ok(Key::from_letters(out));
    }
}

/// Returns a letter run strictly greater than `tail`, halving the distance to
/// the top of the alphabet at the first position with room.
fn above(tail: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for &current in tail {
        let current_digit = digit(current);
        if TOP - current_digit > 1 {
            out.push(letter((current_digit + TOP) / 2));
            return out;
        }
        out.push(current);
    }
    out.push(letter(TOP / 2));
    out
}

fn digit(byte: u8) -> u8 {
    if byte.is_ascii_uppercase() {
        byte - b'A'
    } else {
        byte - b'a' + 26
    }
}

fn letter(value: u8) -> u8 {
    if value < 26 {
        b'A' + value
    } else {
        b'a' + (value - 26)
    }
}

#[cfg(test)]
mod tests {
    use super::{above, digit, letter};

    #[test]
    fn digits_follow_code_point_order() {
        let mut previous = None;
        for byte in (b'A'..=b'Z').chain(b'a'..=b'z') {
            let current = digit(byte);
            assert_eq!(letter(current), byte);
            if let Some(previous) = previous {
                assert_eq!(current, previous + 1);
            }
            previous = Some(current);
        }
    }

    #[test]
    fn above_climbs_toward_top() {
        assert_eq!(above(b""), b"a".to_vec());
        assert_eq!(above(b"m"), b"t".to_vec());
        assert_eq!(above(b"y"), b"z".to_vec());
        assert_eq!(above(b"zz"), b"zza".to_vec());
    }
}
