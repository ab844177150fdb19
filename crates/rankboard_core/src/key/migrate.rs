//! Bulk key minting: legacy numeric positions and evenly spaced batches.
//!
//! # Invariants
//! - `position_to_key` is non-decreasing in `position` and yields at most
//!   `POSITION_KEY_MAX_LEN` letters.
//! - `batch_keys(n)` yields `n` strictly increasing keys.
//!
//! Both encode a fraction in `[0, 1)` as base-26 lowercase digits, so all
//! output stays inside `a..=z`.

use super::algebra::initial_key;
use super::Key;

/// Maximum letters produced by [`position_to_key`].
pub const POSITION_KEY_MAX_LEN: usize = 4;

const RADIX: u128 = 26;

/// Maps a legacy numeric position to a short order key.
///
/// `total_items_hint` sets the scale of the squashing curve
/// `1 - hint / (position + hint)`; pass the number of legacy items. Negative
/// and NaN positions clamp to the start, `+inf` to the end.
///
/// Encoding stops early once the remaining fraction is exactly zero.
pub fn position_to_key(position: f64, total_items_hint: usize) -> Key {
    let scale = total_items_hint.max(1) as f64;
    let clamped = if position.is_nan() { 0.0 } else { position.max(0.0) };
    // Every step below is a correctly rounded monotone operation, so the
    // composition stays non-decreasing in `position`.
    let fraction = if clamped.is_infinite() {
        1.0
    } else {
        1.0 - scale / (clamped + scale)
    };

    let slots = RADIX.pow(POSITION_KEY_MAX_LEN as u32);
    let scaled = fraction * slots as f64;
    let value = (scaled.floor() as u128).min(slots - 1);
    let exact = scaled.fract() == 0.0 && (value as f64) == scaled;

    let mut digits = encode_fixed(value, POSITION_KEY_MAX_LEN);
    if exact {
        while digits.len() > 1 && digits.last() == Some(&b'a') {
            digits.pop();
        }
    }
    Key::from_letters(digits)
}

/// Returns `count` strictly increasing keys spread evenly over the key space.
///
/// `0` yields nothing and `1` yields [`initial_key`]. Larger batches use the
/// shortest fixed width that separates every slot.
pub fn batch_keys(count: usize) -> Vec<Key> {
    match count {
        0 => return Vec::new(),
        1 => return vec![initial_key()],
        _ => {}
    }

    let buckets = count as u128 + 1;
    let mut width = 1usize;
    let mut slots = RADIX;
    while slots < buckets {
        slots *= RADIX;
        width += 1;
    }

    (1..=count as u128)
        .map(|step| Key::from_letters(encode_fixed(step * slots / buckets, width)))
        .collect()
}

fn encode_fixed(mut value: u128, width: usize) -> Vec<u8> {
    let mut digits = vec![b'a'; width];
    for slot in digits.iter_mut().rev() {
        *slot = b'a' + (value % RADIX) as u8;
        value /= RADIX;
    }
    digits
}
