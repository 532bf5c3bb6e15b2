//! Splitting a converted run into delta-annotated text items.
//!
//! A single string draw places glyphs at their natural advances. When the
//! caller asks for other positions, the run is cut into items: each item
//! draws contiguous characters at natural spacing after shifting the pen by
//! its delta. A new item starts only where the requested position drifts
//! from the natural one, so uniform runs stay in one item.

use super::TextError;
use crate::font::{NativeChar, NativeFont, TextEncoding};
use crate::surface::TextItem;

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn reserve_items(len: usize) -> Result<Vec<TextItem>, TextError> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(len)
        .map_err(|_| TextError::ItemAllocation(len))?;
    Ok(items)
}

/// Items placing each character at its explicit logical advance.
///
/// Advances are scaled by `scale`, a 16.16 fixed-point horizontal scale.
/// The fractional part left after each item is carried into the next, so
/// rounding never accumulates: the start of every item lands on the floor
/// of the scaled prefix sum of the advances before it.
///
/// `advances` must hold at least one entry per character.
pub fn advance_items(
    encoding: &dyn TextEncoding,
    font: &NativeFont,
    chars: &[NativeChar],
    advances: &[i32],
    scale: i64,
) -> Result<Vec<TextItem>, TextError> {
    let mut items = reserve_items(chars.len())?;
    let mut delta = 0;
    let mut carry: i64 = 0;
    let mut i = 0;

    while i < chars.len() {
        let mut item = TextItem {
            start: i,
            len: 0,
            delta,
        };
        let mut sum: i64 = 0;

        let fixed_sum = loop {
            sum += i64::from(advances[i]);
            let fixed = sum.saturating_mul(scale).saturating_add(carry);
            let natural = encoding.text_width(font, &chars[item.start..=i]);
            delta = clamp_i32((fixed >> 16) - i64::from(natural));
            item.len += 1;
            i += 1;
            if i >= chars.len() || delta != 0 {
                break fixed;
            }
        };

        items.push(item);
        carry = fixed_sum & 0xffff;
    }

    Ok(items)
}

/// Items adding `char_extra` after every character and `break_extra` after
/// every break character.
pub fn spacing_items(
    chars: &[NativeChar],
    char_extra: i32,
    break_extra: i32,
    break_char: u8,
) -> Result<Vec<TextItem>, TextError> {
    let mut items = reserve_items(chars.len())?;
    let mut delta = 0;
    let mut i = 0;

    while i < chars.len() {
        let mut item = TextItem {
            start: i,
            len: 0,
            delta,
        };
        delta = 0;

        loop {
            delta += char_extra;
            if chars[i].byte2 == break_char {
                delta += break_extra;
            }
            item.len += 1;
            i += 1;
            if i >= chars.len() || delta != 0 {
                break;
            }
        }

        items.push(item);
    }

    Ok(items)
}
