//! Double-precision values on top of the store's 64-bit integer slot.
//!
//! The store has no native double type, so a double is kept as the `i64`
//! sharing its IEEE-754 bit pattern. The conversion is bit-exact: negative
//! zero, infinities and NaN payloads all come back unchanged.

use crate::error::Result;
use crate::store::{Editor, SharedPreferences};

/// Reinterpret the bits of `value` as an `i64`.
pub fn encode_double(value: f64) -> i64 {
    value.to_bits() as i64
}

/// Inverse of [`encode_double`].
pub fn decode_double(raw: i64) -> f64 {
    f64::from_bits(raw as u64)
}

/// Get a double stored with [`put_double`], or `None` if `key` is absent.
///
/// # Errors
///
/// Returns a type mismatch if `key` holds anything but a long.
pub fn find_double(prefs: &SharedPreferences, key: &str) -> Result<Option<f64>> {
    Ok(prefs.find_long(key)?.map(decode_double))
}

/// Get a double stored with [`put_double`], or `default` if `key` is absent.
pub fn get_double(prefs: &SharedPreferences, key: &str, default: f64) -> Result<f64> {
    Ok(find_double(prefs, key)?.unwrap_or(default))
}

/// Stage a double under `key` as its encoded long.
pub fn put_double<'e>(editor: &'e mut Editor, key: &str, value: f64) -> &'e mut Editor {
    editor.put_long(key, encode_double(value))
}
