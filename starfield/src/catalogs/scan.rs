//! Fixed-column field scanning
//!
//! Catalog fields are read starting at a byte offset, skipping leading
//! whitespace and taking the longest numeric prefix, the same way a C
//! `sscanf(line + offset, "%f")` conversion would.

/// Outcome of scanning one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scan<T> {
    /// A number was converted
    Value(T),
    /// Non-blank input that is not a number
    NoMatch,
    /// The line ended (or was blank) before any input
    Exhausted,
}

impl<T> Scan<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Scan::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Skip whitespace starting at `offset`, returning the remaining bytes if any.
fn field_start(line: &[u8], offset: usize) -> Option<&[u8]> {
    let rest = line.get(offset..)?;
    let start = rest.iter().position(|b| !b.is_ascii_whitespace())?;
    Some(&rest[start..])
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn sign(bytes: &[u8]) -> usize {
    matches!(bytes.first(), Some(b'+') | Some(b'-')) as usize
}

/// Length of the longest decimal floating point prefix, or 0.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut len = sign(bytes);

    let int_digits = digits(&bytes[len..]);
    len += int_digits;

    let mut frac_digits = 0;
    if bytes.get(len) == Some(&b'.') {
        frac_digits = digits(&bytes[len + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            len += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(len), Some(b'e') | Some(b'E')) {
        let exp_sign = sign(&bytes[len + 1..]);
        let exp_digits = digits(&bytes[len + 1 + exp_sign..]);
        if exp_digits > 0 {
            len += 1 + exp_sign + exp_digits;
        }
    }

    len
}

/// Scan a floating point field at `offset`.
///
/// A number too large for `f32` is a `NoMatch`, never an infinite value.
pub fn scan_f32(line: &[u8], offset: usize) -> Scan<f32> {
    let Some(field) = field_start(line, offset) else {
        return Scan::Exhausted;
    };

    let len = float_prefix_len(field);
    if len == 0 {
        return Scan::NoMatch;
    }

    std::str::from_utf8(&field[..len])
        .ok()
        .and_then(|text| text.parse::<f32>().ok())
        .filter(|value| value.is_finite())
        .map_or(Scan::NoMatch, Scan::Value)
}

/// Scan a decimal integer field at `offset`.
pub fn scan_int(line: &[u8], offset: usize) -> Scan<i64> {
    let Some(field) = field_start(line, offset) else {
        return Scan::Exhausted;
    };

    let sign_len = sign(field);
    let digit_len = digits(&field[sign_len..]);
    if digit_len == 0 {
        return Scan::NoMatch;
    }

    std::str::from_utf8(&field[..sign_len + digit_len])
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .map_or(Scan::NoMatch, Scan::Value)
}
