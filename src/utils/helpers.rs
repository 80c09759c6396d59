/// Formatting helpers shared by the grid and the one-shot CLI printers

use chrono::{Local, TimeZone};

/// Format an integer with thousands separators: 150000 -> "150,000"
pub fn group_thousands(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// Render a unix timestamp as a fixed-width local time string (19 chars).
/// Zero and out-of-range values render as a blank field of the same width.
pub fn format_timestamp(secs: i64) -> String {
    if secs <= 0 {
        return " ".repeat(19);
    }
    match Local.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => " ".repeat(19),
    }
}

/// Truncate or left-justify a string to exactly `width` characters.
/// A width of zero yields an empty string.
pub fn fit(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width).collect();
    let len = out.chars().count();
    if len < width {
        out.extend(std::iter::repeat(' ').take(width - len));
    }
    out
}

/// Lowercase hex encoding, used for the macaroon auth header.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(150000), "150,000");
        assert_eq!(group_thousands(1234567890), "1,234,567,890");
        assert_eq!(group_thousands(-42000), "-42,000");
    }

    #[test]
    fn test_format_timestamp_width() {
        assert_eq!(format_timestamp(0).len(), 19);
        assert_eq!(format_timestamp(-5).len(), 19);
        assert_eq!(format_timestamp(1700000000).chars().count(), 19);
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit("", 3), "   ");
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(encode_hex(&[0x00, 0x0f]), "000f");
        assert_eq!(encode_hex(&[]), "");
    }
}
