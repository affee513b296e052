//! Image decoding for atomic literals
//!
//! Token patterns guarantee shape; decoding here strips separators,
//! applies radixes and resolves escape sequences. Failures are reported
//! as plain messages, the grammar attaches positions.

/// Decodes a decimal integer image, underscores stripped
pub fn parse_integer(image: &str) -> Result<i64, String> {
    let digits: String = image.chars().filter(|&c| c != '_').collect();
    digits
        .parse::<i64>()
        .map_err(|_| format!("integer `{image}` does not fit in 64 bits"))
}

/// Decodes a `0x` / `0o` / `0b` integer image
pub fn parse_radix(image: &str, radix: u32) -> Result<i64, String> {
    let digits: String = image[2..].chars().filter(|&c| c != '_').collect();
    i64::from_str_radix(&digits, radix)
        .map_err(|_| format!("integer `{image}` does not fit in 64 bits"))
}

/// Decodes a float image, underscores stripped
pub fn parse_float(image: &str) -> Result<f64, String> {
    let digits: String = image.chars().filter(|&c| c != '_').collect();
    digits
        .parse::<f64>()
        .map_err(|_| format!("malformed float `{image}`"))
}

/// Decodes `inf` / `nan` images, with optional sign
pub fn parse_special_float(image: &str) -> f64 {
    let negative = image.starts_with('-');
    let magnitude = if image.ends_with("inf") { f64::INFINITY } else { f64::NAN };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Decodes a two-character escape like `\t` or `\"`
pub fn unescape_char(image: &str) -> Result<char, String> {
    match image {
        "\\b" => Ok('\u{0008}'),
        "\\t" => Ok('\t'),
        "\\n" => Ok('\n'),
        "\\f" => Ok('\u{000C}'),
        "\\r" => Ok('\r'),
        "\\\"" => Ok('"'),
        "\\\\" => Ok('\\'),
        other => Err(format!("unknown escape `{other}`")),
    }
}

/// Decodes a `\uXXXX` / `\UXXXXXXXX` escape into the named code point
pub fn unescape_unicode(image: &str) -> Result<char, String> {
    let code = u32::from_str_radix(&image[2..], 16)
        .map_err(|_| format!("malformed unicode escape `{image}`"))?;
    char::from_u32(code)
        .ok_or_else(|| format!("unicode escape `{image}` is not a valid code point"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_integers_allow_separators() {
        assert_eq!(parse_integer("1_000"), Ok(1000));
        assert_eq!(parse_integer("-17"), Ok(-17));
        assert_eq!(parse_integer("+99"), Ok(99));
    }

    #[test]
    fn prefixed_integers_decode_in_their_radix() {
        assert_eq!(parse_radix("0xFF", 16), Ok(255));
        assert_eq!(parse_radix("0x_FF", 16), Ok(255));
        assert_eq!(parse_radix("0b1010", 2), Ok(10));
        assert_eq!(parse_radix("0o17", 8), Ok(15));
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(parse_integer("9223372036854775808").is_err());
        assert!(parse_radix("0xFFFFFFFFFFFFFFFF", 16).is_err());
    }

    #[test]
    fn floats_decode_with_exponents_and_separators() {
        assert_eq!(parse_float("3.14"), Ok(3.14));
        assert_eq!(parse_float("1e6"), Ok(1e6));
        assert_eq!(parse_float("6.626e-34"), Ok(6.626e-34));
        assert_eq!(parse_float("9_224.5"), Ok(9224.5));
    }

    #[test]
    fn special_floats() {
        assert_eq!(parse_special_float("inf"), f64::INFINITY);
        assert_eq!(parse_special_float("+inf"), f64::INFINITY);
        assert_eq!(parse_special_float("-inf"), f64::NEG_INFINITY);
        assert!(parse_special_float("nan").is_nan());
        assert!(parse_special_float("-nan").is_nan());
    }

    #[test]
    fn character_escapes() {
        assert_eq!(unescape_char("\\n"), Ok('\n'));
        assert_eq!(unescape_char("\\t"), Ok('\t'));
        assert_eq!(unescape_char("\\\""), Ok('"'));
        assert_eq!(unescape_char("\\\\"), Ok('\\'));
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(unescape_unicode("\\u0041"), Ok('A'));
        assert_eq!(unescape_unicode("\\u03B4"), Ok('δ'));
        assert_eq!(unescape_unicode("\\U0001F4A9"), Ok('💩'));
        assert!(unescape_unicode("\\uD800").is_err());
    }
}
