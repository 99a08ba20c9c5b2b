use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// RFC 3986 2.3 保留字以外的字元全部編碼
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_characters_pass_through() {
        assert_eq!(encode("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_reserved_characters_are_uppercase_hex() {
        assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(encode("!*'()"), "%21%2A%27%28%29");
        assert_eq!(encode("a/b=c&d"), "a%2Fb%3Dc%26d");
    }

    #[test]
    fn test_multibyte_characters_are_utf8_encoded() {
        assert_eq!(encode("é"), "%C3%A9");
        assert_eq!(encode("☃"), "%E2%98%83");
    }
}
