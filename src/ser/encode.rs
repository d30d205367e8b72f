use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

use crate::config::Encoding;

/// As defined in [RFC 3986 section 2.3](https://www.rfc-editor.org/rfc/rfc3986#section-2.3).
///
/// Everything except the unreserved characters gets percent-encoded:
/// ASCII alphanumerics, `-`, `.`, `_` and `~`.
const RFC3986_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The legacy form-encoding convention from RFC 1738.
///
/// ASCII alphanumerics, `-`, `.` and `_` are left alone. Space is
/// excluded here because it gets written as `+` instead.
const RFC1738_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Percent-encodes a key segment or value.
///
/// The function returns an iterator to avoid allocations when no encoding is needed.
pub fn encode(input: &str, encoding: Encoding) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    let set = match encoding {
        Encoding::Rfc3986 => RFC3986_SET,
        Encoding::Rfc1738 => RFC1738_SET,
    };
    percent_encoding::utf8_percent_encode(input, set).map(move |s| {
        if encoding == Encoding::Rfc1738 && s.contains(' ') {
            Cow::Owned(s.replace(' ', "+"))
        } else {
            Cow::Borrowed(s)
        }
    })
}

/// Appends the encoded form of `input` to `out`.
pub fn encode_into(out: &mut String, input: &str, encoding: Encoding) {
    // the unreserved characters are the same in both modes
    if input
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
    {
        out.push_str(input);
        return;
    }
    for encoded in encode(input, encoding) {
        out.push_str(&encoded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(input: &str, encoding: Encoding) -> String {
        let mut out = String::new();
        encode_into(&mut out, input, encoding);
        out
    }

    #[test]
    fn space_handling() {
        assert_eq!(encoded("New York", Encoding::Rfc3986), "New%20York");
        assert_eq!(encoded("New York", Encoding::Rfc1738), "New+York");
        assert_eq!(encoded("  ", Encoding::Rfc1738), "++");
    }

    #[test]
    fn tilde_only_left_alone_by_rfc3986() {
        assert_eq!(encoded("~user", Encoding::Rfc3986), "~user");
        assert_eq!(encoded("~user", Encoding::Rfc1738), "%7Euser");
    }

    #[test]
    fn reserved_characters() {
        for encoding in [Encoding::Rfc3986, Encoding::Rfc1738] {
            assert_eq!(encoded("a&b=c", encoding), "a%26b%3Dc");
            assert_eq!(encoded("[x]", encoding), "%5Bx%5D");
            assert_eq!(encoded("1+1", encoding), "1%2B1");
            assert_eq!(encoded("a/b?c#d", encoding), "a%2Fb%3Fc%23d");
            assert_eq!(encoded("safe-_.", encoding), "safe-_.");
        }
    }

    #[test]
    fn utf8_is_encoded_per_byte() {
        assert_eq!(encoded("comté", Encoding::Rfc3986), "comt%C3%A9");
        assert_eq!(encoded("comté", Encoding::Rfc1738), "comt%C3%A9");
    }
}
