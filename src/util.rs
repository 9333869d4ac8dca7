use std::fmt;

use crate::Error;

pub(crate) const CRLF: &[u8] = b"\r\n";

/// Position of the first `\r\n` in `b`.
pub(crate) fn find_crlf(b: &[u8]) -> Option<usize> {
    b.windows(2).position(|w| w == CRLF)
}

/// Characters allowed in a header field name (RFC 9110 `tchar`).
pub(crate) fn is_token_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&c)
}

pub(crate) fn compare_lowercase_ascii(a: &str, lowercased: &str) -> bool {
    if a.len() != lowercased.len() {
        return false;
    }

    a.bytes()
        .zip(lowercased.bytes())
        .all(|(a, b)| a.to_ascii_lowercase() == b)
}

pub(crate) struct LengthChecker {
    handled: usize,
    expected: usize,
}

impl LengthChecker {
    pub fn new(expected: usize) -> Self {
        LengthChecker {
            handled: 0,
            expected,
        }
    }

    pub fn append(&mut self, amount: usize) -> Result<(), Error> {
        let new_total = self.handled + amount;
        if new_total > self.expected {
            return Err(Error::BodyExceedsContentLength {
                expected: self.expected,
                actual: new_total,
            });
        }
        self.handled = new_total;
        Ok(())
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn complete(&self) -> bool {
        self.handled == self.expected
    }
}

impl fmt::Debug for LengthChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LengthChecker")
            .field("handled", &self.handled)
            .field("expected", &self.expected)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_find_crlf() {
        assert_eq!(find_crlf(b"\r"), None);
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b" \r"), None);
        assert_eq!(find_crlf(b" \r\n"), Some(1));
        assert_eq!(find_crlf(b"a\rb\r\n"), Some(3));
    }

    #[test]
    fn token_chars() {
        for c in b"azAZ09!#$%&'*+-.^_`|~" {
            assert!(is_token_char(*c), "{}", *c as char);
        }
        for c in b" :\"(),/;<=>?@[\\]{}\r\n\t" {
            assert!(!is_token_char(*c), "{}", *c as char);
        }
        assert!(!is_token_char(0xc3));
    }

    #[test]
    fn lowercase_compare() {
        assert!(compare_lowercase_ascii("Content-Length", "content-length"));
        assert!(!compare_lowercase_ascii("Content-Lengt", "content-length"));
        assert!(!compare_lowercase_ascii("Host", "hosts"));
    }

    #[test]
    fn length_checker() {
        let mut c = LengthChecker::new(5);
        c.append(3).unwrap();
        assert!(!c.complete());
        c.append(2).unwrap();
        assert!(c.complete());

        let err = c.append(1).unwrap_err();
        assert!(matches!(
            err,
            Error::BodyExceedsContentLength {
                expected: 5,
                actual: 6
            }
        ));
        assert!(c.complete());
    }
}
