use std::fmt;
use std::str;

use crate::util::{compare_lowercase_ascii, find_crlf, is_token_char};
use crate::Error;

/// Header fields keyed by lower-cased name.
///
/// Repeated fields are folded into one value, joined by `", "` in the order
/// they arrived. Distinct names keep the order they were first seen in.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Add a field, appending to an existing value with `", "`.
    pub fn append(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => {
                let existing = &mut self.entries[i].1;
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => self
                .entries
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    /// Set a field, replacing any existing value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.position(name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)`, names lower-cased.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| compare_lowercase_ascii(name, n))
    }

    /// Parse one header line from the start of `input` into this map.
    ///
    /// Nothing is used until a complete `\r\n` terminated line is available.
    /// A line that is only `\r\n` ends the header section.
    pub fn parse(&mut self, input: &[u8]) -> Result<HeaderAttempt, Error> {
        let Some(end) = find_crlf(input) else {
            return Ok(HeaderAttempt::empty());
        };

        if end == 0 {
            return Ok(HeaderAttempt {
                input_used: 2,
                done: true,
            });
        }

        let line = &input[..end];

        let mut colon = None;
        for (i, c) in line.iter().copied().enumerate() {
            if c == b' ' {
                return Err(Error::FieldNameWhitespace);
            }
            if c == b':' {
                colon = Some(i);
                break;
            }
            if !is_token_char(c) {
                return Err(Error::FieldNameInvalidChar(c));
            }
        }

        let colon = match colon {
            Some(0) => return Err(Error::MissingFieldName),
            Some(v) => v,
            None => return Err(Error::MissingColon),
        };

        // Bytes between the colon and the line's \r\n.
        let raw_value = &line[colon + 1..];
        if raw_value.is_empty() {
            return Err(Error::MissingFieldValue);
        }

        // Whitespace only is kept, as an empty value.
        let value = str::from_utf8(raw_value)
            .map_err(|_| Error::FieldValueNotUtf8)?
            .trim();

        // The name is only token chars, which are all ascii.
        let name: String = line[..colon]
            .iter()
            .map(|c| c.to_ascii_lowercase() as char)
            .collect();

        self.append(&name, value);

        Ok(HeaderAttempt {
            input_used: name.len() + raw_value.len() + 3,
            done: false,
        })
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Result of trying to parse one header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderAttempt {
    input_used: usize,
    done: bool,
}

impl HeaderAttempt {
    const fn empty() -> Self {
        HeaderAttempt {
            input_used: 0,
            done: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.input_used > 0
    }

    pub fn input_used(&self) -> usize {
        self.input_used
    }

    /// The empty line ending the header section was read.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
