//! Turning input bytes into text and sanitized text back into bytes.
//!
//! Input is read as UTF-8 when it is valid UTF-8. Anything else is read as
//! ISO-8859-1, which maps every byte to one character, so legacy pages
//! (`<meta charset=iso-8859-1>`, `windows-1252`, ...) are sanitized instead of
//! rejected. The output is written back in the input's charset, which keeps
//! the bytes of untouched text identical to the input.

use std::fmt::Write;

/// The character encoding a document was read with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    /// One byte per character, `0x00..=0xFF`.
    Latin1,
}

impl Charset {
    /// Decode `bytes`, falling back to ISO-8859-1 when they are not UTF-8.
    pub fn decode(bytes: Vec<u8>) -> (String, Charset) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, Charset::Utf8),
            Err(err) => {
                let text = err.as_bytes().iter().map(|&b| char::from(b)).collect();
                (text, Charset::Latin1)
            }
        }
    }

    /// Encode serialized HTML in this charset.
    ///
    /// Characters outside ISO-8859-1 can only come from character references
    /// in text or attribute values, so they are written back as numeric
    /// references.
    pub fn encode(self, html: String) -> Vec<u8> {
        match self {
            Charset::Utf8 => html.into_bytes(),
            Charset::Latin1 => {
                let mut out = Vec::with_capacity(html.len());
                let mut buf = String::new();
                for c in html.chars() {
                    match u8::try_from(u32::from(c)) {
                        Ok(b) => out.push(b),
                        Err(_) => {
                            buf.clear();
                            let _ = write!(buf, "&#{};", u32::from(c));
                            out.extend_from_slice(buf.as_bytes());
                        }
                    }
                }
                out
            }
        }
    }
}
