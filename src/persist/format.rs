//! Save file layout
//!
//! ```text
//! 00000003                    version, 8 hex digits
//! 1                           object number (pre-order, from 1)
//! 11:a long sword             short desc, name, desc, long desc
//! 5:sword                     (byte length, colon, bytes, newline)
//! 0:
//! 0:
//! 4 2 1 30 - 0 0 0 0 0 0 0 0 0
//! NONE                        position (v1: raw integer)
//! 2                           skills: count, then Name:value
//! WeaponType:2
//! WeaponForce:2
//! 1                           action slots: count, then TOKEN:number
//! SPECIAL_HOME:0              0 = no target
//! 0 0:                        busy ticks left, follow-up command (v3)
//! 1                           quantity (v2; v1 kept it in the skill table)
//! 0                           child count, children follow recursively
//! ```
//!
//! Text fields are length-delimited so they may hold newlines and colons.

use crate::core::error::{MudError, Result};

/// Format written by this build
pub const SAVE_VERSION: u32 = 3;
/// Position written as a token instead of an ordinal; quantity on its own line
pub const VERSION_TOKENS: u32 = 2;
/// Busy timers saved
pub const VERSION_BUSY: u32 = 3;

/// Append a length-delimited text field
pub fn push_text(out: &mut String, text: &str) {
    out.push_str(&text.len().to_string());
    out.push(':');
    out.push_str(text);
    out.push('\n');
}

/// Read position over a save file, tracking line numbers for errors
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn at_end(&self) -> bool {
        self.text[self.pos..].trim().is_empty()
    }

    /// Error at the line about to be read
    pub fn error(&self, reason: impl Into<String>) -> MudError {
        error_at(self.line, reason)
    }

    /// Next line without its terminator
    pub fn next_line(&mut self) -> Result<&'a str> {
        if self.pos >= self.text.len() {
            return Err(self.error("unexpected end of file"));
        }
        let rest = &self.text[self.pos..];
        let (line, consumed) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        self.line += 1;
        Ok(line.trim_end_matches('\r'))
    }

    pub fn next_number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let at = self.line;
        let line = self.next_line()?;
        line.trim()
            .parse()
            .map_err(|_| error_at(at, format!("expected {what}, found '{line}'")))
    }

    /// Leading space-terminated word of the current line
    pub fn next_word(&mut self) -> Result<&'a str> {
        let rest = &self.text[self.pos..];
        let end = rest
            .find(|c: char| c == ' ' || c == '\n')
            .ok_or_else(|| self.error("unexpected end of file"))?;
        if !rest[end..].starts_with(' ') {
            return Err(self.error("expected a space-separated field"));
        }
        self.pos += end + 1;
        Ok(&rest[..end])
    }

    /// Body of a `<len>:<bytes>` field
    pub fn text_field(&mut self) -> Result<String> {
        let rest = &self.text[self.pos..];
        let colon = rest
            .find(':')
            .ok_or_else(|| self.error("text field missing length"))?;
        let len: usize = rest[..colon]
            .trim()
            .parse()
            .map_err(|_| self.error(format!("bad text length '{}'", &rest[..colon])))?;
        let start = colon + 1;
        let body = start
            .checked_add(len)
            .and_then(|end| rest.get(start..end))
            .ok_or_else(|| self.error("text field runs past end of file"))?;
        let after = &rest[start + len..];
        if !(after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n")) {
            return Err(self.error("text field longer than its length"));
        }
        let terminator = if after.starts_with("\r\n") {
            2
        } else if after.starts_with('\n') {
            1
        } else {
            0
        };
        self.line += body.matches('\n').count() + 1;
        self.pos += start + len + terminator;
        Ok(body.to_string())
    }
}

pub fn error_at(line: usize, reason: impl Into<String>) -> MudError {
    MudError::Format {
        line,
        reason: reason.into(),
    }
}

/// `<name>:<value>` split at the last colon, so names may contain colons
pub fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.rsplit_once(':')?;
    Some((name, value.trim()))
}
