// This file is part of yaffchart.
//
// yaffchart is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// yaffchart is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with yaffchart.  If not, see <http://www.gnu.org/licenses/>.
use crate::Dialect;

pub const KEY_SEPARATOR: char = ':';

/// A single source line, tagged by what it means to the glyph accumulator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Line<'a> {
    Blank,
    Comment,
    // The value is whatever followed the separator, trimmed; it may be empty.
    KeyStart { key: &'a str, value: &'a str },
    DataRow(&'a str),
}

impl<'a> Line<'a> {
    /// Blanks, comments and keys all end the value currently being collected.
    pub fn is_flush(&self) -> bool {
        !matches!(self, Line::DataRow(_))
    }
}

pub fn classify<'a>(line: &'a str, dialect: &Dialect) -> Line<'a> {
    let first = match line.chars().next() {
        Some(c) => c,
        None => return Line::Blank,
    };
    if first == dialect.comment || !is_code_start(first, dialect) {
        return Line::Comment;
    }

    let text = line.trim();
    if text.is_empty() {
        return Line::Blank;
    }
    if let Some((key, value)) = text.split_once(KEY_SEPARATOR) {
        return Line::KeyStart {
            key: key.trim(),
            value: value.trim(),
        };
    }
    Line::DataRow(text)
}

// Glyph rows are allowed to start at column zero, so the marker characters
// count as code as well as letters, digits and indentation.
fn is_code_start(c: char, dialect: &Dialect) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || dialect.is_marker(c)
}
