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
mod catalog;
pub mod classify;
mod label;
mod loader;
pub mod parse;

pub use crate::{
    catalog::{FontCatalog, FONT_EXTENSIONS},
    label::Label,
    loader::{FontLoader, LoadToken},
};

use anyhow::{ensure, Result};
use log::debug;
use std::{fs, path::Path};

/// The conventions of one plaintext font dialect. Both dialects share the
/// key/value layout and differ only in their marker and comment characters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dialect {
    pub name: &'static str,
    pub ink: char,
    pub paper: char,
    pub comment: char,
    pub hex_keys: bool,
}

impl Dialect {
    pub fn yaff() -> Self {
        Self {
            name: "yaff",
            ink: '@',
            paper: '.',
            comment: '#',
            hex_keys: false,
        }
    }

    pub fn draw() -> Self {
        Self {
            name: "draw",
            ink: '#',
            paper: '-',
            comment: '%',
            hex_keys: true,
        }
    }

    pub fn custom(name: &'static str, ink: char, paper: char, comment: char) -> Self {
        Self {
            name,
            ink,
            paper,
            comment,
            hex_keys: false,
        }
    }

    /// Pick a dialect from the file extension; unknown extensions read as yaff.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .as_deref()
        {
            Some("draw") => Self::draw(),
            _ => Self::yaff(),
        }
    }

    pub fn with_ink(mut self, ink: char) -> Self {
        self.ink = ink;
        self
    }

    pub fn with_paper(mut self, paper: char) -> Self {
        self.paper = paper;
        self
    }

    /// A marker that equals the comment character would turn every glyph
    /// row into a comment, so overrides are checked before parsing.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.ink != self.comment && self.paper != self.comment,
            "{} markers `{}`/`{}` clash with its comment character `{}`",
            self.name,
            self.ink,
            self.paper,
            self.comment
        );
        ensure!(
            self.ink != self.paper,
            "{} ink and paper are both `{}`",
            self.name,
            self.ink
        );
        Ok(())
    }

    #[inline]
    pub fn is_marker(&self, c: char) -> bool {
        c == self.ink || c == self.paper
    }

    #[inline]
    pub fn is_paper(&self, c: char) -> bool {
        c == self.paper
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::yaff()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Glyph {
    rows: Vec<String>,
    labels: Vec<Label>,
}

impl Glyph {
    pub fn new(rows: Vec<String>, labels: Vec<Label>) -> Self {
        Self { rows, labels }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    // Rows are not required to agree; the first one is authoritative.
    pub fn width(&self) -> usize {
        self.rows.first().map(|row| row.chars().count()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// An immutable, fully parsed font: the ordered glyph list plus the cell
/// size every glyph is laid out in. A new document is built for every load;
/// nothing about it is ever updated in place.
#[derive(Clone, Debug)]
pub struct FontDocument {
    dialect: Dialect,
    glyphs: Vec<Glyph>,
    properties: Vec<(String, String)>,
    cell_width: usize,
    cell_height: usize,
}

impl FontDocument {
    pub fn from_text(text: &str, dialect: &Dialect) -> Self {
        let parsed = parse::parse_text(text, dialect);
        Self::from_glyphs(dialect.to_owned(), parsed.glyphs, parsed.properties)
    }

    pub fn from_path(path: &Path, dialect: &Dialect) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text, dialect))
    }

    pub fn from_glyphs(
        dialect: Dialect,
        glyphs: Vec<Glyph>,
        properties: Vec<(String, String)>,
    ) -> Self {
        let cell_width = glyphs.iter().map(Glyph::width).max().unwrap_or(0);
        let cell_height = glyphs.iter().map(Glyph::height).max().unwrap_or(0);
        debug!(
            "font document with {} glyphs in {}x{} cells",
            glyphs.len(),
            cell_width,
            cell_height
        );
        Self {
            dialect,
            glyphs,
            properties,
            cell_width,
            cell_height,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Glyphs are keyed by their position in the file, not by any codepoint
    /// they were declared under.
    pub fn glyph(&self, ordinal: usize) -> Option<&Glyph> {
        self.glyphs.get(ordinal)
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    pub fn cell_height(&self) -> usize {
        self.cell_height
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.property("name")
    }

    /// Find the ordinal of the first glyph declared with this codepoint.
    /// This is a lookup by label only; it has no effect on layout.
    pub fn ordinal_for_codepoint(&self, codepoint: u32) -> Option<usize> {
        self.glyphs.iter().position(|glyph| {
            glyph
                .labels()
                .iter()
                .any(|label| label.codepoint() == Some(codepoint))
        })
    }
}
