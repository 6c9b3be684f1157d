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
use crate::{
    classify::{classify, Line},
    Dialect, Glyph, Label,
};
use log::{debug, trace};
use std::iter;

/// Everything pulled out of a font description: glyphs in the order their
/// key sections appear and any key whose value was ordinary text.
#[derive(Debug, Default)]
pub struct Parsed {
    pub glyphs: Vec<Glyph>,
    pub properties: Vec<(String, String)>,
}

// Rows and keys of the key section currently being read.
#[derive(Default)]
struct Accumulator<'a> {
    keys: Vec<&'a str>,
    rows: Vec<&'a str>,
}

impl<'a> Accumulator<'a> {
    fn is_pure_glyph(&self) -> bool {
        !self.rows.is_empty()
            && self
                .rows
                .iter()
                .all(|row| !row.chars().any(char::is_alphanumeric))
    }

    fn flush(&mut self, hex_keys: bool, out: &mut Parsed) {
        if !self.is_pure_glyph() {
            return;
        }
        let labels = self
            .keys
            .drain(..)
            .map(|key| Label::from_key(key, hex_keys))
            .collect::<Vec<_>>();
        let rows = self.rows.drain(..).map(str::to_owned).collect::<Vec<_>>();
        trace!(
            "glyph {} {}x{} {:?}",
            out.glyphs.len(),
            rows[0].chars().count(),
            rows.len(),
            labels
        );
        out.glyphs.push(Glyph::new(rows, labels));
    }

    // Text values never become glyphs; keep them as properties instead.
    fn discard(&mut self, out: &mut Parsed) {
        if !self.rows.is_empty() {
            let value = self.rows.join("\n");
            for key in &self.keys {
                out.properties.push(((*key).to_owned(), value.clone()));
            }
            self.keys.clear();
        }
        self.rows.clear();
    }
}

pub fn parse_text(text: &str, dialect: &Dialect) -> Parsed {
    let mut out = Parsed::default();
    let mut acc = Accumulator::default();

    // The trailing blank guarantees the final section is flushed.
    for raw in text.lines().chain(iter::once("")) {
        let line = classify(raw, dialect);
        if line.is_flush() {
            acc.flush(dialect.hex_keys, &mut out);
        }
        match line {
            Line::Blank | Line::Comment => {}
            Line::KeyStart { key, value } => {
                acc.discard(&mut out);
                acc.keys.push(key);
                if !value.is_empty() {
                    acc.rows.push(value);
                }
            }
            Line::DataRow(row) => acc.rows.push(row),
        }
    }
    acc.discard(&mut out);

    debug!(
        "parsed {} glyphs and {} properties as {}",
        out.glyphs.len(),
        out.properties.len(),
        dialect.name
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_dot() -> Dialect {
        Dialect::custom("test", '#', '.', '%')
    }

    #[test]
    fn it_parses_nothing_from_nothing() {
        let parsed = parse_text("", &Dialect::yaff());
        assert!(parsed.glyphs.is_empty());
        assert!(parsed.properties.is_empty());
    }

    #[test]
    fn it_parses_a_single_background_glyph() {
        let parsed = parse_text("32:\n    ....\n    ....\n    ....\n\n", &Dialect::yaff());
        assert_eq!(parsed.glyphs.len(), 1);
        let glyph = &parsed.glyphs[0];
        assert_eq!(glyph.height(), 3);
        assert_eq!(glyph.width(), 4);
        assert!(glyph.rows().iter().all(|row| row == "...."));
        assert_eq!(glyph.labels(), &[Label::Codepoint(32)]);
    }

    #[test]
    fn it_parses_unindented_rows() {
        let text = "65:\n##.\n.#.\n.##\n\n66:\n.#.\n.#.\n.#.\n\n";
        let parsed = parse_text(text, &hash_dot());
        assert_eq!(parsed.glyphs.len(), 2);
        assert_eq!(parsed.glyphs[0].rows(), &["##.", ".#.", ".##"]);
        assert_eq!(parsed.glyphs[1].rows(), &[".#.", ".#.", ".#."]);
    }

    #[test]
    fn it_drops_text_values() {
        let text = "name: hello\n\nu+0041:\n    .@.\n    @.@\n";
        let parsed = parse_text(text, &Dialect::yaff());
        assert_eq!(parsed.glyphs.len(), 1);
        assert_eq!(parsed.glyphs[0].rows(), &[".@.", "@.@"]);
        assert_eq!(
            parsed.properties,
            vec![("name".to_owned(), "hello".to_owned())]
        );
    }

    #[test]
    fn it_never_emits_alphanumerics() {
        let text = "a: x1\nb:\n    @@\n    @1\nc:\n    ..\n\nnotes:\n    first\n    second\n";
        let parsed = parse_text(text, &Dialect::yaff());
        assert_eq!(parsed.glyphs.len(), 1);
        assert_eq!(parsed.glyphs[0].rows(), &[".."]);
        for glyph in &parsed.glyphs {
            assert!(glyph.height() > 0);
            for row in glyph.rows() {
                assert!(!row.chars().any(char::is_alphanumeric));
            }
        }
        assert_eq!(parsed.properties.len(), 3);
        assert_eq!(parsed.properties[2].1, "first\nsecond");
    }

    #[test]
    fn it_takes_the_value_on_the_key_line() {
        let parsed = parse_text("0x20: ...\n", &Dialect::yaff());
        assert_eq!(parsed.glyphs.len(), 1);
        assert_eq!(parsed.glyphs[0].rows(), &["..."]);
    }

    #[test]
    fn it_collects_consecutive_keys_as_labels() {
        let text = "u+0041:\n0x41:\ncapital_a:\n    .@.\n    @@@\n";
        let parsed = parse_text(text, &Dialect::yaff());
        assert_eq!(parsed.glyphs.len(), 1);
        assert_eq!(
            parsed.glyphs[0].labels(),
            &[
                Label::Char("A".to_owned()),
                Label::Codepoint(0x41),
                Label::Tag("capital_a".to_owned())
            ]
        );
    }

    #[test]
    fn it_flushes_on_comments() {
        let text = "1:\n    @.\n# between\n    .@\n2:\n    @@\n";
        let parsed = parse_text(text, &Dialect::yaff());
        // The comment commits the first glyph, so the row after it becomes a
        // glyph of its own with no key.
        assert_eq!(parsed.glyphs.len(), 3);
        assert_eq!(parsed.glyphs[0].rows(), &["@."]);
        assert_eq!(parsed.glyphs[1].rows(), &[".@"]);
        assert!(parsed.glyphs[1].labels().is_empty());
        assert_eq!(parsed.glyphs[2].rows(), &["@@"]);
    }

    #[test]
    fn it_keeps_text_values_across_blank_lines() {
        // A blank line only commits glyphs, so the rows after it extend the
        // text value until the next key throws it away.
        let text = "comment: hi\n\n    @@\n3:\n    @.\n";
        let parsed = parse_text(text, &Dialect::yaff());
        assert_eq!(parsed.glyphs.len(), 1);
        assert_eq!(parsed.glyphs[0].labels(), &[Label::Codepoint(3)]);
        assert_eq!(parsed.properties[0].1, "hi\n@@");
    }

    #[test]
    fn it_parses_hexdraw() {
        let text = "% hexdraw\n0041:\t-#-\n\t#-#\n\n0042:\t##-\n\t##-\n";
        let parsed = parse_text(text, &Dialect::draw());
        assert_eq!(parsed.glyphs.len(), 2);
        assert_eq!(parsed.glyphs[0].rows(), &["-#-", "#-#"]);
        assert_eq!(parsed.glyphs[1].labels(), &[Label::Char("B".to_owned())]);
    }
}
