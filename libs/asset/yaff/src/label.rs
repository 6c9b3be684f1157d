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
use std::fmt;

/// The key a glyph was declared under. These are kept for display and for
/// codepoint lookup; they never decide where a glyph is drawn.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Label {
    Codepoint(u32),
    Char(String),
    Tag(String),
}

impl Label {
    pub fn from_key(key: &str, hex_keys: bool) -> Self {
        if hex_keys {
            return match u32::from_str_radix(key, 16).ok().and_then(char::from_u32) {
                Some(c) => Label::Char(c.to_string()),
                None => Label::Tag(key.to_owned()),
            };
        }

        let lower = key.to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix("u+") {
            if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                return Label::Char(c.to_string());
            }
        } else if let Some(hex) = lower.strip_prefix("0x") {
            if let Ok(cp) = u32::from_str_radix(hex, 16) {
                return Label::Codepoint(cp);
            }
        } else if let Some(oct) = lower.strip_prefix("0o") {
            if let Ok(cp) = u32::from_str_radix(oct, 8) {
                return Label::Codepoint(cp);
            }
        } else if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(cp) = key.parse::<u32>() {
                return Label::Codepoint(cp);
            }
        }
        Label::Tag(key.to_owned())
    }

    pub fn codepoint(&self) -> Option<u32> {
        match self {
            Label::Codepoint(cp) => Some(*cp),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Codepoint(cp) => write!(f, "0x{:02x}", cp),
            Label::Char(s) => {
                let units = s
                    .chars()
                    .map(|c| format!("u+{:04x}", c as u32))
                    .collect::<Vec<_>>();
                write!(f, "{}", units.join(","))
            }
            Label::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_yaff_keys() {
        assert_eq!(Label::from_key("65", false), Label::Codepoint(65));
        assert_eq!(Label::from_key("0x41", false), Label::Codepoint(0x41));
        assert_eq!(Label::from_key("0o101", false), Label::Codepoint(0o101));
        assert_eq!(Label::from_key("u+0041", false), Label::Char("A".to_owned()));
        assert_eq!(Label::from_key("U+00e9", false), Label::Char("é".to_owned()));
        assert_eq!(
            Label::from_key("default", false),
            Label::Tag("default".to_owned())
        );
        assert_eq!(Label::from_key("0xzz", false), Label::Tag("0xzz".to_owned()));
    }

    #[test]
    fn it_parses_hexdraw_keys() {
        assert_eq!(Label::from_key("0041", true), Label::Char("A".to_owned()));
        assert_eq!(Label::from_key("0041", true).codepoint(), None);
        assert_eq!(Label::from_key("zz", true), Label::Tag("zz".to_owned()));
    }

    #[test]
    fn it_displays_labels() {
        assert_eq!(Label::Codepoint(0x41).to_string(), "0x41");
        assert_eq!(Label::Char("A".to_owned()).to_string(), "u+0041");
        assert_eq!(Label::Tag("missing".to_owned()).to_string(), "missing");
    }
}
