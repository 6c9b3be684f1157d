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
use crate::{Dialect, FontDocument};
use log::{debug, warn};
use std::fmt;

/// Identifies one font selection. Tokens only ever increase.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LoadToken(u64);

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

// Holds the document for the most recent selection. Results that arrive for
// any older selection are dropped rather than overwriting newer state.
#[derive(Debug, Default)]
pub struct FontLoader {
    latest: u64,
    current: Option<FontDocument>,
}

impl FontLoader {
    pub fn begin(&mut self) -> LoadToken {
        self.latest += 1;
        LoadToken(self.latest)
    }

    pub fn is_latest(&self, token: LoadToken) -> bool {
        token.0 == self.latest
    }

    /// Parse `text` and make it current, unless a newer load was started.
    pub fn complete(
        &mut self,
        token: LoadToken,
        text: &str,
        dialect: &Dialect,
    ) -> Option<&FontDocument> {
        if !self.is_latest(token) {
            debug!("discarding stale {} (latest is load#{})", token, self.latest);
            return None;
        }
        self.current = Some(FontDocument::from_text(text, dialect));
        self.current.as_ref()
    }

    /// A failed load leaves the current document in place.
    pub fn fail(&mut self, token: LoadToken, err: &anyhow::Error) {
        warn!("{} failed: {}", token, err);
    }

    pub fn current(&self) -> Option<&FontDocument> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    const A: &str = "1:\n    @\n";
    const B: &str = "1:\n    @@\n\n2:\n    ..\n";

    #[test]
    fn it_keeps_the_latest_load() {
        let yaff = Dialect::yaff();
        let mut loader = FontLoader::default();
        assert!(loader.current().is_none());

        let first = loader.begin();
        assert!(loader.complete(first, A, &yaff).is_some());
        assert_eq!(loader.current().map(FontDocument::glyph_count), Some(1));

        let second = loader.begin();
        assert!(second > first);
        assert_eq!(
            loader
                .complete(second, B, &yaff)
                .map(FontDocument::glyph_count),
            Some(2)
        );
    }

    #[test]
    fn it_discards_stale_completions() {
        let yaff = Dialect::yaff();
        let mut loader = FontLoader::default();
        let slow = loader.begin();
        let fast = loader.begin();

        assert!(loader.complete(fast, B, &yaff).is_some());
        assert!(loader.complete(slow, A, &yaff).is_none());
        assert!(!loader.is_latest(slow));
        assert_eq!(loader.current().map(FontDocument::glyph_count), Some(2));
    }

    #[test]
    fn it_ignores_failures() {
        let yaff = Dialect::yaff();
        let mut loader = FontLoader::default();
        let first = loader.begin();
        loader.complete(first, A, &yaff);

        let second = loader.begin();
        loader.fail(second, &anyhow!("not found"));
        assert_eq!(loader.current().map(FontDocument::glyph_count), Some(1));
    }
}
