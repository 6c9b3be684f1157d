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
use anyhow::{ensure, Result};
use glob::{MatchOptions, Pattern};
use log::debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const FONT_EXTENSIONS: [&str; 2] = ["yaff", "draw"];

/// The list of selectable font descriptions.
#[derive(Clone, Debug, Default)]
pub struct FontCatalog {
    fonts: Vec<PathBuf>,
}

impl FontCatalog {
    pub fn from_directory(dir: &Path) -> Result<Self> {
        let mut catalog = Self::default();
        catalog.add_directory(dir)?;
        Ok(catalog)
    }

    /// Files are taken as given, whatever their extension; directories are
    /// expanded to the font descriptions directly inside them.
    pub fn from_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Self> {
        let mut catalog = Self::default();
        for input in inputs {
            let input = input.as_ref();
            if input.is_dir() {
                catalog.add_directory(input)?;
            } else {
                ensure!(input.is_file(), "no such font: {}", input.display());
                catalog.fonts.push(input.to_owned());
            }
        }
        Ok(catalog)
    }

    fn add_directory(&mut self, dir: &Path) -> Result<()> {
        let fuzzy = MatchOptions {
            case_sensitive: false,
            require_literal_leading_dot: false,
            require_literal_separator: true,
        };
        let patterns = FONT_EXTENSIONS
            .iter()
            .map(|ext| Pattern::new(&format!("*.{}", ext)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut found = Vec::new();
        for entry in fs::read_dir(dir)?.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if patterns.iter().any(|p| p.matches_with(&name, fuzzy)) {
                found.push(path);
            }
        }
        found.sort();
        debug!("found {} fonts in {}", found.len(), dir.display());
        self.fonts.extend(found);
        Ok(())
    }

    pub fn fonts(&self) -> &[PathBuf] {
        &self.fonts
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.fonts.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_lists_only_font_files() -> Result<()> {
        let catalog = FontCatalog::from_directory(Path::new("./test_data/fonts"))?;
        let names = catalog
            .fonts()
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["SHOUT.YAFF", "tiny.draw", "tiny.yaff"]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get(3).is_none());
        Ok(())
    }

    #[test]
    fn it_expands_directories_among_inputs() -> Result<()> {
        let inputs = [
            PathBuf::from("./test_data/fonts/README.txt"),
            PathBuf::from("./test_data/fonts"),
        ];
        let catalog = FontCatalog::from_inputs(&inputs)?;
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(0), Some(Path::new("./test_data/fonts/README.txt")));
        Ok(())
    }

    #[test]
    fn it_rejects_missing_inputs() {
        assert!(FontCatalog::from_inputs(&["./test_data/fonts/missing.yaff"]).is_err());
        assert!(FontCatalog::from_directory(Path::new("./test_data/missing")).is_err());
    }
}
