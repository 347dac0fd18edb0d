//! Import table: short class names to fully-qualified names.

use std::str::FromStr;

use indexmap::IndexMap;
use smol_str::SmolStr;

/// External oracle used to qualify type names that are not drawn on the
/// diagram (e.g. `Instant` → `java.time.Instant`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImportTable {
    entries: IndexMap<SmolStr, String>,
}

impl ImportTable {
    /// An empty table; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(short, full)` pairs.
    pub fn from_pairs<I, S, F>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, F)>,
        S: Into<SmolStr>,
        F: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(short, full)| (short.into(), full.into()))
                .collect(),
        }
    }

    /// Register a fully-qualified name under its last `.` segment.
    pub fn insert_full_name(&mut self, full_name: &str) {
        let short = full_name.rsplit('.').next().unwrap_or(full_name);
        self.entries
            .insert(SmolStr::new(short), full_name.to_string());
    }

    pub fn full_name_for_class(&self, short_name: &str) -> Option<&str> {
        self.entries.get(short_name).map(String::as_str)
    }

    /// The package prefix of the fully-qualified name for `short_name`.
    ///
    /// Misses and names without a `.` yield `None`.
    pub fn package_for_class(&self, short_name: &str) -> Option<&str> {
        self.full_name_for_class(short_name)
            .and_then(|full| full.rsplit_once('.'))
            .map(|(package, _)| package)
            .filter(|package| !package.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse one fully-qualified name per line.
///
/// Blank lines and lines starting with `#` or `//` are skipped; a leading
/// `import ` and trailing `;` are tolerated.
impl FromStr for ImportTable {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = Self::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let line = line.strip_prefix("import ").unwrap_or(line).trim();
            let line = line.strip_suffix(';').unwrap_or(line).trim();
            if !line.is_empty() {
                table.insert_full_name(line);
            }
        }
        Ok(table)
    }
}
