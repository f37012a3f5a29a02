//! INI document model for the client configuration file.
//!
//! Follows the conventions of the INI reader Landscape client itself uses:
//! `key = value` or `key: value` options, case-folded option names,
//! case-sensitive section names, indented continuation lines, and full-line
//! `#` / `;` comments. Comments are not preserved on render.
//!
//! Pure functions only, no I/O.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::domain::error::IniError;

static SECTION_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^\[(?P<header>.+)\]").expect("valid regex")
});

/// Options of a single section, in file order.
pub type Section = IndexMap<String, String>;

/// An INI document: named sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, Section>,
}

impl IniDocument {
    /// Parse `text` into a document.
    ///
    /// Repeated sections are merged and repeated options keep the last value.
    /// A line without a `=` or `:` delimiter is read as an option with an
    /// empty value.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::MissingSectionHeader`] if an option appears before
    /// the first section header.
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut doc = Self::default();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;
        // Blank lines seen since the last value line. They only become part
        // of the value if an indented continuation follows.
        let mut pending_blanks = 0usize;

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                if last_key.is_some() {
                    pending_blanks += 1;
                }
                continue;
            }
            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let indented = raw_line.starts_with(char::is_whitespace);
            if indented {
                if let (Some(section), Some(key)) = (&current, &last_key) {
                    if let Some(value) = doc
                        .sections
                        .get_mut(section)
                        .and_then(|options| options.get_mut(key))
                    {
                        for _ in 0..pending_blanks {
                            value.push('\n');
                        }
                        pending_blanks = 0;
                        value.push('\n');
                        value.push_str(line);
                        continue;
                    }
                }
            }
            pending_blanks = 0;

            if let Some(caps) = SECTION_HEADER_RE.captures(line) {
                let name = caps["header"].to_string();
                doc.sections.entry(name.clone()).or_default();
                current = Some(name);
                last_key = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(IniError::MissingSectionHeader {
                    line: idx + 1,
                    content: raw_line.to_string(),
                });
            };

            let (key, value) = split_option(line);
            if key.is_empty() {
                continue;
            }
            doc.sections
                .entry(section.clone())
                .or_default()
                .insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(doc)
    }

    #[cfg(test)]
    fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Options of section `name`, if present.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[cfg(test)]
    fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Returns the section `name`, creating it empty if missing.
    pub fn ensure_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Look up a single option.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    /// Set an option, creating the section if needed. Option names are
    /// case-folded.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.ensure_section(section)
            .insert(key.to_lowercase(), value.into());
    }

    /// Render the document back to INI text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, options) in &self.sections {
            writeln!(f, "[{name}]")?;
            for (key, value) in options {
                writeln!(f, "{key} = {}", value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Split an option line at its first `=` or `:`.
fn split_option(line: &str) -> (String, String) {
    match line.find(['=', ':']) {
        Some(pos) => (
            line[..pos].trim().to_lowercase(),
            line[pos + 1..].trim().to_string(),
        ),
        None => (line.to_lowercase(), String::new()),
    }
}
