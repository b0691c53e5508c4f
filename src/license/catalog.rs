use std::collections::BTreeSet;

use regex::Regex;

use crate::error::ScanError;
use crate::models::UNKNOWN_LABEL;

/// Built-in signatures, keyed by label.
///
/// Real-world license text is often edited by hand, so several labels carry
/// more than one pattern and any single match is enough.
/// Reference: <https://choosealicense.com/appendix>
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "MIT",
        &[
            r"MIT License",
            r"MIT/X11 License",
            r#"Permission\s+is\s+hereby\s+granted,\s+free\s+of\s+charge,\s+to\s+any\s+person\s+obtaining\s+a\s+copy\s+of\s+this\s+software\s+and\s+associated\s+documentation\s+files\s+\(the\s+"Software"\),\s+to\s+deal\s+in\s+the\s+Software\s+without\s+restriction,\s+including\s+without\s+limitation\s+the\s+rights\s+to\s+use,\s+copy,\s+modify,\s+merge,\s+publish,\s+distribute,\s+sublicense,\s+and/or\s+sell\s+copies\s+of\s+the\s+Software,\s+and\s+to\s+permit\s+persons\s+to\s+whom\s+the\s+Software\s+is\s+furnished\s+to\s+do\s+so,\s+subject\s+to\s+the\s+following\s+conditions"#,
        ],
    ),
    ("AGPL", &[r"GNU AFFERO GENERAL PUBLIC LICENSE"]),
    ("LGPL", &[r"GNU LESSER GENERAL PUBLIC LICENSE"]),
    ("GPL", &[r"GNU GENERAL PUBLIC LICENSE"]),
    ("MPL", &[r"Mozilla Public License"]),
    ("Apache", &[r"Apache License"]),
    (
        "Unlicense",
        &[r"free and unencumbered software", r"https?://unlicense\.org"],
    ),
    ("AFL", &[r"Academic Free License"]),
    ("Artistic", &[r"Artistic License"]),
    (
        "BSD",
        &[
            r"BSD 2-Clause License",
            r"The Clear BSD License",
            r"BSD 3-Clause License",
            r"BSD",
            r"Redistribution\s+and\s+use\s+in\s+source\s+and\s+binary\s+forms,\s+with\s+or\s+without\s+modification,\s+are\s+permitted\s+provided\s+that\s+the\s+following\s+conditions\s+are\s+met",
            r"Redistribution\s+and\s+use\s+of\s+this\s+software\s+in\s+source\s+and\s+binary\s+forms,\s+with\s+or\s+without\s+modification,\s+are\s+permitted\s+provided\s+that\s+the\s+following\s+conditions\s+are\s+met",
        ],
    ),
    ("Boost", &[r"Boost Software License"]),
    ("CC Attribution", &[r"Attribution \d+\.\d+ International"]),
    (
        "CC Attribution-ShareAlike",
        &[r"Attribution-ShareAlike \d+\.\d+ International"],
    ),
    ("CC0", &[r"CC0 \d+\.\d+ Universal"]),
    ("Educational", &[r"Educational Community License"]),
    ("Eclipse", &[r"Eclipse Public License"]),
    ("European Union", &[r"European Union Public Licen[sc]e"]),
    (
        "ISC",
        &[
            r"ISC License",
            r"Permission\s+to\s+use,\s+copy,\s+modify,\s+and/or\s+distribute\s+this\s+software\s+for\s+any\s+purpose\s+with\s+or\s+without\s+fee\s+is\s+hereby\s+granted,\s+provided\s+that\s+the\s+above\s+copyright\s+notice\s+and\s+this\s+permission\s+notice\s+appear\s+in\s+all\s+copies.",
        ],
    ),
    ("LaTeX", &[r"The LaTeX Project Public License"]),
    ("Ms-PL", &[r"Microsoft Public License"]),
    ("Ms-RL", &[r"Microsoft Reciprocal License"]),
    ("OSL", &[r"Open Software License"]),
    ("PostgreSQL", &[r"PostgreSQL Licen[cs]e"]),
    ("SIL OFL", &[r"SIL Open Font License"]),
    (
        "UIUC/NCSA",
        &[
            r"University of Illinois/NCSA Open Source License",
            r"University of Illinois Open Source License",
            r"NCSA Open Source License",
        ],
    ),
    ("UPL", &[r"Universal Permissive License"]),
    (
        "WTF",
        &[
            r"DO WHAT THE FUCK YOU WANT TO PUBLIC LICENSE",
            r"DO WTF YOU WANT TO PUBLIC LICENSE",
        ],
    ),
    ("zlib", &[r"zlib License"]),
];

/// One label and the patterns that identify it.
#[derive(Debug)]
pub struct CatalogEntry {
    pub label: String,
    pub patterns: Vec<Regex>,
}

impl CatalogEntry {
    /// A label hits when any one of its patterns matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// Ordered label → patterns table. Built once at startup and only read afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Compile the built-in table.
    pub fn builtin() -> Result<Self, ScanError> {
        let mut catalog = Catalog::default();
        for (label, patterns) in BUILTIN {
            catalog.extend(label, patterns.iter().copied())?;
        }
        Ok(catalog)
    }

    /// Add patterns under `label`, appending to an existing entry when the
    /// label is already present.
    pub fn extend<'p, I>(&mut self, label: &str, patterns: I) -> Result<(), ScanError>
    where
        I: IntoIterator<Item = &'p str>,
    {
        if label == UNKNOWN_LABEL {
            return Err(ScanError::ReservedLabel(label.to_string()));
        }

        let compiled = patterns
            .into_iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ScanError::Pattern {
                    label: label.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if compiled.is_empty() {
            return Ok(());
        }

        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.patterns.extend(compiled),
            None => self.entries.push(CatalogEntry {
                label: label.to_string(),
                patterns: compiled,
            }),
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Every label with at least one matching pattern, sorted and deduplicated.
    pub fn matching_labels(&self, text: &str) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.is_match(text))
            .map(|entry| entry.label.as_str())
            .collect()
    }
}
