use std::path::PathBuf;

/// Label assigned when no catalog pattern matches, or the file could not be read.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The result of classifying one discovered license file.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseRecord {
    pub source_path: PathBuf,
    /// Name of the directory holding the file. An approximation: nested
    /// license files in the same hierarchy are not disambiguated.
    pub package_name: String,
    /// Sorted, deduplicated, never empty.
    pub license_labels: Vec<String>,
    pub version: Option<String>,
    pub copyright_year: Option<String>,
    pub copyright_author: Option<String>,
}

/// Everything the classifier extracts from file contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub license_labels: Vec<String>,
    pub version: Option<String>,
    pub copyright_year: Option<String>,
    pub copyright_author: Option<String>,
}

impl Classification {
    /// Degraded result for a file whose contents are unavailable.
    pub fn unknown() -> Self {
        Classification {
            license_labels: vec![UNKNOWN_LABEL.to_string()],
            version: None,
            copyright_year: None,
            copyright_author: None,
        }
    }

    pub fn into_record(self, source_path: PathBuf) -> LicenseRecord {
        let package_name = package_name(&source_path);
        LicenseRecord {
            source_path,
            package_name,
            license_labels: self.license_labels,
            version: self.version,
            copyright_year: self.copyright_year,
            copyright_author: self.copyright_author,
        }
    }
}

/// Base name of the parent directory of `path`, or an empty string at the root.
pub fn package_name(path: &std::path::Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_package_name_is_parent_dir() {
        assert_eq!(package_name(Path::new("/vendor/serde/LICENSE")), "serde");
        assert_eq!(package_name(Path::new("/vendor/a/b/COPYING-LICENSE")), "b");
    }

    #[test]
    fn test_package_name_at_root() {
        assert_eq!(package_name(Path::new("/LICENSE")), "");
    }

    #[test]
    fn test_unknown_into_record() {
        let record = Classification::unknown().into_record(PathBuf::from("/x/pkg/LICENSE"));
        assert_eq!(record.package_name, "pkg");
        assert_eq!(record.license_labels, vec!["Unknown"]);
        assert!(record.version.is_none());
        assert!(record.copyright_year.is_none());
        assert!(record.copyright_author.is_none());
    }
}
