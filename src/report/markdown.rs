use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::models::LicenseRecord;

const TITLE: &str = "# Dependencies and licenses";

const DESCRIPTION: &str = "This is a collection of dependencies within the project and their \
associated licenses and copyright information. The data was collected using automated tools \
and requires manual review prior to acceptance.";

/// Number of records carrying each label. A record with two labels counts toward both.
pub fn count_labels(records: &[LicenseRecord]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        for label in &record.license_labels {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Render the full Markdown report for `records`, in the order given.
pub fn render<W: Write>(out: &mut W, root: &Path, records: &[LicenseRecord]) -> Result<()> {
    render_title(out)?;
    render_overview(out, &count_labels(records))?;
    render_packages(out, root, records)?;
    Ok(())
}

fn render_title<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}\n", TITLE)?;
    writeln!(out, "{}\n", DESCRIPTION)?;
    Ok(())
}

fn render_overview<W: Write>(out: &mut W, counts: &BTreeMap<&str, usize>) -> Result<()> {
    writeln!(out, "## Overview\n")?;

    if counts.is_empty() {
        writeln!(out, "_No license files found._\n")?;
        return Ok(());
    }

    for label in counts.keys() {
        write!(out, "| {} ", label)?;
    }
    writeln!(out, "|")?;

    for _ in counts.keys() {
        write!(out, "| -- ")?;
    }
    writeln!(out, "|")?;

    for count in counts.values() {
        write!(out, "| {} ", count)?;
    }
    writeln!(out, "|\n")?;

    Ok(())
}

fn render_packages<W: Write>(out: &mut W, root: &Path, records: &[LicenseRecord]) -> Result<()> {
    writeln!(out, "## Packages\n")?;

    for record in records {
        writeln!(out, "### {}\n", record.package_name)?;
        writeln!(out, " - **License**: {}", record.license_labels.join(", "))?;
        if let Some(version) = &record.version {
            writeln!(out, " - **Version**: {}", version)?;
        }
        if let Some(year) = &record.copyright_year {
            writeln!(out, " - **Year**: {}", year)?;
        }
        if let Some(author) = &record.copyright_author {
            writeln!(out, " - **Author**: {}", author)?;
        }
        writeln!(out, "\n[View license]({})\n", relative_link(root, &record.source_path))?;
    }

    Ok(())
}

/// Path of `file` relative to `root`, with forward slashes and no leading slash.
/// Files outside `root` keep their full path.
pub fn relative_link(root: &Path, file: &Path) -> String {
    let Ok(relative) = file.strip_prefix(root) else {
        return file.to_string_lossy().into_owned();
    };
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    parts.join("/")
}
