use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-scan",
    about = "Find vendored license files, classify them, and print a Markdown summary",
    version
)]
pub struct Cli {
    /// Directory to scan [default: current directory]
    pub path: Option<PathBuf>,

    /// Extra license patterns [default: <PATH>/.license-scan/config.toml, fallback ~/.config/license-scan/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sort packages by file path instead of discovery order
    #[arg(long)]
    pub sort: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors to stderr
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["license-scan"]).unwrap();
        assert!(cli.path.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.sort);
    }

    #[test]
    fn test_positional_path() {
        let cli = Cli::try_parse_from(["license-scan", "vendor", "--sort"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("vendor")));
        assert!(cli.sort);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["license-scan", "-v", "-q"]).is_err());
    }
}
