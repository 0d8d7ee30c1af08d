//! Settings for the `analyze` command.

use finmetrics::output::{DEFAULT_REPORT_FILE, ExportFormat, TableOrder};
use std::path::{Path, PathBuf};

/// Everything `analyze` needs besides the market price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnalyzeConfig {
    pub(crate) input: PathBuf,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: ExportFormat,
    pub(crate) order: TableOrder,
    pub(crate) quiet: bool,
}

impl AnalyzeConfig {
    /// Where the export goes, if one was requested.
    ///
    /// A bare `--output` writes the default report file, switching its
    /// extension to match a non-text format.
    pub(crate) fn output_path(&self) -> Option<PathBuf> {
        let path = self.output.as_deref()?;
        if path == Path::new(DEFAULT_REPORT_FILE) {
            return Some(path.with_extension(self.format.extension()));
        }
        Some(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(output: Option<&str>, format: ExportFormat) -> AnalyzeConfig {
        AnalyzeConfig {
            input: PathBuf::from("filing.csv"),
            output: output.map(PathBuf::from),
            format,
            order: TableOrder::Catalog,
            quiet: false,
        }
    }

    #[rstest]
    #[case(None, ExportFormat::Text, None)]
    #[case(Some(DEFAULT_REPORT_FILE), ExportFormat::Text, Some("financial_metrics.txt"))]
    #[case(Some(DEFAULT_REPORT_FILE), ExportFormat::Csv, Some("financial_metrics.csv"))]
    #[case(Some(DEFAULT_REPORT_FILE), ExportFormat::PrettyJson, Some("financial_metrics.json"))]
    #[case(Some("out/report.dat"), ExportFormat::Json, Some("out/report.dat"))]
    fn test_output_path(
        #[case] output: Option<&str>,
        #[case] format: ExportFormat,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            config(output, format).output_path(),
            expected.map(PathBuf::from)
        );
    }
}
