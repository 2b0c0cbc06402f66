use crate::error::{CliError, Result};
use crestparse::workflows::analyze::{Analysis, ReportRow};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

const BASE_HEADERS: [&str; 6] = [
    "rank",
    "file #",
    "E (Hartree)",
    "dE (Hartree)",
    "dE (kcal/mol)",
    "Boltzmann (%)",
];
const BOLTZMANN_COLUMN: usize = 5;

fn headers(analysis: &Analysis<'_>) -> Vec<String> {
    let mut headers: Vec<String> = BASE_HEADERS.iter().map(|h| h.to_string()).collect();
    if let Some(request) = analysis.descriptor() {
        headers.push(request.label());
    }
    headers
}

/// Formats one row with display precision. `file #` is 1-based, like line-oriented tools.
fn display_cells(row: &ReportRow) -> Vec<String> {
    let mut cells = vec![
        row.rank.to_string(),
        (row.structure_index + 1).to_string(),
        format!("{:.8}", row.absolute_energy),
        format!("{:.8}", row.relative_energy_hartree),
        format!("{:.4}", row.relative_energy_kcal),
        format!("{:.2}", row.boltzmann_percent),
    ];
    if let Some(value) = row.descriptor {
        cells.push(format!("{:.3}", value));
    }
    cells
}

/// Renders the selected rows as a right-aligned plain-text table.
pub fn render_table(analysis: &Analysis<'_>) -> String {
    let mut headers = headers(analysis);
    headers[BOLTZMANN_COLUMN] = format!(
        "{} T = {} K",
        BASE_HEADERS[BOLTZMANN_COLUMN],
        analysis.temperature_k()
    );
    let rows: Vec<Vec<String>> = analysis
        .selected_rows()
        .iter()
        .map(display_cells)
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let mut push_line = |cells: &[String]| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line);
    };
    push_line(&headers);
    for cells in &rows {
        push_line(cells);
    }
    out
}

/// Writes the selected rows to `writer` as CSV, with full precision.
pub fn write_csv<W: Write>(analysis: &Analysis<'_>, writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(headers(analysis))?;
    for row in analysis.selected_rows() {
        let mut record = vec![
            row.rank.to_string(),
            (row.structure_index + 1).to_string(),
            row.absolute_energy.to_string(),
            row.relative_energy_hartree.to_string(),
            row.relative_energy_kcal.to_string(),
            row.boltzmann_percent.to_string(),
        ];
        if let Some(value) = row.descriptor {
            record.push(value.to_string());
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_to_path(analysis: &Analysis<'_>, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_csv(analysis, file).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crestparse::core::io::xyz::{ParseOptions, XyzFile};
    use crestparse::core::models::structure::Structure;
    use crestparse::engine::config::AnalysisConfigBuilder;
    use crestparse::engine::descriptors::DescriptorRequest;
    use crestparse::workflows::analyze;

    const ENSEMBLE: &str = "\
2
 -1.00000000
H 0.0 0.0 0.0
H 0.0 0.0 0.74
2
 -1.00100000
H 0.0 0.0 0.0
H 0.0 0.0 0.75
";

    fn ensemble() -> Vec<Structure> {
        XyzFile::parse_str(ENSEMBLE, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn table_lists_selected_rows_under_headers() {
        let structures = ensemble();
        let config = AnalysisConfigBuilder::new()
            .descriptor(Some(DescriptorRequest::Distance(0, 1)))
            .build()
            .unwrap();
        let analysis = analyze::run(&structures, &config).unwrap();

        let table = render_table(&analysis);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Boltzmann (%) T = 298.15 K"));
        assert!(lines[0].ends_with("d(0,1) / Å"));
        assert!(lines[1].trim_start().starts_with("1  "));
        assert!(lines[1].contains("-1.00100000"));
        assert!(lines[1].ends_with("0.750"));
        assert!(lines[2].contains("0.6275"));
    }

    #[test]
    fn table_header_names_the_temperature() {
        let structures = ensemble();
        let config = AnalysisConfigBuilder::new().temperature(350.0).build().unwrap();
        let analysis = analyze::run(&structures, &config).unwrap();
        let table = render_table(&analysis);
        let header = table.lines().next().unwrap();
        assert!(header.contains("Boltzmann (%) T = 350 K"));
        assert!(!header.contains("298.15"));
    }

    #[test]
    fn table_width_is_uniform() {
        let structures = ensemble();
        let analysis = analyze::run(&structures, &Default::default()).unwrap();
        let table = render_table(&analysis);
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn csv_contains_header_and_full_precision_rows() {
        let structures = ensemble();
        let config = AnalysisConfigBuilder::new()
            .explicit_ranks(Some(vec![2]))
            .build()
            .unwrap();
        let analysis = analyze::run(&structures, &config).unwrap();

        let mut buffer = Vec::new();
        write_csv(&analysis, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("rank,file #,E (Hartree),dE (Hartree),dE (kcal/mol),Boltzmann (%)")
        );
        let fields: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(fields[0], "2");
        assert_eq!(fields[1], "1");
        assert_eq!(fields[2], "-1");
        assert!(lines.next().is_none());
    }

    #[test]
    fn csv_file_is_written() {
        let structures = ensemble();
        let analysis = analyze::run(&structures, &Default::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_csv_to_path(&analysis, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
