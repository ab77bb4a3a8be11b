//! Comparison table assembled from persisted metrics and captured CPU times

use crate::io::error::Result;
use crate::pipeline::artifacts::{Artifact, ArtifactStore, Method};
use crate::report::metrics::{format_mse, parse_cpu_time, parse_mse};

/// Column headers of the comparison table
pub const HEADERS: [&str; 3] = ["Method", "Mean squared error", "CPU time"];

const COLUMN_GAP: &str = "  ";

/// One method's line in the comparison
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    /// Method the row describes
    pub method: Method,
    /// Mean squared error, rounded to two decimals
    pub mse: f64,
    /// CPU time as reported by the reconstructor
    pub cpu_time: String,
}

impl ReportRow {
    fn cells(&self) -> [String; 3] {
        [
            self.method.display_name().to_string(),
            format_mse(self.mse),
            self.cpu_time.clone(),
        ]
    }
}

/// Both methods' results in fixed order
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    /// Read persisted MSE values and captured reconstructor output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A metric or captured output file is missing
    /// - A persisted MSE is not a number
    /// - A captured output lacks the CPU time marker
    pub fn from_store(store: &ArtifactStore) -> Result<Self> {
        let rows = Method::ALL
            .iter()
            .map(|&method| -> Result<ReportRow> {
                let mse = parse_mse(&store.read_text(method.mse())?)?;
                let cpu_time = parse_cpu_time(&store.read_text(method.stdout_log())?)?;
                Ok(ReportRow {
                    method,
                    mse,
                    cpu_time,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows })
    }

    /// Rows in report order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Render as an aligned plain-text table
    ///
    /// A column is right-aligned when every cell in it is a number and
    /// left-aligned otherwise. Each header is underlined by a dashed rule as
    /// wide as its column.
    pub fn render(&self) -> String {
        let cells: Vec<[String; 3]> = self.rows.iter().map(ReportRow::cells).collect();
        let numeric: [bool; 3] = std::array::from_fn(|column| {
            cells
                .iter()
                .all(|row| row[column].trim().parse::<f64>().is_ok())
        });

        let mut widths = HEADERS.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(cells.len() + 2);
        lines.push(format_line(&HEADERS.map(str::to_string), &widths, numeric));
        lines.push(
            widths
                .iter()
                .map(|&width| "-".repeat(width))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP),
        );
        for row in &cells {
            lines.push(format_line(row, &widths, numeric));
        }
        lines.join("\n")
    }

    /// Render and write the table artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the table file cannot be written
    pub fn persist(&self, store: &ArtifactStore) -> Result<()> {
        store.write(Artifact::Report, self.render())
    }
}

fn format_line(cells: &[String; 3], widths: &[usize; 3], numeric: [bool; 3]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .zip(numeric)
        .map(|((cell, &width), right)| {
            if right {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}
