use crate::error::CliError;
use clap::ValueEnum;
use model::records::table::ResultTable;
use reports::service::ReportService;
use std::{borrow::Cow, path::Path};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render(
    service: &ReportService,
    table: &ResultTable,
    format: OutputFormat,
) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Table => render_table(table),
        OutputFormat::Json => serde_json::to_string_pretty(&table.to_json())?,
        OutputFormat::Csv => String::from_utf8_lossy(&service.export_csv(table)?).into_owned(),
    };
    Ok(rendered)
}

/// Plain aligned text table with a dashed rule under the header.
pub fn render_table(table: &ResultTable) -> String {
    let names = table.column_names();
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|value| value.to_cell()).collect())
        .collect();

    let widths: Vec<usize> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |fields: Vec<&str>| -> String {
        fields
            .iter()
            .zip(&widths)
            .map(|(field, width)| format!("{field:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(cells.len() + 2);
    out.push(line(names.clone()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    if cells.is_empty() {
        out.push("(no rows)".to_string());
    }
    out.join("\n")
}

/// Writes to `path` when given, otherwise prints to stdout.
pub async fn emit(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => {
            tokio::fs::write(path, content).await?;
            info!("Wrote output to {}", path.display());
        }
        None => print!("{}", terminated(content)),
    }
    Ok(())
}

/// Appends a newline unless `content` already ends with one, as CSV does.
fn terminated(content: &str) -> Cow<'_, str> {
    if content.is_empty() || content.ends_with('\n') {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(format!("{content}\n"))
    }
}

/// `Top 10 Providers by Food Quantity` -> `top_10_providers_by_food_quantity.csv`
pub fn default_export_name(report: &str) -> String {
    let slug = report
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    format!("{slug}.csv")
}
