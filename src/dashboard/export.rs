//! Tabular reports built from an already filtered and sorted collection.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// A report column: printed header and the camelCase record field it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub key: &'static str,
}

const fn column(header: &'static str, key: &'static str) -> Column {
    Column { header, key }
}

pub const DELIVERY_COLUMNS: &[Column] = &[
    column("Cliente", "customerName"),
    column("Endereço", "address"),
    column("Data", "deliveryDate"),
    column("Início", "startTime"),
    column("Saída", "endTime"),
    column("Litros", "waterQuantity"),
    column("Motorista", "driverName"),
    column("Caminhão", "truckPlate"),
    column("Receptor", "receiverSignature"),
    column("RG Receptor", "receiverRg"),
];

pub const FUELING_COLUMNS: &[Column] = &[
    column("Data", "date"),
    column("Motorista", "driverName"),
    column("Caminhão", "truckPlate"),
    column("Posto", "stationName"),
    column("Litros", "liters"),
    column("Valor Total", "totalValue"),
    column("Obs.", "observation"),
];

pub const MAINTENANCE_COLUMNS: &[Column] = &[
    column("Data", "date"),
    column("Motorista", "driverName"),
    column("Caminhão", "truckPlate"),
    column("Problema", "issue"),
    column("Mecânico", "mechanic"),
    column("Custo", "cost"),
    column("Obs.", "observation"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Deliveries,
    Fuelings,
    Maintenances,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Deliveries => "Relatório de Entregas",
            ReportKind::Fuelings => "Relatório de Abastecimentos",
            ReportKind::Maintenances => "Relatório de Manutenções",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::Deliveries => "entregas",
            ReportKind::Fuelings => "abastecimentos",
            ReportKind::Maintenances => "manutencoes",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            ReportKind::Deliveries => DELIVERY_COLUMNS,
            ReportKind::Fuelings => FUELING_COLUMNS,
            ReportKind::Maintenances => MAINTENANCE_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub file_name: String,
    pub headers: Vec<String>,
    /// Rows split into pages; always at least one page.
    pub pages: Vec<Vec<Vec<String>>>,
}

impl Report {
    pub fn build<T: Serialize>(
        kind: ReportKind,
        records: &[T],
        generated_at: NaiveDateTime,
        rows_per_page: usize,
    ) -> Result<Self, AppError> {
        Self::with_columns(
            kind.title(),
            kind.file_stem(),
            kind.columns(),
            records,
            generated_at,
            rows_per_page,
        )
    }

    pub fn with_columns<T: Serialize>(
        title: &str,
        file_stem: &str,
        columns: &[Column],
        records: &[T],
        generated_at: NaiveDateTime,
        rows_per_page: usize,
    ) -> Result<Self, AppError> {
        let rows = records
            .iter()
            .map(|record| {
                let value = serde_json::to_value(record)?;
                Ok(columns
                    .iter()
                    .map(|column| value.get(column.key).map(cell).unwrap_or_default())
                    .collect::<Vec<String>>())
            })
            .collect::<Result<Vec<Vec<String>>, AppError>>()?;

        let per_page = rows_per_page.max(1);
        let mut pages: Vec<Vec<Vec<String>>> =
            rows.chunks(per_page).map(<[Vec<String>]>::to_vec).collect();
        if pages.is_empty() {
            pages.push(Vec::new());
        }

        Ok(Self {
            title: title.to_string(),
            file_name: format!(
                "{file_stem}_{}.txt",
                generated_at.format("%Y-%m-%d_%H-%M")
            ),
            headers: columns.iter().map(|column| column.header.to_string()).collect(),
            pages,
        })
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Plain-text grid, one block per page.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in self.pages.iter().flatten() {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }

        let separator = widths
            .iter()
            .map(|width| "-".repeat(*width + 2))
            .collect::<Vec<_>>()
            .join("+");

        let total = self.pages.len();
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.title);
            out.push('\n');
            out.push_str(&format_row(&self.headers, &widths));
            out.push_str(&separator);
            out.push('\n');
            for row in page {
                out.push_str(&format_row(row, &widths));
            }
            out.push_str(&format!("Página {} de {}\n", index + 1, total));
        }
        out
    }
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!(" {value:<width$} ", width = *width))
        .collect();
    let mut line = cells.join("|");
    line.push('\n');
    line
}

/// Integral numbers print without a fraction; null prints as empty.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}
