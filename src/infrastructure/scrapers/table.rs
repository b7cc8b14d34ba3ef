use super::text::{clean, derive_id};
use crate::config::{ColumnSource, ColumnSpec, TableSpec};
use crate::domain::{RowFields, TableRecord};
use crate::error::{HarvestError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::debug;

pub(crate) fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| HarvestError::Selector(format!("{}: {}", raw, e)))
}

enum Extraction {
    Text,
    Attribute {
        selector: Selector,
        name: String,
        derive_param: Option<String>,
    },
}

struct Column {
    field: String,
    index: usize,
    extraction: Extraction,
}

impl Column {
    fn compile(spec: &ColumnSpec) -> Result<Self> {
        let extraction = match &spec.source {
            ColumnSource::Text => Extraction::Text,
            ColumnSource::Attribute {
                selector,
                name,
                derive_param,
            } => Extraction::Attribute {
                selector: parse_selector(selector)?,
                name: name.clone(),
                derive_param: derive_param.clone(),
            },
        };

        Ok(Self {
            field: spec.field.clone(),
            index: spec.column,
            extraction,
        })
    }

    fn read(&self, cell: ElementRef<'_>) -> String {
        match &self.extraction {
            Extraction::Text => clean(&cell.text().collect::<String>()),
            Extraction::Attribute {
                selector,
                name,
                derive_param,
            } => {
                let raw = cell
                    .select(selector)
                    .next()
                    .and_then(|node| node.value().attr(name))
                    .unwrap_or("");
                match derive_param {
                    Some(param) => clean(&derive_id(raw, param)),
                    None => clean(raw),
                }
            }
        }
    }
}

/// Turns the rows of one rendered table into records of type `R`.
///
/// Rows come out in document order. A row is skipped when its validity field is
/// empty after cleaning; cells the row does not have read as empty strings.
pub struct TableExtractor<R> {
    rows: Selector,
    cells: Selector,
    columns: Vec<Column>,
    validity_field: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: TableRecord> TableExtractor<R> {
    pub fn new(spec: &TableSpec) -> Result<Self> {
        check_mapping::<R>(spec)?;

        let validity_field = spec
            .validity_field()
            .ok_or_else(|| HarvestError::Config("table has no columns".into()))?
            .to_string();

        let columns = spec
            .columns
            .iter()
            .map(Column::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rows: parse_selector(&spec.row_selector)?,
            cells: parse_selector(&spec.cell_selector)?,
            columns,
            validity_field,
            _record: PhantomData,
        })
    }

    pub fn extract(&self, markup: &str) -> Result<Vec<R>> {
        if markup.trim().is_empty() {
            return Err(HarvestError::Parse("document is empty".into()));
        }

        let document = Html::parse_document(markup);
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in document.select(&self.rows) {
            match self.read_row(row) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        debug!("Extracted {} rows, skipped {}", records.len(), skipped);
        Ok(records)
    }

    fn read_row(&self, row: ElementRef<'_>) -> Option<R> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cells).collect();

        let mut fields = RowFields::default();
        for column in &self.columns {
            let value = cells
                .get(column.index)
                .map(|cell| column.read(*cell))
                .unwrap_or_default();
            fields.insert(column.field.as_str(), value);
        }

        if fields.get(&self.validity_field).is_empty() {
            return None;
        }

        Some(R::from_row(&mut fields))
    }
}

fn check_mapping<R: TableRecord>(spec: &TableSpec) -> Result<()> {
    let mut seen = HashSet::new();
    for column in &spec.columns {
        if !R::FIELDS.contains(&column.field.as_str()) {
            return Err(HarvestError::Config(format!(
                "unknown field `{}`, expected one of {:?}",
                column.field,
                R::FIELDS
            )));
        }
        if !seen.insert(column.field.as_str()) {
            return Err(HarvestError::Config(format!(
                "field `{}` is mapped twice",
                column.field
            )));
        }
    }

    if let Some(missing) = R::FIELDS.iter().find(|f| !seen.contains(*f)) {
        return Err(HarvestError::Config(format!("field `{}` is not mapped", missing)));
    }

    if let Some(validity) = spec.validity_field() {
        if !seen.contains(validity) {
            return Err(HarvestError::Config(format!(
                "validity field `{}` is not mapped",
                validity
            )));
        }
    }

    Ok(())
}
