// File: crates/chart-core/src/schema.rs
// Summary: Explicit column schemas and typed CSV tables with per-field missing markers.

use crate::error::{ChartError, Result};

/// Semantic type a column is coerced to at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Column {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }
    pub const fn number(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Number }
    }
}

/// Ordered list of the columns a chart reads from one dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: impl Into<Vec<Column>>) -> Self {
        Self { columns: columns.into() }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// A numeric cell: a finite number, or an explicit marker for text that did not coerce.
#[derive(Clone, Debug, PartialEq)]
pub enum Measure {
    Present(f64),
    Missing { raw: String },
}

impl Measure {
    /// Coerce one raw cell. Blank, unparseable and non-finite input is `Missing`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Measure::Present(v),
            _ => Measure::Missing { raw: raw.to_string() },
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Measure::Present(v) => Some(*v),
            Measure::Missing { .. } => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Measure::Missing { .. })
    }
}

impl From<f64> for Measure {
    fn from(v: f64) -> Self {
        if v.is_finite() { Measure::Present(v) } else { Measure::Missing { raw: v.to_string() } }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Measure),
}

/// Rows of one dataset after the schema has been applied.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    schema: Schema,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Parse `text` as comma-separated values with a required header row.
    ///
    /// Rows are never dropped: a cell that fails numeric coercion becomes
    /// [`Measure::Missing`], and a schema column absent from the header is
    /// missing in every row.
    pub fn parse(name: &str, text: &str, schema: &Schema) -> Result<Table> {
        let csv_err = |source| ChartError::Csv { name: name.to_string(), source };
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = rdr.headers().map_err(csv_err)?.clone();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ChartError::MissingHeader(name.to_string()));
        }

        let indices: Vec<Option<usize>> = schema
            .columns
            .iter()
            .map(|col| {
                let idx = headers.iter().position(|h| h == col.name);
                if idx.is_none() {
                    tracing::warn!(dataset = name, column = col.name, "column not found in header");
                }
                idx
            })
            .collect();

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(csv_err)?;
            let cells = schema
                .columns
                .iter()
                .zip(&indices)
                .map(|(col, idx)| {
                    let raw = idx.and_then(|i| rec.get(i)).unwrap_or("");
                    match col.kind {
                        FieldKind::Text => Cell::Text(raw.to_string()),
                        FieldKind::Number => Cell::Number(Measure::parse(raw)),
                    }
                })
                .collect();
            rows.push(cells);
        }

        let missing = rows
            .iter()
            .flatten()
            .filter(|c| matches!(c, Cell::Number(m) if m.is_missing()))
            .count();
        if missing > 0 {
            tracing::debug!(dataset = name, missing, "numeric cells failed coercion");
        }
        tracing::debug!(dataset = name, rows = rows.len(), "parsed dataset");

        Ok(Table { name: name.to_string(), schema: schema.clone(), rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record { schema: &self.schema, cells })
    }
}

/// Borrowed view over one typed row.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    schema: &'a Schema,
    cells: &'a [Cell],
}

impl<'a> Record<'a> {
    /// Text of a `Text` column; numeric columns and unknown names read as empty.
    pub fn text(&self, column: &str) -> &'a str {
        match self.schema.position(column).map(|i| &self.cells[i]) {
            Some(Cell::Text(s)) => s,
            _ => "",
        }
    }

    /// Value of a `Number` column; text columns and unknown names read as missing.
    pub fn measure(&self, column: &str) -> Measure {
        match self.schema.position(column).map(|i| &self.cells[i]) {
            Some(Cell::Number(m)) => m.clone(),
            _ => Measure::Missing { raw: String::new() },
        }
    }

    pub fn cells(&self) -> &'a [Cell] { self.cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new([Column::text("tech"), Column::number("energy")])
    }

    #[test]
    fn numeric_cells_are_finite_or_missing() {
        let text = "tech,energy\nLED,120\nOLED, 150.5 \nQLED,n/a\nLCD,\nCRT,inf\n";
        let table = Table::parse("t.csv", text, &schema()).unwrap();
        assert_eq!(table.len(), 5);
        let values: Vec<Measure> = table.records().map(|r| r.measure("energy")).collect();
        assert_eq!(values[0], Measure::Present(120.0));
        assert_eq!(values[1], Measure::Present(150.5));
        assert_eq!(values[2], Measure::Missing { raw: "n/a".into() });
        assert!(values[3].is_missing());
        assert!(values[4].is_missing());
        for cell in table.records().flat_map(|r| r.cells().iter()) {
            if let Cell::Number(Measure::Present(v)) = cell {
                assert!(v.is_finite());
            }
        }
    }

    #[test]
    fn absent_column_is_missing_everywhere() {
        let text = "tech,kwh\nLED,120\n";
        let table = Table::parse("t.csv", text, &schema()).unwrap();
        let rec = table.records().next().unwrap();
        assert_eq!(rec.text("tech"), "LED");
        assert!(rec.measure("energy").is_missing());
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = Table::parse("t.csv", "", &schema()).unwrap_err();
        assert!(matches!(err, ChartError::MissingHeader(_)));
    }

    #[test]
    fn short_rows_are_kept() {
        let table = Table::parse("t.csv", "tech,energy\nLED\n", &schema()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.records().next().unwrap().measure("energy").is_missing());
    }
}
