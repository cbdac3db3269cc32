//! Delimiter-separated rendering of records
//!
//! Cells go through a `csv` writer, so text holding quotes or line breaks is
//! quoted and a record always stays one logical row.

use csv::{QuoteStyle, WriterBuilder};

use super::{FieldValue, Record};

/// Column separator; scraped text commonly contains commas, rarely pipes
pub const CSV_SEPARATOR: char = '|';

fn render_cell(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(text) => text.replace(CSV_SEPARATOR, " "),
        FieldValue::Count(0) => String::new(),
        FieldValue::Count(count) => count.to_string(),
        FieldValue::Flag(flag) => flag.to_string(),
    }
}

fn header_cells<R: Record>() -> Vec<String> {
    R::schema()
        .iter()
        .filter_map(|spec| spec.csv.name())
        .map(String::from)
        .collect()
}

fn row_cells<R: Record>(record: &R) -> Vec<String> {
    R::schema()
        .iter()
        .filter(|spec| spec.csv.name().is_some())
        .map(|spec| render_cell(spec.value(record)))
        .collect()
}

/// Write each line of cells as one `|`-separated record ending in `\n`
fn write_lines<I>(lines: I) -> Result<String, csv::Error>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(CSV_SEPARATOR as u8)
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    for line in lines {
        writer.write_record(&line)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_line<R: Record>(cells: Vec<String>) -> String {
    match write_lines([cells]) {
        Ok(line) => line.strip_suffix('\n').unwrap_or(&line).to_string(),
        Err(e) => format!("error converting {} to CSV: {}", R::NAME, e),
    }
}

/// Render one record as a CSV row, skipping omitted columns
pub fn to_csv_row<R: Record>(record: &R) -> String {
    render_line::<R>(row_cells(record))
}

/// Render the CSV header for a record type
pub fn to_csv_header<R: Record>() -> String {
    render_line::<R>(header_cells::<R>())
}

/// Render a header line followed by one line per record
pub fn to_csv_table<'a, R, I>(records: I) -> String
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut rows = records.into_iter().map(row_cells::<R>).peekable();
    if rows.peek().is_none() {
        return String::new();
    }
    let lines = std::iter::once(header_cells::<R>()).chain(rows);
    write_lines(lines)
        .unwrap_or_else(|e| format!("error converting {} list to CSV: {}", R::NAME, e))
}
