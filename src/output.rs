//! # Output Module
//!
//! Renders records as JSON or `|`-separated CSV and writes them to uniquely
//! named files.
//!
//! ## File naming
//!
//! Files are named `<prefix>_<YYYY-MM-DDTHH-MM-SS>-<nanoseconds>.<ext>` from
//! the local time of the write and are created with create-new semantics, so
//! an existing file is never overwritten.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{Collection, Record};

const MAX_NAME_ATTEMPTS: u32 = 3;

/// Serialization format of written output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::Config(format!("unknown format: {}", s))),
        }
    }
}

/// Render a batch of records
pub fn render<R: Record>(records: &Collection<R>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => records.to_json(),
        OutputFormat::Csv => records.to_csv(),
    }
}

/// Render a single record; CSV output is a header line and one row
pub fn render_record<R: Record>(record: &R, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => record.json(),
        OutputFormat::Csv => format!("{}\n{}\n", R::csv_header(), record.csv_row()),
    }
}

/// File name for output written at `now`
pub fn output_file_name(prefix: &str, extension: &str, now: DateTime<Local>) -> String {
    format!(
        "{}_{}-{}.{}",
        prefix,
        now.format("%Y-%m-%dT%H-%M-%S"),
        now.timestamp_subsec_nanos(),
        extension
    )
}

/// Write `content` to a new timestamped file in `dir`
///
/// An empty `dir` means the current directory. Missing directories are
/// created. Returns the path of the written file.
pub async fn write_output(
    content: &str,
    dir: impl AsRef<Path>,
    prefix: &str,
    extension: &str,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    fs::create_dir_all(dir).await?;

    let mut attempt = 0;
    let (path, mut file) = loop {
        let path = dir.join(output_file_name(prefix, extension, Local::now()));
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => break (path, file),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;

    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}

/// Render and write a batch of records named after their entity kind
pub async fn write_records<R: Record>(
    records: &Collection<R>,
    format: OutputFormat,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    write_output(&render(records, format), dir, R::NAME, format.extension()).await
}

/// Render and write a single record named after its entity kind
pub async fn write_record<R: Record>(
    record: &R,
    format: OutputFormat,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    write_output(
        &render_record(record, format),
        dir,
        R::NAME,
        format.extension(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::{Sample, sample};
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(" Json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: unknown format: xml");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_output_file_name() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 2)
            .single()
            .unwrap();
        assert_eq!(
            output_file_name("company", "json", now),
            "company_2024-03-09T07-05-02-0.json"
        );
    }

    #[test]
    fn test_render_record_csv() {
        let record = sample("John", 30, true);
        assert_eq!(
            render_record(&record, OutputFormat::Csv),
            "name|age|active\nJohn|30|true\n"
        );
        assert_eq!(render_record(&record, OutputFormat::Json), record.json());
    }

    #[test]
    fn test_render_collection() {
        let empty: Collection<Sample> = Collection::new();
        assert_eq!(render(&empty, OutputFormat::Json), "[]");
        assert_eq!(render(&empty, OutputFormat::Csv), "");

        let records: Collection<Sample> = vec![sample("John", 30, true)].into();
        assert_eq!(
            render(&records, OutputFormat::Csv),
            "name|age|active\nJohn|30|true\n"
        );
    }

    #[tokio::test]
    async fn test_write_output_creates_directories() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested").join("out");

        let path = write_output("hello", &dir, "user", "csv").await.unwrap();

        assert_eq!(path.parent(), Some(dir.as_path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("user_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_write_output_never_overwrites() {
        let temp = tempdir().unwrap();
        let first = write_output("one", temp.path(), "post", "json").await.unwrap();
        let second = write_output("two", temp.path(), "post", "json").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "two");
    }

    #[tokio::test]
    async fn test_write_records_uses_entity_name() {
        let temp = tempdir().unwrap();
        let records: Collection<Sample> =
            vec![sample("John", 30, true), sample("Jane", 0, false)].into();

        let path = write_records(&records, OutputFormat::Csv, temp.path())
            .await
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("sample_"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "name|age|active\nJohn|30|true\nJane||false\n"
        );

        let path = write_record(&sample("Solo", 1, true), OutputFormat::Json, temp.path())
            .await
            .unwrap();
        assert!(path.to_string_lossy().ends_with(".json"));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["name"], "Solo");
    }
}
