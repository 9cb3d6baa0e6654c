use crate::discovery::discover_files;
use crate::error::IngestError;
use configuration::InputSettings;
use core_types::{OrderRecord, ParseAudit, RawOrderRow};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// What a single export file contributed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileLoad {
    pub records: Vec<OrderRecord>,
    /// Data rows seen, including the ones dropped below.
    pub rows_read: usize,
    pub rows_missing_id: usize,
    pub malformed_rows: usize,
}

/// Row accounting for a whole load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub files_read: usize,
    pub rows_read: usize,
    pub rows_missing_id: usize,
    pub malformed_rows: usize,
}

impl LoadStats {
    fn add(&mut self, file: &FileLoad) {
        self.files_read += 1;
        self.rows_read += file.rows_read;
        self.rows_missing_id += file.rows_missing_id;
        self.malformed_rows += file.malformed_rows;
    }
}

/// The records of every discovered file, in file-then-row order.
#[derive(Debug, Clone, Default)]
pub struct LoadedOrders {
    pub records: Vec<OrderRecord>,
    pub stats: LoadStats,
    pub audit: ParseAudit,
}

/// Reads one tab-delimited export and normalises its rows.
///
/// Columns are matched by header name, so their order does not matter and
/// unknown columns are ignored. Rows without an order id are dropped; rows
/// the reader cannot decode are skipped with a warning. Defaulted values are
/// counted in `audit`.
pub fn load_file(path: &Path, audit: &mut ParseAudit) -> Result<FileLoad, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::Headers)
        .from_reader(body);

    let headers = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let columns: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();
    if !columns.contains_key(RawOrderRow::ORDER_ID_COLUMN) {
        tracing::warn!(
            file = %path.display(),
            "Header has no '{}' column; every row will be dropped",
            RawOrderRow::ORDER_ID_COLUMN
        );
    }

    let mut load = FileLoad::default();
    for result in reader.records() {
        load.rows_read += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping malformed row");
                load.malformed_rows += 1;
                continue;
            }
        };

        let raw = RawOrderRow::from_columns(|column| {
            columns
                .get(column)
                .and_then(|&index| record.get(index))
                .map(str::to_string)
        });

        match OrderRecord::from_raw(raw, audit) {
            Some(order) => load.records.push(order),
            None => load.rows_missing_id += 1,
        }
    }

    tracing::debug!(
        file = %path.display(),
        rows = load.rows_read,
        kept = load.records.len(),
        "Loaded file"
    );
    Ok(load)
}

/// Discovers every export described by `settings` and loads them in path order.
///
/// Fails with `NoFilesFound` when nothing matches; any unreadable file aborts the load.
pub fn load_orders(settings: &InputSettings) -> Result<LoadedOrders, IngestError> {
    let files = discover_files(
        &settings.data_directory,
        &settings.file_pattern,
        &settings.excluded_suffixes,
    )?;
    if files.is_empty() {
        return Err(IngestError::NoFilesFound {
            directory: settings.data_directory.clone(),
            pattern: settings.file_pattern.clone(),
        });
    }

    tracing::info!(count = files.len(), "Found files to analyse");

    let progress_bar = ProgressBar::new(files.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress_bar.set_style(style.progress_chars("=>-"));
    }

    let mut loaded = LoadedOrders::default();
    for path in &files {
        if let Some(name) = path.file_name() {
            progress_bar.set_message(name.to_string_lossy().into_owned());
        }

        let file = load_file(path, &mut loaded.audit)?;
        loaded.stats.add(&file);
        loaded.records.extend(file.records);

        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    tracing::info!(
        records = loaded.records.len(),
        files = loaded.stats.files_read,
        "Loaded orders"
    );
    if loaded.stats.rows_missing_id > 0 || loaded.stats.malformed_rows > 0 {
        tracing::warn!(
            missing_id = loaded.stats.rows_missing_id,
            malformed = loaded.stats.malformed_rows,
            "Some rows were dropped"
        );
    }
    if loaded.audit.total_defaulted() > 0 {
        tracing::warn!(
            defaulted = loaded.audit.total_defaulted(),
            invalid = loaded.audit.total_invalid(),
            "Some values could not be parsed and were defaulted"
        );
    }

    Ok(loaded)
}
