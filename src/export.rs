use analytics::AnalyticsReport;
use anyhow::Context;
use chrono::{DateTime, Utc};
use configuration::InputSettings;
use core_types::ParseAudit;
use ingest::{LoadStats, LoadedOrders};
use serde::Serialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// The JSON document written by `orderlens export`.
#[derive(Debug, Serialize)]
pub struct ExportEnvelope<'a> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: ExportSource<'a>,
    pub load: LoadStats,
    pub parse_audit: ParseAudit,
    pub report: &'a AnalyticsReport,
}

#[derive(Debug, Serialize)]
pub struct ExportSource<'a> {
    pub data_directory: &'a Path,
    pub file_pattern: &'a str,
}

impl<'a> ExportEnvelope<'a> {
    pub fn new(
        report: &'a AnalyticsReport,
        loaded: &LoadedOrders,
        input: &'a InputSettings,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source: ExportSource {
                data_directory: &input.data_directory,
                file_pattern: &input.file_pattern,
            },
            load: loaded.stats,
            parse_audit: loaded.audit,
            report,
        }
    }
}

/// Writes the envelope as pretty JSON to `destination`, or to stdout when there is none.
pub fn write_json(envelope: &ExportEnvelope<'_>, destination: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(envelope).context("Failed to serialize the export")?;

    let Some(path) = destination else {
        println!("{json}");
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "JSON export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use core_types::testkit::RecordBuilder;
    use rust_decimal_macros::dec;

    fn loaded() -> LoadedOrders {
        let records = vec![
            RecordBuilder::new("1")
                .shipped()
                .sku("A1")
                .price(dec!(10))
                .purchased("2024-05-02T08:00:00Z")
                .build(),
            RecordBuilder::new("2").cancelled().sku("A1").price(dec!(5)).build(),
        ];
        LoadedOrders {
            records,
            ..LoadedOrders::default()
        }
    }

    #[test]
    fn envelope_carries_run_metadata_and_report() {
        let loaded = loaded();
        let report = AnalyticsEngine::new().calculate(&loaded.records);
        let input = InputSettings::default();

        let envelope = ExportEnvelope::new(&report, &loaded, &input);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["run_id"].as_str().unwrap().len(), 36);
        assert!(json["generated_at"].is_string());
        assert_eq!(json["source"]["file_pattern"], "*.txt");
        assert_eq!(json["report"]["summary"]["total_orders"], 2);
        assert_eq!(json["report"]["summary"]["total_revenue"], "10");
        assert_eq!(json["report"]["monthly_trends"]["2024-05"]["orders"], 1);
    }

    #[test]
    fn writes_pretty_json_creating_parent_directories() {
        let loaded = loaded();
        let report = AnalyticsEngine::new().calculate(&loaded.records);
        let input = InputSettings::default();
        let envelope = ExportEnvelope::new(&report, &loaded, &input);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        write_json(&envelope, Some(&path)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["run_id"], envelope.run_id.to_string());
        assert_eq!(written["report"]["products"][0]["sku"], "A1");
    }
}
