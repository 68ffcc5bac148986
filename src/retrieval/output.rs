//! Writes dependency records as a JSON document

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::retrieval::error::RetrievalError;
use crate::retrieval::types::DependencyRecord;

/// Create or truncate `path` and write `records` as a JSON array.
///
/// A failure part way through leaves whatever was already written.
pub fn write_output(path: &Path, records: &[DependencyRecord]) -> Result<(), RetrievalError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Wrote {} dependency records to {:?}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(arch: &str, target: &str) -> DependencyRecord {
        DependencyRecord {
            id: "icu".to_string(),
            name: "ICU".to_string(),
            version: "72.1".to_string(),
            source: "https://example.test/icu4c-72_1-src.tgz".to_string(),
            source_checksum: "sha512:abcd".to_string(),
            cpe: "cpe:2.3:a:icu-project:international_components_for_unicode:72.1:*:*:*:*:c\\/c\\+\\+:*:*".to_string(),
            purl: "pkg:generic/icu@72.1?checksum=abcd&download_url=https://example.test/icu4c-72_1-src.tgz".to_string(),
            licenses: vec!["ICU".to_string()],
            stacks: vec![format!("io.buildpacks.stacks.{target}")],
            os: "linux".to_string(),
            arch: arch.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn write_output_serializes_records_as_array_of_objects() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("output.json");

        write_output(&path, &[record("amd64", "jammy"), record("arm64", "noble")]).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 2);
        assert_eq!(
            written[0],
            json!({
                "id": "icu",
                "name": "ICU",
                "version": "72.1",
                "source": "https://example.test/icu4c-72_1-src.tgz",
                "source-checksum": "sha512:abcd",
                "cpe": "cpe:2.3:a:icu-project:international_components_for_unicode:72.1:*:*:*:*:c\\/c\\+\\+:*:*",
                "purl": "pkg:generic/icu@72.1?checksum=abcd&download_url=https://example.test/icu4c-72_1-src.tgz",
                "licenses": ["ICU"],
                "stacks": ["io.buildpacks.stacks.jammy"],
                "os": "linux",
                "arch": "amd64",
                "target": "jammy"
            })
        );
        assert_eq!(written[1]["target"], "noble");
        assert!(written[0].get("source_checksum").is_none());
    }

    #[test]
    fn write_output_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("output.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        write_output(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn write_output_fails_when_destination_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("output.json");

        let err = write_output(&path, &[record("amd64", "jammy")]).unwrap_err();
        assert!(matches!(err, RetrievalError::Io(_)));
    }
}
