//! Schema generation handler
//!
//! Reads the configured values file, generates its schema and writes it
//! into the destination directory.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Generate the schema for `config.yaml_file` and write it to disk
///
/// Returns the path of the written schema file.
pub fn handle_generate(config: &Config, output: &mut OutputWriter) -> Result<PathBuf> {
    let timer = Timer::with_details("generate", &config.yaml_file.display().to_string());

    if !config.yaml_file.is_file() {
        return Err(Error::FileNotFound {
            path: config.yaml_file.clone(),
        });
    }

    output.info(&format!(
        "Generating schema for {}",
        config.yaml_file.display()
    ))?;

    let schema = yamlschema_core::generate_from_file(&config.yaml_file)?;
    let json = schema.to_json()?;
    debug!(bytes = json.len(), "schema serialized");

    fs::create_dir_all(&config.destination_dir).map_err(|source| Error::DestinationDir {
        path: config.destination_dir.clone(),
        source,
    })?;

    let output_path = config.output_path();
    fs::write(&output_path, json).map_err(|source| Error::Write {
        path: output_path.clone(),
        source,
    })?;

    info!(
        path = %output_path.display(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "schema written"
    );
    output.success(&format!("Schema written to {}", output_path.display()))?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::tempdir;

    fn config(yaml_file: PathBuf, destination_dir: PathBuf) -> Config {
        Config {
            github_token: None,
            yaml_file,
            destination_dir,
        }
    }

    fn silent_output() -> OutputWriter {
        OutputWriter::with_writer(false, true, Box::new(io::sink()))
    }

    #[test]
    fn test_generate_writes_schema() {
        let dir = tempdir().unwrap();
        let values = dir.path().join("values.yaml");
        fs::write(&values, "replicas: 1\n").unwrap();
        let destination = dir.path().join("out/nested");

        let written =
            handle_generate(&config(values, destination.clone()), &mut silent_output()).unwrap();
        assert_eq!(written, destination.join("values.schema.json"));

        let schema: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(schema["properties"]["replicas"]["type"], "integer");
        assert_eq!(schema["required"], serde_json::json!(["replicas"]));
    }

    #[test]
    fn test_missing_values_file() {
        let dir = tempdir().unwrap();
        let err = handle_generate(
            &config(dir.path().join("absent.yaml"), dir.path().to_path_buf()),
            &mut silent_output(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_generation_error_writes_nothing() {
        let dir = tempdir().unwrap();
        let values = dir.path().join("values.yaml");
        fs::write(&values, "# @schema\n# type: string\nname: x\n").unwrap();

        let err = handle_generate(
            &config(values, dir.path().to_path_buf()),
            &mut silent_output(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Core(_)));
        assert!(!dir.path().join("values.schema.json").exists());
    }
}
