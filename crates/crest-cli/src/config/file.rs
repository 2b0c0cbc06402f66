use crate::error::{CliError, Result};
use crestparse::core::io::xyz::EnergyPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileParserConfig {
    #[serde(rename = "energy-policy")]
    pub energy_policy: Option<EnergyPolicy>,
    #[serde(rename = "uniform-atom-count")]
    pub uniform_atom_count: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
    pub prefix: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub temperature: Option<f64>,
    pub cutoff: Option<f64>,
    pub parser: Option<FileParserConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crestparse.toml");
        fs::write(
            &path,
            r#"
            temperature = 310.0
            cutoff = 3.0

            [parser]
            energy-policy = "unambiguous"
            uniform-atom-count = false

            [output]
            directory = "conformers"
            prefix = "c"
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.temperature, Some(310.0));
        assert_eq!(config.cutoff, Some(3.0));
        let parser = config.parser.unwrap();
        assert_eq!(parser.energy_policy, Some(EnergyPolicy::Unambiguous));
        assert_eq!(parser.uniform_atom_count, Some(false));
        let output = config.output.unwrap();
        assert_eq!(output.directory, Some(PathBuf::from("conformers")));
        assert_eq!(output.prefix.as_deref(), Some("c"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "temprature = 300.0\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
