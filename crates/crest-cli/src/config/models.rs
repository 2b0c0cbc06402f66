use crestparse::core::io::xyz::ParseOptions;
use crestparse::engine::config::AnalysisConfig;
use std::path::PathBuf;

pub struct OutputConfig {
    pub directory: PathBuf,
    pub prefix: String,
}

impl OutputConfig {
    /// Path of the file holding the structure of the given rank, `<directory>/<prefix>_<rank>.xyz`.
    pub fn path_for_rank(&self, rank: usize) -> PathBuf {
        self.directory.join(format!("{}_{}.xyz", self.prefix, rank))
    }
}

pub struct AppConfig {
    pub input_path: PathBuf,
    pub parse_options: ParseOptions,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_paths_follow_prefix_and_directory() {
        let output = OutputConfig {
            directory: PathBuf::from("out"),
            prefix: "conf".to_string(),
        };
        assert_eq!(output.path_for_rank(3), PathBuf::from("out/conf_3.xyz"));
    }
}
