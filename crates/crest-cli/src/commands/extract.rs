use crate::cli::ExtractArgs;
use crate::config::builder;
use crate::error::{CliError, Result};
use crestparse::core::io::traits::StructureFile;
use crestparse::core::io::xyz::XyzFile;
use crestparse::workflows;
use tracing::{info, warn};

pub fn run(args: ExtractArgs) -> Result<()> {
    let app = builder::build_extract_config(&args)?;

    let structures = super::load_structures(&app.input_path, &app.parse_options)?;
    let analysis = workflows::analyze::run(&structures, &app.analysis)?;

    let selected = analysis.selected_structures();
    if selected.is_empty() {
        warn!("No structures matched the selection; nothing to extract.");
        println!("No structures selected for extraction.");
        return Ok(());
    }

    std::fs::create_dir_all(&app.output.directory)?;
    info!(
        "Extracting {} structures to {:?}",
        selected.len(),
        app.output.directory
    );

    for (rank, structure) in selected {
        let output_path = app.output.path_for_rank(rank);
        XyzFile::write_to_path(structure, &output_path).map_err(|e| CliError::FileWriting {
            path: output_path.clone(),
            source: e.into(),
        })?;
        info!(
            "Exported rank {} (file structure #{}) to {:?}",
            rank,
            structure.source_index() + 1,
            &output_path
        );
        println!("Rank {} written to: {}", rank, output_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use crestparse::core::io::xyz::ParseOptions;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const ENSEMBLE: &str = "\
2
energy: -1.000 gnorm: 0.0004
H 0.0 0.0 0.0
H 0.0 0.0 0.74
2
energy: -1.002 gnorm: 0.0002
H 0.0 0.0 0.0
H 0.0 0.0 0.7412345678901234
2
energy: -1.001 gnorm: 0.0003
H 0.0 0.0 0.0
H 0.0 0.0 0.76
";

    fn extract_args(extra: &[&str], input: &Path) -> ExtractArgs {
        let mut argv = vec!["crestparse", "extract", input.to_str().unwrap()];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Extract(args) => args,
            _ => panic!("Expected 'extract' subcommand"),
        }
    }

    #[test]
    fn extracts_requested_ranks_with_original_content() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("crest_conformers.xyz");
        fs::write(&input, ENSEMBLE).unwrap();
        let out_dir = dir.path().join("out");

        let args = extract_args(&["-e", "3,1", "-o", out_dir.to_str().unwrap()], &input);
        run(args).unwrap();

        assert!(out_dir.join("conf_1.xyz").exists());
        assert!(out_dir.join("conf_3.xyz").exists());
        assert!(!out_dir.join("conf_2.xyz").exists());

        let best = XyzFile::read_from_path_with_options(
            out_dir.join("conf_1.xyz"),
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].energy(), -1.002);
        assert_eq!(best[0].comment(), "energy: -1.002 gnorm: 0.0002");
        assert_eq!(best[0].position(1).unwrap().z, 0.7412345678901234);

        let highest = XyzFile::read_from_path(out_dir.join("conf_3.xyz")).unwrap();
        assert_eq!(highest[0].energy(), -1.000);
    }

    #[test]
    fn cutoff_limits_extracted_files_and_prefix_is_applied() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("crest_conformers.xyz");
        fs::write(&input, ENSEMBLE).unwrap();
        let out_dir = dir.path().join("cut");

        let args = extract_args(
            &[
                "-c",
                "0.7",
                "-o",
                out_dir.to_str().unwrap(),
                "--prefix",
                "low",
            ],
            &input,
        );
        run(args).unwrap();

        assert!(out_dir.join("low_1.xyz").exists());
        assert!(out_dir.join("low_2.xyz").exists());
        assert!(!out_dir.join("low_3.xyz").exists());
    }

    #[test]
    fn out_of_range_rank_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("crest_conformers.xyz");
        fs::write(&input, ENSEMBLE).unwrap();
        let out_dir = dir.path().join("none");

        let args = extract_args(&["-e", "1,5", "-o", out_dir.to_str().unwrap()], &input);
        assert!(matches!(run(args), Err(CliError::Core(_))));
        assert!(!out_dir.exists());
    }
}
