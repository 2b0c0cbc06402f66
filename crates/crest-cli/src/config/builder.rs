use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, OutputConfig};
use crate::cli::{AnalyzeArgs, DescriptorArgs, ExtractArgs, ParserArgs};
use crate::error::{CliError, Result};
use crestparse::core::io::xyz::{EnergyPolicy, ParseOptions};
use crestparse::engine::config::AnalysisConfigBuilder;
use crestparse::engine::descriptors::DescriptorRequest;
use std::path::{Path, PathBuf};

/// Command-line values common to every subcommand, before layering.
#[derive(Debug)]
struct CliOverrides<'a> {
    input: PathBuf,
    config: Option<&'a Path>,
    set_values: &'a [String],
    temperature: Option<f64>,
    cutoff: Option<f64>,
    ranks: Option<Vec<usize>>,
    descriptor: Option<DescriptorRequest>,
    parser: ParserArgs,
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
}

pub fn build_analyze_config(args: &AnalyzeArgs) -> Result<AppConfig> {
    build_config(CliOverrides {
        input: args.input.clone(),
        config: args.config.as_deref(),
        set_values: &args.set_values,
        temperature: args.temperature,
        cutoff: args.cutoff,
        ranks: args.ranks.clone(),
        descriptor: descriptor_request(&args.descriptor)?,
        parser: args.parser,
        output_dir: None,
        prefix: None,
    })
}

pub fn build_extract_config(args: &ExtractArgs) -> Result<AppConfig> {
    build_config(CliOverrides {
        input: args.input.clone(),
        config: args.config.as_deref(),
        set_values: &args.set_values,
        temperature: args.temperature,
        cutoff: args.cutoff,
        ranks: args.extract.clone(),
        descriptor: None,
        parser: args.parser,
        output_dir: args.output_dir.clone(),
        prefix: args.prefix.clone(),
    })
}

fn build_config(cli: CliOverrides<'_>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = cli.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, cli.set_values)?;

    let parser_file = file_config.parser.take().unwrap_or_default();
    let energy_policy = if cli.parser.unambiguous_energy {
        EnergyPolicy::Unambiguous
    } else {
        parser_file.energy_policy.unwrap_or(defaults.energy_policy)
    };
    let uniform_atom_count = if cli.parser.allow_mixed_atom_counts {
        false
    } else {
        parser_file
            .uniform_atom_count
            .unwrap_or(defaults.uniform_atom_count)
    };

    let output_file = file_config.output.take().unwrap_or_default();
    let output = OutputConfig {
        directory: cli
            .output_dir
            .or(output_file.directory)
            .unwrap_or(defaults.output_directory),
        prefix: cli
            .prefix
            .or(output_file.prefix)
            .unwrap_or(defaults.prefix),
    };
    if output.prefix.is_empty() || output.prefix.contains(['/', '\\']) {
        return Err(CliError::Config(format!(
            "Output prefix must be a non-empty file name component (got '{}')",
            output.prefix
        )));
    }

    let analysis = AnalysisConfigBuilder::new()
        .temperature(
            cli.temperature
                .or(file_config.temperature)
                .unwrap_or(defaults.temperature),
        )
        .cutoff_kcal(cli.cutoff.or(file_config.cutoff))
        .explicit_ranks(cli.ranks)
        .descriptor(cli.descriptor)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: cli.input,
        parse_options: ParseOptions {
            energy_policy,
            uniform_atom_count,
        },
        analysis,
        output,
    })
}

fn descriptor_request(args: &DescriptorArgs) -> Result<Option<DescriptorRequest>> {
    let (kind, indices) = match (&args.distance, &args.angle, &args.dihedral) {
        (Some(indices), _, _) => ("distance", indices),
        (_, Some(indices), _) => ("angle", indices),
        (_, _, Some(indices)) => ("dihedral", indices),
        _ => return Ok(None),
    };
    DescriptorRequest::from_indices(kind, indices)
        .map(Some)
        .map_err(|_| {
            CliError::Argument(format!(
                "--{} expects {} comma-separated atom indices, got {}",
                kind,
                match kind {
                    "distance" => 2,
                    "angle" => 3,
                    _ => 4,
                },
                indices.len()
            ))
        })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "temperature" => {
                config.temperature = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "cutoff" => {
                config.cutoff = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "parser.energy-policy" => {
                config
                    .parser
                    .get_or_insert_with(Default::default)
                    .energy_policy = Some(value_str.parse().map_err(|e: String| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?);
            }
            "parser.uniform-atom-count" => {
                config
                    .parser
                    .get_or_insert_with(Default::default)
                    .uniform_atom_count = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "output.directory" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .directory = Some(PathBuf::from(value_str));
            }
            "output.prefix" => {
                config.output.get_or_insert_with(Default::default).prefix =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
