use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Juha Siitonen",
    version,
    about = "crestparse - Analyze conformer ensembles from multi-structure XYZ files (CREST, xtb): relative energies, Boltzmann populations, geometric descriptors and extraction.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output; fatal errors are still printed
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ranked energy table of a conformer ensemble.
    Analyze(AnalyzeArgs),
    /// Write selected conformers to individual XYZ files.
    Extract(ExtractArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the multi-structure XYZ file (e.g., crest_conformers.xyz).
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Temperature in Kelvin used for the Boltzmann populations.
    #[arg(short, long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Only report conformers within this many kcal/mol of the minimum.
    #[arg(short, long, value_name = "KCAL_MOL")]
    pub cutoff: Option<f64>,

    /// Only report the given 1-based ranks (comma separated, e.g. 1,2,5).
    #[arg(short, long, value_name = "RANKS", value_delimiter = ',')]
    pub ranks: Option<Vec<usize>>,

    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Also write the reported rows as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Do not print the table to standard output.
    #[arg(short, long)]
    pub silent: bool,

    #[command(flatten)]
    pub parser: ParserArgs,

    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S parser.energy-policy=unambiguous
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the multi-structure XYZ file (e.g., crest_conformers.xyz).
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// The 1-based ranks to extract (comma separated, e.g. 4,3,6).
    #[arg(short, long, value_name = "RANKS", value_delimiter = ',')]
    pub extract: Option<Vec<usize>>,

    /// Only extract conformers within this many kcal/mol of the minimum.
    #[arg(short, long, value_name = "KCAL_MOL")]
    pub cutoff: Option<f64>,

    /// Temperature in Kelvin used for the Boltzmann populations.
    #[arg(short, long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Directory the extracted files are written to.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name prefix; files are named <PREFIX>_<RANK>.xyz.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub parser: ParserArgs,

    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.prefix=conformer
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group of mutually exclusive geometric descriptors, each given as 0-based atom indices.
#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct DescriptorArgs {
    /// Report the distance between two atoms (e.g. 0,1).
    #[arg(long, value_name = "I,J", value_delimiter = ',')]
    pub distance: Option<Vec<usize>>,
    /// Report the angle at the middle of three atoms (e.g. 0,1,2).
    #[arg(long, value_name = "I,J,K", value_delimiter = ',')]
    pub angle: Option<Vec<usize>>,
    /// Report the dihedral angle of four atoms (e.g. 0,1,2,3).
    #[arg(long, value_name = "I,J,K,L", value_delimiter = ',')]
    pub dihedral: Option<Vec<usize>>,
}

/// Parser strictness overrides shared by all subcommands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ParserArgs {
    /// Reject comment lines with several unlabeled numbers instead of taking the first one.
    #[arg(long)]
    pub unambiguous_energy: bool,
    /// Accept files whose structures have different atom counts.
    #[arg(long)]
    pub allow_mixed_atom_counts: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_parses_comma_separated_lists() {
        let cli = Cli::parse_from([
            "crestparse",
            "analyze",
            "crest_conformers.xyz",
            "-t",
            "350",
            "-c",
            "2.5",
            "-r",
            "1,2,5",
            "--dihedral",
            "0,1,2,3",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("Expected 'analyze' subcommand");
        };
        assert_eq!(args.input, PathBuf::from("crest_conformers.xyz"));
        assert_eq!(args.temperature, Some(350.0));
        assert_eq!(args.cutoff, Some(2.5));
        assert_eq!(args.ranks, Some(vec![1, 2, 5]));
        assert_eq!(args.descriptor.dihedral, Some(vec![0, 1, 2, 3]));
        assert!(args.descriptor.distance.is_none());
        assert!(!args.silent);
    }

    #[test]
    fn descriptors_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "crestparse",
            "analyze",
            "in.xyz",
            "--distance",
            "0,1",
            "--angle",
            "0,1,2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["crestparse", "-v", "-q", "analyze", "in.xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from(["crestparse", "analyze", "in.xyz", "-vv", "--log-file", "run.log"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn extract_parses_ranks_and_output_options() {
        let cli = Cli::parse_from([
            "crestparse",
            "extract",
            "in.xyz",
            "-e",
            "4,3,6",
            "-o",
            "out",
            "--prefix",
            "conformer",
            "--allow-mixed-atom-counts",
            "-S",
            "temperature=310",
        ]);
        let Commands::Extract(args) = cli.command else {
            panic!("Expected 'extract' subcommand");
        };
        assert_eq!(args.extract, Some(vec![4, 3, 6]));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.prefix.as_deref(), Some("conformer"));
        assert!(args.parser.allow_mixed_atom_counts);
        assert!(!args.parser.unambiguous_energy);
        assert_eq!(args.set_values, vec!["temperature=310".to_string()]);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["crestparse", "extract"]).is_err());
    }

    #[test]
    fn negative_rank_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["crestparse", "extract", "in.xyz", "-e", "1,-2"]).is_err());
    }
}
