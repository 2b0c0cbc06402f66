use crate::cli::AnalyzeArgs;
use crate::config::builder;
use crate::error::Result;
use crate::report;
use crestparse::workflows;
use tracing::info;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let app = builder::build_analyze_config(&args)?;
    info!("Using temperature {} K", app.analysis.temperature_k);

    let structures = super::load_structures(&app.input_path, &app.parse_options)?;
    let analysis = workflows::analyze::run(&structures, &app.analysis)?;

    if !args.silent {
        print!("{}", report::render_table(&analysis));
    }

    if let Some(csv_path) = &args.csv {
        info!("Writing CSV report to {:?}", csv_path);
        report::write_csv_to_path(&analysis, csv_path)?;
    }

    Ok(())
}
