use clap::Parser;
use ctvolume_core::cli::{error_message, run, Cli, OutputFormat};
use ctvolume_core::{RenderedOutputs, TextReport, VolumeSummary};
use log::error;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok((summary, outputs)) => output_report(&summary, &outputs, &cli.format),
        Err(e) => {
            error!("Failed to process {}: {}", cli.archive.display(), e);
            eprintln!("{}", error_message(&e));
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn output_report(summary: &VolumeSummary, outputs: &RenderedOutputs, format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            let report = TextReport::new(summary, outputs);
            println!("{}", report);
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(summary, outputs) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(
    summary: &VolumeSummary,
    outputs: &RenderedOutputs,
) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct ReportJson<'a> {
        summary: &'a VolumeSummary,
        outputs: &'a RenderedOutputs,
    }

    serde_json::to_string_pretty(&ReportJson { summary, outputs })
}
