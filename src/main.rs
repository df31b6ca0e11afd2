// reset; cargo run -- ./exports/catalogue_S12.xlsb ./exports/catalogue_S13.xlsb
// reset; cargo run -- --format json --summary-csv summary.csv ./exports/*.xlsb

use clap::Parser;
use sheet_checker::cli::{run, Args};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheet_checker=info,checker_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let arguments = Args::parse();

    let stdout = std::io::stdout();
    let summary = run(&arguments, &mut stdout.lock())?;

    if summary.files_with_errors > 0 {
        eprintln!(
            "❌ {} of {} file(s) are not conforming",
            summary.files_with_errors, summary.total_files
        );
        if !arguments.no_errors_log {
            eprintln!("❌ Check {} for details.", arguments.errors_log.display());
        }
        std::process::exit(1);
    }

    println!("✅ All {} file(s) are conforming", summary.total_files);
    Ok(())
}
