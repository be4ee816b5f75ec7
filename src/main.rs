use anyhow::Context;
use clap::Parser;
use media_inventory::args::Args;
use media_inventory::processor::Processor;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments
    let config = Args::parse().into_config();
    let output = config.output.clone();

    // Probe every media file under the root and write the report
    let summary = Processor::new(config)
        .run()
        .context("Media inventory failed")?;

    println!();
    println!("=== INVENTORY COMPLETE ===");
    println!("Total media files: {}", summary.total_files);
    println!("Successfully processed: {}", summary.processed);
    println!("Skipped: {}", summary.skipped);
    println!("CSV file created: {}", output.display());

    Ok(())
}
