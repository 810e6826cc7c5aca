//! Capture example: run the automation script for a Ruby script and print the result
//!
//! Usage: `cargo run --example capture -- <ruby_script_path>`
use tcrm_capture::tasks::{
    config::CaptureConfig, error::TaskError, tokio::executor::CaptureExecutor,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Some(script) = std::env::args().nth(1) else {
        eprintln!("Please provide the path to the Ruby script as an argument.");
        std::process::exit(1);
    };

    let executor = CaptureExecutor::new(CaptureConfig::for_script(script));
    let (report, record) = match executor.run_and_parse().await {
        Ok(result) => result,
        Err(TaskError::Launch(msg)) => {
            eprintln!("Error starting command: {}", msg);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if report.is_degraded() {
        eprintln!(
            "Warning: task did not complete normally ({:?} after {:?})",
            report.outcome, report.elapsed
        );
    }
    println!("{}", report.captured);
    println!("{}", record);
    Ok(())
}
