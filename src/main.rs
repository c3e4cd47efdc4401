use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use y9c_monthly::{config::Cli, pipeline};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_filter = if cli.verbose {
        "info,y9c_monthly=debug"
    } else {
        "info,y9c_monthly=info"
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) run ──────────────────────────────────────────────────────
    let config = cli.into_config();
    let summary = pipeline::run(&config)?;

    println!(
        "Saved {} monthly rows ({} imputed) from {} of {} files to: {}",
        summary.monthly_records,
        summary.imputed_records,
        summary.observations,
        summary.files_scanned,
        summary.output_path.display()
    );
    if summary.problem_files > 0 {
        println!("{} file(s) skipped with errors; see log", summary.problem_files);
    }
    for (cause, count) in &summary.skips_by_cause {
        println!("  skipped ({cause}): {count}");
    }
    Ok(())
}
