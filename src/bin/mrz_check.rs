use anyhow::{bail, Context};
use clap::Parser;
use mrz_synth::core::verify::{verify_lines, Line2Report};
use mrz_synth::domain::model::GroundTruth;
use mrz_synth::utils::logger;
use mrz_synth::MrzLines;

#[derive(Parser)]
#[command(name = "mrz-check")]
#[command(about = "Verify TD-3 MRZ check digits")]
struct Args {
    /// MRZ line 1 (requires --line2)
    #[arg(long, requires = "line2")]
    line1: Option<String>,

    /// MRZ line 2
    #[arg(long)]
    line2: Option<String>,

    /// groundtruth.json produced by mrz-synth
    #[arg(long, conflicts_with = "line2")]
    ground_truth: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn print_report(label: &str, report: &Line2Report) {
    if report.is_valid() {
        println!("✅ {}", label);
        return;
    }
    println!("❌ {}", label);
    for failure in report.failures() {
        println!(
            "    {}: expected {}, found {}",
            failure.field, failure.expected, failure.found
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let mut failed = 0usize;

    if let Some(path) = &args.ground_truth {
        let data = std::fs::read(path).with_context(|| format!("reading {}", path))?;
        let ground_truth: GroundTruth =
            serde_json::from_slice(&data).with_context(|| format!("parsing {}", path))?;
        tracing::info!("Verifying {} records from {}", ground_truth.len(), path);

        for (id, entry) in &ground_truth {
            match verify_lines(&entry.mrz()) {
                Ok(report) => {
                    if !report.is_valid() {
                        failed += 1;
                    }
                    print_report(id, &report);
                }
                Err(e) => {
                    failed += 1;
                    println!("❌ {}: {}", id, e);
                }
            }
        }
    } else if let Some(line2) = &args.line2 {
        let report = match &args.line1 {
            Some(line1) => verify_lines(&MrzLines {
                line1: line1.clone(),
                line2: line2.clone(),
            }),
            None => mrz_synth::verify_line2(line2),
        }
        .context("malformed MRZ")?;
        if !report.is_valid() {
            failed += 1;
        }
        print_report(line2, &report);
    } else {
        bail!("nothing to verify: pass --line2 or --ground-truth");
    }

    if failed > 0 {
        eprintln!("❌ {} record(s) failed verification", failed);
        std::process::exit(1);
    }

    Ok(())
}
