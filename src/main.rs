use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pixell_mortgage::application::batch::BatchProcessor;
use pixell_mortgage::domain::mortgage::RateConvention;
use pixell_mortgage::error::MortgageError;
use pixell_mortgage::interfaces::console::report_writer::{OutputFormat, ReportWriter};
use pixell_mortgage::interfaces::csv::mortgage_reader::MortgageReader;
use pixell_mortgage::logging::init_cli_logger;
use std::fs::File;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input mortgages file, one `amount,rate,amortization,frequency` per line
    #[arg(default_value = "data/pixell_river_mortgages.txt")]
    input: PathBuf,

    /// How each processed mortgage is printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Display)]
    format: OutputFormat,

    /// How the annual rate is converted to a per-period rate
    #[arg(long, value_enum, default_value_t = RateConvention::Monthly)]
    rate_convention: RateConvention,

    /// Log each record to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let processor = BatchProcessor::new(cli.rate_convention);
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock())
        .with_format(cli.format)
        .with_convention(processor.convention());

    let file = match File::open(&cli.input) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::error!(path = %cli.input.display(), "input source not found");
            writer.write_source_missing().into_diagnostic()?;
            return Ok(ExitCode::FAILURE);
        }
        Err(source) => {
            return Err(MortgageError::SourceUnavailable {
                path: cli.input,
                source,
            })
            .into_diagnostic();
        }
    };

    let reader = MortgageReader::new(file);
    let summary = processor
        .run(reader.records(), &mut writer)
        .into_diagnostic()?;
    tracing::info!(
        total = summary.total(),
        processed = summary.processed,
        rejected = summary.rejected,
        "batch complete"
    );

    Ok(ExitCode::SUCCESS)
}
