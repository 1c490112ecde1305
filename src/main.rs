//! testreport - Command-line tool for generating HTML test reports

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use testreport::commands::{Command, GenerateCommand};
use testreport::ui::CliUI;

#[derive(Parser)]
#[command(name = "testreport")]
#[command(about = "Generates an HTML report from go test JSON logs", long_about = None)]
struct Cli {
    /// File containing the go test JSON logs (standard input when omitted)
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Where to write the finished report
    #[arg(
        short = 'o',
        long,
        default_value = "report.html",
        env = "TEST_REPORT_OUTPUT"
    )]
    output: PathBuf,

    /// Alternative page layout template
    #[arg(long)]
    layout: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut ui = CliUI::new();
    let cmd = GenerateCommand::new(cli.file, cli.output, cli.layout);

    match cmd.execute(&mut ui) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {}", e);
            std::process::exit(1);
        }
    }
}
