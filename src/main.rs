//! CLI entry point for the demosaicking comparison pipeline

use clap::Parser;
use dmcompare::io::cli::{Cli, EvaluationRunner};
use dmcompare::io::logging::init_tracing;

fn main() -> dmcompare::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let runner = EvaluationRunner::new(cli);
    runner.process().map(|_| ())
}
