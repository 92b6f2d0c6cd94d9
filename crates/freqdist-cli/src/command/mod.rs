use clap::{Parser, Subcommand};

use self::{classes::ClassesArg, resample::ResampleArg, summary::SummaryArg, table::TableArg};

mod classes;
mod resample;
mod summary;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print descriptive statistics of a sample
    Summary(#[clap(flatten)] SummaryArg),
    /// Print the frequency table of a sample
    Table(#[clap(flatten)] TableArg),
    /// Bucket a sample into class intervals
    Classes(#[clap(flatten)] ClassesArg),
    /// Draw a new sample from the empirical distribution of a sample
    Resample(#[clap(flatten)] ResampleArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Table(arg) => table::run(&arg)?,
        Mode::Classes(arg) => classes::run(&arg)?,
        Mode::Resample(arg) => resample::run(&arg)?,
    }
    Ok(())
}
