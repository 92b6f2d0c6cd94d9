use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use freqdist_stats::{statistics::CentralTendency as _, summary::SampleSummary, table::FrequencyTable};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    /// Path to a file of whitespace-separated integers
    pub data: PathBuf,

    /// Percentiles to report, as fractions in [0, 1] (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [0.73, 0.2])]
    pub percentiles: Vec<f64>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let samples = util::read_samples(&arg.data)?;
    let summary =
        SampleSummary::new(samples.iter().copied()).context("Cannot summarize an empty sample")?;
    let table = FrequencyTable::from_items(samples.iter().copied());

    println!("Sample size: {}", summary.len());
    println!("Sample mean: {}", table.mean()?);
    if table.len() > 1 && table.frequencies().all(|freq| freq == 1) {
        println!("Sample mode: none");
    } else {
        println!("Sample mode: {}", table.mode()?);
    }
    println!("Sample median: {}", summary.median());
    for &p in &arg.percentiles {
        println!(
            "Sample's {:.0}th percentile: {}",
            p * 100.0,
            summary.percentile(p)
        );
    }
    println!("Sample variance: {:.2}", summary.sample_variance);
    println!("Population variance: {:.2}", summary.population_variance);
    println!(
        "Population standard deviation: {:.2}",
        summary.population_std_dev()
    );
    println!("Sample IQR: {}", summary.iqr());
    Ok(())
}
