use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use freqdist_stats::{
    class::{Classing, Derivations, derived_class_frequency_table},
    statistics::CentralTendency as _,
};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct ClassesArg {
    /// Path to a file of whitespace-separated integers
    pub data: PathBuf,

    /// Number of equal-width classes (defaults to the ceiling of the square root of the sample size)
    #[arg(long, conflicts_with = "cut_points")]
    pub num_classes: Option<usize>,

    /// Class boundaries in strictly increasing order (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cut_points: Option<Vec<i64>>,

    /// Add relative frequencies
    #[arg(long)]
    pub relative: bool,

    /// Add cumulative frequencies
    #[arg(long)]
    pub cumulative: bool,

    /// Save the table as JSON to this path instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ClassesArg {
    fn classing(&self) -> Classing {
        match &self.cut_points {
            Some(cut_points) => Classing::CutPoints(cut_points.clone()),
            None => Classing::EqualWidth {
                num_classes: self.num_classes,
            },
        }
    }
}

pub(crate) fn run(arg: &ClassesArg) -> anyhow::Result<()> {
    let samples = util::read_samples(&arg.data)?;
    let derivations = Derivations {
        relative: arg.relative,
        cumulative: arg.cumulative,
    };
    let table = derived_class_frequency_table(&samples, &arg.classing(), derivations)
        .with_context(|| format!("Failed to build classes for {}", arg.data.display()))?;

    util::print_or_save(&table, arg.output.clone())?;

    let grouped = table.to_frequency_table();
    eprintln!(
        "{} classes, {} values, grouped mean {:.2}, modal class {}",
        table.len(),
        table.freqsum(),
        grouped.mean()?,
        grouped.mode()?,
    );
    Ok(())
}
