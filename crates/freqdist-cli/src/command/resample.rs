use std::path::PathBuf;

use clap::Args;
use freqdist_stats::table::{FrequencyTable, SortKey};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct ResampleArg {
    /// Path to a file of whitespace-separated integers
    pub data: PathBuf,

    /// Number of values to draw
    #[arg(long)]
    pub size: usize,

    /// Seed for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the drawn table as JSON to this path instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ResampleArg) -> anyhow::Result<()> {
    let samples = util::read_samples(&arg.data)?;
    let table = FrequencyTable::from_items(samples);

    let mut rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let mut drawn = table.generate_random_data_with(arg.size, &mut rng)?;
    drawn.sort(SortKey::Item, true);

    util::print_or_save(&drawn, arg.output.clone())?;
    Ok(())
}
