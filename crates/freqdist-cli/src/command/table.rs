use std::path::PathBuf;

use clap::Args;
use freqdist_stats::table::{FrequencyTable, SortKey};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct TableArg {
    /// Path to a file of whitespace-separated integers
    pub data: PathBuf,

    /// Sort entries by `item` or `freq`
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort in descending order
    #[arg(long, requires = "sort")]
    pub descending: bool,

    /// Keep only items with at least this frequency
    #[arg(long)]
    pub min_freq: Option<u64>,

    /// Keep only items with at most this frequency
    #[arg(long)]
    pub max_freq: Option<u64>,

    /// Keep only the N most frequent items
    #[arg(long, conflicts_with = "bottom")]
    pub top: Option<usize>,

    /// Keep only the N least frequent items
    #[arg(long)]
    pub bottom: Option<usize>,

    /// Save the table as JSON to this path instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TableArg) -> anyhow::Result<()> {
    let samples = util::read_samples(&arg.data)?;
    let mut table = FrequencyTable::from_items(samples);

    if arg.min_freq.is_some() || arg.max_freq.is_some() {
        table = table.filter_by_freq(
            arg.min_freq.unwrap_or(1),
            arg.max_freq.unwrap_or(u64::MAX),
        );
    }
    if let Some(n) = arg.top {
        table = table.top_n(n)?;
    }
    if let Some(n) = arg.bottom {
        table = table.lowest_n(n)?;
    }
    if let Some(by) = arg.sort {
        table.sort(by, !arg.descending);
    }

    let total = table.total();
    util::print_or_save(&table, arg.output.clone())?;
    eprintln!("{} distinct items, {total} values", table.len());
    Ok(())
}
