use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use parallel_highlight::{Brush, Side};

/// Highlight a passage in one text and find its counterpart in a parallel
/// text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file, created with the defaults if it doesn't exist
    #[arg(index = 1)]
    pub config_path: PathBuf,

    #[arg(long, value_name = "FILE")]
    pub left: PathBuf,

    #[arg(long, value_name = "FILE")]
    pub right: PathBuf,

    /// The document the selection is made in
    #[arg(long, default_value_t = Side::Left)]
    pub side: Side,

    /// Start of the selection in UTF-16 code units
    #[arg(long)]
    pub start: usize,

    /// End of the selection in UTF-16 code units
    #[arg(long)]
    pub end: usize,

    /// Palette color name or hex code; "clear" removes highlights instead
    #[arg(long, default_value = "gold")]
    pub color: Brush,

    /// Where to write the rendered HTML page, stdout if omitted
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}
