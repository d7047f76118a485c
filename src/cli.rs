use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "labelscore",
    version,
    about = "Scores multi-label predictions against a gold-standard answer set"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Score(ScoreArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Gold-standard solution file (CSV: id,label[,label...]; an optional
    /// first row `id,labels` is treated as a header, so `id` cannot be
    /// used as a record identifier on the first line)
    pub solution: PathBuf,

    /// Predictions from the challenger, same format and record order
    pub predictions: PathBuf,

    /// Class catalog entry; repeat once per class
    #[arg(long = "class")]
    pub classes: Vec<String>,

    /// Class catalog file, one class per line
    #[arg(long)]
    pub classes_file: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short = 'O', long)]
    pub output_file: Option<PathBuf>,

    /// Emit the report as a JSON document instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
