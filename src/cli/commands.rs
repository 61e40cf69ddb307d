use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tydid",
    about = concat!("tydid v", env!("CARGO_PKG_VERSION"), " - a tiny terminal todo list"),
    version
)]
pub struct Cli {
    /// Keep tasks in this directory instead of ~/.tydid
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,
}
