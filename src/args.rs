use clap::{Parser, ValueEnum};

use crate::types::DetectionMode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Detection mode. Asks interactively when omitted.
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Camera Index (default 0)
    #[arg(short, long, default_value_t = 0)]
    pub cam_index: u32,

    /// Disable the mirror flip from config.json for this run
    #[arg(long)]
    pub no_mirror: bool,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Face,
    Hand,
    Both,
}

impl From<ModeArg> for DetectionMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Face => DetectionMode::FaceOnly,
            ModeArg::Hand => DetectionMode::HandOnly,
            ModeArg::Both => DetectionMode::Both,
        }
    }
}
