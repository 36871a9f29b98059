//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use unim_types::{ContainerSize, OutputFormat, TripType};

#[derive(Parser)]
#[command(name = "unim-checker")]
#[command(version)]
#[command(about = "Container freight tariff lookup over safe-trucking rate workbooks")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset document path. Uses config value if not specified.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert tariff workbooks into the dataset document
    Convert {
        /// Directory scanned for .xlsx workbooks. Uses config value if not specified.
        #[arg(long, short = 'd')]
        data_dir: Option<PathBuf>,

        /// Where to write the dataset. Uses config value if not specified.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Query fares for one or more origins
    Query {
        /// Origin names as they appear in the workbooks (e.g. "부산", "인천")
        #[arg(required = true)]
        origins: Vec<String>,

        /// Trip type (편도, 왕복)
        #[arg(long, short = 't', default_value = "왕복")]
        trip: TripType,

        /// 시·도 / 시·군·구 substring filter
        #[arg(long, short = 'r')]
        region: Option<String>,

        /// 읍·면·동 substring filter
        #[arg(long, short = 's')]
        sub_area: Option<String>,

        /// Container size columns to show (all, 20, 40)
        #[arg(long, default_value = "all")]
        size: ContainerSize,

        /// Number of rows shown. Uses config page size if not specified.
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Show every matching row
        #[arg(long)]
        all: bool,
    },

    /// List origins available in the dataset
    Origins {
        /// Trip type (편도, 왕복)
        #[arg(long, short = 't', default_value = "왕복")]
        trip: TripType,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the workbook data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the dataset document path
        #[arg(long)]
        set_db_path: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set rows revealed per pagination step
        #[arg(long)]
        set_page_size: Option<usize>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
