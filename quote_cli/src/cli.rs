use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quote", version, about = "Cut-to-size costing and offers")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "quote.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cost a single piece
    Cost(CostArgs),

    /// Price an offer file
    Offer {
        /// Offer JSON file
        file: PathBuf,

        /// Print the priced summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the sheet material catalog
    Materials {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct CostArgs {
    /// JSON file holding a costing input
    #[arg(short, long, conflicts_with = "interactive")]
    pub input: Option<PathBuf>,

    /// Prompt for every value
    #[arg(long)]
    pub interactive: bool,

    /// Piece width (mm)
    #[arg(long)]
    pub width: Option<f64>,

    /// Piece height (mm)
    #[arg(long)]
    pub height: Option<f64>,

    /// Piece depth (mm)
    #[arg(long)]
    pub depth: Option<f64>,

    /// Sheet thickness (mm)
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Number of pieces
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Catalog material; supplies price and density unless overridden
    #[arg(short, long, default_value = "PMMA-CLEAR")]
    pub material: String,

    /// Material price per m² per mm (overrides the catalog)
    #[arg(long)]
    pub material_price: Option<f64>,

    /// Material density in kg per m² per mm (overrides the catalog)
    #[arg(long)]
    pub density: Option<f64>,

    /// Waste allowance in percent (overrides the config)
    #[arg(long)]
    pub waste: Option<f64>,

    /// Profit multiplier (overrides the config)
    #[arg(long)]
    pub multiplier: Option<f64>,

    /// Cost of extra options per piece
    #[arg(long, default_value_t = 0.0)]
    pub extras: f64,

    /// Print input and breakdown as JSON
    #[arg(long)]
    pub json: bool,
}
