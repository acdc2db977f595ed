pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stylist_core::config::{ConfigOverrides, FallbackSource, LoadOptions};

use crate::commands::add::AddArgs;

#[derive(Debug, Parser)]
#[command(
    name = "stylist",
    about = "Outfit recommendations from your wardrobe",
    long_about = "Browse the wardrobe catalog, add items, and get outfit recommendations built from color, style and formality compatibility rules.",
    after_help = "Examples:\n  stylist wardrobe\n  stylist recommend --season summer --count 3\n  stylist search material silk --json"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Default, Args)]
struct GlobalArgs {
    #[arg(long, global = true, value_name = "PATH", help = "Config file to load; it must exist")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Tabular (CSV) dataset path")]
    tabular: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Records (JSON) dataset path")]
    records: Option<PathBuf>,
    #[arg(long, global = true, help = "Fallback catalog when no dataset loads: synthetic or sample")]
    fallback: Option<FallbackSource>,
    #[arg(long, global = true, help = "Seed for the synthetic catalog")]
    seed: Option<u64>,
    #[arg(long, global = true, help = "Log level: trace, debug, info, warn or error")]
    log_level: Option<String>,
}

impl Cli {
    /// Config loading options built from the global flags.
    pub fn load_options(&self) -> LoadOptions {
        let global = &self.global;
        LoadOptions {
            config_path: global.config.clone(),
            require_file: global.config.is_some(),
            overrides: ConfigOverrides {
                tabular_path: global.tabular.clone(),
                records_path: global.records.clone(),
                fallback: global.fallback,
                synthetic_seed: global.seed,
                log_level: global.log_level.clone(),
            },
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List wardrobe items grouped by category")]
    Wardrobe {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Add an item to the wardrobe and save the dataset")]
    Add(AddCommand),
    #[command(about = "Recommend outfits for a season")]
    Recommend {
        #[arg(long, help = "Target season (defaults to configuration, then today's date)")]
        season: Option<String>,
        #[arg(long, help = "Number of outfits to request")]
        count: Option<usize>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Rank items by popularity tier and sales signals")]
    Popular {
        #[arg(long, help = "Maximum number of items to list")]
        limit: Option<usize>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Find items by a core field or auxiliary attribute")]
    Search {
        attribute: String,
        value: String,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

#[derive(Debug, Args)]
struct AddCommand {
    #[arg(long)]
    category: String,
    #[arg(long)]
    color: String,
    #[arg(long)]
    style: String,
    #[arg(long)]
    season: String,
    #[arg(long)]
    formality: String,
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    material: Option<String>,
    #[arg(long)]
    fit: Option<String>,
    #[arg(long, help = "Popularity tier: low, medium, high or trending")]
    popularity: Option<String>,
    #[arg(long, help = "Emit machine-readable JSON output")]
    json: bool,
}

impl AddCommand {
    fn into_args(self) -> (AddArgs, bool) {
        let args = AddArgs {
            category: self.category,
            color: self.color,
            style: self.style,
            season: self.season,
            formality: self.formality,
            pattern: self.pattern,
            material: self.material,
            fit: self.fit,
            popularity: self.popularity,
        };
        (args, self.json)
    }
}

pub fn run_cli(cli: Cli) -> ExitCode {
    let options = cli.load_options();
    let result = match cli.command {
        Command::Wardrobe { json } => commands::wardrobe::run(&options, json),
        Command::Add(add) => {
            let (args, json) = add.into_args();
            commands::add::run(&options, args, json)
        }
        Command::Recommend { season, count, json } => {
            commands::recommend::run(&options, season, count, json)
        }
        Command::Popular { limit, json } => commands::popular::run(&options, limit, json),
        Command::Search { attribute, value, json } => {
            commands::search::run(&options, &attribute, &value, json)
        }
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
