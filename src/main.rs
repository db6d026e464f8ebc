use std::{fs, path::Path, process};

use clap::{crate_description, Parser, Subcommand};
use config::Config;
use highlight_themes::ColorMode;
use layout::{ElementSnapshot, Rect};
use log::{debug, info, warn};
use utils::set_global_log_level;

mod config;
mod dates;
mod highlight_themes;
mod layout;
mod utils;

#[derive(Parser)]
#[clap(author, version, about = crate_description!(), long_about=None)]
struct Args {
    /// One of "off", "error", "warn", "info", "debug", "trace". Overrides the configuration file
    #[clap(long)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a sample configuration file with all the values pre-filled
    CreateSampleConfig {
        /// Create the configuration file even if it already exists
        #[clap(long, takes_value = false)]
        force: bool,
    },
    /// Load the configuration file and report what the site will be built with
    CheckConfig,
    /// Turn DD-MM-YYYY dates into the "25 Dec 2024" form posts display
    FormatDate {
        #[clap(required = true)]
        dates: Vec<String>,
    },
    /// Print the height of an element with its vertical margins added
    MeasureHeight {
        /// Bounding box height, in pixels
        #[clap(long, allow_hyphen_values = true)]
        height: f64,
        /// Computed `margin-top`, e.g. "10px" or "auto"
        #[clap(long, default_value = "0px", allow_hyphen_values = true)]
        margin_top: String,
        /// Computed `margin-bottom`, e.g. "10px" or "auto"
        #[clap(long, default_value = "0px", allow_hyphen_values = true)]
        margin_bottom: String,
    },
}

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_LOG_LEVEL: &str = "info";

macro_rules! clean_panic {
    ($message:literal$(,)? $($arg:expr),*) => {
        {
            eprintln!($message, $($arg),*);
            process::exit(1);
        }
    }
}

fn create_sample_config(force: bool) {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        clean_panic!(
            "`{:?}` already exists! To overwrite it, add a `--force` flag.",
            config_path
        );
    }
    let contents = Config::sample().to_json().unwrap_or_else(|error| {
        clean_panic!("The sample configuration couldn't be serialized! Details: {}", error);
    });
    if let Err(error) = fs::write(config_path, contents) {
        clean_panic!("`{:?}` couldn't be written! Details: {}", config_path, error);
    }
    info!("Wrote a sample configuration to {:?}", config_path);
}

fn check_config(config: &Config) {
    info!(
        "{:?} ({}), compatibility date {}",
        config.head.title, config.head.lang, config.compatibility_date
    );
    match config.favicon() {
        Some(favicon) => info!("Favicon: {} ({})", favicon.href, favicon.mime_type),
        None => warn!("No favicon link is configured"),
    }
    info!("Modules: {}", config.modules.join(", "));
    info!("Highlighted languages: {}", config.highlight.langs.join(", "));
    for mode in ColorMode::ALL {
        info!(
            "Code theme for {} pages: {}",
            mode.name(),
            config.highlight.theme.for_mode(mode)
        );
    }
    for stylesheet in &config.stylesheets {
        debug!("Stylesheet: {}", stylesheet);
    }
    if config.devtools {
        debug!("Devtools are enabled");
    }
    println!("{} is valid", CONFIG_FILE_NAME);
}

fn format_dates(inputs: &[String]) {
    let mut failed = false;
    for input in inputs {
        match dates::format_date(input) {
            Ok(formatted) => println!("{}", formatted),
            Err(error) => {
                eprintln!("{}", error);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

fn load_config() -> Config {
    Config::load(CONFIG_FILE_NAME).unwrap_or_else(|error| {
        clean_panic!(
            "Couldn't use `{}`: {}. Consider creating a sample configuration using \
            `mi-blog create-sample-config`, and then editing it.",
            CONFIG_FILE_NAME,
            error
        );
    })
}

fn main() {
    let args = Args::parse();
    let log_level = args.log_level.as_deref();

    match args.command {
        Command::CheckConfig => {
            let config = load_config();
            set_global_log_level(log_level.unwrap_or(&config.log_level));
            check_config(&config);
        }
        Command::CreateSampleConfig { force } => {
            set_global_log_level(log_level.unwrap_or(DEFAULT_LOG_LEVEL));
            create_sample_config(force);
        }
        Command::FormatDate { dates } => {
            set_global_log_level(log_level.unwrap_or(DEFAULT_LOG_LEVEL));
            format_dates(&dates);
        }
        Command::MeasureHeight {
            height,
            margin_top,
            margin_bottom,
        } => {
            set_global_log_level(log_level.unwrap_or(DEFAULT_LOG_LEVEL));
            let element = ElementSnapshot::new(Rect::new(0.0, 0.0, 0.0, height))
                .with_style("margin-top", margin_top)
                .with_style("margin-bottom", margin_bottom);
            println!("{}", layout::measure_full_height(&element));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure_height_args(arguments: &[&str]) -> (f64, String, String) {
        let args = Args::try_parse_from(
            ["mi-blog", "measure-height"].iter().chain(arguments).copied(),
        )
        .unwrap();
        match args.command {
            Command::MeasureHeight {
                height,
                margin_top,
                margin_bottom,
            } => (height, margin_top, margin_bottom),
            _ => panic!("expected the measure-height command"),
        }
    }

    #[test]
    fn measure_height_accepts_negative_values() {
        let (height, margin_top, margin_bottom) = measure_height_args(&[
            "--height",
            "-5",
            "--margin-top",
            "-3px",
            "--margin-bottom",
            "-1.5px",
        ]);
        assert_eq!(height, -5.0);
        assert_eq!(margin_top, "-3px");
        assert_eq!(margin_bottom, "-1.5px");
    }

    #[test]
    fn measure_height_margins_default_to_zero() {
        let (height, margin_top, margin_bottom) = measure_height_args(&["--height", "40"]);
        assert_eq!(height, 40.0);
        assert_eq!(margin_top, "0px");
        assert_eq!(margin_bottom, "0px");
    }
}
