use anyhow::Result;
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use status_classifiers::config::{load_config, SelectionConfig};
use status_cli::select::run_selection;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("STATUS_LOG", "error,status_classifiers=warn"))
        .init();

    let matches = Command::new("status-select")
        .version(clap::crate_version!())
        .about("Pick the best customer-status classifier by cross-validation")
        .arg_required_else_help(true)
        .arg(
            Arg::new("data")
                .help("Path to the customer CSV (recency, frequency, weeks_since_signup, status)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .help("Path to a selection JSON configuration file")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let data_path = matches
        .get_one::<PathBuf>("data")
        .ok_or_else(|| anyhow::anyhow!("missing data path"))?;
    eprintln!("[status-select] Reading customers from: {:?}", data_path);

    let config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        eprintln!("[status-select] Using config: {:?}", config_path);
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load config: {:#}", e);
                std::process::exit(1)
            }
        }
    } else {
        let default_config = SelectionConfig::default();
        let default_json = serde_json::to_string_pretty(&default_config).unwrap_or_default();
        eprintln!("[status-select] No config provided; using defaults:\n{}", default_json);
        default_config
    };

    match run_selection(data_path, &config) {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            log::error!("Selection failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
