//! CLI helpers wiring the CSV loader to the selection pipeline.
use std::path::Path;

use anyhow::{Context, Result};

use status_classifiers::config::{load_config, SelectionConfig};
use status_classifiers::io::read_dataset;
use status_classifiers::pipeline;
use status_classifiers::report::SelectionReport;

/// Run model selection over a customer table with an already loaded config.
///
/// The table is read with the config's `loader` section.
pub fn run_selection<P: AsRef<Path>>(data_path: P, config: &SelectionConfig) -> Result<SelectionReport> {
    let dataset = read_dataset(&data_path, &config.loader)?;
    let report = pipeline::run(&dataset, config).with_context(|| {
        format!("Model selection failed for {}", data_path.as_ref().display())
    })?;
    Ok(report)
}

/// Run model selection with the configuration stored at `config_path`.
pub fn run_selection_with_config<D, C>(data_path: D, config_path: C) -> Result<SelectionReport>
where
    D: AsRef<Path>,
    C: AsRef<Path>,
{
    let config = load_config(config_path)?;
    run_selection(data_path, &config)
}
