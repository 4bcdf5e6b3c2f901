//! # td-probe
//!
//! Native command line probe: runs the dashboard use cases headless
//! against a live server through the `reqwest` adapter and prints what the
//! page would have shown.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod ports;

use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use serde_json::Value;
use td_infra::ReqwestHttpClient;
use url::Url;

use crate::cli::{Cli, Command};
use crate::commands::Probe;

/// Execute the parsed command line and return its report.
pub async fn run(cli: &Cli) -> anyhow::Result<Value> {
    let config = bootstrap::config::load_or_default(cli.config.as_deref())?;
    let base = Url::parse(&cli.base_url)
        .with_context(|| format!("invalid base URL `{}`", cli.base_url))?;
    let http = ReqwestHttpClient::new(Duration::from_secs(cli.timeout))
        .context("failed to build the HTTP client")?;
    let probe = Probe::new(base, Rc::new(http), config);

    match &cli.command {
        Command::Fetch { path, html } => probe.fetch(path, *html).await,
        Command::Step { path, step } => probe.step(path, *step).await,
        Command::Duplicate(args) => probe.duplicate(args).await,
        Command::Search { term } => probe.search(term).await,
        Command::Notifications => probe.notifications().await,
    }
}
