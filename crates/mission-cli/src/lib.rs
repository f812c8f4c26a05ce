pub mod cli;
pub mod commands;
pub mod config;
pub mod file_storage;
pub mod image;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use mission_core::Session;
use tracing::{
  debug,
  info
};

use crate::cli::Command;
use crate::file_storage::FileStorage;

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting mission CLI"
  );

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  )?;
  debug!(?cfg, "effective configuration");

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    FileStorage::open(&data_dir)
      .with_context(|| {
        format!(
          "failed to open task storage \
           at {}",
          data_dir.display()
        )
      })?;

  let mut session =
    Session::open(storage);
  let mut out = std::io::stdout().lock();

  commands::dispatch(
    &mut session,
    &cfg,
    cli.command.unwrap_or(Command::List),
    &mut out
  )?;

  info!("done");
  Ok(())
}
