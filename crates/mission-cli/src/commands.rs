use std::io::Write;

use anyhow::{
  Context,
  bail
};
use mission_core::{
  DraftField,
  Event,
  ImageFetchError,
  Session,
  StoragePort,
  SubmitOutcome
};
use tracing::{
  debug,
  info
};

use crate::cli::{
  Command,
  FieldArgs
};
use crate::config::{
  Config,
  ImageConfig
};
use crate::image::fetch_image_url;
use crate::render::{
  render_details,
  render_table
};

#[tracing::instrument(skip(session, cfg, out))]
pub fn dispatch<S: StoragePort>(
  session: &mut Session<S>,
  cfg: &Config,
  command: Command,
  out: &mut impl Write
) -> anyhow::Result<()> {
  dispatch_with(
    session,
    cfg,
    command,
    out,
    |image| {
      fetch_image_url(
        &image.endpoint,
        image.timeout()
      )
    }
  )
}

/// Like [`dispatch`] with the image request supplied by the caller.
pub fn dispatch_with<S, F>(
  session: &mut Session<S>,
  cfg: &Config,
  command: Command,
  out: &mut impl Write,
  fetch_image: F
) -> anyhow::Result<()>
where
  S: StoragePort,
  F: FnOnce(
    &ImageConfig
  )
    -> Result<String, ImageFetchError>
{
  match command {
    | Command::List => {
      write!(
        out,
        "{}",
        render_table(session.tasks())
      )?;
    }
    | Command::Add(fields) => {
      session
        .dispatch(Event::StartCreate)?;
      fill_draft(session, fields)?;
      let outcome = session
        .submit()
        .context("task not created")?;
      report_submit(session, outcome, out)?;
    }
    | Command::Edit { row, fields } => {
      let index = row_index(row)?;
      session
        .dispatch(Event::StartEdit(index))
        .with_context(|| {
          format!("cannot edit task {row}")
        })?;
      fill_draft(session, fields)?;
      let outcome = session
        .submit()
        .with_context(|| {
          format!(
            "task {row} not updated"
          )
        })?;
      report_submit(session, outcome, out)?;
    }
    | Command::View { row } => {
      let index = row_index(row)?;
      session
        .dispatch(Event::View(index))
        .with_context(|| {
          format!("cannot view task {row}")
        })?;
      if let Some(record) =
        session.detail().current()
      {
        write!(
          out,
          "{}",
          render_details(row, record)
        )?;
      }
      session.dispatch(Event::CloseView)?;
    }
    | Command::Delete { row } => {
      let index = row_index(row)?;
      let removed = session
        .delete_at(index)
        .with_context(|| {
          format!(
            "cannot delete task {row}"
          )
        })?;
      writeln!(
        out,
        "Deleted task {row}: {}",
        removed.title
      )?;
      warn_if_degraded(session, out)?;
    }
    | Command::Clear => {
      let count = session.tasks().len();
      session.dispatch(Event::DeleteAll)?;
      writeln!(
        out,
        "Deleted {count} task(s)."
      )?;
      warn_if_degraded(session, out)?;
    }
    | Command::Status => {
      writeln!(
        out,
        "Current User: {}",
        session.current_user()
      )?;
      writeln!(
        out,
        "Number of Tasks: {}",
        session.tasks().len()
      )?;
      let storage = if session
        .store()
        .storage_degraded()
      {
        "degraded (changes are not \
         saved)"
      } else {
        "ok"
      };
      writeln!(out, "Storage: {storage}")?;
    }
    | Command::Image => {
      if !cfg.image.enabled {
        writeln!(
          out,
          "Decorative image disabled."
        )?;
        return Ok(());
      }
      if session.begin_image_fetch() {
        let result =
          fetch_image(&cfg.image);
        session.dispatch(
          Event::ImageResolved(result)
        )?;
      }
      match session.image().url() {
        | Some(url) => {
          writeln!(out, "{url}")?
        }
        | None => {
          writeln!(
            out,
            "No image available."
          )?
        }
      }
    }
  }

  Ok(())
}

fn row_index(
  row: usize
) -> anyhow::Result<usize> {
  if row == 0 {
    bail!(
      "task rows are numbered from 1"
    );
  }
  Ok(row - 1)
}

fn fill_draft<S: StoragePort>(
  session: &mut Session<S>,
  fields: FieldArgs
) -> anyhow::Result<()> {
  let given = [
    (DraftField::Title, fields.title),
    (DraftField::Creator, fields.creator),
    (
      DraftField::JobTitle,
      fields.job_title
    ),
    (
      DraftField::Assignee,
      fields.assignee
    )
  ];

  for (field, value) in given {
    if let Some(value) = value {
      debug!(field = field.label(), "setting draft field");
      session.dispatch(
        Event::SetField(field, value)
      )?;
    }
  }
  Ok(())
}

fn report_submit<S: StoragePort>(
  session: &Session<S>,
  outcome: SubmitOutcome,
  out: &mut impl Write
) -> anyhow::Result<()> {
  match outcome {
    | SubmitOutcome::Created { index } => {
      info!(row = index + 1, "task created");
      writeln!(
        out,
        "Created task {}.",
        index + 1
      )?;
    }
    | SubmitOutcome::Updated { index } => {
      info!(row = index + 1, "task updated");
      writeln!(
        out,
        "Updated task {}.",
        index + 1
      )?;
    }
  }
  warn_if_degraded(session, out)
}

fn warn_if_degraded<S: StoragePort>(
  session: &Session<S>,
  out: &mut impl Write
) -> anyhow::Result<()> {
  if session.store().storage_degraded() {
    writeln!(
      out,
      "warning: task storage is \
       unavailable; changes last only \
       for this run"
    )?;
  }
  Ok(())
}
