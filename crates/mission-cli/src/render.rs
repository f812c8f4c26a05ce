use std::fmt::Write as _;

use mission_core::TaskRecord;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = [
  "#",
  "Title",
  "Task Creator",
  "Job Title",
  "Assignee"
];

/// Plain-text task table, rows numbered from 1.
pub fn render_table(
  records: &[TaskRecord]
) -> String {
  if records.is_empty() {
    return "No tasks.\n".to_string();
  }

  let rows: Vec<[String; 5]> = records
    .iter()
    .enumerate()
    .map(|(index, record)| {
      [
        (index + 1).to_string(),
        record.title.clone(),
        record.creator.clone(),
        record.job_title.clone(),
        record.assignee.clone()
      ]
    })
    .collect();

  let mut widths =
    HEADERS.map(UnicodeWidthStr::width);
  for row in &rows {
    for (width, cell) in
      widths.iter_mut().zip(row)
    {
      *width = (*width).max(cell.width());
    }
  }

  let mut out = String::new();
  push_line(
    &mut out,
    HEADERS.as_slice(),
    &widths
  );
  let rule: Vec<String> = widths
    .iter()
    .map(|width| "-".repeat(*width))
    .collect();
  push_line(
    &mut out,
    rule.as_slice(),
    &widths
  );
  for row in &rows {
    push_line(
      &mut out,
      row.as_slice(),
      &widths
    );
  }
  out
}

pub fn render_details(
  row: usize,
  record: &TaskRecord
) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Task {row}");
  for (label, value) in [
    ("Title", &record.title),
    ("Task Creator", &record.creator),
    ("Job Title", &record.job_title),
    ("Assignee", &record.assignee)
  ] {
    let _ =
      writeln!(out, "  {label:<13}{value}");
  }
  out
}

fn push_line<S: AsRef<str>>(
  out: &mut String,
  cells: &[S],
  widths: &[usize; 5]
) {
  let mut line = String::new();
  for (cell, width) in
    cells.iter().zip(widths)
  {
    let cell = cell.as_ref();
    line.push_str(cell);
    let pad =
      width.saturating_sub(cell.width());
    line.push_str(&" ".repeat(pad + 2));
  }
  out.push_str(line.trim_end());
  out.push('\n');
}
