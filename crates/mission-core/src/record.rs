use serde::{
  Deserialize,
  Serialize
};

/// One row of the task table.
///
/// Field names on the wire match the stored `workers` slot:
/// `Title`, `TaskCreator`, `JobTitle`, `Assignee`. A record has no id;
/// its identity is its position in the list.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct TaskRecord {
  #[serde(rename = "Title", default)]
  pub title:     String,
  #[serde(
    rename = "TaskCreator",
    default
  )]
  pub creator:   String,
  #[serde(rename = "JobTitle", default)]
  pub job_title: String,
  #[serde(rename = "Assignee", default)]
  pub assignee:  String
}

impl TaskRecord {
  pub fn new(
    title: impl Into<String>,
    creator: impl Into<String>,
    job_title: impl Into<String>,
    assignee: impl Into<String>
  ) -> Self {
    Self {
      title:     title.into(),
      creator:   creator.into(),
      job_title: job_title.into(),
      assignee:  assignee.into()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serializes_with_stored_field_names() {
    let record = TaskRecord::new(
      "Fix panel",
      "Amy",
      "Engineer",
      "Bob"
    );
    let json = serde_json::to_string(
      &record
    )
    .expect("serialize record");
    assert_eq!(
      json,
      r#"{"Title":"Fix panel","TaskCreator":"Amy","JobTitle":"Engineer","Assignee":"Bob"}"#
    );
  }

  #[test]
  fn missing_fields_load_as_empty() {
    let record: TaskRecord =
      serde_json::from_str(
        r#"{"Title":"Survey crater"}"#
      )
      .expect("parse partial record");
    assert_eq!(
      record.title,
      "Survey crater"
    );
    assert!(record.creator.is_empty());
    assert!(
      record.job_title.is_empty()
    );
    assert!(record.assignee.is_empty());
  }
}
