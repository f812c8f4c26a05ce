use mission_core::{
  Event,
  TaskRecord
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskTableRow;

#[derive(Properties, PartialEq)]
pub struct TaskTableProps {
  pub tasks:    Vec<TaskRecord>,
  pub on_event: Callback<Event>
}

#[function_component(TaskTable)]
pub fn task_table(
  props: &TaskTableProps
) -> Html {
  html! {
      <table class="tasks">
          <thead>
              <tr>
                  <th>{ "Title" }</th>
                  <th>{ "Task Creator" }</th>
                  <th>{ "Job Title" }</th>
                  <th>{ "Assignee" }</th>
                  <th>{ "Action" }</th>
              </tr>
          </thead>
          <tbody id="task-list">
              {
                  if props.tasks.is_empty() {
                      html! { <tr><td class="empty" colspan="5">{ "No tasks yet." }</td></tr> }
                  } else {
                      html! {}
                  }
              }
              {
                  for props.tasks.iter().cloned().enumerate().map(|(index, task)| html! {
                      <TaskTableRow
                          index={index}
                          task={task}
                          on_event={props.on_event.clone()}
                      />
                  })
              }
          </tbody>
      </table>
  }
}
