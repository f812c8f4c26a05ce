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

#[derive(Properties, PartialEq)]
pub struct TaskTableRowProps {
  pub index:    usize,
  pub task:     TaskRecord,
  pub on_event: Callback<Event>
}

#[function_component(TaskTableRow)]
pub fn task_table_row(
  props: &TaskTableRowProps
) -> Html {
  let index = props.index;
  let action = |event: Event| {
    let on_event =
      props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(event.clone())
    })
  };

  html! {
      <tr>
          <td>{ &props.task.title }</td>
          <td>{ &props.task.creator }</td>
          <td>{ &props.task.job_title }</td>
          <td>{ &props.task.assignee }</td>
          <td class="actions">
              <button class="btn sm edit" onclick={action(Event::StartEdit(index))}>{ "Edit" }</button>
              <button class="btn sm ghost view" onclick={action(Event::View(index))}>{ "View" }</button>
              <button class="btn sm danger delete" onclick={action(Event::Delete(index))}>{ "Delete" }</button>
          </td>
      </tr>
  }
}
