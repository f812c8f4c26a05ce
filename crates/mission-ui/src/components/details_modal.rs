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
pub struct DetailsModalProps {
  pub task:     Option<TaskRecord>,
  pub on_event: Callback<Event>
}

#[function_component(DetailsModal)]
pub fn details_modal(
  props: &DetailsModalProps
) -> Html {
  let Some(task) = &props.task else {
    return html! {};
  };

  let on_close = {
    let on_event =
      props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::CloseView)
    })
  };

  html! {
      <div class="modal">
          <div class="modal-content">
              <span class="close" onclick={on_close}>{ "×" }</span>
              <h2>{ "Task Details" }</h2>
              <p><strong>{ "Title: " }</strong>{ &task.title }</p>
              <p><strong>{ "Task Creator: " }</strong>{ &task.creator }</p>
              <p><strong>{ "Job Title: " }</strong>{ &task.job_title }</p>
              <p><strong>{ "Assignee: " }</strong>{ &task.assignee }</p>
          </div>
      </div>
  }
}
