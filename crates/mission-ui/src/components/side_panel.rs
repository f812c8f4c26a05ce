use mission_core::Event;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SidePanelProps {
  pub image_url:    Option<String>,
  pub current_user: String,
  pub task_count:   usize,
  pub on_event:     Callback<Event>
}

#[function_component(SidePanel)]
pub fn side_panel(
  props: &SidePanelProps
) -> Html {
  let on_create = {
    let on_event =
      props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::StartCreate)
    })
  };
  let on_delete_all = {
    let on_event =
      props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::DeleteAll)
    })
  };

  html! {
      <div class="side-panel">
          {
              match &props.image_url {
                  Some(url) => html! { <img src={url.clone()} alt="Mars" class="mars-image" /> },
                  None => html! {},
              }
          }
          <h2>{ "Task Manager" }</h2>
          <p>
              { "Current User: " }
              <span id="current-user">{ &props.current_user }</span>
          </p>
          <p>
              { "Number of Tasks: " }
              <span id="task-count">{ props.task_count.to_string() }</span>
          </p>
          <button id="create-task" class="btn" onclick={on_create}>{ "Create Task" }</button>
          <button id="delete-all-tasks" class="btn danger" onclick={on_delete_all}>{ "Delete All Tasks" }</button>
      </div>
  }
}
