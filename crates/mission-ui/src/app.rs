use std::rc::Rc;

use gloo::console::log;
use mission_core::{
  DEFAULT_IMAGE_ENDPOINT,
  Event,
  Session,
  TaskError
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::components::{
  DetailsModal,
  SidePanel,
  TaskForm,
  TaskTable
};
use crate::image::fetch_image_url;
use crate::storage::BrowserStorage;

#[derive(Clone)]
struct AppState {
  session:    Session<BrowserStorage>,
  last_error: Option<String>
}

impl Default for AppState {
  fn default() -> Self {
    Self {
      session:    Session::open(
        BrowserStorage
      ),
      last_error: None
    }
  }
}

impl Reducible for AppState {
  type Action = Event;

  fn reduce(
    self: Rc<Self>,
    action: Event
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.last_error =
      match next.session.dispatch(action) {
        | Ok(()) => None,
        // The form renders its own validation message.
        | Err(TaskError::Validation(_)) => {
          None
        }
        | Err(error) => {
          ui_debug(
            "event.rejected",
            &error.to_string()
          );
          Some(error.to_string())
        }
      };
    Rc::new(next)
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let state =
    use_reducer(AppState::default);

  {
    let state = state.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "requesting decorative image"
      );
      state.dispatch(Event::ImageRequested);
      let dispatcher = state.dispatcher();
      wasm_bindgen_futures::spawn_local(
        async move {
          let result = fetch_image_url(
            DEFAULT_IMAGE_ENDPOINT
          )
          .await;
          if let Err(error) = &result {
            tracing::error!(
              %error,
              "error fetching image"
            );
          }
          dispatcher.dispatch(
            Event::ImageResolved(result)
          );
        }
      );
      || ()
    });
  }

  let on_event = {
    let state = state.clone();
    Callback::from(move |event: Event| {
      state.dispatch(event)
    })
  };

  let session = &state.session;
  let form = session.form();
  let storage_degraded =
    session.store().storage_degraded();

  html! {
      <div class="app">
          <div class="header">
              <h1>{ "Mars Mission" }</h1>
          </div>
          <SidePanel
              image_url={session.image().url().map(str::to_string)}
              current_user={session.current_user().to_string()}
              task_count={session.tasks().len()}
              on_event={on_event.clone()}
          />
          <div class="main">
              {
                  if storage_degraded {
                      html! {
                          <div class="banner">
                              { "Browser storage is unavailable; tasks will be lost when this page closes." }
                          </div>
                      }
                  } else {
                      html! {}
                  }
              }
              {
                  if let Some(error) = state.last_error.clone() {
                      html! { <div class="banner error">{ error }</div> }
                  } else {
                      html! {}
                  }
              }
              {
                  if form.is_open() {
                      html! {
                          <TaskForm
                              mode={form.mode()}
                              draft={form.draft().clone()}
                              error={form.last_error().cloned()}
                              on_event={on_event.clone()}
                          />
                      }
                  } else {
                      html! {}
                  }
              }
              <TaskTable
                  tasks={session.tasks().to_vec()}
                  on_event={on_event.clone()}
              />
          </div>
          <DetailsModal
              task={session.detail().current().cloned()}
              on_event={on_event}
          />
      </div>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
