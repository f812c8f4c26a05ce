use mission_core::{
  DraftField,
  Event,
  FormMode,
  TaskDraft,
  ValidationFailure
};
use web_sys::{
  HtmlInputElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub mode:     FormMode,
  pub draft:    TaskDraft,
  pub error:    Option<ValidationFailure>,
  pub on_event: Callback<Event>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let on_submit = {
    let on_event =
      props.on_event.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_event.emit(Event::Submit);
      }
    )
  };
  let on_cancel = {
    let on_event =
      props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::Cancel)
    })
  };

  let submit_label = match props.mode {
    | FormMode::Editing { .. } => {
      "Update Task"
    }
    | _ => "Submit"
  };

  let field_input =
    |field: DraftField,
     id: &'static str,
     placeholder: &'static str| {
      let on_event =
        props.on_event.clone();
      let oninput = Callback::from(
        move |e: InputEvent| {
          let input: HtmlInputElement =
            e.target_unchecked_into();
          on_event.emit(Event::SetField(
            field,
            input.value()
          ));
        }
      );
      html! {
          <div>
              <label for={id}>{ field.label() }</label>
              <input
                  id={id}
                  type="text"
                  placeholder={placeholder}
                  value={props.draft.field(field).to_string()}
                  oninput={oninput}
                  required=true
              />
          </div>
      }
    };

  html! {
      <form id="task-form" class="task-form" onsubmit={on_submit}>
          { field_input(DraftField::Title, "title", "Enter task title") }
          { field_input(DraftField::Creator, "TaskCreator", "Enter task creator") }
          { field_input(DraftField::JobTitle, "jobtitle", "Enter job title") }
          { field_input(DraftField::Assignee, "assignee", "Enter assignee") }
          {
              if let Some(error) = &props.error {
                  html! { <div class="form-error">{ error.to_string() }</div> }
              } else {
                  html! {}
              }
          }
          <div class="actions">
              <button class="btn ok" type="submit">{ submit_label }</button>
              <button class="btn ghost" type="button" onclick={on_cancel}>{ "Cancel" }</button>
          </div>
      </form>
  }
}
