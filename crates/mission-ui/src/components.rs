mod details_modal;
mod side_panel;
mod task_form;
mod task_table;
mod task_table_row;

pub use details_modal::DetailsModal;
pub use side_panel::SidePanel;
pub use task_form::TaskForm;
pub use task_table::TaskTable;
use task_table_row::TaskTableRow;
