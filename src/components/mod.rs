//! UI Components
//!
//! Pieces of the floating widget.

mod new_todo_input;
mod todo_item;
mod todo_list;
mod widget_footer;
mod widget_header;

pub use new_todo_input::NewTodoInput;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
pub use widget_footer::WidgetFooter;
pub use widget_header::WidgetHeader;
