use leptos::prelude::*;

use crate::components::TodoItem;
use crate::context::use_widget;
use crate::store::WidgetStoreStoreFields;

/// All todos in insertion order
#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_widget();

    view! {
        <div class="todo-list">
            <For
                each=move || ctx.store.todos().get()
                // Content in the key so edits from any tab redraw the row
                key=|todo| (todo.id, todo.text.clone(), todo.completed)
                children=move |todo| view! { <TodoItem todo=todo /> }
            />
        </div>
    }
}
