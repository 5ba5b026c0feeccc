//! New Todo Input Component
//!
//! Single-line input; Enter adds the trimmed text.

use leptos::prelude::*;

use crate::context::use_widget;

#[component]
pub fn NewTodoInput() -> impl IntoView {
    let ctx = use_widget();
    let (new_text, set_new_text) = signal(String::new());

    let on_keypress = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        let text = new_text.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        set_new_text.set(String::new());
        ctx.spawn(move |ctl| async move { ctl.add(&text).await });
    };

    view! {
        <input
            class="todo-input"
            placeholder="Add a new todo..."
            prop:value=move || new_text.get()
            on:input=move |ev| set_new_text.set(event_target_value(&ev))
            on:keypress=on_keypress
        />
    }
}
