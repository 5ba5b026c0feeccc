//! Todo Item Component
//!
//! One row: checkbox, rendered text with inline editing, delete button.
//! Double-click swaps the text for a textarea; blur or Enter commits and
//! swaps back.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_sync::render::{local_time_string, render_todo_html};
use todo_sync::Todo;

use crate::context::use_widget;

/// Span fade-out before the textarea appears
const EDIT_FADE_MS: u32 = 200;

#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_widget();

    let id = todo.id;
    let completed = todo.completed;
    let html = render_todo_html(&todo.text, &ctx.config(), &local_time_string());
    let raw_text = todo.text;

    let (editing, set_editing) = signal(false);
    let (fading, set_fading) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    let start_edit = move |_: web_sys::MouseEvent| {
        if editing.get_untracked() || fading.get_untracked() {
            return;
        }
        set_draft.set(raw_text.clone());
        set_fading.set(true);
        spawn_local(async move {
            TimeoutFuture::new(EDIT_FADE_MS).await;
            // The row may have been redrawn by a sync in the meantime
            let _ = set_fading.try_set(false);
            let _ = set_editing.try_set(true);
        });
    };

    let commit = move || {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let text = draft.get_untracked();
        ctx.spawn(move |ctl| async move { ctl.edit(id, &text).await });
    };

    Effect::new(move |_| {
        if editing.get() {
            if let Some(el) = textarea_ref.get() {
                let _ = el.focus();
            }
        }
    });

    let toggle = move |_: web_sys::Event| ctx.spawn(move |ctl| async move { ctl.toggle(id).await });
    let delete = move |_: web_sys::MouseEvent| ctx.spawn(move |ctl| async move { ctl.delete(id).await });

    view! {
        <div class=if completed { "todo-item completed" } else { "todo-item" } data-id=id.to_string()>
            <input type="checkbox" prop:checked=completed on:change=toggle />
            <Show
                when=move || editing.get()
                fallback=move || {
                    let start_edit = start_edit.clone();
                    view! {
                        <span
                            class="todo-text"
                            style=move || if fading.get() { "opacity: 0;" } else { "opacity: 1;" }
                            inner_html=html.clone()
                            on:dblclick=start_edit
                        ></span>
                    }
                }
            >
                <textarea
                    class="edit-input"
                    node_ref=textarea_ref
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:blur=move |_| commit()
                    on:keypress=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            commit();
                        }
                    }
                ></textarea>
            </Show>
            <button class="delete-btn" on:click=delete>"×"</button>
        </div>
    }
}
