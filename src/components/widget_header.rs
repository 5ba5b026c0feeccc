//! Widget Header Component
//!
//! Drag handle, title and the minimize toggle.

use dom_drag::{element_box, make_on_handle_mousedown, PointerPos};
use leptos::prelude::*;
use todo_sync::Point;

use crate::context::use_widget;
use crate::store::{minimize_glyph, WidgetStoreStoreFields};

#[component]
pub fn WidgetHeader() -> impl IntoView {
    let ctx = use_widget();

    let on_handle_mousedown = make_on_handle_mousedown(move |pointer: PointerPos| {
        let Some(el) = ctx.container.get_untracked() else {
            return;
        };
        let rect = element_box(&el);
        ctx.controller()
            .begin_drag(Point::new(pointer.x, pointer.y), Point::new(rect.left, rect.top));
    });

    let toggle_minimize = move |_: web_sys::MouseEvent| {
        ctx.spawn(|ctl| async move { ctl.toggle_minimize().await });
    };

    view! {
        <div class="todo-header">
            <span class="drag-handle no-select" on:mousedown=on_handle_mousedown>"☰"</span>
            <div class="logo-container no-select">
                <span class="logo-text">"Floating Todo"</span>
                <div class="minimize-btn" on:click=toggle_minimize>
                    {move || minimize_glyph(ctx.store.is_minimized().get())}
                </div>
            </div>
        </div>
    }
}
