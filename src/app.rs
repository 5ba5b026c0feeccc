//! Floating Todo App
//!
//! Builds the tab's controller, wires both reconciliation channels and the
//! drag handlers, and lays out the widget.

use std::rc::Rc;

use chrome_ext::{on_message, on_storage_changed, ChromeRuntime, ChromeStorage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use todo_sync::{Point, Size, WidgetConfig, WidgetController};

use crate::components::{NewTodoInput, TodoList, WidgetFooter, WidgetHeader};
use crate::context::{Controller, WidgetContext};
use crate::store::{container_class, StoreView, WidgetStore, WidgetStoreStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = WidgetConfig::default();
    let store = Store::new(WidgetStore::new(&config));
    let container = NodeRef::<leptos::html::Div>::new();
    let controller = Rc::new(WidgetController::new(
        ChromeStorage,
        ChromeRuntime,
        StoreView::new(store),
        config,
    ));

    let ctx = WidgetContext::new(controller.clone(), store, container);
    provide_context(ctx);

    // Load persisted state on mount
    ctx.spawn(|ctl| async move { ctl.load().await });

    bind_sync_listeners(controller.clone());
    bind_drag(controller, container);

    view! {
        <div
            node_ref=container
            class=move || container_class(store.is_minimized().get(), store.dragging().get())
            style=move || store.position().get().to_style()
        >
            <WidgetHeader />
            <NewTodoInput />
            <TodoList />
            <WidgetFooter />
        </div>
    }
}

/// Storage change events and direct relay messages both feed the controller
fn bind_sync_listeners(controller: Rc<Controller>) {
    let ctl = controller.clone();
    on_storage_changed(move |area, changes| ctl.apply_storage_changes(area, &changes));

    on_message(move |message, _sender| {
        let reply = controller.handle_message(message);
        async move { reply }
    });
}

/// Document-level pointer tracking; the header starts the drag
fn bind_drag(controller: Rc<Controller>, container: NodeRef<leptos::html::Div>) {
    let ctl = controller.clone();
    dom_drag::bind_global_mousemove(move |pointer| {
        if !ctl.is_dragging() {
            return;
        }
        let (Some(el), Some((width, height))) = (container.get_untracked(), dom_drag::viewport_size()) else {
            return;
        };
        let widget = dom_drag::element_box(&el);
        ctl.drag_to(
            Point::new(pointer.x, pointer.y),
            Size::new(width, height),
            Size::new(widget.width, widget.height),
        );
    });

    dom_drag::bind_global_mouseup(move || {
        if !controller.is_dragging() {
            return;
        }
        let ctl = controller.clone();
        spawn_local(async move { ctl.end_drag().await });
    });
}
