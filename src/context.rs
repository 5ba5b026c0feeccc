//! Widget Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use chrome_ext::{ChromeRuntime, ChromeStorage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_sync::{WidgetConfig, WidgetController};

use crate::store::{AppStore, StoreView};

/// The tab's controller, bound to the real browser
pub type Controller = WidgetController<ChromeStorage, ChromeRuntime, StoreView>;

/// Widget-wide handles provided via context
#[derive(Clone, Copy)]
pub struct WidgetContext {
    /// Page-scoped controller (single-threaded, hence local storage)
    controller: StoredValue<Rc<Controller>, LocalStorage>,
    /// Read-side state for components
    pub store: AppStore,
    /// Outer container, needed for drag geometry
    pub container: NodeRef<leptos::html::Div>,
}

impl WidgetContext {
    pub fn new(controller: Rc<Controller>, store: AppStore, container: NodeRef<leptos::html::Div>) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
            store,
            container,
        }
    }

    pub fn controller(&self) -> Rc<Controller> {
        self.controller.get_value()
    }

    pub fn config(&self) -> WidgetConfig {
        self.controller().config().clone()
    }

    /// Run an async controller operation in the background
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<Controller>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(op(self.controller()));
    }
}

/// Get the widget context
pub fn use_widget() -> WidgetContext {
    expect_context::<WidgetContext>()
}
