use leptos::prelude::*;

use crate::context::use_widget;
use crate::store::{footer_text, WidgetStoreStoreFields};

#[component]
pub fn WidgetFooter() -> impl IntoView {
    let ctx = use_widget();
    view! {
        <div class="footer">
            {move || footer_text(&ctx.store.todos().read())}
        </div>
    }
}
