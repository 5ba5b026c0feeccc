//! Cross-Tab Sync Tests
//!
//! Several tab controllers and one relay sharing an in-memory store.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::{
        Clock, Message, MemoryStore, Position, Relay, RelayClient, SyncError, SyncResult, TabId,
        TabMessenger, Todo, WidgetConfig, WidgetController, WidgetView,
    };

    #[derive(Default)]
    struct TabView {
        renders: Cell<usize>,
        minimized: Cell<bool>,
    }

    impl WidgetView for Rc<TabView> {
        fn render(&self, _todos: &[Todo]) {
            self.renders.set(self.renders.get() + 1);
        }
        fn set_minimized(&self, minimized: bool) {
            self.minimized.set(minimized);
        }
        fn set_position(&self, _position: &Position) {}
    }

    /// Each tab gets its own clock so ids stay apart like real timestamps
    struct TabClock(Cell<i64>);

    impl Clock for TabClock {
        fn now_ms(&self) -> i64 {
            let now = self.0.get();
            self.0.set(now + 1);
            now
        }
    }

    type Registry = Rc<RefCell<Vec<(TabId, Rc<Tab>)>>>;
    type BrowserRelay = Relay<MemoryStore, BrowserTabs>;
    type Tab = WidgetController<MemoryStore, TabSender, Rc<TabView>, TabClock>;

    struct BrowserTabs {
        registry: Registry,
        closed: RefCell<Vec<TabId>>,
        delivered: RefCell<Vec<TabId>>,
    }

    #[async_trait(?Send)]
    impl TabMessenger for BrowserTabs {
        async fn query_tabs(&self) -> SyncResult<Vec<TabId>> {
            Ok(self.registry.borrow().iter().map(|(id, _)| *id).collect())
        }

        async fn send(&self, tab: TabId, message: &Message) -> SyncResult<()> {
            if self.closed.borrow().contains(&tab) {
                return Err(SyncError::Messaging(format!("tab {} closed", tab.0)));
            }
            let target = self
                .registry
                .borrow()
                .iter()
                .find(|(id, _)| *id == tab)
                .map(|(_, ctl)| ctl.clone());
            let ctl = target.ok_or_else(|| SyncError::Messaging("no such tab".to_string()))?;
            self.delivered.borrow_mut().push(tab);
            ctl.handle_message(message.clone());
            Ok(())
        }
    }

    /// A tab's channel to the background relay
    struct TabSender {
        origin: TabId,
        relay: Rc<BrowserRelay>,
    }

    #[async_trait(?Send)]
    impl RelayClient for TabSender {
        async fn update_todos(&self, todos: &[Todo]) -> SyncResult<()> {
            let message = Message::UpdateTodos { todos: todos.to_vec() };
            match self.relay.handle_message(Some(self.origin), message).await {
                Some(ack) if ack.success => Ok(()),
                _ => Err(SyncError::Messaging("relay rejected update".to_string())),
            }
        }
    }

    struct Browser {
        store: MemoryStore,
        relay: Rc<BrowserRelay>,
        registry: Registry,
    }

    impl Browser {
        fn new() -> Self {
            let store = MemoryStore::new();
            let registry: Registry = Rc::new(RefCell::new(Vec::new()));
            let tabs = BrowserTabs {
                registry: registry.clone(),
                closed: RefCell::new(Vec::new()),
                delivered: RefCell::new(Vec::new()),
            };
            let relay = Rc::new(Relay::new(store.clone(), tabs));
            Self { store, relay, registry }
        }

        /// Open a tab; `listen_storage` also wires the storage change channel
        async fn open_tab(&self, id: i32, listen_storage: bool) -> (Rc<Tab>, Rc<TabView>) {
            let view = Rc::new(TabView::default());
            let sender = TabSender {
                origin: TabId(id),
                relay: self.relay.clone(),
            };
            let clock = TabClock(Cell::new(i64::from(id) * 1_000_000));
            let ctl = Rc::new(WidgetController::with_clock(
                self.store.clone(),
                sender,
                view.clone(),
                WidgetConfig::default(),
                clock,
            ));
            ctl.load().await;
            if listen_storage {
                let listener = ctl.clone();
                self.store
                    .subscribe(move |changes| listener.apply_storage_changes("local", changes));
            }
            self.registry.borrow_mut().push((TabId(id), ctl.clone()));
            (ctl, view)
        }

        fn delivered(&self) -> Vec<i32> {
            self.relay_tabs().delivered.borrow().iter().map(|tab| tab.0).collect()
        }

        fn relay_tabs(&self) -> &BrowserTabs {
            self.relay.tabs()
        }
    }

    #[tokio::test]
    async fn test_sibling_receives_exact_payload_originator_does_not() {
        let browser = Browser::new();
        let (a, _) = browser.open_tab(1, false).await;
        let (b, _) = browser.open_tab(2, false).await;
        let (c, _) = browser.open_tab(3, false).await;

        a.add("buy milk").await;

        assert_eq!(b.todos(), a.todos());
        assert_eq!(c.todos(), a.todos());
        assert_eq!(browser.delivered(), vec![2, 3]);
        assert_eq!(browser.store.snapshot().todos, Some(a.todos()));
    }

    #[tokio::test]
    async fn test_edits_flow_back_from_sibling() {
        let browser = Browser::new();
        let (a, _) = browser.open_tab(1, false).await;
        let (b, _) = browser.open_tab(2, false).await;

        a.add("buy milk").await;
        let id = b.todos()[0].id;
        b.toggle(id).await;
        b.edit(id, "buy oat milk").await;

        let expected = vec![Todo { id, text: "buy oat milk".to_string(), completed: true }];
        assert_eq!(a.todos(), expected);
        assert_eq!(browser.store.snapshot().todos, Some(expected));
    }

    #[tokio::test]
    async fn test_closed_tab_skipped_silently() {
        let browser = Browser::new();
        let (a, _) = browser.open_tab(1, false).await;
        let (b, _) = browser.open_tab(2, false).await;
        let (c, _) = browser.open_tab(3, false).await;
        browser.relay_tabs().closed.borrow_mut().push(TabId(2));

        a.add("x").await;

        assert!(b.todos().is_empty());
        assert_eq!(c.todos(), a.todos());
    }

    #[tokio::test]
    async fn test_storage_channel_carries_minimized_state() {
        let browser = Browser::new();
        let (a, _) = browser.open_tab(1, true).await;
        let (b, b_view) = browser.open_tab(2, true).await;

        a.toggle_minimize().await;

        assert!(b.is_minimized());
        assert!(b_view.minimized.get());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let browser = Browser::new();
        let (a, _) = browser.open_tab(1, true).await;
        let (b, _) = browser.open_tab(2, true).await;

        a.add("from a").await;
        b.delete(a.todos()[0].id).await;
        b.add("from b").await;

        let final_list = browser.store.snapshot().todos.unwrap();
        assert_eq!(final_list.len(), 1);
        assert_eq!(final_list[0].text, "from b");
        assert_eq!(a.todos(), final_list);
    }

    #[tokio::test]
    async fn test_new_tab_loads_current_list() {
        let browser = Browser::new();
        let (a, _) = browser.open_tab(1, false).await;
        a.add("one").await;
        a.add("two").await;

        let (late, view) = browser.open_tab(9, false).await;
        assert_eq!(late.todos(), a.todos());
        assert_eq!(view.renders.get(), 1);
    }
}
