//! Kiosk driven by key events against the mock service, worker included.

mod common;

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use common::{borrowed_items_json, client_for, MockApi, MockResponse, ITEM_I001, VOLUNTEER_V123};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stockscan::config::Config;
use stockscan::model::TransactionStatus;
use stockscan::ui::app::{App, View};
use stockscan::ui::events::AppEvent;
use stockscan::ui::input::handle_key;
use stockscan::ui::items::ItemForm;
use stockscan::ui::scan::{Surface, MSG_BORROW_OK, MSG_ITEM_FAILED};
use stockscan::ui::worker::spawn_api_worker;
use tokio::runtime::Runtime;

struct Kiosk {
    runtime: Runtime,
    api: MockApi,
    app: App,
    events: Receiver<AppEvent>,
}

impl Kiosk {
    fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let api = runtime.block_on(MockApi::start());
        let (tx, events) = mpsc::channel();
        let mut config = Config::default();
        config.api.base_url = api.base_url();
        let mut app = App::new(&config);
        let sender = spawn_api_worker(runtime.handle(), client_for(&api.base_url()), tx);
        app.set_api_sender(sender);
        Self {
            runtime,
            api,
            app,
            events,
        }
    }

    fn on(&self, method: &str, path: &str, resp: MockResponse) {
        self.runtime.block_on(self.api.on(method, path, resp));
    }

    fn key(&mut self, code: KeyCode) {
        handle_key(&mut self.app, KeyEvent::new(code, KeyModifiers::empty()));
        self.settle();
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            handle_key(&mut self.app, KeyEvent::new(KeyCode::Char(ch), KeyModifiers::empty()));
        }
        self.settle();
    }

    fn busy(&self) -> bool {
        self.app.scan().is_busy() || self.app.items().is_busy() || self.app.dashboard().is_loading()
    }

    /// Deliver API outcomes until no view has a request in flight.
    fn settle(&mut self) {
        while self.busy() {
            match self.events.recv_timeout(Duration::from_secs(5)) {
                Ok(AppEvent::Api(outcome)) => self.app.on_api(outcome),
                Ok(_) => {}
                Err(err) => panic!("no API outcome: {err}"),
            }
        }
    }

    fn requests_to(&self, method: &str, path: &str) -> Vec<common::CapturedRequest> {
        self.runtime.block_on(self.api.requests_to(method, path))
    }
}

fn scan_card(kiosk: &mut Kiosk) {
    kiosk.on(
        "GET",
        "/scan/volunteer/V123",
        MockResponse::json(VOLUNTEER_V123),
    );
    kiosk.type_text(r#"{"id":"V123","name":"Dara"}"#);
    kiosk.key(KeyCode::Enter);
}

#[test]
fn card_then_borrow() {
    let mut kiosk = Kiosk::start();
    scan_card(&mut kiosk);
    assert_eq!(
        kiosk.app.scan().volunteer.as_ref().map(|v| v.name.as_str()),
        Some("Dara")
    );

    kiosk.on("GET", "/scan/item/I001", MockResponse::json(ITEM_I001));
    kiosk.on("POST", "/volunteer/V123/borrow", MockResponse::ok());

    kiosk.key(KeyCode::Char('b'));
    kiosk.type_text("I001");
    kiosk.key(KeyCode::Enter);
    assert!(matches!(
        kiosk.app.scan().surface,
        Surface::Borrow { item: Some(_), .. }
    ));

    kiosk.type_text("3");
    kiosk.key(KeyCode::Enter);

    let borrows = kiosk.requests_to("POST", "/volunteer/V123/borrow");
    assert_eq!(borrows.len(), 1);
    assert_eq!(
        borrows[0].json(),
        serde_json::json!({"item_code": "I001", "qty": 3})
    );
    assert_eq!(kiosk.app.scan().surface, Surface::Closed);
    assert_eq!(
        kiosk.app.scan().notice.as_ref().map(|n| n.message.as_str()),
        Some(MSG_BORROW_OK)
    );
}

#[test]
fn unknown_item_keeps_popup_open() {
    let mut kiosk = Kiosk::start();
    scan_card(&mut kiosk);

    kiosk.key(KeyCode::Char('b'));
    kiosk.type_text("NOPE");
    kiosk.key(KeyCode::Enter);

    assert_eq!(kiosk.app.scan().error.as_deref(), Some(MSG_ITEM_FAILED));
    assert!(matches!(
        kiosk.app.scan().surface,
        Surface::Borrow { item: None, .. }
    ));
}

#[test]
fn lost_item_disappears_after_refetch() {
    let mut kiosk = Kiosk::start();
    scan_card(&mut kiosk);

    kiosk.on(
        "GET",
        "/volunteer/V123/borrowed-items",
        MockResponse::json(&borrowed_items_json(&[("T77", "borrowed", 4)])),
    );
    kiosk.on(
        "GET",
        "/volunteer/V123/borrowed-items",
        MockResponse::json(&borrowed_items_json(&[("T77", "lost", 4)])),
    );
    kiosk.on("POST", "/volunteer/V123/return", MockResponse::ok());

    kiosk.key(KeyCode::Char('r'));
    assert_eq!(kiosk.app.scan().borrowed_items.len(), 1);

    kiosk.key(KeyCode::Char('l'));
    kiosk.key(KeyCode::Enter);

    let returns = kiosk.requests_to("POST", "/volunteer/V123/return");
    assert_eq!(
        returns[0].json(),
        serde_json::json!({
            "items": [{"transaction_id": "T77", "status": "lost", "qty_returned": 4}]
        })
    );
    assert_eq!(
        kiosk.requests_to("GET", "/volunteer/V123/borrowed-items").len(),
        2
    );
    assert!(kiosk
        .app
        .scan()
        .borrowed_items
        .iter()
        .all(|item| item.status != TransactionStatus::Borrowed));
}

#[test]
fn items_view_adds_item_and_reloads() {
    let mut kiosk = Kiosk::start();
    kiosk.on("GET", "/items", MockResponse::json(&format!("[{}]", ITEM_I001)));
    kiosk.on("POST", "/items", MockResponse::ok());

    kiosk.key(KeyCode::F(2));
    assert_eq!(kiosk.app.view(), View::Items);
    assert_eq!(kiosk.app.items().items.len(), 1);

    kiosk.key(KeyCode::Char('a'));
    kiosk.type_text("Cable ties");
    kiosk.key(KeyCode::Tab);
    kiosk.type_text("40");
    kiosk.key(KeyCode::Tab);
    kiosk.type_text("pcs");
    kiosk.key(KeyCode::Tab);
    kiosk.key(KeyCode::Right);
    assert!(matches!(kiosk.app.items().form, Some(ItemForm::Add(_))));
    kiosk.key(KeyCode::Enter);

    let added = kiosk.requests_to("POST", "/items");
    assert_eq!(
        added[0].json(),
        serde_json::json!({
            "category_id": "C1",
            "item_name": "Cable ties",
            "qty": 40,
            "unit": "pcs"
        })
    );
    assert!(kiosk.app.items().form.is_none());
    assert_eq!(kiosk.requests_to("GET", "/items").len(), 2);
}

#[test]
fn dashboard_shows_status_code_on_failure() {
    let mut kiosk = Kiosk::start();
    kiosk.on(
        "GET",
        "/borrowed-items",
        MockResponse::error(500, "database down"),
    );

    kiosk.key(KeyCode::F(3));
    assert_eq!(kiosk.app.dashboard().error.as_deref(), Some("Error: 500"));
}
