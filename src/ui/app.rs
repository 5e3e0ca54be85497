use std::collections::HashMap;
use std::path::Path;

use crate::api::{ApiError, ApiRequest};
use crate::config::Config;
use crate::decoder::{first_payload, CodeDecoder, ScanInput, WedgeAndImageDecoder};
use crate::ui::dashboard::{DashboardIntent, DashboardReducer, DashboardState};
use crate::ui::events::ApiOutcome;
use crate::ui::items::{ItemsIntent, ItemsReducer, ItemsState};
use crate::ui::mvi::Reducer;
use crate::ui::request::{is_current, InFlight, Origin, RequestToken};
use crate::ui::scan::{ScanIntent, ScanReducer, ScanState};
use crate::ui::worker::{ApiCommand, ApiCommandSender};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum View {
    #[default]
    Scan,
    Items,
    Dashboard,
}

impl View {
    pub const ALL: [View; 3] = [View::Scan, View::Items, View::Dashboard];

    pub fn title(self) -> &'static str {
        match self {
            View::Scan => "Scan",
            View::Items => "Items",
            View::Dashboard => "Dashboard",
        }
    }
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    view: View,
    base_url: String,
    /// Scan workflow state (MVI pattern).
    scan: ScanState,
    /// Item management state (MVI pattern).
    items: ItemsState,
    /// Borrow records state (MVI pattern).
    dashboard: DashboardState,
    /// Characters typed by a wedge scanner since the last Enter.
    scan_line: String,
    decoder: Box<dyn CodeDecoder>,
    api_sender: Option<ApiCommandSender>,
    /// Last token handed to the worker, per view.
    sent: HashMap<Origin, RequestToken>,
    animation_tick: u8,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            view: View::Scan,
            base_url: config.api.base_url.clone(),
            scan: ScanState::with_notice_ticks(config.ui.notice_ticks),
            items: ItemsState::with_page_size(config.ui.page_size),
            dashboard: DashboardState::default(),
            scan_line: String::new(),
            decoder: Box::new(WedgeAndImageDecoder),
            api_sender: None,
            sent: HashMap::new(),
            animation_tick: 0,
        }
    }

    pub fn with_decoder(mut self, decoder: Box<dyn CodeDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn set_api_sender(&mut self, sender: ApiCommandSender) {
        self.api_sender = Some(sender);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn scan(&self) -> &ScanState {
        &self.scan
    }

    pub fn items(&self) -> &ItemsState {
        &self.items
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn scan_line(&self) -> &str {
        &self.scan_line
    }

    pub fn animation_tick(&self) -> u8 {
        self.animation_tick
    }

    pub fn switch_view(&mut self, view: View) {
        if self.view != view {
            tracing::info!(view = view.title(), "view switched");
        }
        self.view = view;
        match view {
            View::Scan => {}
            View::Items => self.dispatch_items(ItemsIntent::Shown),
            View::Dashboard => self.dispatch_dashboard(DashboardIntent::Shown),
        }
    }

    pub fn dispatch_scan(&mut self, intent: ScanIntent) {
        dispatch_mvi!(self, scan, ScanReducer, intent);
        if !self.scan.accepts_scan() {
            self.scan_line.clear();
        }
        self.flush_requests();
    }

    pub fn dispatch_items(&mut self, intent: ItemsIntent) {
        dispatch_mvi!(self, items, ItemsReducer, intent);
        self.flush_requests();
    }

    pub fn dispatch_dashboard(&mut self, intent: DashboardIntent) {
        dispatch_mvi!(self, dashboard, DashboardReducer, intent);
        self.flush_requests();
    }

    pub fn push_scan_char(&mut self, ch: char) {
        if self.scan.accepts_scan() && !ch.is_control() {
            self.scan_line.push(ch);
        }
    }

    pub fn pop_scan_char(&mut self) {
        self.scan_line.pop();
    }

    pub fn clear_scan_line(&mut self) {
        self.scan_line.clear();
    }

    /// Decode the wedge line typed so far.
    pub fn submit_scan_line(&mut self) {
        let line = std::mem::take(&mut self.scan_line);
        if line.trim().is_empty() {
            return;
        }
        self.decode(ScanInput::Text(line));
    }

    /// Pasted text: a dropped image file on the scan view, typed text elsewhere.
    pub fn on_paste(&mut self, text: &str) {
        match self.view {
            View::Scan => {
                if !self.scan.accepts_scan() {
                    return;
                }
                let candidate = text.trim().trim_matches(['\'', '"']);
                let path = Path::new(candidate);
                if !candidate.is_empty() && path.is_file() {
                    self.scan_line.clear();
                    self.decode(ScanInput::Image(path.to_path_buf()));
                    return;
                }
                text.chars().for_each(|ch| self.push_scan_char(ch));
                if text.contains(['\n', '\r']) {
                    self.submit_scan_line();
                }
            }
            View::Items => {
                let typed = text.chars().filter(|ch| !ch.is_control());
                if self.items.searching {
                    typed.for_each(|ch| self.dispatch_items(ItemsIntent::SearchInput(ch)));
                } else if self.items.form.is_some() {
                    typed.for_each(|ch| self.dispatch_items(ItemsIntent::FormInput(ch)));
                }
            }
            View::Dashboard => {
                if self.dashboard.editing.is_some() {
                    text.chars()
                        .filter(|ch| !ch.is_control())
                        .for_each(|ch| self.dispatch_dashboard(DashboardIntent::EditInput(ch)));
                }
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        self.dispatch_scan(ScanIntent::Tick);
    }

    /// Route a finished call back to the view that issued it.
    pub fn on_api(&mut self, outcome: ApiOutcome) {
        let ApiOutcome {
            token,
            request,
            result,
        } = outcome;

        let in_flight = match token.origin() {
            Origin::Scan => &self.scan.in_flight,
            Origin::Items => &self.items.in_flight,
            Origin::Dashboard => &self.dashboard.in_flight,
        };
        if !is_current(in_flight, token) {
            tracing::debug!(request = request.name(), seq = token.seq(), "stale response dropped");
            return;
        }
        if result.is_ok() {
            tracing::info!(request = request.name(), "request completed");
        }

        match token.origin() {
            Origin::Scan => {
                if let Some(intent) = ScanIntent::from_response(token, &request, result) {
                    self.dispatch_scan(intent);
                }
            }
            Origin::Items => {
                if let Some(intent) = ItemsIntent::from_response(token, &request, result) {
                    self.dispatch_items(intent);
                }
            }
            Origin::Dashboard => {
                if let Some(intent) = DashboardIntent::from_response(token, &request, result) {
                    self.dispatch_dashboard(intent);
                }
            }
        }
    }

    fn decode(&mut self, input: ScanInput) {
        match self.decoder.decode(&input) {
            Ok(payloads) => match first_payload(payloads) {
                Some(payload) => self.dispatch_scan(ScanIntent::Decoded { payload }),
                None => self.dispatch_scan(ScanIntent::DecodeFailed),
            },
            Err(err) => {
                tracing::warn!(error = %err, "scan input could not be decoded");
                self.dispatch_scan(ScanIntent::DecodeFailed);
            }
        }
    }

    /// Hand newly issued requests to the worker.
    fn flush_requests(&mut self) {
        let pending: Vec<InFlight> = [
            &self.scan.in_flight,
            &self.items.in_flight,
            &self.dashboard.in_flight,
        ]
        .into_iter()
        .flatten()
        .filter(|f| self.sent.get(&f.token.origin()) != Some(&f.token))
        .cloned()
        .collect();

        for in_flight in pending {
            self.send_request(in_flight);
        }
    }

    fn send_request(&mut self, in_flight: InFlight) {
        let InFlight { token, request } = in_flight;
        self.sent.insert(token.origin(), token);

        let Some(sender) = &self.api_sender else {
            self.reject(token, request, "no worker attached".to_string());
            return;
        };
        if let Err(err) = sender.try_send(ApiCommand { token, request }) {
            let reason = err.to_string();
            let ApiCommand { token, request } = err.into_inner();
            tracing::error!(request = request.name(), %reason, "api command send failed");
            self.reject(token, request, reason);
        }
    }

    fn reject(&mut self, token: RequestToken, request: ApiRequest, reason: String) {
        self.on_api(ApiOutcome {
            token,
            request,
            result: Err(ApiError::NotSent { reason }),
        });
    }
}
