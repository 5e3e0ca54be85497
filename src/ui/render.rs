use crate::ui::app::{App, View};
use crate::ui::dashboard::render_dashboard;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::items::render_items;
use crate::ui::layout::layout_regions;
use crate::ui::scan::render_scan;
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let busy = app.scan().is_busy() || app.items().is_busy() || app.dashboard().is_loading();
    let header_widget = Header::new();
    frame.render_widget(header_widget.widget(app.view(), busy, app.base_url()), header);

    match app.view() {
        View::Scan => render_scan(
            frame,
            body,
            app.scan(),
            app.scan_line(),
            app.animation_tick(),
        ),
        View::Items => render_items(frame, body, app.items()),
        View::Dashboard => render_dashboard(frame, body, app.dashboard(), app.animation_tick()),
    }

    let footer_widget = Footer::new();
    frame.render_widget(footer_widget.widget(footer, app.view()), footer);
}
