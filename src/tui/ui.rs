use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Tabs};

use crate::core::state::App;
use crate::core::tabs::{SlideDirection, TAB_ANIMATION_MS, Tab};
use crate::core::transition::TransitionDecision;
use crate::graphs::SampleGraph;
use crate::tui::TuiState;

const KEY_HINTS: &str =
    "←/→ tabs · 1-9 tab · ↑/↓ move · Enter open · c calendar · t finish · Esc back · ^C quit";

pub fn draw_ui<G: SampleGraph>(frame: &mut Frame, app: &App<G>, tui: &TuiState) {
    if !app.splash.is_completed() {
        let area = frame.area();
        draw_splash::<G>(frame, area);
        return;
    }

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1), Length(1)]);
    let [title_area, tabs_area, main_area, crumb_area, hint_area] = layout.areas(frame.area());

    // Title bar
    let title_text = if app.status_message.is_empty() {
        format!("{:?}", G::APP)
    } else {
        format!("{:?} | {}", G::APP, app.status_message)
    };
    frame.render_widget(
        Span::styled(title_text, Style::default().add_modifier(Modifier::BOLD)),
        title_area,
    );

    let current = app.nav.current_entry();
    if app.nav.is_on_tab_host() {
        draw_tabs::<G>(frame, tabs_area, app, tui);
        match app.nav.selected_tab() {
            Some(tab) if tab.shows_map() => draw_map(frame, main_area, tui),
            _ => draw_catalog(frame, main_area, app, tui),
        }
    } else if G::CALENDAR_ROUTE == Some(current.route()) {
        frame.render_widget(Span::raw(G::screen_title(current)), tabs_area);
        draw_calendar(frame, main_area, app, tui);
    } else {
        frame.render_widget(Span::raw(G::screen_title(current)), tabs_area);
        draw_detail::<G>(frame, main_area, app);
    }

    frame.render_widget(
        Span::styled(breadcrumb(app), Style::default().fg(Color::DarkGray)),
        crumb_area,
    );
    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().add_modifier(Modifier::DIM)),
        hint_area,
    );
}

fn draw_splash<G: SampleGraph>(frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);
    let splash = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{:?}", G::APP),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from("Loading..."),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(splash, middle);
}

fn draw_tabs<G: SampleGraph>(frame: &mut Frame, area: Rect, app: &App<G>, tui: &TuiState) {
    let titles: Vec<Line> = G::Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected = app.nav.selected_tab().map(<G::Tab as Tab>::ordinal).unwrap_or(0);
    let arrow = match tui.slide.get() {
        Some(SlideDirection::Left) => "◀",
        Some(SlideDirection::Right) => "▶",
        None => "",
    };
    let [tabs_area, slide_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);
    if !arrow.is_empty() {
        frame.render_widget(
            Span::styled(
                format!("{arrow} {TAB_ANIMATION_MS}ms"),
                Style::default().add_modifier(Modifier::DIM),
            ),
            slide_area,
        );
    }
}

fn draw_catalog<G: SampleGraph>(frame: &mut Frame, area: Rect, app: &App<G>, tui: &TuiState) {
    let items = app.visible_catalog();
    let block = Block::bordered();
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing here yet")
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }
    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let style = if index == tui.cursor {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(item.name, style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", item.subtitle), style.add_modifier(Modifier::DIM)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(rows).block(block), area);
}

fn draw_map(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let lines = match tui.camera {
        Some(target) => vec![
            Line::from(format!("⌖ {}", target.marker_title())),
            Line::from(format!("{}", target.coordinate)),
            Line::from(format!("zoom {:.1}", target.zoom)),
        ],
        None => vec![Line::from("Locating...")],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::bordered().title("Map"))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_calendar<G: SampleGraph>(frame: &mut Frame, area: Rect, app: &App<G>, tui: &TuiState) {
    let (people, dates) = app
        .home_search()
        .map(|s| (s.people, s.dates.label()))
        .unwrap_or((1, "Select Dates".to_string()));
    let lines = vec![
        Line::from(format!("People: {people}")),
        Line::from(format!("Dates: {dates}")),
        Line::from(""),
        Line::from(Span::styled(
            format!("▸ {}", tui.calendar_day.format("%a %b %-d %Y")),
            Style::default().fg(Color::Yellow),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Calendar")),
        area,
    );
}

fn draw_detail<G: SampleGraph>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let entry = app.nav.current_entry();
    let transition = match app.nav.transition_for(entry) {
        TransitionDecision::Correlated(token) => {
            format!("shared element {}", token.element_key(entry.route()))
        }
        TransitionDecision::Plain => "plain".to_string(),
    };
    let lines = vec![
        Line::from(Span::styled(
            G::screen_title(entry),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("path: {}", entry.path())),
        Line::from(format!("transition: {transition}")),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(entry.id().to_string())),
        area,
    );
}

fn breadcrumb<G: SampleGraph>(app: &App<G>) -> String {
    app.nav
        .entries()
        .map(|e| e.path())
        .collect::<Vec<_>>()
        .join(" › ")
}
