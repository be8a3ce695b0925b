//! Ratatui-based terminal UI.
//!
//! Layout: a header with the dataset and metric, the Plotters chart with a
//! date cursor, and a side column holding the legend, the hover readout and
//! the country selector. Keys:
//!
//! - `←/→` move the cursor one day; hovering the mouse over the chart moves
//!   it to the date under the pointer
//! - `↑/↓` move within the focused list, `Tab` switches selector/legend
//! - `a` or Enter adds the highlighted country
//! - `x` or Delete removes the highlighted legend entry
//! - `/` starts typing a selector filter (Enter keeps it, Esc clears it)
//! - `m` toggles cases/deaths, `e` writes a snapshot, `q` quits

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info};

use crate::app::pipeline;
use crate::chart::scale::{LogScale, TimeScale, format_count, format_day};
use crate::chart::{ChartState, palette};
use crate::data::catalog::Catalog;
use crate::domain::ChartConfig;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{ChartLine, EpiPlottersChart};

/// Where `e` writes the chart snapshot.
const SNAPSHOT_FILE: &str = "epicurve-snapshot.json";

/// Start the TUI.
pub fn run(config: ChartConfig) -> Result<(), AppError> {
    // Load before touching the terminal so errors print normally.
    let run = pipeline::load_dataset(&config)?;
    let state = pipeline::initial_state(&run.catalog, &config);
    let mut app = App::new(run.catalog, state);

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Selector,
    Legend,
}

struct App {
    catalog: Catalog,
    state: ChartState,
    cursor: NaiveDate,
    filter: String,
    editing_filter: bool,
    focus: Focus,
    selector_index: usize,
    legend_index: usize,
    snapshot_path: PathBuf,
    status: String,
    /// Plotting area from the last draw, for mouse hover.
    chart_area: Option<Rect>,
}

impl App {
    fn new(catalog: Catalog, state: ChartState) -> Self {
        let cursor = state.window.end;
        Self {
            catalog,
            state,
            cursor,
            filter: String::new(),
            editing_filter: false,
            focus: Focus::Selector,
            selector_index: 0,
            legend_index: 0,
            snapshot_path: PathBuf::from(SNAPSHOT_FILE),
            status: "Ready.".to_string(),
            chart_area: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => needs_redraw = self.handle_mouse(mouse),
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        info!("tui closed");
        Ok(())
    }

    /// Apply one key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_filter {
            self.handle_filter_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Selector => Focus::Legend,
                    Focus::Legend => Focus::Selector,
                };
            }
            KeyCode::Char('a') | KeyCode::Enter => self.add_highlighted(),
            KeyCode::Char('x') | KeyCode::Delete => self.remove_highlighted(),
            KeyCode::Char('m') => {
                self.state.set_metric(self.state.metric.toggle());
                self.status = format!("metric: {}", self.state.metric.display_name());
            }
            KeyCode::Char('e') => self.export_snapshot(),
            KeyCode::Char('/') => {
                self.editing_filter = true;
                self.focus = Focus::Selector;
                self.status = "Filter: type a name, Enter to keep, Esc to clear.".to_string();
            }
            _ => {}
        }
        false
    }

    /// Move the cursor to the date under the pointer. Returns `true` if it moved.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return false;
        }
        let Some(area) = self.chart_area else {
            return false;
        };
        let inside = (area.x..area.x + area.width).contains(&mouse.column)
            && (area.y..area.y + area.height).contains(&mouse.row);
        if !inside || area.width < 2 {
            return false;
        }

        let scale = TimeScale::new(self.state.window, (0.0, f64::from(area.width - 1)));
        let date = self.state.window.clamp(scale.invert(f64::from(mouse.column - area.x)));
        if date == self.cursor {
            return false;
        }
        self.cursor = date;
        true
    }

    fn handle_filter_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.filter.clear();
                self.editing_filter = false;
                self.status = "Filter cleared.".to_string();
            }
            KeyCode::Enter => {
                self.editing_filter = false;
                self.status = format!("{} match(es).", self.visible_countries().len());
            }
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Char(c) => self.filter.push(c),
            _ => {}
        }
        self.selector_index = 0;
    }

    fn move_cursor(&mut self, days: i64) {
        let next = self.cursor + chrono::Duration::days(days);
        self.cursor = self.state.window.clamp(next);
    }

    fn move_selection(&mut self, delta: isize) {
        let visible = self.visible_countries().len();
        let (index, len) = match self.focus {
            Focus::Selector => (&mut self.selector_index, visible),
            Focus::Legend => (&mut self.legend_index, self.state.selected().len()),
        };
        if len == 0 {
            *index = 0;
            return;
        }
        *index = index.saturating_add_signed(delta).min(len - 1);
    }

    /// Country ids shown in the selector, in catalog order.
    fn visible_countries(&self) -> Vec<usize> {
        self.catalog.filter(&self.filter).map(|c| c.id).collect()
    }

    fn add_highlighted(&mut self) {
        let Some(&id) = self.visible_countries().get(self.selector_index) else {
            self.status = "No country highlighted.".to_string();
            return;
        };
        let Some(country) = self.catalog.by_id(id) else {
            return;
        };
        self.status = if self.state.add(country) {
            format!("Added {}.", country.name)
        } else {
            format!("{} is already on the chart.", country.name)
        };
    }

    fn remove_highlighted(&mut self) {
        match self.state.remove_at(self.legend_index) {
            Some(removed) => {
                debug!(country = %removed.name, "removed from legend");
                self.status = format!("Removed {}.", removed.name);
                self.legend_index = self
                    .legend_index
                    .min(self.state.selected().len().saturating_sub(1));
            }
            None => self.status = "Legend is empty.".to_string(),
        }
    }

    fn export_snapshot(&mut self) {
        let snapshot = crate::io::snapshot::ChartSnapshot::capture(&self.catalog, &self.state);
        self.status = match crate::io::snapshot::write_snapshot_json(&self.snapshot_path, &snapshot) {
            Ok(()) => format!("Wrote {}", self.snapshot_path.display()),
            Err(err) => format!("Snapshot failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.chart_area = Some(self.draw_body(frame, chunks[1]));
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("epicurve", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " | daily {} | {} .. {} | {} countries",
                self.state.metric.display_name(),
                self.state.window.start,
                self.state.window.end,
                self.catalog.len(),
            )),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    /// Returns the chart's plotting area.
    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) -> Rect {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);

        let chart_area = self.draw_chart(frame, columns[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.state.selected().len().max(1) as u16 + 2),
                Constraint::Length(self.state.selected().len().max(1) as u16 + 3),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        self.draw_legend(frame, side[0]);
        self.draw_readout(frame, side[1]);
        self.draw_selector(frame, side[2]);
        chart_area
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) -> Rect {
        let block = Block::default().title("Daily counts (log)").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (lines, x_bounds, y_bounds) = chart_lines(&self.catalog, &self.state);
        let (chart_rect, insets) = chart_layout(inner);
        let widget = EpiPlottersChart {
            lines: &lines,
            x_bounds,
            y_bounds,
            cursor_x: Some(day_x(self.cursor)),
            x_label: "date",
            y_label: self.state.metric.display_name().to_string(),
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_count,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &self.state, y_bounds);
        }
        chart_rect
    }

    fn draw_legend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = if self.state.selected().is_empty() {
            vec![ListItem::new("(nothing selected)")]
        } else {
            self.state
                .legend()
                .map(|(name, color_index)| {
                    ListItem::new(Line::from(vec![
                        Span::styled("■ ", Style::default().fg(ratatui_color(color_index))),
                        Span::raw(name.to_string()),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(focus_block("Legend", self.focus == Focus::Legend))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if self.focus == Focus::Legend && !self.state.selected().is_empty() {
            state.select(Some(self.legend_index));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_readout(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let readout = self.state.hover(&self.catalog, self.cursor);
        let mut lines = vec![Line::from(Span::styled(
            self.cursor.format("%d %b %Y").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if readout.readings.is_empty() {
            lines.push(Line::from(Span::styled("no data", Style::default().fg(Color::Gray))));
        }
        for r in &readout.readings {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<20}", r.name), Style::default().fg(ratatui_color(r.color_index))),
                Span::raw(format!("{:>10}", format_count(r.point.value))),
            ]));
        }
        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("Cursor").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_selector(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .visible_countries()
            .into_iter()
            .filter_map(|id| self.catalog.by_id(id))
            .map(|c| {
                let style = if self.state.is_selected(c.id) {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(c.name.replace('_', " "), style))
            })
            .collect();

        let title = if self.editing_filter || !self.filter.is_empty() {
            format!("Countries /{}", self.filter)
        } else {
            "Countries".to_string()
        };
        let list = List::new(items)
            .block(focus_block(&title, self.focus == Focus::Selector))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if self.focus == Focus::Selector {
            state.select(Some(self.selector_index));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ or mouse day  ↑/↓ move  Tab focus  a add  x remove  / filter  m metric  e snapshot  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(style)
}

fn ratatui_color(color_index: usize) -> Color {
    let (r, g, b) = palette::rgb(color_index);
    Color::Rgb(r, g, b)
}

fn day_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Chart lines for the selected countries plus x/y bounds in chart coordinates.
fn chart_lines(catalog: &Catalog, state: &ChartState) -> (Vec<ChartLine>, [f64; 2], [f64; 2]) {
    let series = crate::plot::series_from_state(catalog, state);
    let (lo, hi) = crate::plot::y_domain_for(&series);

    let lines = series
        .iter()
        .map(|s| {
            let (r, g, b) = palette::rgb(s.color_index);
            ChartLine {
                segments: s
                    .segments
                    .iter()
                    .map(|seg| {
                        seg.points
                            .iter()
                            .filter(|p| state.window.contains(p.date) && p.value > 0.0)
                            .map(|p| (day_x(p.date), p.value.log10()))
                            .collect()
                    })
                    .collect(),
                color: RGBColor(r, g, b),
            }
        })
        .collect();

    let mut x_bounds = [day_x(state.window.start), day_x(state.window.end)];
    if x_bounds[1] <= x_bounds[0] {
        x_bounds[1] = x_bounds[0] + 1.0;
    }
    (lines, x_bounds, [lo.log10(), hi.log10()])
}

fn fmt_axis_date(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(format_day)
        .unwrap_or_default()
}

fn fmt_axis_count(v: f64) -> String {
    format_count(10f64.powf(v))
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Date ticks along the bottom and log ticks on the left, drawn as text cells.
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    state: &ChartState,
    y_bounds: [f64; 2],
) {
    let style = Style::default().fg(Color::Gray);

    let x_scale = TimeScale::new(state.window, (0.0, (chart.width - 1) as f64));
    let y = chart.y + chart.height;
    if y < inner.y + inner.height {
        for date in x_scale.ticks(5) {
            let label = format_day(date);
            let x = chart.x + x_scale.map(date).round() as u16;
            let start = x.saturating_sub((label.len() / 2) as u16);
            frame.render_widget(
                Paragraph::new(label.clone()).style(style),
                Rect {
                    x: start,
                    y,
                    width: label.len() as u16,
                    height: 1,
                },
            );
        }
    }

    let y_scale = LogScale::new(
        (10f64.powf(y_bounds[0]), 10f64.powf(y_bounds[1])),
        ((chart.height - 1) as f64, 0.0),
    );
    let mut last_row = None;
    for tick in y_scale.ticks() {
        let Some(row) = y_scale.map(tick) else {
            continue;
        };
        let row = chart.y + row.round() as u16;
        // Several ticks can land on one terminal row.
        if last_row == Some(row) {
            continue;
        }
        last_row = Some(row);
        let label = format_count(tick);
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label.clone()).style(style),
            Rect {
                x: start,
                y: row,
                width: label.len() as u16,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("date").alignment(Alignment::Center).style(style);
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::CatalogOptions;
    use crate::domain::{ChartWindow, Metric, Record};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn app() -> App {
        let records: Vec<Record> = (1..=5)
            .flat_map(|d| {
                ["Italy", "Spain", "San_Marino"].map(|name| {
                    Record::new(day(d), name)
                        .with_field("cases", 10.0 * d as f64 + 5.0)
                        .with_field("deaths", d as f64)
                })
            })
            .collect();
        let window = ChartWindow::new(day(1), day(10));
        let options = CatalogOptions {
            window,
            cases_threshold: 10.0,
            deaths_threshold: 1.0,
        };
        let catalog = Catalog::build(&records, &options).unwrap();
        let state = ChartState::new(Metric::Cases, window, chrono::Duration::hours(12));
        App::new(catalog, state)
    }

    #[test]
    fn cursor_moves_by_day_and_stays_in_window() {
        let mut app = app();
        assert_eq!(app.cursor, day(10));
        app.handle_key(KeyCode::Right);
        assert_eq!(app.cursor, day(10));
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.cursor, day(8));
    }

    #[test]
    fn filter_then_add_then_remove() {
        let mut app = app();
        for key in [KeyCode::Char('/'), KeyCode::Char('s'), KeyCode::Char('p'), KeyCode::Enter] {
            assert!(!app.handle_key(key));
        }
        assert_eq!(app.visible_countries().len(), 1);

        app.handle_key(KeyCode::Char('a'));
        let names: Vec<&str> = app.state.legend().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Spain"]);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.state.selected().len(), 1);
        assert!(app.status.contains("already"));

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Char('x'));
        assert!(app.state.selected().is_empty());
        assert_eq!(app.legend_index, 0);
    }

    #[test]
    fn readout_follows_cursor_and_metric() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        for _ in 0..7 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.cursor, day(3));
        let cases = app.state.hover(&app.catalog, app.cursor);
        assert_eq!(cases.readings[0].point.value, 35.0);

        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.state.metric, Metric::Deaths);
        let deaths = app.state.hover(&app.catalog, app.cursor);
        assert_eq!(deaths.readings[0].point.value, 3.0);
    }

    #[test]
    fn snapshot_key_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.snapshot_path = dir.path().join("snap.json");
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status.starts_with("Wrote"));
        let snapshot = crate::io::snapshot::read_snapshot_json(&app.snapshot_path).unwrap();
        assert_eq!(snapshot.countries.len(), 1);
    }

    #[test]
    fn chart_lines_use_log_values_and_day_numbers() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        let (lines, x_bounds, y_bounds) = chart_lines(&app.catalog, &app.state);
        assert_eq!(lines.len(), 1);
        let first = lines[0].segments[0][0];
        assert_eq!(first.0, day_x(day(1)));
        assert!((first.1 - 15f64.log10()).abs() < 1e-12);
        assert_eq!(x_bounds, [day_x(day(1)), day_x(day(10))]);
        assert!((y_bounds[0] - 1.0).abs() < 1e-12);
        assert_eq!(fmt_axis_date(day_x(day(4))), "04 Mar");
        assert_eq!(fmt_axis_count(2.0), "100");
    }

    fn pointer(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }
    }

    #[test]
    fn mouse_over_chart_moves_the_cursor_to_that_day() {
        let mut app = app();
        // Ten columns for a nine-day span: one column per day.
        app.chart_area = Some(Rect::new(10, 2, 10, 5));

        assert!(app.handle_mouse(pointer(MouseEventKind::Moved, 13, 3)));
        assert_eq!(app.cursor, day(4));
        assert!(app.handle_mouse(pointer(MouseEventKind::Moved, 10, 6)));
        assert_eq!(app.cursor, day(1));

        // Outside the plot, or a click, leaves it alone.
        assert!(!app.handle_mouse(pointer(MouseEventKind::Moved, 25, 3)));
        assert!(!app.handle_mouse(pointer(MouseEventKind::Moved, 13, 8)));
        assert!(!app.handle_mouse(pointer(
            MouseEventKind::Down(crossterm::event::MouseButton::Left),
            19,
            3
        )));
        assert_eq!(app.cursor, day(1));
    }

    #[test]
    fn mouse_is_ignored_before_first_draw() {
        let mut app = app();
        assert!(!app.handle_mouse(pointer(MouseEventKind::Moved, 13, 3)));
        assert_eq!(app.cursor, day(10));
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
