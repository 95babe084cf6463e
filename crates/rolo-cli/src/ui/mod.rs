//! TUI rendering — orchestrates all panes.

pub mod contact_detail;
pub mod contact_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use rolo_sync::ContactRepository;

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
///
/// Takes the app mutably because the list keeps its scroll offset in
/// [`App::list_state`].
pub fn draw<R: ContactRepository>(f: &mut Frame, app: &mut App<R>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<R: ContactRepository>(f: &mut Frame, area: Rect, app: &App<R>) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let state = app.contacts.state();

  let left = Span::styled(
    format!(" rolo  {} cached", state.items.len()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<R: ContactRepository>(f: &mut Frame, area: Rect, app: &mut App<R>) {
  // Split into left list pane (40%) and right detail pane (60%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  contact_list::draw(f, cols[0], app);

  match &app.detail {
    Some(detail) => contact_detail::draw(f, cols[1], detail.state()),
    None => draw_empty_detail(f, cols[1]),
  }
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "Select a contact and press Enter.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<R: ContactRepository>(f: &mut Frame, area: Rect, app: &App<R>) {
  let list = app.contacts.state();
  let (mode_label, hints) = match app.screen {
    Screen::ContactList => ("LIST", "↑↓/jk navigate  Enter detail  r load more  q quit"),
    Screen::ContactDetail => ("DETAIL", "Esc back  [ prev  ] next  q quit"),
  };

  let (status, status_color) = if let Some(message) = app.message() {
    (message.to_string(), Color::Yellow)
  } else if list.is_loading {
    ("Loading contacts…".to_string(), Color::Cyan)
  } else if list.network_failed {
    ("Offline, showing cached contacts. Press r to retry.".to_string(), Color::Red)
  } else {
    (hints.to_string(), Color::DarkGray)
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let status_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(status_color),
  );

  let line = Line::from(vec![mode_span, status_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
