//! Contact list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, Paragraph},
};
use rolo_sync::ContactRepository;

use crate::app::{App, Screen};

/// Render the contact list into `area`.
pub fn draw<R: ContactRepository>(f: &mut Frame, area: Rect, app: &mut App<R>) {
  let state = app.contacts.state();

  // Dimmed while the detail pane has focus.
  let border = if app.screen == Screen::ContactDetail {
    Color::Black
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(format!(" Contacts ({}) ", state.items.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let inner = block.inner(area);
  f.render_widget(block, area);
  app.list_height = usize::from(inner.height);

  if state.items.is_empty() {
    let (text, color) = if state.is_loading {
      ("Loading contacts…", Color::DarkGray)
    } else if state.network_failed {
      ("Could not reach the server. Press r to retry.", Color::Red)
    } else {
      ("No contacts.", Color::DarkGray)
    };
    f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), inner);
    return;
  }

  let items: Vec<ListItem> = state
    .items
    .iter()
    .map(|contact| {
      ListItem::new(Line::from(vec![
        Span::raw(format!("{} ", contact.country_flag())),
        Span::raw(contact.name()),
        Span::styled(
          format!("  {}", contact.phone),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut app.list_state,
  );
}
