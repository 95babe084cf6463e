//! Contact detail pane — right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rolo_core::Contact;
use rolo_sync::state::ContactDetailUiState;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, state: &ContactDetailUiState) {
  let title = state
    .contact
    .as_ref()
    .map_or_else(|| "(unknown)".to_string(), Contact::name_with_title);

  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(contact) = &state.contact else {
    let text = if state.is_loading { "Loading…" } else { "Contact not found." };
    let hint = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, inner);
    return;
  };

  let para = Paragraph::new(contact_lines(contact)).wrap(Wrap { trim: false });
  f.render_widget(para, inner);
}

// ─── Field formatting helpers ─────────────────────────────────────────────────

fn contact_lines(contact: &Contact) -> Vec<Line<'static>> {
  let fields = [
    ("email", contact.email.clone()),
    ("phone", contact.phone.clone()),
    ("cell", contact.cell.clone()),
    ("address", contact.address()),
    ("nationality", format!("{} {}", contact.country_flag(), contact.nat)),
    ("gender", contact.gender.clone()),
  ];

  let mut lines: Vec<Line> = fields
    .into_iter()
    .map(|(label, value)| field_line(label, value))
    .collect();

  if !contact.picture_url.is_empty() {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
      contact.picture_url.clone(),
      Style::default().fg(Color::DarkGray),
    )]));
  }
  lines
}

fn field_line(label: &'static str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}
