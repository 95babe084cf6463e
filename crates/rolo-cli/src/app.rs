//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use rolo_core::{Contact, ContactId};
use rolo_sync::{
  ContactRepository,
  state::{ContactDetailReducer, ContactsReducer, UserMessage},
};
use tracing::debug;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the contact list; the right pane shows a hint.
  ContactList,
  /// Focus on the contact detail pane.
  ContactDetail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<R> {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// List screen state; lives for the whole session.
  pub contacts: ContactsReducer<R>,

  /// Detail screen state, present while a contact is open.
  pub detail: Option<ContactDetailReducer>,

  /// Cursor and scroll offset of the list. Ratatui updates the offset while
  /// rendering.
  pub list_state: ListState,

  /// Rows the list pane showed on the last frame.
  pub list_height: usize,

  repository: Arc<R>,
}

impl<R: ContactRepository> App<R> {
  pub fn new(repository: Arc<R>) -> Self {
    Self {
      screen: Screen::ContactList,
      contacts: ContactsReducer::new(Arc::clone(&repository)),
      detail: None,
      list_state: ListState::default(),
      list_height: 0,
      repository,
    }
  }

  // ── Data ──────────────────────────────────────────────────────────────────

  /// Fold pending fetch results and cache changes into the screen states.
  pub fn sync(&mut self) -> rolo_sync::Result<bool> {
    let mut changed = self.contacts.sync()?;
    if let Some(detail) = &mut self.detail {
      changed |= detail.sync();
    }
    self.clamp_cursor();
    Ok(changed)
  }

  pub fn cursor(&self) -> Option<usize> { self.list_state.selected() }

  /// The contact under the list cursor, if any.
  pub fn cursor_contact(&self) -> Option<&Contact> {
    self.cursor().and_then(|i| self.contacts.state().items.get(i))
  }

  /// The message the status bar should show, if any.
  pub fn message(&self) -> Option<UserMessage> {
    match (&self.screen, &self.detail) {
      (Screen::ContactDetail, Some(detail)) => detail
        .state()
        .user_message
        .or(self.contacts.state().user_message),
      _ => self.contacts.state().user_message,
    }
  }

  /// Tell the list reducer which row is at the bottom of the viewport.
  pub fn report_visible_rows(&mut self) {
    let len = self.contacts.state().items.len();
    let visible_end = (self.list_state.offset() + self.list_height).min(len);
    if self.contacts.on_last_visible(visible_end.checked_sub(1)) {
      debug!(rows = len, "reached the end of the list, loading more");
    }
  }

  fn clamp_cursor(&mut self) {
    let len = self.contacts.state().items.len();
    let cursor = match self.list_state.selected() {
      _ if len == 0 => None,
      None => Some(0),
      Some(i) => Some(i.min(len - 1)),
    };
    self.list_state.select(cursor);
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Any key press acknowledges the message that was on screen.
    self.dismiss_message();

    match self.screen {
      Screen::ContactList => self.handle_list_key(key),
      Screen::ContactDetail => self.handle_detail_key(key),
    }
  }

  fn dismiss_message(&mut self) {
    if self.contacts.state().user_message.is_some() {
      self.contacts.message_shown();
    }
    if let Some(detail) = &mut self.detail
      && detail.state().user_message.is_some()
    {
      detail.message_shown();
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
      KeyCode::Home | KeyCode::Char('g') => self.list_state.select_first(),
      KeyCode::End | KeyCode::Char('G') => self.move_cursor(isize::MAX),

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_contact().map(|c| c.id) {
          self.open_detail(id);
        }
      }

      // Retry / fetch the next page by hand
      KeyCode::Char('r') => {
        self.contacts.load_more();
      }

      _ => {}
    }
    self.clamp_cursor();
    true
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Back to list
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.close_detail(),

      // Navigate list from detail (for quick switching)
      KeyCode::Char(']') | KeyCode::PageDown => self.step_detail(1),
      KeyCode::Char('[') | KeyCode::PageUp => self.step_detail(-1),

      _ => {}
    }
    true
  }

  fn move_cursor(&mut self, delta: isize) {
    let len = self.contacts.state().items.len();
    if len == 0 {
      return;
    }
    let current = self.cursor().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    self.list_state.select(Some(next));
  }

  fn step_detail(&mut self, delta: isize) {
    self.move_cursor(delta);
    if let Some(id) = self.cursor_contact().map(|c| c.id)
      && self.detail.as_ref().is_none_or(|d| d.id() != id)
    {
      self.open_detail(id);
    }
  }

  /// Transition to `ContactDetail` for `id`.
  fn open_detail(&mut self, id: ContactId) {
    let mut detail = ContactDetailReducer::new(&*self.repository, id);
    detail.sync();
    self.detail = Some(detail);
    self.screen = Screen::ContactDetail;
  }

  fn close_detail(&mut self) {
    self.detail = None;
    self.screen = Screen::ContactList;
  }
}
