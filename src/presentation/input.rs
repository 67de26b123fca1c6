use crate::application::{App, AppMode, FormField};
use crate::domain::RegistryResult;
use crate::infrastructure::Services;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> RegistryResult<()> {
        match app.mode {
            AppMode::SignedOut => return Self::handle_signed_out_mode(app, key, services),
            AppMode::Roster => Self::handle_roster_mode(app, key, modifiers),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers, services),
            AppMode::Filter => Self::handle_filter_mode(app, key),
            AppMode::Alert => Self::handle_alert_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
        Ok(())
    }

    fn handle_signed_out_mode(
        app: &mut App,
        key: KeyCode,
        services: &Services,
    ) -> RegistryResult<()> {
        if key == KeyCode::Enter {
            // Hydrate once per mount; a malformed roster file propagates.
            let roster = services.store.load()?;
            app.complete_sign_in(services.identity.sign_in(), roster);
        }
        Ok(())
    }

    fn handle_roster_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('u') = key {
                app.sign_out();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Char('a') => {
                app.start_form();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                app.select_previous_column();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                app.select_next_column();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous_row();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next_row();
            }
            KeyCode::Char('s') => {
                app.toggle_sort();
            }
            KeyCode::Char('/') => {
                app.start_filter();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_form_mode(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) {
        if key != KeyCode::Enter {
            app.status_message = None;
        }
        match key {
            KeyCode::Enter => {
                app.submit_form(services.gateway, services.store);
            }
            KeyCode::Esc => {
                app.cancel_form();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous_field();
            }
            KeyCode::Left => {
                if app.form.focus == FormField::Role {
                    app.cycle_role(false);
                } else if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.form.focus == FormField::Role {
                    app.cycle_role(true);
                } else if app.cursor_position
                    < app.form.field_text(app.form.focus).chars().count()
                {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.form.field_text(app.form.focus).chars().count();
            }
            KeyCode::Backspace => {
                app.form_backspace();
            }
            KeyCode::Delete => {
                app.form_delete();
            }
            KeyCode::Char(c) => {
                if !modifiers.contains(KeyModifiers::CONTROL) {
                    app.form_insert(c);
                }
            }
            _ => {}
        }
    }

    fn handle_filter_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.finish_filter();
            }
            KeyCode::Esc => {
                app.cancel_filter();
            }
            KeyCode::Backspace => {
                app.filter_backspace();
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filters[app.selected_column].chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filters[app.selected_column].chars().count();
            }
            KeyCode::Char(c) => {
                app.filter_insert(c);
            }
            _ => {}
        }
    }

    fn handle_alert_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_alert();
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Roster;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
