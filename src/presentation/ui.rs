use crate::application::{App, AppMode, Alert, FormField, RosterColumn};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    if app.session.is_some() {
        let panels = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(13), Constraint::Min(0)])
            .split(chunks[1]);
        render_form(f, app, panels[0]);
        render_roster(f, app, panels[1]);
    } else {
        render_sign_in(f, chunks[1]);
    }

    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
    if let Some(ref alert) = app.alert {
        render_alert_popup(f, alert);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.session {
        Some(ref session) => format!(
            "staffdesk - Employee Registry | {} | {} employee(s)",
            session.user,
            app.roster.len()
        ),
        None => "staffdesk - Employee Registry | signed out".to_string(),
    };
    let header = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_sign_in(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from("You are signed out."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to sign in.",
            Style::default().fg(Color::Green),
        )),
        Line::from("Press q to quit."),
    ];
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Sign In"));
    f.render_widget(panel, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = matches!(app.mode, AppMode::Form) && app.form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let value = match field {
            FormField::Role => format!("< {} >", app.form.role),
            _ => app.form.field_text(field).to_string(),
        };
        let value_style = if focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<17}", field.label()), Style::default().fg(Color::Yellow)),
            Span::styled(value, value_style),
        ]));

        if let Some(message) = app.field_errors.get(field.key()) {
            lines.push(Line::from(Span::styled(
                format!("    {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Add New Employee"));
    f.render_widget(form, area);
}

fn render_roster(f: &mut Frame, app: &App, area: Rect) {
    let column_has_focus = matches!(app.mode, AppMode::Roster | AppMode::Filter);

    let mut headers = Vec::new();
    for (index, column) in RosterColumn::ALL.iter().enumerate() {
        let mut title = column.title().to_string();
        match app.sort {
            Some((active, false)) if active == *column => title.push_str(" v"),
            Some((active, true)) if active == *column => title.push_str(" ^"),
            _ => {}
        }
        if !app.filters[index].is_empty() {
            title.push_str(&format!(" [{}]", app.filters[index]));
        }
        let style = if column_has_focus && index == app.selected_column {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        headers.push(Cell::from(title).style(style));
    }

    let mut rows = vec![Row::new(headers).height(1)];

    for (position, index) in app.visible_rows().into_iter().enumerate() {
        let employee = &app.roster[index];
        let style = if matches!(app.mode, AppMode::Roster) && position == app.selected_row {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        let cells: Vec<Cell> = RosterColumn::ALL
            .iter()
            .map(|column| Cell::from(column.text(employee).to_string()).style(style))
            .collect();
        rows.push(Row::new(cells).height(1));
    }

    let widths = [
        Constraint::Length(20),
        Constraint::Length(28),
        Constraint::Length(16),
        Constraint::Length(11),
        Constraint::Min(12),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Employees"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::SignedOut => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Enter: sign in | q: quit".to_string()
            }
        }
        AppMode::Roster => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "a: add employee | arrows: select | s: sort | /: filter | Ctrl+U: sign out | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Form => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.form.focus {
                    FormField::Role => {
                        "Choosing Role: use Left/Right (Enter to submit, Tab next field, Esc to roster)"
                            .to_string()
                    }
                    field => format!(
                        "Editing {}: {} (Enter to submit, Tab next field, Esc to roster)",
                        field.label(),
                        app.form.field_text(field)
                    ),
                }
            }
        }
        AppMode::Filter => {
            let column = RosterColumn::ALL[app.selected_column];
            format!(
                "Filter {}: {} (Enter to apply, Esc to clear)",
                column.title(),
                app.filters[app.selected_column]
            )
        }
        AppMode::Alert => "Enter/Esc: dismiss".to_string(),
        AppMode::Help => "Up/Down/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::SignedOut => Style::default().fg(Color::Yellow),
            AppMode::Roster => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
            AppMode::Filter => Style::default().fg(Color::Magenta),
            AppMode::Alert => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_alert_popup(f: &mut Frame, alert: &Alert) {
    let area = f.area();
    let width = (area.width * 3 / 5).max(30).min(area.width);
    let height = 5.min(area.height);
    let popup_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(alert.text.as_str())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(alert.title.as_str())
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(popup, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("staffdesk Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"STAFFDESK KEY REFERENCE

=== SESSION ===
Enter           Sign in (from the sign-in screen)
Ctrl+U          Sign out (from the roster view)
q               Quit (roster view or sign-in screen)

=== ROSTER VIEW ===
Left/Right, h/l Select column
Up/Down, j/k    Select row
s               Toggle sort on the selected column
                (ascending, then descending, then off)
/               Type a filter for the selected column
a               Open the entry form

=== ENTRY FORM ===
Tab / Down      Next field
Shift+Tab / Up  Previous field
Left/Right      Move cursor, or choose a role on the Role field
Enter           Submit
Esc             Back to the roster (entered values are kept)

Role defaults to Developer. Name needs at least 3 characters and
email must be a valid address; errors show under the field.

=== ADDING AN EMPLOYEE ===
A submitted employee triggers a notification email. The record is
added to the roster and saved to the roster file only after the
email service confirms delivery. If delivery fails, nothing is
saved; correct the input or just submit again.

=== FILES & CONFIGURATION ===
The roster is saved to "employees.json" (or STAFFDESK_ROSTER_FILE)
as JSON, rewritten in full on every addition.

Required environment (also read from .env):
  IDENTITY_PUBLISHABLE_KEY   identity provider key (required)
  EMAILJS_SERVICE_ID         delivery service id
  EMAILJS_TEMPLATE_ID        delivery template id
  EMAILJS_USER_ID            delivery account id

=== HELP NAVIGATION ===
Up/Down or j/k  Scroll one line
Page Up/Down    Scroll five lines
Home            Jump to top
Esc/F1/?/q      Close this help window"#
        .to_string()
}
