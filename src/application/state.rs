//! Application state management for the terminal employee registry.
//!
//! This module contains the main application state: the in-memory roster,
//! the entry form, the roster view's sort/filter state, and the
//! add-employee workflow that ties validation, notification delivery and
//! persistence together.

use crate::domain::{Employee, EmployeeDraft, FieldErrors, RegistryError, Role};
use crate::infrastructure::{NotificationGateway, RosterStore, Session};
use log::{debug, error};

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and what UI elements
/// are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// No session exists; only the sign-in affordance is shown
    SignedOut,
    /// Roster table has focus - column selection, sorting, filtering
    Roster,
    /// Entry form has focus - user is typing into a field
    Form,
    /// Filter query is being typed for the selected column
    Filter,
    /// A blocking alert popup is displayed
    Alert,
    /// Help screen is displayed
    Help,
}

/// Phase of the submission currently in flight.
///
/// There is at most one submission at a time; the form is the sole entry
/// point and the event loop is single-threaded. Persistence happens
/// strictly after a successful delivery confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Sending,
    Persisting,
}

/// Fields of the entry form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Role,
    JoiningDate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Role,
        FormField::JoiningDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone (Optional)",
            FormField::Role => "Role",
            FormField::JoiningDate => "Joining Date",
        }
    }

    /// Key used by the validation schema for this field's error message.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Role => "role",
            FormField::JoiningDate => "joining_date",
        }
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Phone,
            FormField::Phone => FormField::Role,
            FormField::Role => FormField::JoiningDate,
            FormField::JoiningDate => FormField::Name,
        }
    }

    pub fn previous(self) -> FormField {
        match self {
            FormField::Name => FormField::JoiningDate,
            FormField::Email => FormField::Name,
            FormField::Phone => FormField::Email,
            FormField::Role => FormField::Phone,
            FormField::JoiningDate => FormField::Role,
        }
    }
}

/// Raw entry-form state.
///
/// The role selector always holds a member of the closed role set and
/// pre-selects Developer when nothing has been chosen yet.
#[derive(Debug, Clone)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub joining_date: String,
    pub focus: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: Role::default(),
            joining_date: String::new(),
            focus: FormField::Name,
        }
    }
}

impl FormState {
    /// Display text for a field.
    pub fn field_text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Role => self.role.as_str(),
            FormField::JoiningDate => &self.joining_date,
        }
    }

    /// Mutable text buffer for a field; `None` for the role selector.
    pub fn buffer_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Phone => Some(&mut self.phone),
            FormField::Role => None,
            FormField::JoiningDate => Some(&mut self.joining_date),
        }
    }

    /// Snapshot of the current input as a draft for validation.
    ///
    /// Name and email are trimmed; the phone is passed along exactly as
    /// typed.
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.clone(),
            role: self.role.as_str().to_string(),
            joining_date: self.joining_date.trim().to_string(),
        }
    }

    /// Clears every field back to its default.
    pub fn reset(&mut self) {
        *self = FormState::default();
    }
}

/// Columns of the roster table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterColumn {
    Name,
    Email,
    Phone,
    Role,
    JoiningDate,
}

impl RosterColumn {
    pub const ALL: [RosterColumn; 5] = [
        RosterColumn::Name,
        RosterColumn::Email,
        RosterColumn::Phone,
        RosterColumn::Role,
        RosterColumn::JoiningDate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            RosterColumn::Name => "Name",
            RosterColumn::Email => "Email",
            RosterColumn::Phone => "Phone Number",
            RosterColumn::Role => "Role",
            RosterColumn::JoiningDate => "Joining Date",
        }
    }

    /// Cell text for one record in this column.
    pub fn text<'a>(&self, employee: &'a Employee) -> &'a str {
        match self {
            RosterColumn::Name => &employee.name,
            RosterColumn::Email => &employee.email,
            RosterColumn::Phone => employee.phone.as_deref().unwrap_or(""),
            RosterColumn::Role => employee.role.as_str(),
            RosterColumn::JoiningDate => &employee.joining_date,
        }
    }
}

/// A blocking alert popup, dismissed before anything else can happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub text: String,
}

/// Main application state.
///
/// Owns the in-memory roster exclusively for the lifetime of the session
/// and orchestrates the add-employee workflow: validate, deliver the
/// notification, and only on delivery success persist and re-render.
///
/// # Examples
///
/// ```
/// use staffdesk::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::SignedOut);
/// assert!(app.roster.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// The ordered, append-only employee list
    pub roster: Vec<Employee>,
    /// Present while signed in; the registry is mounted only then
    pub session: Option<Session>,
    /// Current application mode
    pub mode: AppMode,
    /// Phase of the submission in flight
    pub phase: SubmissionPhase,
    /// Entry form state
    pub form: FormState,
    /// Field-level messages from the last rejected submission
    pub field_errors: FieldErrors,
    /// Index of the selected roster column (for sorting/filtering)
    pub selected_column: usize,
    /// Index of the selected visible row
    pub selected_row: usize,
    /// Active sort: column plus descending flag; display-only state
    pub sort: Option<(RosterColumn, bool)>,
    /// Per-column filter queries; display-only state
    pub filters: [String; 5],
    /// Cursor position within the buffer being edited, in characters
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Blocking alert, if one is showing
    pub alert: Option<Alert>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            roster: Vec::new(),
            session: None,
            mode: AppMode::SignedOut,
            phase: SubmissionPhase::Idle,
            form: FormState::default(),
            field_errors: FieldErrors::default(),
            selected_column: 0,
            selected_row: 0,
            sort: None,
            filters: Default::default(),
            cursor_position: 0,
            status_message: None,
            alert: None,
            help_scroll: 0,
        }
    }
}

/// Byte offset of a character position within `text`.
///
/// Buffers hold arbitrary human input, so cursor arithmetic stays in
/// characters and converts to bytes only at the edit site.
fn byte_offset(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

impl App {
    /// Mounts the registry after a successful sign-in.
    ///
    /// Hydrates the in-memory roster once from the persistence layer's
    /// loaded records and moves to the roster view.
    pub fn complete_sign_in(&mut self, session: Session, roster: Vec<Employee>) {
        self.status_message = Some(format!("Signed in as {}.", session.user));
        self.session = Some(session);
        self.roster = roster;
        self.mode = AppMode::Roster;
    }

    /// Unmounts the registry: drops the session and the in-memory roster.
    ///
    /// A later sign-in hydrates again from storage.
    pub fn sign_out(&mut self) {
        *self = App::default();
        self.status_message = Some("Signed out.".to_string());
    }

    /// Moves focus to the entry form.
    pub fn start_form(&mut self) {
        self.mode = AppMode::Form;
        self.cursor_position = self.form.field_text(self.form.focus).chars().count();
        self.status_message = None;
    }

    /// Leaves the form without submitting. Entered values are kept.
    pub fn cancel_form(&mut self) {
        self.mode = AppMode::Roster;
        self.cursor_position = 0;
    }

    /// Inserts a character into the focused form field.
    pub fn form_insert(&mut self, c: char) {
        let focus = self.form.focus;
        let cursor = self.cursor_position;
        if let Some(buffer) = self.form.buffer_mut(focus) {
            let at = byte_offset(buffer, cursor);
            buffer.insert(at, c);
            self.cursor_position += 1;
        }
    }

    /// Deletes the character before the cursor in the focused field.
    pub fn form_backspace(&mut self) {
        let focus = self.form.focus;
        let cursor = self.cursor_position;
        if let Some(buffer) = self.form.buffer_mut(focus) {
            if cursor > 0 {
                let at = byte_offset(buffer, cursor - 1);
                buffer.remove(at);
                self.cursor_position -= 1;
            }
        }
    }

    /// Deletes the character under the cursor in the focused field.
    pub fn form_delete(&mut self) {
        let focus = self.form.focus;
        let cursor = self.cursor_position;
        if let Some(buffer) = self.form.buffer_mut(focus) {
            if cursor < buffer.chars().count() {
                let at = byte_offset(buffer, cursor);
                buffer.remove(at);
            }
        }
    }

    pub fn focus_next_field(&mut self) {
        self.form.focus = self.form.focus.next();
        self.cursor_position = self.form.field_text(self.form.focus).chars().count();
    }

    pub fn focus_previous_field(&mut self) {
        self.form.focus = self.form.focus.previous();
        self.cursor_position = self.form.field_text(self.form.focus).chars().count();
    }

    /// Cycles the role selector. Only meaningful while the role field has
    /// focus; the selector never leaves the closed role set.
    pub fn cycle_role(&mut self, forward: bool) {
        if self.form.focus == FormField::Role {
            self.form.role = if forward {
                self.form.role.next()
            } else {
                self.form.role.previous()
            };
        }
    }

    /// Runs one submission attempt end to end.
    ///
    /// Validation rejection surfaces field messages and stops. On
    /// acceptance the form clears to defaults and the notification is
    /// delivered; only a delivery confirmation commits the record to the
    /// roster and overwrites durable storage. A configuration error or
    /// delivery failure raises a blocking alert and mutates nothing.
    pub fn submit_form(&mut self, gateway: &dyn NotificationGateway, store: &RosterStore) {
        if self.phase != SubmissionPhase::Idle {
            return;
        }
        self.status_message = None;
        self.phase = SubmissionPhase::Validating;

        let employee = match self.form.draft().into_employee() {
            Ok(employee) => employee,
            Err(errors) => {
                self.field_errors = errors;
                self.phase = SubmissionPhase::Idle;
                return;
            }
        };
        self.field_errors = FieldErrors::default();
        self.form.reset();
        self.cursor_position = 0;
        debug!("employee data: {:?}", employee);

        self.phase = SubmissionPhase::Sending;
        match gateway.send(&employee) {
            Ok(confirmation) => {
                debug!("email sent successfully: {}", confirmation);
                self.phase = SubmissionPhase::Persisting;
                self.roster.push(employee);
                match store.save_all(&self.roster) {
                    Ok(()) => {
                        self.status_message =
                            Some("Employee Added! Email sent successfully.".to_string());
                    }
                    Err(e) => {
                        self.status_message = Some(format!("Employee added, save failed: {}", e));
                    }
                }
            }
            Err(RegistryError::MissingConfig(what)) => {
                error!("missing delivery configuration: {}", what);
                self.show_alert(
                    "Configuration Error",
                    "Email service is not configured properly.",
                );
            }
            Err(e) => {
                error!("failed to send email: {}", e);
                self.show_alert("Delivery Failed", "Failed to send email. Employee not added.");
            }
        }
        self.phase = SubmissionPhase::Idle;
    }

    /// Raises a blocking alert popup.
    pub fn show_alert(&mut self, title: &str, text: &str) {
        self.alert = Some(Alert {
            title: title.to_string(),
            text: text.to_string(),
        });
        self.mode = AppMode::Alert;
    }

    /// Dismisses the alert and returns to the form for a manual resubmit.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.mode = AppMode::Form;
    }

    pub fn select_next_column(&mut self) {
        if self.selected_column + 1 < RosterColumn::ALL.len() {
            self.selected_column += 1;
        }
    }

    pub fn select_previous_column(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
        }
    }

    pub fn select_next_row(&mut self) {
        let visible = self.visible_rows().len();
        if visible > 0 && self.selected_row + 1 < visible {
            self.selected_row += 1;
        }
    }

    pub fn select_previous_row(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    /// Cycles the sort on the selected column: ascending, descending, off.
    ///
    /// Sorting is local display state and never reorders the roster
    /// itself.
    pub fn toggle_sort(&mut self) {
        let column = RosterColumn::ALL[self.selected_column];
        self.sort = match self.sort {
            Some((active, false)) if active == column => Some((column, true)),
            Some((active, true)) if active == column => None,
            _ => Some((column, false)),
        };
    }

    /// Starts typing a filter query for the selected column.
    pub fn start_filter(&mut self) {
        self.mode = AppMode::Filter;
        self.cursor_position = self.filters[self.selected_column].chars().count();
        self.status_message = None;
    }

    /// Keeps the typed filter and returns to the roster view.
    pub fn finish_filter(&mut self) {
        self.mode = AppMode::Roster;
        self.clamp_selected_row();
    }

    /// Clears the selected column's filter and returns to the roster view.
    pub fn cancel_filter(&mut self) {
        self.filters[self.selected_column].clear();
        self.mode = AppMode::Roster;
        self.cursor_position = 0;
        self.clamp_selected_row();
    }

    /// Inserts a character into the selected column's filter query.
    ///
    /// Filtering is live; the table narrows as the user types.
    pub fn filter_insert(&mut self, c: char) {
        let filter = &mut self.filters[self.selected_column];
        let at = byte_offset(filter, self.cursor_position);
        filter.insert(at, c);
        self.cursor_position += 1;
        self.clamp_selected_row();
    }

    pub fn filter_backspace(&mut self) {
        if self.cursor_position > 0 {
            let filter = &mut self.filters[self.selected_column];
            let at = byte_offset(filter, self.cursor_position - 1);
            filter.remove(at);
            self.cursor_position -= 1;
            self.clamp_selected_row();
        }
    }

    fn clamp_selected_row(&mut self) {
        let visible = self.visible_rows().len();
        if visible == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= visible {
            self.selected_row = visible - 1;
        }
    }

    /// Roster indices to display, after filters and the active sort.
    ///
    /// Row order is insertion order unless a column sort is applied; the
    /// result never feeds back into the roster itself.
    pub fn visible_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .roster
            .iter()
            .enumerate()
            .filter(|(_, employee)| {
                RosterColumn::ALL
                    .iter()
                    .zip(self.filters.iter())
                    .all(|(column, filter)| {
                        filter.is_empty()
                            || column
                                .text(employee)
                                .to_lowercase()
                                .contains(&filter.to_lowercase())
                    })
            })
            .map(|(index, _)| index)
            .collect();

        if let Some((column, descending)) = self.sort {
            rows.sort_by(|&a, &b| {
                let ordering = column
                    .text(&self.roster[a])
                    .to_lowercase()
                    .cmp(&column.text(&self.roster[b]).to_lowercase());
                if descending { ordering.reverse() } else { ordering }
            });
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infrastructure::RosterStore;
    use std::cell::RefCell;
    use tempfile::{TempDir, tempdir};

    struct StubGateway {
        outcome: Result<String, RegistryError>,
        sent: RefCell<Vec<Employee>>,
    }

    impl StubGateway {
        fn succeeding() -> Self {
            Self {
                outcome: Ok("OK".to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                outcome: Err(RegistryError::Delivery("503 service unavailable".to_string())),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn unconfigured() -> Self {
            Self {
                outcome: Err(RegistryError::MissingConfig("EMAILJS_SERVICE_ID".to_string())),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl NotificationGateway for StubGateway {
        fn send(&self, employee: &Employee) -> Result<String, RegistryError> {
            self.sent.borrow_mut().push(employee.clone());
            self.outcome.clone()
        }
    }

    fn test_store() -> (TempDir, RosterStore) {
        let dir = tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("employees.json"));
        (dir, store)
    }

    fn signed_in_app() -> App {
        let mut app = App::default();
        app.complete_sign_in(
            Session {
                user: "tester".to_string(),
            },
            Vec::new(),
        );
        app
    }

    fn fill_form(app: &mut App, name: &str, email: &str, phone: &str, date: &str) {
        app.form.name = name.to_string();
        app.form.email = email.to_string();
        app.form.phone = phone.to_string();
        app.form.joining_date = date.to_string();
    }

    #[test]
    fn test_app_default_is_signed_out_and_idle() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::SignedOut);
        assert_eq!(app.phase, SubmissionPhase::Idle);
        assert!(app.session.is_none());
        assert!(app.roster.is_empty());
        assert!(app.field_errors.is_empty());
        assert!(app.sort.is_none());
    }

    #[test]
    fn test_sign_in_hydrates_roster_and_mounts() {
        let mut app = App::default();
        let roster = vec![Employee {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: None,
            role: Role::Designer,
            joining_date: "2022-02-02".to_string(),
        }];

        app.complete_sign_in(
            Session {
                user: "tester".to_string(),
            },
            roster.clone(),
        );

        assert_eq!(app.mode, AppMode::Roster);
        assert_eq!(app.roster, roster);
        assert!(app.session.is_some());
    }

    #[test]
    fn test_sign_out_unmounts_and_drops_roster() {
        let mut app = signed_in_app();
        app.roster.push(Employee {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: None,
            role: Role::Developer,
            joining_date: "2024-01-01".to_string(),
        });

        app.sign_out();

        assert_eq!(app.mode, AppMode::SignedOut);
        assert!(app.session.is_none());
        assert!(app.roster.is_empty());
    }

    #[test]
    fn test_form_defaults_to_developer_role() {
        let form = FormState::default();
        assert_eq!(form.role, Role::Developer);
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn test_form_editing_and_focus_cycle() {
        let mut app = signed_in_app();
        app.start_form();

        for c in "Alice".chars() {
            app.form_insert(c);
        }
        assert_eq!(app.form.name, "Alice");
        assert_eq!(app.cursor_position, 5);

        app.focus_next_field();
        assert_eq!(app.form.focus, FormField::Email);
        assert_eq!(app.cursor_position, 0);

        app.focus_previous_field();
        assert_eq!(app.form.focus, FormField::Name);
        assert_eq!(app.cursor_position, 5);

        app.form_backspace();
        assert_eq!(app.form.name, "Alic");
    }

    #[test]
    fn test_form_editing_handles_multibyte_characters() {
        let mut app = signed_in_app();
        app.start_form();

        for c in "José".chars() {
            app.form_insert(c);
        }
        assert_eq!(app.form.name, "José");
        assert_eq!(app.cursor_position, 4);

        app.form_backspace();
        assert_eq!(app.form.name, "Jos");

        app.cursor_position = 1;
        app.form_insert('ö');
        app.form_insert('x');
        assert_eq!(app.form.name, "Jöxos");

        app.form_delete();
        assert_eq!(app.form.name, "Jöxs");
    }

    #[test]
    fn test_filter_editing_handles_multibyte_characters() {
        let mut app = signed_in_app();
        app.roster = roster_of_three();
        app.selected_column = 0;
        app.start_filter();

        for c in "zoë".chars() {
            app.filter_insert(c);
        }
        app.filter_insert('x');
        assert_eq!(app.filters[0], "zoëx");

        app.filter_backspace();
        assert_eq!(app.filters[0], "zoë");
    }

    #[test]
    fn test_role_selector_cycles_within_closed_set() {
        let mut app = signed_in_app();
        app.start_form();
        app.form.focus = FormField::Role;

        app.cycle_role(true);
        assert_eq!(app.form.role, Role::Designer);
        app.cycle_role(true);
        assert_eq!(app.form.role, Role::Manager);
        app.cycle_role(true);
        assert_eq!(app.form.role, Role::Developer);
        app.cycle_role(false);
        assert_eq!(app.form.role, Role::Manager);

        // Cycling is a no-op unless the role field has focus
        app.form.focus = FormField::Name;
        app.cycle_role(true);
        assert_eq!(app.form.role, Role::Manager);
    }

    #[test]
    fn test_rejected_submission_never_reaches_the_gateway() {
        let mut app = signed_in_app();
        let gateway = StubGateway::succeeding();
        let (_dir, store) = test_store();
        fill_form(&mut app, "Al", "a@b.com", "", "2024-01-01");

        app.submit_form(&gateway, &store);

        assert_eq!(
            app.field_errors.get("name"),
            Some("Name must be at least 3 characters.")
        );
        assert!(gateway.sent.borrow().is_empty());
        assert!(app.roster.is_empty());
        assert_eq!(store.load().unwrap(), Vec::new());
        assert_eq!(app.phase, SubmissionPhase::Idle);
        // Rejection keeps the entered values for correction
        assert_eq!(app.form.name, "Al");
    }

    #[test]
    fn test_accepted_submission_commits_after_delivery() {
        let mut app = signed_in_app();
        let gateway = StubGateway::succeeding();
        let (_dir, store) = test_store();
        fill_form(
            &mut app,
            "Alice",
            "alice@example.com",
            "",
            "2024-01-01",
        );
        app.form.role = Role::Manager;

        app.submit_form(&gateway, &store);

        assert_eq!(app.roster.len(), 1);
        let record = &app.roster[0];
        assert_eq!(record.name, "Alice");
        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.phone.as_deref(), Some(""));
        assert_eq!(record.role, Role::Manager);
        assert_eq!(record.joining_date, "2024-01-01");

        // Durable storage reflects the full updated roster
        assert_eq!(store.load().unwrap(), app.roster);

        // Form cleared back to defaults
        assert_eq!(app.form.name, "");
        assert_eq!(app.form.role, Role::Developer);
        assert!(app.field_errors.is_empty());
        assert!(app.status_message.as_deref().unwrap().contains("Employee Added"));
        assert_eq!(app.phase, SubmissionPhase::Idle);
    }

    #[test]
    fn test_delivery_failure_mutates_nothing() {
        let mut app = signed_in_app();
        let gateway = StubGateway::failing();
        let (_dir, store) = test_store();
        fill_form(&mut app, "Alice", "alice@example.com", "", "2024-01-01");

        app.submit_form(&gateway, &store);

        assert_eq!(gateway.sent.borrow().len(), 1);
        assert!(app.roster.is_empty());
        assert_eq!(store.load().unwrap(), Vec::new());
        assert_eq!(app.mode, AppMode::Alert);
        assert_eq!(app.alert.as_ref().unwrap().title, "Delivery Failed");

        app.dismiss_alert();
        assert_eq!(app.mode, AppMode::Form);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_configuration_error_aborts_before_persisting() {
        let mut app = signed_in_app();
        let gateway = StubGateway::unconfigured();
        let (_dir, store) = test_store();
        fill_form(&mut app, "Alice", "alice@example.com", "", "2024-01-01");

        app.submit_form(&gateway, &store);

        assert!(app.roster.is_empty());
        assert_eq!(store.load().unwrap(), Vec::new());
        assert_eq!(app.alert.as_ref().unwrap().title, "Configuration Error");
    }

    #[test]
    fn test_default_role_submission_yields_developer() {
        let mut app = signed_in_app();
        let gateway = StubGateway::succeeding();
        let (_dir, store) = test_store();
        fill_form(&mut app, "Carol", "carol@example.com", "555-0100", "2024-03-01");

        app.submit_form(&gateway, &store);

        assert_eq!(app.roster[0].role, Role::Developer);
    }

    #[test]
    fn test_no_second_submission_while_one_is_in_flight() {
        let mut app = signed_in_app();
        let gateway = StubGateway::succeeding();
        let (_dir, store) = test_store();
        fill_form(&mut app, "Alice", "alice@example.com", "", "2024-01-01");

        app.phase = SubmissionPhase::Sending;
        app.submit_form(&gateway, &store);

        assert!(gateway.sent.borrow().is_empty());
        assert!(app.roster.is_empty());
    }

    #[test]
    fn test_successive_submissions_append_in_order() {
        let mut app = signed_in_app();
        let gateway = StubGateway::succeeding();
        let (_dir, store) = test_store();

        fill_form(&mut app, "Alice", "alice@example.com", "", "2024-01-01");
        app.submit_form(&gateway, &store);
        fill_form(&mut app, "Bob", "bob@example.com", "", "2024-02-01");
        app.submit_form(&gateway, &store);

        assert_eq!(app.roster.len(), 2);
        assert_eq!(app.roster[0].name, "Alice");
        assert_eq!(app.roster[1].name, "Bob");
        assert_eq!(store.load().unwrap(), app.roster);
    }

    fn roster_of_three() -> Vec<Employee> {
        vec![
            Employee {
                name: "Carol".to_string(),
                email: "carol@example.com".to_string(),
                phone: Some("555-0100".to_string()),
                role: Role::Manager,
                joining_date: "2023-01-01".to_string(),
            },
            Employee {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: None,
                role: Role::Developer,
                joining_date: "2024-01-01".to_string(),
            },
            Employee {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                phone: Some("".to_string()),
                role: Role::Designer,
                joining_date: "2022-06-15".to_string(),
            },
        ]
    }

    #[test]
    fn test_visible_rows_default_to_insertion_order() {
        let mut app = signed_in_app();
        app.roster = roster_of_three();
        assert_eq!(app.visible_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_toggles_ascending_descending_off() {
        let mut app = signed_in_app();
        app.roster = roster_of_three();
        app.selected_column = 0; // name

        app.toggle_sort();
        assert_eq!(app.sort, Some((RosterColumn::Name, false)));
        // Case-insensitive: alice < Bob < Carol
        assert_eq!(app.visible_rows(), vec![1, 2, 0]);

        app.toggle_sort();
        assert_eq!(app.sort, Some((RosterColumn::Name, true)));
        assert_eq!(app.visible_rows(), vec![0, 2, 1]);

        app.toggle_sort();
        assert_eq!(app.sort, None);
        assert_eq!(app.visible_rows(), vec![0, 1, 2]);

        // Sorting never reordered the roster itself
        assert_eq!(app.roster[0].name, "Carol");
    }

    #[test]
    fn test_filter_narrows_by_column_case_insensitively() {
        let mut app = signed_in_app();
        app.roster = roster_of_three();
        app.selected_column = 0; // name
        app.start_filter();

        for c in "bo".chars() {
            app.filter_insert(c);
        }

        assert_eq!(app.visible_rows(), vec![2]);

        app.cancel_filter();
        assert_eq!(app.visible_rows(), vec![0, 1, 2]);
        assert_eq!(app.mode, AppMode::Roster);
    }

    #[test]
    fn test_filters_on_different_columns_combine() {
        let mut app = signed_in_app();
        app.roster = roster_of_three();
        app.filters[1] = "example.com".to_string(); // email
        app.filters[3] = "Developer".to_string(); // role

        assert_eq!(app.visible_rows(), vec![1]);
    }

    #[test]
    fn test_filter_clamps_row_selection() {
        let mut app = signed_in_app();
        app.roster = roster_of_three();
        app.selected_row = 2;
        app.selected_column = 0;
        app.start_filter();

        app.filter_insert('z');
        assert!(app.visible_rows().is_empty());
        assert_eq!(app.selected_row, 0);

        app.filter_backspace();
        assert_eq!(app.visible_rows().len(), 3);
    }

    #[test]
    fn test_column_selection_stays_in_bounds() {
        let mut app = signed_in_app();
        for _ in 0..10 {
            app.select_next_column();
        }
        assert_eq!(app.selected_column, RosterColumn::ALL.len() - 1);
        for _ in 0..10 {
            app.select_previous_column();
        }
        assert_eq!(app.selected_column, 0);
    }
}
