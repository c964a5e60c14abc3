//! # Navigation
//!
//! The session shows exactly one entity type at a time. [`Navigator`] owns a
//! [`Panel`] per type and the marker of which one is active; switching is an
//! explicit transition that closes the outgoing form and list before the
//! incoming list is built and refreshed.
//!
//! A panel whose gateway could not be constructed stays in place but answers
//! every action with `"<Plural> are unavailable: <cause>"`.

use super::{FormEvent, FormView, ListEvent, ListView};
use crate::commands::{self, CmdMessage, CmdResult};
use crate::model::{EntityKind, FieldMap, RecordId};
use crate::store::{open_store, Database, RecordStore};
use tracing::debug;

/// Gateway, list and form for one entity type.
pub struct Panel {
    kind: EntityKind,
    store: Result<Box<dyn RecordStore>, String>,
    list: Option<ListView>,
    form: Option<FormView>,
}

impl Panel {
    pub fn ready(kind: EntityKind, store: Box<dyn RecordStore>) -> Self {
        Self {
            kind,
            store: Ok(store),
            list: None,
            form: None,
        }
    }

    pub fn unavailable(kind: EntityKind, cause: impl Into<String>) -> Self {
        Self {
            kind,
            store: Err(cause.into()),
            list: None,
            form: None,
        }
    }

    /// Builds the gateway for `kind`. A setup failure disables the panel
    /// instead of failing the caller.
    pub fn open(kind: EntityKind, db: &Database) -> Self {
        match open_store(kind, db) {
            Ok(store) => Self::ready(kind, store),
            Err(e) => {
                debug!(%kind, error = %e, "panel unavailable");
                Self::unavailable(kind, e.to_string())
            }
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_available(&self) -> bool {
        self.store.is_ok()
    }

    pub fn list(&self) -> Option<&ListView> {
        self.list.as_ref()
    }

    pub fn form(&self) -> Option<&FormView> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormView> {
        self.form.as_mut()
    }

    fn gateway(&self) -> Result<&dyn RecordStore, CmdResult> {
        match &self.store {
            Ok(store) => Ok(&**store),
            Err(cause) => Err(CmdResult::failed(format!(
                "{} are unavailable: {}",
                capitalize(self.kind.schema().plural),
                cause
            ))),
        }
    }

    /// Builds the list if it is not shown yet.
    pub fn open_list(&mut self) -> &mut ListView {
        let schema = self.kind.schema();
        self.list.get_or_insert_with(|| ListView::new(schema))
    }

    /// Reloads every row into the list, opening it first when needed.
    pub fn refresh(&mut self) -> CmdResult {
        let result = match self.gateway() {
            Ok(store) => commands::list::run(store),
            Err(failed) => failed,
        };
        let list = self.open_list();
        list.update_rows(result.records.clone());
        if let Some(error) = result.error() {
            list.set_status(error);
        }
        result
    }

    pub fn teardown(&mut self) {
        self.list = None;
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Opens a blank form, replacing any open one.
    pub fn open_new_form(&mut self) -> CmdResult {
        if let Err(failed) = self.gateway() {
            return failed;
        }
        self.form = Some(FormView::for_new(self.kind.schema()));
        CmdResult::default()
    }

    /// Loads `id` and opens a pre-populated form for it.
    pub fn open_edit_form(&mut self, id: RecordId) -> CmdResult {
        let result = match self.gateway() {
            Ok(store) => commands::get::run(store, id),
            Err(failed) => return failed,
        };
        if let Some(record) = result.records.first() {
            self.form = Some(FormView::for_edit(self.kind.schema(), id, record));
        }
        result
    }

    /// Deletes `id` and reloads the list. Confirmation happens before this
    /// is called.
    pub fn delete(&mut self, id: RecordId) -> CmdResult {
        let mut result = match self.gateway() {
            Ok(store) => commands::delete::run(store, id),
            Err(failed) => return failed,
        };
        if result.succeeded() {
            self.refresh_after_write(&mut result);
        }
        result
    }

    /// Creates or updates from the open form. The form closes only when the
    /// write succeeded.
    pub fn save(&mut self, fields: &FieldMap) -> CmdResult {
        let Some(form) = &self.form else {
            return CmdResult::failed("No form is open");
        };
        let record_id = form.record_id();
        let mut result = match self.gateway() {
            Ok(store) => match record_id {
                Some(id) => commands::update::run(store, id, fields),
                None => commands::create::run(store, fields),
            },
            Err(failed) => return failed,
        };
        if result.succeeded() {
            self.close_form();
            self.refresh_after_write(&mut result);
        }
        result
    }

    /// Reloads the list after a successful write. A failed reload does not
    /// undo the write, so it is passed on as a warning.
    fn refresh_after_write(&mut self, result: &mut CmdResult) {
        let refreshed = self.refresh();
        if let Some(error) = refreshed.error() {
            result.add_message(CmdMessage::warning(error));
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Two-state machine over the entity panels.
pub struct Navigator {
    active: EntityKind,
    contacts: Panel,
    projects: Panel,
}

impl Navigator {
    pub fn new(contacts: Panel, projects: Panel) -> Self {
        Self {
            active: EntityKind::Contacts,
            contacts,
            projects,
        }
    }

    /// Builds both panels against `db`.
    pub fn open(db: &Database) -> Self {
        Self::new(
            Panel::open(EntityKind::Contacts, db),
            Panel::open(EntityKind::Projects, db),
        )
    }

    /// Shows the initial (contacts) list.
    pub fn start(&mut self) -> CmdResult {
        debug!(view = %self.active, "session started");
        self.active_panel_mut().refresh()
    }

    pub fn active(&self) -> EntityKind {
        self.active
    }

    pub fn panel(&self, kind: EntityKind) -> &Panel {
        match kind {
            EntityKind::Contacts => &self.contacts,
            EntityKind::Projects => &self.projects,
        }
    }

    fn panel_mut(&mut self, kind: EntityKind) -> &mut Panel {
        match kind {
            EntityKind::Contacts => &mut self.contacts,
            EntityKind::Projects => &mut self.projects,
        }
    }

    pub fn active_panel(&self) -> &Panel {
        self.panel(self.active)
    }

    fn active_panel_mut(&mut self) -> &mut Panel {
        self.panel_mut(self.active)
    }

    pub fn list(&self) -> Option<&ListView> {
        self.active_panel().list()
    }

    pub fn form(&self) -> Option<&FormView> {
        self.active_panel().form()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormView> {
        self.active_panel_mut().form_mut()
    }

    /// Makes `kind` the visible entity type. Switching to the active type
    /// only refreshes it.
    pub fn switch_to(&mut self, kind: EntityKind) -> CmdResult {
        if kind != self.active {
            debug!(from = %self.active, to = %kind, "switching view");
            let outgoing = self.active_panel_mut();
            outgoing.close_form();
            outgoing.teardown();
            self.active = kind;
        }
        self.active_panel_mut().refresh()
    }

    pub fn handle_list_event(&mut self, event: ListEvent) -> CmdResult {
        debug!(view = %self.active, ?event, "list event");
        let panel = self.active_panel_mut();
        match event {
            ListEvent::Add => panel.open_new_form(),
            ListEvent::Edit(id) => panel.open_edit_form(id),
            ListEvent::Delete(id) => panel.delete(id),
            ListEvent::Refresh => panel.refresh(),
        }
    }

    pub fn handle_form_event(&mut self, event: FormEvent) -> CmdResult {
        debug!(view = %self.active, save = matches!(event, FormEvent::Save(_)), "form event");
        let panel = self.active_panel_mut();
        match event {
            FormEvent::Save(fields) => panel.save(&fields),
            FormEvent::Cancel => {
                panel.close_form();
                CmdResult::default().with_message(CmdMessage::info("Cancelled"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::ArchpmError;
    use crate::model::{field, field_map};
    use crate::schema::TableSchema;
    use crate::store::fixtures::DbFixture;

    fn navigator(fx: &DbFixture) -> Navigator {
        let mut nav = Navigator::open(&fx.db);
        assert!(nav.start().succeeded());
        nav
    }

    fn add_contact(nav: &mut Navigator, first: &str, last: &str) -> CmdResult {
        nav.handle_list_event(ListEvent::Add);
        let form = nav.form_mut().unwrap();
        form.set_field("first_name", first).unwrap();
        form.set_field("last_name", last).unwrap();
        let event = form.save();
        nav.handle_form_event(event)
    }

    #[test]
    fn starts_on_contacts() {
        let fx = DbFixture::new();
        let nav = navigator(&fx);
        assert_eq!(nav.active(), EntityKind::Contacts);
        assert_eq!(nav.list().unwrap().status(), "0 contacts loaded");
        assert!(nav.panel(EntityKind::Projects).list().is_none());
    }

    #[test]
    fn saving_a_new_form_creates_and_refreshes() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);

        let result = add_contact(&mut nav, "Dana", "Levi");
        assert!(result.succeeded());
        assert_eq!(result.messages[0].content, "Contact created successfully");
        assert!(nav.form().is_none());
        let list = nav.list().unwrap();
        assert_eq!(list.status(), "1 contact loaded");
        assert_eq!(field(&list.rows()[0], "first_name"), "Dana");
    }

    #[test]
    fn failed_save_keeps_the_form_open() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);

        let result = add_contact(&mut nav, "Dana", "");
        assert_eq!(result.error(), Some("Last name is required"));
        assert_eq!(nav.form().unwrap().value("first_name"), "Dana");
        assert!(nav.list().unwrap().rows().is_empty());
    }

    #[test]
    fn edit_round_trip_updates_the_record() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        let id = add_contact(&mut nav, "Dana", "Levi").record_id.unwrap();

        assert!(nav.handle_list_event(ListEvent::Edit(id)).succeeded());
        let form = nav.form_mut().unwrap();
        assert!(form.record_id() == Some(id));
        assert_eq!(form.value("last_name"), "Levi");
        form.set_field("phone", "050-1234567").unwrap();
        let event = form.save();

        let result = nav.handle_form_event(event);
        assert_eq!(result.messages[0].content, "Contact updated successfully");
        assert_eq!(field(&nav.list().unwrap().rows()[0], "phone"), "050-1234567");
    }

    #[test]
    fn editing_a_missing_record_opens_nothing() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        let result = nav.handle_list_event(ListEvent::Edit(99));
        assert_eq!(result.error(), Some("Contact not found"));
        assert!(nav.form().is_none());
    }

    #[test]
    fn delete_refreshes_the_list() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        let id = add_contact(&mut nav, "Dana", "Levi").record_id.unwrap();
        add_contact(&mut nav, "Avi", "Cohen");

        let result = nav.handle_list_event(ListEvent::Delete(id));
        assert_eq!(result.messages[0].content, "Contact deleted successfully");
        assert_eq!(nav.list().unwrap().rows().len(), 1);
        assert!(nav.list().unwrap().find(id).is_none());
    }

    #[test]
    fn cancel_closes_the_form() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        nav.handle_list_event(ListEvent::Add);
        assert!(nav.form().is_some());
        nav.handle_form_event(FormEvent::Cancel);
        assert!(nav.form().is_none());
    }

    #[test]
    fn switching_tears_down_the_outgoing_panel() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        nav.handle_list_event(ListEvent::Add);

        let result = nav.switch_to(EntityKind::Projects);
        assert!(result.succeeded());
        assert_eq!(nav.active(), EntityKind::Projects);
        assert_eq!(nav.list().unwrap().status(), "0 projects loaded");

        let contacts = nav.panel(EntityKind::Contacts);
        assert!(contacts.form().is_none());
        assert!(contacts.list().is_none());

        nav.switch_to(EntityKind::Contacts);
        assert!(nav.panel(EntityKind::Projects).list().is_none());
        assert!(nav.list().is_some());
    }

    #[test]
    fn switching_to_the_active_view_refreshes_it() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        let store = open_store(EntityKind::Contacts, &fx.db).unwrap();
        store
            .create(&field_map(&[("first_name", "Dana"), ("last_name", "Levi")]))
            .unwrap();

        nav.switch_to(EntityKind::Contacts);
        assert_eq!(nav.list().unwrap().rows().len(), 1);
    }

    #[test]
    fn unavailable_panel_reports_its_cause() {
        let fx = DbFixture::new();
        let contacts = Panel::open(EntityKind::Contacts, &fx.db);
        let projects = Panel::unavailable(EntityKind::Projects, "disk full");
        let mut nav = Navigator::new(contacts, projects);
        assert!(nav.active_panel().is_available());
        assert!(!nav.panel(EntityKind::Projects).is_available());
        assert_eq!(nav.panel(EntityKind::Projects).kind(), EntityKind::Projects);

        let result = nav.switch_to(EntityKind::Projects);
        assert_eq!(result.error(), Some("Projects are unavailable: disk full"));
        assert_eq!(
            nav.list().unwrap().status(),
            "Projects are unavailable: disk full"
        );

        let result = nav.handle_list_event(ListEvent::Add);
        assert!(!result.succeeded());
        assert!(nav.form().is_none());

        assert!(nav.switch_to(EntityKind::Contacts).succeeded());
    }

    #[test]
    fn save_without_a_form_is_rejected() {
        let fx = DbFixture::new();
        let mut nav = navigator(&fx);
        let result = nav.handle_form_event(FormEvent::Save(field_map(&[])));
        assert_eq!(result.error(), Some("No form is open"));
    }

    /// Accepts every write but cannot read the table back.
    struct UnreadableStore;

    impl RecordStore for UnreadableStore {
        fn schema(&self) -> &'static TableSchema {
            EntityKind::Contacts.schema()
        }

        fn validate(&self, _fields: &FieldMap) -> Vec<String> {
            Vec::new()
        }

        fn create(&self, _fields: &FieldMap) -> crate::error::Result<RecordId> {
            Ok(7)
        }

        fn try_read_all(&self) -> crate::error::Result<Vec<FieldMap>> {
            Err(ArchpmError::Api("disk gone".into()))
        }

        fn read_one(&self, _id: RecordId) -> crate::error::Result<Option<FieldMap>> {
            Ok(None)
        }

        fn update(&self, _id: RecordId, _fields: &FieldMap) -> crate::error::Result<()> {
            Ok(())
        }

        fn delete(&self, _id: RecordId) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_reload_after_a_write_is_a_warning() {
        let mut panel = Panel::ready(EntityKind::Contacts, Box::new(UnreadableStore));
        panel.open_new_form();

        let saved = panel.save(&field_map(&[("first_name", "Dana"), ("last_name", "Levi")]));
        assert!(saved.succeeded());
        assert_eq!(saved.messages[0].content, "Contact created successfully");
        let warning = &saved.messages[1];
        assert_eq!(warning.level, MessageLevel::Warning);
        assert_eq!(warning.content, "Error loading contacts: disk gone");
        assert_eq!(
            panel.list().unwrap().status(),
            "Error loading contacts: disk gone"
        );

        let deleted = panel.delete(7);
        assert!(deleted.succeeded());
        assert_eq!(deleted.messages[1].level, MessageLevel::Warning);
    }
}
