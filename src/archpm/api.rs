//! # API Facade
//!
//! Single entry point for every archpm operation, whichever front end is
//! driving it. The facade picks the gateway for an [`EntityKind`] and hands
//! it to the matching command; it holds no logic of its own.
//!
//! Gateways are built per call, so a database that cannot be opened or a
//! table that cannot be created surfaces as `Err` here and nowhere else.
//! Everything that goes wrong after that is reported inside the returned
//! [`CmdResult`].

use crate::commands::{self, config::ConfigAction, CmdResult};
use crate::error::Result;
use crate::model::{EntityKind, FieldMap, RecordId};
use crate::store::{open_store, Database, RecordStore};
use crate::ui::Navigator;
use std::path::PathBuf;

pub struct ArchpmApi {
    db: Database,
    data_dir: PathBuf,
}

impl ArchpmApi {
    pub fn new(db: Database, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            data_dir: data_dir.into(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn store(&self, kind: EntityKind) -> Result<Box<dyn RecordStore>> {
        open_store(kind, &self.db)
    }

    pub fn list_records(&self, kind: EntityKind) -> Result<CmdResult> {
        Ok(commands::list::run(&*self.store(kind)?))
    }

    pub fn get_record(&self, kind: EntityKind, id: RecordId) -> Result<CmdResult> {
        Ok(commands::get::run(&*self.store(kind)?, id))
    }

    pub fn create_record(&self, kind: EntityKind, fields: &FieldMap) -> Result<CmdResult> {
        Ok(commands::create::run(&*self.store(kind)?, fields))
    }

    pub fn update_record(
        &self,
        kind: EntityKind,
        id: RecordId,
        fields: &FieldMap,
    ) -> Result<CmdResult> {
        Ok(commands::update::run(&*self.store(kind)?, id, fields))
    }

    pub fn delete_record(&self, kind: EntityKind, id: RecordId) -> Result<CmdResult> {
        Ok(commands::delete::run(&*self.store(kind)?, id))
    }

    pub fn export_records(&self, kind: EntityKind) -> Result<CmdResult> {
        Ok(commands::export::run(&*self.store(kind)?))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    /// Navigator for an interactive session over this database. Panels whose
    /// table cannot be set up start out unavailable.
    pub fn navigator(&self) -> Navigator {
        Navigator::open(&self.db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArchpmError;
    use crate::model::field_map;
    use crate::store::contacts::ContactStore;
    use crate::store::projects::ProjectStore;
    use tempfile::TempDir;

    fn api(dir: &TempDir) -> ArchpmApi {
        ArchpmApi::new(Database::new(dir.path().join("archpm.db")), dir.path())
    }

    #[test]
    fn dispatches_by_kind() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);

        let created = api
            .create_record(EntityKind::Projects, &field_map(&[("customer_name", "Acme")]))
            .unwrap();
        assert_eq!(created.messages[0].content, "Project created successfully");

        assert_eq!(
            api.list_records(EntityKind::Projects).unwrap().records.len(),
            1
        );
        assert!(api
            .list_records(EntityKind::Contacts)
            .unwrap()
            .records
            .is_empty());
    }

    #[test]
    fn typed_gateways_share_the_database() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);
        let id = api
            .create_record(
                EntityKind::Contacts,
                &field_map(&[("first_name", "Dana"), ("last_name", "Levi")]),
            )
            .unwrap()
            .record_id
            .unwrap();

        let contacts = ContactStore::open(api.database().clone()).unwrap();
        let contact = contacts.get(id).unwrap().unwrap();
        assert_eq!(contact.full_name(), "Dana Levi");
        let projects = ProjectStore::open(api.database().clone()).unwrap();
        assert!(projects.all().unwrap().is_empty());
    }

    #[test]
    fn unopenable_database_fails_the_call() {
        let dir = TempDir::new().unwrap();
        let api = ArchpmApi::new(
            Database::new(dir.path().join("no-such-dir").join("archpm.db")),
            dir.path(),
        );
        let err = api.list_records(EntityKind::Contacts).unwrap_err();
        assert!(matches!(err, ArchpmError::Setup(_)));
    }

    #[test]
    fn navigator_uses_the_same_database() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);
        api.create_record(
            EntityKind::Contacts,
            &field_map(&[("first_name", "Dana"), ("last_name", "Levi")]),
        )
        .unwrap();

        let mut nav = api.navigator();
        nav.start();
        assert_eq!(nav.list().unwrap().rows().len(), 1);
    }

    #[test]
    fn config_lives_in_the_data_dir() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);
        api.config(ConfigAction::Set("confirm-delete".into(), "false".into()))
            .unwrap();
        assert!(dir.path().join("config.json").exists());
    }
}
