use super::{expect_affected, reject_invalid, text_column, Database, RecordStore};
use crate::error::Result;
use crate::model::{Contact, FieldMap, RecordId};
use crate::schema::contact::{self, CONTACTS};
use crate::schema::TableSchema;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

/// Gateway to the `contacts` table.
#[derive(Debug, Clone)]
pub struct ContactStore {
    db: Database,
}

impl ContactStore {
    /// Opens the gateway, creating the table on first use.
    pub fn open(db: Database) -> Result<Self> {
        db.ensure_table(&CONTACTS)?;
        Ok(Self { db })
    }

    pub fn insert(&self, contact: &Contact) -> Result<RecordId> {
        reject_invalid(contact::validate(&contact.to_field_map()))?;

        let conn = self.db.connect()?;
        conn.execute(
            &CONTACTS.insert_sql(),
            params![
                contact.first_name,
                contact.last_name,
                contact.phone,
                contact.email,
                contact.address,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "contact inserted");
        Ok(id)
    }

    pub fn all(&self) -> Result<Vec<Contact>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&CONTACTS.select_all_sql())?;
        let contacts = stmt
            .query_map([], contact_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }

    pub fn get(&self, id: RecordId) -> Result<Option<Contact>> {
        let conn = self.db.connect()?;
        let contact = conn
            .query_row(&CONTACTS.select_one_sql(), [id], contact_from_row)
            .optional()?;
        Ok(contact)
    }

    pub fn replace(&self, id: RecordId, contact: &Contact) -> Result<()> {
        reject_invalid(contact::validate(&contact.to_field_map()))?;

        let conn = self.db.connect()?;
        let affected = conn.execute(
            &CONTACTS.update_sql(),
            params![
                contact.first_name,
                contact.last_name,
                contact.phone,
                contact.email,
                contact.address,
                id,
            ],
        )?;
        expect_affected(affected, &CONTACTS)?;
        debug!(id, "contact updated");
        Ok(())
    }

    pub fn remove(&self, id: RecordId) -> Result<()> {
        let conn = self.db.connect()?;
        let affected = conn.execute(&CONTACTS.delete_sql(), [id])?;
        expect_affected(affected, &CONTACTS)?;
        debug!(id, "contact deleted");
        Ok(())
    }
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: Some(row.get(0)?),
        first_name: text_column(row, 1)?,
        last_name: text_column(row, 2)?,
        phone: text_column(row, 3)?,
        email: text_column(row, 4)?,
        address: text_column(row, 5)?,
    })
}

impl RecordStore for ContactStore {
    fn schema(&self) -> &'static TableSchema {
        &CONTACTS
    }

    fn validate(&self, fields: &FieldMap) -> Vec<String> {
        contact::validate(fields)
    }

    fn create(&self, fields: &FieldMap) -> Result<RecordId> {
        reject_invalid(contact::validate(fields))?;
        self.insert(&Contact::from_field_map(fields))
    }

    fn try_read_all(&self) -> Result<Vec<FieldMap>> {
        Ok(self.all()?.iter().map(Contact::to_field_map).collect())
    }

    fn read_one(&self, id: RecordId) -> Result<Option<FieldMap>> {
        Ok(self.get(id)?.map(|c| c.to_field_map()))
    }

    fn update(&self, id: RecordId, fields: &FieldMap) -> Result<()> {
        reject_invalid(contact::validate(fields))?;
        self.replace(id, &Contact::from_field_map(fields))
    }

    fn delete(&self, id: RecordId) -> Result<()> {
        self.remove(id)
    }
}
