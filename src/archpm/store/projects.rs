use super::{expect_affected, reject_invalid, text_column, Database, RecordStore};
use crate::error::Result;
use crate::model::{FieldMap, Project, RecordId};
use crate::schema::project::{self, parse_active, PROJECTS};
use crate::schema::TableSchema;
use rusqlite::types::ValueRef;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

/// Gateway to the `projects` table.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    db: Database,
}

impl ProjectStore {
    pub fn open(db: Database) -> Result<Self> {
        db.ensure_table(&PROJECTS)?;
        Ok(Self { db })
    }

    pub fn insert(&self, project: &Project) -> Result<RecordId> {
        reject_invalid(project::validate(&project.to_field_map()))?;

        let conn = self.db.connect()?;
        conn.execute(
            &PROJECTS.insert_sql(),
            params![
                project.customer_name,
                project.location,
                project.start_date,
                project.end_date,
                project.is_active,
                project.state,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "project inserted");
        Ok(id)
    }

    pub fn all(&self) -> Result<Vec<Project>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&PROJECTS.select_all_sql())?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    pub fn get(&self, id: RecordId) -> Result<Option<Project>> {
        let conn = self.db.connect()?;
        let project = conn
            .query_row(&PROJECTS.select_one_sql(), [id], project_from_row)
            .optional()?;
        Ok(project)
    }

    pub fn replace(&self, id: RecordId, project: &Project) -> Result<()> {
        reject_invalid(project::validate(&project.to_field_map()))?;

        let conn = self.db.connect()?;
        let affected = conn.execute(
            &PROJECTS.update_sql(),
            params![
                project.customer_name,
                project.location,
                project.start_date,
                project.end_date,
                project.is_active,
                project.state,
                id,
            ],
        )?;
        expect_affected(affected, &PROJECTS)?;
        debug!(id, "project updated");
        Ok(())
    }

    pub fn remove(&self, id: RecordId) -> Result<()> {
        let conn = self.db.connect()?;
        let affected = conn.execute(&PROJECTS.delete_sql(), [id])?;
        expect_affected(affected, &PROJECTS)?;
        debug!(id, "project deleted");
        Ok(())
    }
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get(0)?),
        customer_name: text_column(row, 1)?,
        location: text_column(row, 2)?,
        start_date: text_column(row, 3)?,
        end_date: text_column(row, 4)?,
        is_active: flag_column(row, 5)?,
        state: text_column(row, 6)?,
    })
}

/// Rows written by this application hold 0/1; anything else found in an
/// existing file is read leniently.
fn flag_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => false,
        ValueRef::Integer(i) => i != 0,
        ValueRef::Real(f) => f != 0.0,
        ValueRef::Text(t) => parse_active(&String::from_utf8_lossy(t)),
        ValueRef::Blob(b) => !b.is_empty(),
    })
}

impl RecordStore for ProjectStore {
    fn schema(&self) -> &'static TableSchema {
        &PROJECTS
    }

    fn validate(&self, fields: &FieldMap) -> Vec<String> {
        project::validate(fields)
    }

    fn create(&self, fields: &FieldMap) -> Result<RecordId> {
        reject_invalid(project::validate(fields))?;
        self.insert(&Project::from_field_map(fields))
    }

    fn try_read_all(&self) -> Result<Vec<FieldMap>> {
        Ok(self.all()?.iter().map(Project::to_field_map).collect())
    }

    fn read_one(&self, id: RecordId) -> Result<Option<FieldMap>> {
        Ok(self.get(id)?.map(|p| p.to_field_map()))
    }

    fn update(&self, id: RecordId, fields: &FieldMap) -> Result<()> {
        reject_invalid(project::validate(fields))?;
        self.replace(id, &Project::from_field_map(fields))
    }

    fn delete(&self, id: RecordId) -> Result<()> {
        self.remove(id)
    }
}
