//! # Table Schemas
//!
//! Each record type is described once, as a static [`TableSchema`]. The same
//! table drives validation, SQL generation, list rendering and the form, so a
//! field added here shows up everywhere.
//!
//! The two schemas share this configuration shape and nothing else: contact
//! and project validation live in their own modules and are free to diverge.

use crate::model::FieldMap;

pub mod contact;
pub mod project;

/// Column name of the system-assigned identifier, common to both tables.
pub const ID_FIELD: &str = "id";

/// One column of a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Column definition used in `CREATE TABLE`.
    pub column: &'static str,
    /// Display width in terminal cells.
    pub width: usize,
    pub required: bool,
    /// Values the form suggests. Never enforced.
    pub choices: &'static [&'static str],
}

/// Static description of one record table.
#[derive(Debug)]
pub struct TableSchema {
    pub table: &'static str,
    /// Singular noun used in user-facing messages ("Contact").
    pub noun: &'static str,
    /// Plural noun used in list status lines ("contacts").
    pub plural: &'static str,
    /// Every column, `id` first, in display order.
    pub fields: &'static [FieldSpec],
    pub order_by: &'static str,
    /// Fields that, joined with spaces, name a record in prompts.
    pub title_fields: &'static [&'static str],
}

impl TableSchema {
    /// Persisted field names in display order, without `id`.
    pub fn persisted_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.name != ID_FIELD)
            .map(|f| f.name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.fields.iter().filter(|f| f.required)
    }

    /// Human name of a materialized record, e.g. `Dana Levi`.
    pub fn describe(&self, fields: &FieldMap) -> String {
        self.title_fields
            .iter()
            .map(|name| fields.get(*name).map(|v| v.trim()).unwrap_or(""))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Label for a field, falling back to the raw name.
    pub fn label<'a>(&self, name: &'a str) -> &'a str {
        match self.field(name) {
            Some(spec) => spec.label,
            None => name,
        }
    }

    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.name, f.column))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table,
            columns.join(", ")
        )
    }

    pub fn insert_sql(&self) -> String {
        let names: Vec<&str> = self.persisted_fields().collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            names.join(", "),
            placeholders.join(", ")
        )
    }

    /// `UPDATE` statement whose last parameter is the row id.
    pub fn update_sql(&self) -> String {
        let names: Vec<&str> = self.persisted_fields().collect();
        let assignments: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} = ?{}", name, i + 1))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            self.table,
            assignments.join(", "),
            ID_FIELD,
            names.len() + 1
        )
    }

    pub fn select_all_sql(&self) -> String {
        format!("SELECT {} FROM {} ORDER BY {}", self.column_list(), self.table, self.order_by)
    }

    pub fn select_one_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.column_list(),
            self.table,
            ID_FIELD
        )
    }

    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE {} = ?1", self.table, ID_FIELD)
    }

    fn column_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Appends `"<label> is required"` for every required field whose
    /// trimmed value is empty or missing.
    pub(crate) fn check_required(&self, fields: &FieldMap, errors: &mut Vec<String>) {
        for spec in self.required_fields() {
            let value = fields.get(spec.name).map(String::as_str).unwrap_or("");
            if value.trim().is_empty() {
                errors.push(format!("{} is required", spec.label));
            }
        }
    }
}
