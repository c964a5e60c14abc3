use super::fit_cell;
use crate::model::{record_id, FieldMap, RecordId};
use crate::schema::TableSchema;

const READY: &str = "Ready";
const COLUMN_GAP: &str = "  ";

/// User actions raised by a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Add,
    Edit(RecordId),
    /// Raised only after the user confirmed the deletion.
    Delete(RecordId),
    Refresh,
}

/// Table of every record of one entity type plus a status line.
#[derive(Debug, Clone)]
pub struct ListView {
    schema: &'static TableSchema,
    rows: Vec<FieldMap>,
    status: String,
}

impl ListView {
    pub fn new(schema: &'static TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            status: READY.to_string(),
        }
    }

    pub fn schema(&self) -> &'static TableSchema {
        self.schema
    }

    /// Replaces the rows and reports the count in the status line.
    pub fn update_rows(&mut self, rows: Vec<FieldMap>) {
        let count = rows.len();
        let noun = self.schema.noun.to_lowercase();
        self.status = format!(
            "{} {}{} loaded",
            count,
            noun,
            if count == 1 { "" } else { "s" }
        );
        self.rows = rows;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn rows(&self) -> &[FieldMap] {
        &self.rows
    }

    pub fn find(&self, id: RecordId) -> Option<&FieldMap> {
        self.rows.iter().find(|row| record_id(row) == Some(id))
    }

    /// Confirmation question for deleting `id`, or `None` when the row is
    /// not on screen.
    pub fn delete_prompt(&self, id: RecordId) -> Option<String> {
        self.find(id).map(|row| {
            format!(
                "Are you sure you want to delete {} '{}'?",
                self.schema.noun.to_lowercase(),
                self.schema.describe(row)
            )
        })
    }

    /// Renders the header, a rule and one line per row, each column fitted
    /// to the width its schema declares.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return format!("No {} found.\n", self.schema.plural);
        }

        let header: Vec<String> = self
            .schema
            .fields
            .iter()
            .map(|f| fit_cell(f.label, f.width))
            .collect();
        let total_width: usize = self.schema.fields.iter().map(|f| f.width).sum::<usize>()
            + COLUMN_GAP.len() * (self.schema.fields.len() - 1);

        let mut out = String::new();
        out.push_str(header.join(COLUMN_GAP).trim_end());
        out.push('\n');
        out.push_str(&"─".repeat(total_width));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = self
                .schema
                .fields
                .iter()
                .map(|f| fit_cell(row.get(f.name).map(String::as_str).unwrap_or(""), f.width))
                .collect();
            out.push_str(cells.join(COLUMN_GAP).trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field_map;
    use crate::schema::contact::CONTACTS;
    use crate::schema::project::PROJECTS;

    fn contacts() -> Vec<FieldMap> {
        vec![
            field_map(&[("id", "1"), ("first_name", "Dana"), ("last_name", "Levi")]),
            field_map(&[
                ("id", "2"),
                ("first_name", "Avi"),
                ("last_name", "Cohen"),
                ("address", "1 Herzl St\nHaifa"),
            ]),
        ]
    }

    #[test]
    fn starts_ready_and_empty() {
        let view = ListView::new(&CONTACTS);
        assert_eq!(view.status(), "Ready");
        assert_eq!(view.render(), "No contacts found.\n");
    }

    #[test]
    fn status_counts_rows() {
        let mut view = ListView::new(&PROJECTS);
        view.update_rows(vec![field_map(&[("id", "1"), ("customer_name", "Acme")])]);
        assert_eq!(view.status(), "1 project loaded");

        let mut view = ListView::new(&CONTACTS);
        view.update_rows(contacts());
        assert_eq!(view.status(), "2 contacts loaded");
        view.update_rows(Vec::new());
        assert_eq!(view.status(), "0 contacts loaded");
    }

    #[test]
    fn renders_one_line_per_row() {
        let mut view = ListView::new(&CONTACTS);
        view.update_rows(contacts());
        let out = view.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("First name"));
        assert!(lines[2].contains("Dana"));
        assert!(lines[3].contains("1 Herzl St Haifa"));
    }

    #[test]
    fn finds_rows_and_builds_delete_prompt() {
        let mut view = ListView::new(&CONTACTS);
        view.update_rows(contacts());
        assert_eq!(view.find(2).unwrap()["first_name"], "Avi");
        assert_eq!(
            view.delete_prompt(1).as_deref(),
            Some("Are you sure you want to delete contact 'Dana Levi'?")
        );
        assert_eq!(view.delete_prompt(9), None);
    }
}
