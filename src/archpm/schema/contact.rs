use super::{FieldSpec, TableSchema};
use crate::model::FieldMap;

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";
pub const ADDRESS: &str = "address";

pub static CONTACTS: TableSchema = TableSchema {
    table: "contacts",
    noun: "Contact",
    plural: "contacts",
    fields: &[
        FieldSpec {
            name: "id",
            label: "ID",
            column: "INTEGER PRIMARY KEY AUTOINCREMENT",
            width: 5,
            required: false,
            choices: &[],
        },
        FieldSpec {
            name: FIRST_NAME,
            label: "First name",
            column: "TEXT NOT NULL",
            width: 14,
            required: true,
            choices: &[],
        },
        FieldSpec {
            name: LAST_NAME,
            label: "Last name",
            column: "TEXT NOT NULL",
            width: 14,
            required: true,
            choices: &[],
        },
        FieldSpec {
            name: PHONE,
            label: "Phone",
            column: "TEXT",
            width: 14,
            required: false,
            choices: &[],
        },
        FieldSpec {
            name: EMAIL,
            label: "Email",
            column: "TEXT",
            width: 24,
            required: false,
            choices: &[],
        },
        FieldSpec {
            name: ADDRESS,
            label: "Address",
            column: "TEXT",
            width: 24,
            required: false,
            choices: &[],
        },
    ],
    title_fields: &[FIRST_NAME, LAST_NAME],
    order_by: "last_name, first_name",
};

/// Validates raw form input for a contact. An empty result means valid.
pub fn validate(fields: &FieldMap) -> Vec<String> {
    let mut errors = Vec::new();
    CONTACTS.check_required(fields, &mut errors);

    let email = fields.get(EMAIL).map(|s| s.trim()).unwrap_or("");
    if !email.is_empty() && !email.contains('@') {
        errors.push("Email address must contain '@' symbol".to_string());
    }

    errors
}
