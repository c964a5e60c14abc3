use super::{FieldSpec, TableSchema};
use crate::model::FieldMap;

pub const CUSTOMER_NAME: &str = "customer_name";
pub const LOCATION: &str = "location";
pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";
pub const IS_ACTIVE: &str = "is_active";
pub const STATE: &str = "state";

/// Localized tokens used to present the active flag.
pub const YES_TOKEN: &str = "כן";
pub const NO_TOKEN: &str = "לא";

/// Lifecycle labels suggested by the form. Not enforced.
pub const STATE_OPTIONS: [&str; 5] = ["תכנון", "בביצוע", "הושלם", "מושהה", "בוטל"];

const DATE_FIELDS: [&str; 2] = [START_DATE, END_DATE];

pub static PROJECTS: TableSchema = TableSchema {
    table: "projects",
    noun: "Project",
    plural: "projects",
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
            name: CUSTOMER_NAME,
            label: "Customer name",
            column: "TEXT NOT NULL",
            width: 20,
            required: true,
            choices: &[],
        },
        FieldSpec {
            name: LOCATION,
            label: "Location",
            column: "TEXT",
            width: 16,
            required: false,
            choices: &[],
        },
        FieldSpec {
            name: START_DATE,
            label: "Start date",
            column: "TEXT",
            width: 12,
            required: false,
            choices: &[],
        },
        FieldSpec {
            name: END_DATE,
            label: "End date",
            column: "TEXT",
            width: 12,
            required: false,
            choices: &[],
        },
        FieldSpec {
            name: IS_ACTIVE,
            label: "Active",
            column: "BOOLEAN",
            width: 8,
            required: false,
            choices: &[YES_TOKEN, NO_TOKEN],
        },
        FieldSpec {
            name: STATE,
            label: "State",
            column: "TEXT",
            width: 12,
            required: false,
            choices: &STATE_OPTIONS,
        },
    ],
    title_fields: &[CUSTOMER_NAME],
    order_by: "customer_name",
};

/// Validates raw form input for a project. An empty result means valid.
pub fn validate(fields: &FieldMap) -> Vec<String> {
    let mut errors = Vec::new();
    PROJECTS.check_required(fields, &mut errors);

    for name in DATE_FIELDS {
        let value = fields.get(name).map(|s| s.trim()).unwrap_or("");
        if !value.is_empty() && !is_date_shaped(value) {
            errors.push(format!(
                "{} must be in YYYY-MM-DD format",
                PROJECTS.label(name)
            ));
        }
    }

    errors
}

/// True for `DDDD-DD-DD` with ASCII digits. Shape only: `2024-13-00` passes.
// Stricter than "ten characters, two dashes": `20-24-0101` is rejected.
pub fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Coerces form input for the active flag.
pub fn parse_active(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    matches!(value.as_str(), "true" | "1" | "yes" | YES_TOKEN)
}

pub fn active_token(active: bool) -> &'static str {
    if active {
        YES_TOKEN
    } else {
        NO_TOKEN
    }
}
