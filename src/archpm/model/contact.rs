use super::{field, FieldMap, RecordId};
use crate::schema::contact::{ADDRESS, EMAIL, FIRST_NAME, LAST_NAME, PHONE};
use crate::schema::ID_FIELD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// `None` until the row has been inserted.
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Contact {
    /// Builds a contact from form input, trimming every value.
    /// The `id` entry, if any, is ignored: ids are never taken from input.
    pub fn from_field_map(fields: &FieldMap) -> Self {
        let get = |name: &str| field(fields, name).trim().to_string();
        Self {
            id: None,
            first_name: get(FIRST_NAME),
            last_name: get(LAST_NAME),
            phone: get(PHONE),
            email: get(EMAIL),
            address: get(ADDRESS),
        }
    }

    pub fn to_field_map(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(
            ID_FIELD.to_string(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        );
        for (name, value) in self.columns() {
            fields.insert(name.to_string(), value.to_string());
        }
        fields
    }

    /// Persisted values in schema order, without the id.
    pub fn columns(&self) -> [(&'static str, &str); 5] {
        [
            (FIRST_NAME, self.first_name.as_str()),
            (LAST_NAME, self.last_name.as_str()),
            (PHONE, self.phone.as_str()),
            (EMAIL, self.email.as_str()),
            (ADDRESS, self.address.as_str()),
        ]
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
