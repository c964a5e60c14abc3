use super::{field, FieldMap, RecordId};
use crate::schema::project::{
    active_token, parse_active, CUSTOMER_NAME, END_DATE, IS_ACTIVE, LOCATION, START_DATE, STATE,
};
use crate::schema::ID_FIELD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<RecordId>,
    pub customer_name: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub state: String,
}

impl Project {
    /// Builds a project from form input: values trimmed, the active flag
    /// coerced from its textual form, any `id` entry ignored.
    pub fn from_field_map(fields: &FieldMap) -> Self {
        let get = |name: &str| field(fields, name).trim().to_string();
        Self {
            id: None,
            customer_name: get(CUSTOMER_NAME),
            location: get(LOCATION),
            start_date: get(START_DATE),
            end_date: get(END_DATE),
            is_active: parse_active(field(fields, IS_ACTIVE)),
            state: get(STATE),
        }
    }

    /// Display form: the active flag becomes its localized yes/no token.
    pub fn to_field_map(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(
            ID_FIELD.to_string(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        );
        fields.insert(CUSTOMER_NAME.into(), self.customer_name.clone());
        fields.insert(LOCATION.into(), self.location.clone());
        fields.insert(START_DATE.into(), self.start_date.clone());
        fields.insert(END_DATE.into(), self.end_date.clone());
        fields.insert(IS_ACTIVE.into(), active_token(self.is_active).to_string());
        fields.insert(STATE.into(), self.state.clone());
        fields
    }
}
