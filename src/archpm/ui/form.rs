use crate::error::{ArchpmError, Result};
use crate::model::{field, FieldMap, RecordId};
use crate::schema::{FieldSpec, TableSchema, ID_FIELD};

/// User actions raised by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Save(FieldMap),
    Cancel,
}

/// Modal editor for a single record.
///
/// A form is either blank (adding) or pre-populated from an existing record
/// (editing), in which case it remembers the record's id. The id itself is
/// never an editable field.
#[derive(Debug, Clone)]
pub struct FormView {
    schema: &'static TableSchema,
    record_id: Option<RecordId>,
    values: FieldMap,
}

impl FormView {
    pub fn for_new(schema: &'static TableSchema) -> Self {
        let mut form = Self {
            schema,
            record_id: None,
            values: FieldMap::new(),
        };
        form.set_form_data(&FieldMap::new());
        form
    }

    pub fn for_edit(schema: &'static TableSchema, id: RecordId, record: &FieldMap) -> Self {
        let mut form = Self {
            schema,
            record_id: Some(id),
            values: FieldMap::new(),
        };
        form.set_form_data(record);
        form
    }

    pub fn schema(&self) -> &'static TableSchema {
        self.schema
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    pub fn title(&self) -> String {
        let verb = if self.record_id.is_some() { "Edit" } else { "Add" };
        format!("{} {}", verb, self.schema.noun)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.schema.fields.iter().filter(|f| f.name != ID_FIELD)
    }

    /// Replaces every editable value; fields missing from `data` are cleared.
    pub fn set_form_data(&mut self, data: &FieldMap) {
        self.values = self
            .fields()
            .map(|f| (f.name.to_string(), field(data, f.name).to_string()))
            .collect();
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(ArchpmError::Api(format!(
                "Unknown field '{}' for {}",
                name, self.schema.plural
            ))),
        }
    }

    pub fn value(&self, name: &str) -> &str {
        field(&self.values, name)
    }

    /// Current input, trimmed, for every editable field.
    pub fn get_form_data(&self) -> FieldMap {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .collect()
    }

    pub fn save(&self) -> FormEvent {
        FormEvent::Save(self.get_form_data())
    }

    pub fn cancel(&self) -> FormEvent {
        FormEvent::Cancel
    }

    /// Text rendering for editing in an external editor.
    ///
    /// One `name: value` line per field; multi-line values continue on
    /// indented lines, with blank lines kept as empty lines. Lines starting
    /// with `#` are comments.
    pub fn to_buffer(&self) -> String {
        let mut out = format!("# {}\n", self.title());
        out.push_str("# One `field: value` per line. Indent a line to continue the value above.\n");
        let required: Vec<&str> = self.schema.required_fields().map(|f| f.name).collect();
        if !required.is_empty() {
            out.push_str(&format!("# Required: {}\n", required.join(", ")));
        }
        for spec in self.fields().filter(|f| !f.choices.is_empty()) {
            out.push_str(&format!("# {}: {}\n", spec.name, spec.choices.join(", ")));
        }
        out.push('\n');

        for spec in self.fields() {
            let mut lines = self.value(spec.name).lines();
            match lines.next() {
                Some(first) => out.push_str(&format!("{}: {}\n", spec.name, first)),
                None => out.push_str(&format!("{}:\n", spec.name)),
            }
            for line in lines {
                if line.trim().is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(&format!("  {}\n", line));
                }
            }
        }
        out
    }

    /// Parses an edited buffer back into the form. Fields absent from the
    /// buffer keep their current values.
    ///
    /// Blank lines belong to the value above only when an indented line
    /// follows them; otherwise they separate fields.
    pub fn from_buffer(&mut self, buffer: &str) -> Result<()> {
        let mut parsed: Vec<(String, String)> = Vec::new();
        let mut pending_blanks = 0;

        for (n, line) in buffer.lines().enumerate() {
            if line.trim().is_empty() {
                pending_blanks += 1;
                continue;
            }
            if line.starts_with('#') {
                pending_blanks = 0;
                continue;
            }
            if line.starts_with(' ') || line.starts_with('\t') {
                let (_, value) = parsed.last_mut().ok_or_else(|| {
                    ArchpmError::Api(format!("Line {}: continuation without a field", n + 1))
                })?;
                for _ in 0..=pending_blanks {
                    value.push('\n');
                }
                value.push_str(line.trim());
                pending_blanks = 0;
                continue;
            }
            pending_blanks = 0;
            let (name, value) = line.split_once(':').ok_or_else(|| {
                ArchpmError::Api(format!("Line {}: expected `field: value`", n + 1))
            })?;
            let name = name.trim();
            if !self.values.contains_key(name) {
                return Err(ArchpmError::Api(format!(
                    "Line {}: unknown field '{}' for {}",
                    n + 1,
                    name,
                    self.schema.plural
                )));
            }
            parsed.push((name.to_string(), value.trim().to_string()));
        }

        for (name, value) in parsed {
            self.set_field(&name, value)?;
        }
        Ok(())
    }
}
