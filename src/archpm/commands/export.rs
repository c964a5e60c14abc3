use crate::commands::{CmdMessage, CmdResult};
use crate::store::RecordStore;

/// Serializes every record as a pretty-printed JSON array.
pub fn run<S: RecordStore + ?Sized>(store: &S) -> CmdResult {
    let schema = store.schema();
    let records = match store.try_read_all() {
        Ok(records) => records,
        Err(e) => return CmdResult::failed(format!("Error exporting {}: {}", schema.plural, e)),
    };

    match serde_json::to_string_pretty(&records) {
        Ok(json) => CmdResult::default()
            .with_message(CmdMessage::info(format!(
                "Exported {} {}",
                records.len(),
                schema.plural
            )))
            .with_records(records)
            .with_output(json),
        Err(e) => CmdResult::failed(format!("Serialization error: {}", e)),
    }
}
