use crate::commands::CmdResult;
use crate::model::RecordId;
use crate::store::RecordStore;

/// Loads one record for viewing or editing.
pub fn run<S: RecordStore + ?Sized>(store: &S, id: RecordId) -> CmdResult {
    match store.read_one(id) {
        Ok(Some(record)) => CmdResult::default()
            .with_record_id(id)
            .with_records(vec![record]),
        Ok(None) => CmdResult::failed(format!("{} not found", store.schema().noun)),
        Err(e) => CmdResult::failed(e.to_string()),
    }
}
