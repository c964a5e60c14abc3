use crate::commands::{CmdMessage, CmdResult};
use crate::model::{FieldMap, RecordId};
use crate::store::RecordStore;

pub fn run<S: RecordStore + ?Sized>(store: &S, id: RecordId, fields: &FieldMap) -> CmdResult {
    match store.update(id, fields) {
        Ok(()) => CmdResult::default()
            .with_record_id(id)
            .with_message(CmdMessage::success(format!(
                "{} updated successfully",
                store.schema().noun
            ))),
        Err(e) => CmdResult::failed(e.to_string()),
    }
}
