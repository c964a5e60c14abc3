use crate::commands::{CmdMessage, CmdResult};
use crate::model::FieldMap;
use crate::store::RecordStore;

pub fn run<S: RecordStore + ?Sized>(store: &S, fields: &FieldMap) -> CmdResult {
    match store.create(fields) {
        Ok(id) => CmdResult::default()
            .with_record_id(id)
            .with_message(CmdMessage::success(format!(
                "{} created successfully",
                store.schema().noun
            ))),
        Err(e) => CmdResult::failed(e.to_string()),
    }
}
