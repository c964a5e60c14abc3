use crate::commands::{CmdMessage, CmdResult};
use crate::store::RecordStore;
use tracing::warn;

/// Loads every record. A read failure degrades to an empty list plus an
/// error message rather than failing the caller.
pub fn run<S: RecordStore + ?Sized>(store: &S) -> CmdResult {
    let schema = store.schema();
    match store.try_read_all() {
        Ok(records) => CmdResult::default().with_records(records),
        Err(e) => {
            warn!(table = schema.table, error = %e, "list degraded to empty");
            CmdResult::default().with_message(CmdMessage::error(format!(
                "Error loading {}: {}",
                schema.plural, e
            )))
        }
    }
}
