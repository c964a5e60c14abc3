use crate::commands::{CmdMessage, CmdResult};
use crate::model::RecordId;
use crate::store::RecordStore;

/// Deletes one record. Confirmation is the caller's job.
pub fn run<S: RecordStore + ?Sized>(store: &S, id: RecordId) -> CmdResult {
    match store.delete(id) {
        Ok(()) => CmdResult::default()
            .with_record_id(id)
            .with_message(CmdMessage::success(format!(
                "{} deleted successfully",
                store.schema().noun
            ))),
        Err(e) => CmdResult::failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::model::field_map;
    use crate::store::contacts::ContactStore;
    use crate::store::fixtures::DbFixture;

    #[test]
    fn deletes_once() {
        let fx = DbFixture::new();
        let store = ContactStore::open(fx.db.clone()).unwrap();
        let id = store
            .create(&field_map(&[("first_name", "Dana"), ("last_name", "Levi")]))
            .unwrap();

        assert!(run(&store, id).succeeded());
        assert!(list::run(&store).records.is_empty());

        let again = run(&store, id);
        assert_eq!(again.error(), Some("Contact not found"));
    }
}
