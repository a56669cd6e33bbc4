//! Integration specifications for the equipment borrow ledger.

mod common {
    use std::sync::{Arc, Mutex};

    use pe_portal::portal::equipment::{
        standard_inventory, BorrowLogEntry, EquipmentId, EquipmentItem, EquipmentLedger,
        EquipmentStore, EquipmentStoreError,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryStore {
        items: Arc<Mutex<Vec<EquipmentItem>>>,
        log: Arc<Mutex<Vec<BorrowLogEntry>>>,
    }

    impl EquipmentStore for MemoryStore {
        fn list(&self) -> Result<Vec<EquipmentItem>, EquipmentStoreError> {
            Ok(self.items.lock().expect("lock").clone())
        }

        fn fetch(&self, id: &EquipmentId) -> Result<Option<EquipmentItem>, EquipmentStoreError> {
            let guard = self.items.lock().expect("lock");
            Ok(guard.iter().find(|item| &item.id == id).cloned())
        }

        fn save(&self, item: EquipmentItem) -> Result<(), EquipmentStoreError> {
            let mut guard = self.items.lock().expect("lock");
            match guard.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => guard.push(item),
            }
            Ok(())
        }

        fn append_log(&self, entry: BorrowLogEntry) -> Result<(), EquipmentStoreError> {
            self.log.lock().expect("lock").push(entry);
            Ok(())
        }

        fn logs(&self) -> Result<Vec<BorrowLogEntry>, EquipmentStoreError> {
            Ok(self.log.lock().expect("lock").clone())
        }
    }

    pub(super) fn seeded_ledger() -> EquipmentLedger<MemoryStore> {
        let ledger = EquipmentLedger::new(Arc::new(MemoryStore::default()));
        ledger.seed(standard_inventory()).expect("seed succeeds");
        ledger
    }
}

mod ledger {
    use super::common::*;
    use pe_portal::portal::equipment::{BorrowAction, EquipmentError, EquipmentId};

    #[test]
    fn borrow_and_return_adjust_stock_and_log() {
        let ledger = seeded_ledger();
        let id = EquipmentId("soccer-balls".to_string());

        let after_borrow = ledger.borrow(&id, "6A PE class").expect("borrow succeeds");
        assert_eq!(after_borrow.stock, 11);

        let after_return = ledger
            .return_item(&id, "6A PE class")
            .expect("return succeeds");
        assert_eq!(after_return.stock, 12);

        let logs = ledger.logs().expect("logs");
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, BorrowAction::Borrow);
        assert_eq!(logs[1].action, BorrowAction::Return);
        assert!(logs.iter().all(|entry| entry.actor == "6A PE class"));
    }

    #[test]
    fn borrowing_past_zero_is_rejected() {
        let ledger = seeded_ledger();
        let id = EquipmentId("squash-rackets".to_string());

        for _ in 0..10 {
            ledger.borrow(&id, "squad").expect("stock available");
        }

        match ledger.borrow(&id, "squad") {
            Err(EquipmentError::OutOfStock { name }) => {
                assert_eq!(name, "Squash rackets");
            }
            other => panic!("expected out-of-stock rejection, got {other:?}"),
        }

        // Ten successful borrows, the failed one leaves no log entry.
        assert_eq!(ledger.logs().expect("logs").len(), 10);
    }

    #[test]
    fn unknown_item_is_reported_as_missing() {
        let ledger = seeded_ledger();
        let id = EquipmentId("cricket-bats".to_string());

        assert!(ledger.borrow(&id, "anyone").is_err());
        assert!(ledger.return_item(&id, "anyone").is_err());
    }

    #[test]
    fn reseeding_restores_the_standard_counts() {
        let ledger = seeded_ledger();
        let id = EquipmentId("basketballs-size5".to_string());
        ledger.borrow(&id, "6B PE class").expect("borrow succeeds");

        let count = ledger
            .seed(pe_portal::portal::equipment::standard_inventory())
            .expect("reseed succeeds");
        assert_eq!(count, 4);

        let inventory = ledger.inventory().expect("inventory");
        let basketballs = inventory
            .iter()
            .find(|item| item.id == id)
            .expect("item present");
        assert_eq!(basketballs.stock, 15);
    }
}
