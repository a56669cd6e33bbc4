use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{BorrowAction, BorrowLogEntry, EquipmentId, EquipmentItem};
use super::repository::{EquipmentStore, EquipmentStoreError};

/// Ledger service over the equipment store: every stock movement writes an
/// append-only log entry alongside the stock change.
pub struct EquipmentLedger<S> {
    store: Arc<S>,
}

impl<S> EquipmentLedger<S>
where
    S: EquipmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn inventory(&self) -> Result<Vec<EquipmentItem>, EquipmentError> {
        Ok(self.store.list()?)
    }

    pub fn logs(&self) -> Result<Vec<BorrowLogEntry>, EquipmentError> {
        Ok(self.store.logs()?)
    }

    /// Replace the inventory with the given seed set. Used by the teacher
    /// console's "reset equipment database" tool.
    pub fn seed(&self, items: Vec<EquipmentItem>) -> Result<usize, EquipmentError> {
        let count = items.len();
        for item in items {
            self.store.save(item)?;
        }
        Ok(count)
    }

    /// Borrow one unit. Fails when nothing is left on the shelf.
    pub fn borrow(&self, id: &EquipmentId, actor: &str) -> Result<EquipmentItem, EquipmentError> {
        let mut item = self
            .store
            .fetch(id)?
            .ok_or(EquipmentStoreError::NotFound)?;

        if item.stock == 0 {
            return Err(EquipmentError::OutOfStock {
                name: item.name.clone(),
            });
        }

        item.stock -= 1;
        self.store.save(item.clone())?;
        self.append_log(&item, BorrowAction::Borrow, actor)?;
        Ok(item)
    }

    /// Return one unit. Returns are always accepted.
    pub fn return_item(
        &self,
        id: &EquipmentId,
        actor: &str,
    ) -> Result<EquipmentItem, EquipmentError> {
        let mut item = self
            .store
            .fetch(id)?
            .ok_or(EquipmentStoreError::NotFound)?;

        item.stock += 1;
        self.store.save(item.clone())?;
        self.append_log(&item, BorrowAction::Return, actor)?;
        Ok(item)
    }

    fn append_log(
        &self,
        item: &EquipmentItem,
        action: BorrowAction,
        actor: &str,
    ) -> Result<(), EquipmentError> {
        self.store.append_log(BorrowLogEntry {
            item_name: item.name.clone(),
            action,
            actor: actor.to_string(),
            at: Utc::now(),
        })?;
        info!(item = %item.name, action = action.label(), %actor, "equipment ledger updated");
        Ok(())
    }
}

/// Error raised by the equipment ledger.
#[derive(Debug, thiserror::Error)]
pub enum EquipmentError {
    #[error("'{name}' is out of stock")]
    OutOfStock { name: String },
    #[error(transparent)]
    Store(#[from] EquipmentStoreError),
}
