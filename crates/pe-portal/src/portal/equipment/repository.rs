use super::domain::{BorrowLogEntry, EquipmentId, EquipmentItem};

/// Storage abstraction for inventory and its borrow ledger.
pub trait EquipmentStore: Send + Sync {
    fn list(&self) -> Result<Vec<EquipmentItem>, EquipmentStoreError>;
    fn fetch(&self, id: &EquipmentId) -> Result<Option<EquipmentItem>, EquipmentStoreError>;
    /// Insert or replace an inventory line.
    fn save(&self, item: EquipmentItem) -> Result<(), EquipmentStoreError>;
    fn append_log(&self, entry: BorrowLogEntry) -> Result<(), EquipmentStoreError>;
    /// Ledger entries, newest first.
    fn logs(&self) -> Result<Vec<BorrowLogEntry>, EquipmentStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EquipmentStoreError {
    #[error("equipment item not found")]
    NotFound,
    #[error("equipment store unavailable: {0}")]
    Unavailable(String),
}
