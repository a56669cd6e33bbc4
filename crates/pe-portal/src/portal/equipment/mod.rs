//! Equipment inventory and borrow/return ledger.

pub mod domain;
pub mod ledger;
pub mod repository;
pub mod router;

pub use domain::{standard_inventory, BorrowAction, BorrowLogEntry, EquipmentId, EquipmentItem};
pub use ledger::{EquipmentError, EquipmentLedger};
pub use repository::{EquipmentStore, EquipmentStoreError};
pub use router::equipment_router;
