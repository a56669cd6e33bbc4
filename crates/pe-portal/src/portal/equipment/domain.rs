use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for inventory items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub String);

/// One inventory line in the PE storeroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: EquipmentId,
    pub name: String,
    pub stock: u32,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowAction {
    Borrow,
    Return,
}

impl BorrowAction {
    pub const fn label(self) -> &'static str {
        match self {
            BorrowAction::Borrow => "borrow",
            BorrowAction::Return => "return",
        }
    }
}

/// Append-only ledger entry written for every borrow and return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowLogEntry {
    pub item_name: String,
    pub action: BorrowAction,
    pub actor: String,
    pub at: DateTime<Utc>,
}

/// The storeroom's standing inventory, as seeded by the teacher console.
pub fn standard_inventory() -> Vec<EquipmentItem> {
    vec![
        EquipmentItem {
            id: EquipmentId("badminton-rackets".to_string()),
            name: "Badminton rackets".to_string(),
            stock: 20,
            location: "Cabinet A".to_string(),
        },
        EquipmentItem {
            id: EquipmentId("basketballs-size5".to_string()),
            name: "Basketballs (size 5)".to_string(),
            stock: 15,
            location: "Rack B".to_string(),
        },
        EquipmentItem {
            id: EquipmentId("soccer-balls".to_string()),
            name: "Soccer balls".to_string(),
            stock: 12,
            location: "Rack C".to_string(),
        },
        EquipmentItem {
            id: EquipmentId("squash-rackets".to_string()),
            name: "Squash rackets".to_string(),
            stock: 10,
            location: "Cabinet D".to_string(),
        },
    ]
}
