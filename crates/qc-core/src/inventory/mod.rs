//! Items, the carried inventory, and equipment slots.
//!
//! Inventories hold item ids, not items: definitions live in the
//! [`ItemCatalog`] loaded from the item data file, and the same id may be
//! carried more than once.

mod equipment;
mod shop;

pub use equipment::{apply_stat_effect, equip_armor, equip_weapon, unequip, use_item};
pub use shop::{purchase, sell, sell_price};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Keyed};
use crate::constants::MAX_INVENTORY_SIZE;
use crate::error::{QcError, QcResult};
use crate::id::ItemId;

/// What an item does when used or equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Occupies the weapon slot.
    Weapon,
    /// Occupies the armor slot.
    Armor,
    /// Used up on use.
    Consumable,
}

impl ItemKind {
    /// The lowercase name used in item data files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Consumable => "consumable",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Ok(Self::Weapon),
            "armor" => Ok(Self::Armor),
            "consumable" => Ok(Self::Consumable),
            other => Err(format!("unknown item type '{other}'")),
        }
    }
}

/// A character attribute an item can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Current health, capped at max health.
    Health,
    /// Maximum health.
    MaxHealth,
    /// Strength.
    Strength,
    /// Magic.
    Magic,
}

impl Stat {
    /// The snake_case name used in item effect strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::MaxHealth => "max_health",
            Self::Strength => "strength",
            Self::Magic => "magic",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "max_health" => Ok(Self::MaxHealth),
            "strength" => Ok(Self::Strength),
            "magic" => Ok(Self::Magic),
            _ => Err(QcError::InvalidItemEffect(format!(
                "unknown stat '{}'",
                s.trim()
            ))),
        }
    }
}

/// A single stat modification, written `stat:value` in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEffect {
    /// The stat to modify.
    pub stat: Stat,
    /// Signed amount added to the stat.
    pub value: i32,
}

impl StatEffect {
    /// Create an effect.
    pub fn new(stat: Stat, value: i32) -> Self {
        Self { stat, value }
    }

    /// The same effect with its sign flipped, used when unequipping.
    pub fn inverse(self) -> Self {
        Self::new(self.stat, self.value.saturating_neg())
    }
}

impl FromStr for StatEffect {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stat, value) = s
            .split_once(':')
            .ok_or_else(|| QcError::InvalidItemEffect(format!("expected stat:value, got '{s}'")))?;
        let stat = stat.parse::<Stat>()?;
        let value = value
            .trim()
            .parse::<i32>()
            .map_err(|_| QcError::InvalidItemEffect(format!("bad value in '{s}'")))?;
        Ok(Self::new(stat, value))
    }
}

impl std::fmt::Display for StatEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.stat, self.value)
    }
}

/// An item definition from the item catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Weapon, armor, or consumable.
    pub kind: ItemKind,
    /// The stat change applied on use or equip.
    pub effect: StatEffect,
    /// Purchase price in gold.
    pub cost: u32,
    /// Flavor text.
    pub description: String,
}

impl Item {
    /// Create an item with an empty description.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        kind: ItemKind,
        effect: StatEffect,
        cost: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            effect,
            cost,
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Keyed for Item {
    type Key = ItemId;

    fn key(&self) -> &ItemId {
        &self.id
    }
}

/// All known items, in data-file order.
pub type ItemCatalog = Catalog<Item>;

/// A bounded bag of item ids. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<ItemId>,
    capacity: usize,
}

impl Inventory {
    /// Create an empty inventory with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_INVENTORY_SIZE)
    }

    /// Create an empty inventory with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Add an item. Fails with [`QcError::InventoryFull`] when no slot is
    /// free.
    pub fn add(&mut self, item: impl Into<ItemId>) -> QcResult<()> {
        if self.is_full() {
            return Err(QcError::InventoryFull {
                capacity: self.capacity,
            });
        }
        self.items.push(item.into());
        Ok(())
    }

    /// Remove one copy of an item. Fails with [`QcError::ItemNotFound`] if it
    /// is not carried.
    pub fn remove(&mut self, item: &str) -> QcResult<ItemId> {
        let pos = self
            .items
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| QcError::ItemNotFound(ItemId::new(item)))?;
        Ok(self.items.remove(pos))
    }

    /// Returns true if at least one copy is carried.
    pub fn has(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Number of copies of an item.
    pub fn count(&self, item: &str) -> usize {
        self.items.iter().filter(|i| *i == item).count()
    }

    /// Free slots.
    pub fn space_remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Returns true if no slot is free.
    pub fn is_full(&self) -> bool {
        self.space_remaining() == 0
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in pickup order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of carried items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// An equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    /// The weapon slot.
    Weapon,
    /// The armor slot.
    Armor,
}

impl EquipSlot {
    /// The item kind this slot accepts.
    pub fn kind(self) -> ItemKind {
        match self {
            Self::Weapon => ItemKind::Weapon,
            Self::Armor => ItemKind::Armor,
        }
    }
}

impl FromStr for EquipSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Ok(Self::Weapon),
            "armor" => Ok(Self::Armor),
            other => Err(format!("unknown equipment slot '{other}'")),
        }
    }
}

/// The items currently worn. Equipped items are not in the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Equipped weapon.
    pub weapon: Option<ItemId>,
    /// Equipped armor.
    pub armor: Option<ItemId>,
}

impl Equipment {
    /// The item in a slot.
    pub fn get(&self, slot: EquipSlot) -> Option<&ItemId> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<ItemId> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }
}
