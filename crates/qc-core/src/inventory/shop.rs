//! Buying and selling at the shop.

use super::{Item, ItemCatalog};
use crate::character::Character;
use crate::error::{QcError, QcResult};
use crate::id::ItemId;

/// Gold received for selling an item: half its cost, rounded down.
pub fn sell_price(item: &Item) -> u32 {
    item.cost / 2
}

/// Buy one copy of an item. Fails without changing anything if the
/// character cannot afford it or has no free slot.
pub fn purchase(character: &mut Character, catalog: &ItemCatalog, id: &str) -> QcResult<()> {
    let item = catalog
        .get(id)
        .ok_or_else(|| QcError::ItemNotFound(ItemId::new(id)))?;
    if character.gold < item.cost {
        return Err(QcError::InsufficientGold {
            required: u64::from(item.cost),
            available: u64::from(character.gold),
        });
    }
    character.inventory.add(item.id.clone())?;
    character.gold -= item.cost;
    Ok(())
}

/// Sell one carried copy of an item. Returns the gold received.
pub fn sell(character: &mut Character, catalog: &ItemCatalog, id: &str) -> QcResult<u32> {
    if !character.inventory.has(id) {
        return Err(QcError::ItemNotFound(ItemId::new(id)));
    }
    let item = catalog
        .get(id)
        .ok_or_else(|| QcError::ItemNotFound(ItemId::new(id)))?;
    let price = sell_price(item);
    character.inventory.remove(id)?;
    character.gold = character.gold.saturating_add(price);
    Ok(price)
}
