//! Using consumables and swapping equipment.

use super::{EquipSlot, Item, ItemCatalog, ItemKind, Stat, StatEffect};
use crate::character::Character;
use crate::error::{QcError, QcResult};
use crate::id::ItemId;
use crate::stats::adjust;

/// Apply a stat effect to a character. Health changes stay within
/// `0..=max_health`; other stats saturate at zero.
pub fn apply_stat_effect(character: &mut Character, effect: StatEffect) {
    let stats = &mut character.stats;
    let delta = i64::from(effect.value);
    match effect.stat {
        Stat::Health => {
            let amount = effect.value.unsigned_abs();
            if effect.value >= 0 {
                stats.heal(amount);
            } else {
                stats.take_damage(amount);
            }
        }
        Stat::MaxHealth => stats.adjust_max_health(delta),
        Stat::Strength => stats.strength = adjust(stats.strength, delta),
        Stat::Magic => stats.magic = adjust(stats.magic, delta),
    }
}

/// Consume one carried copy of a consumable and apply its effect.
///
/// Returns the effect applied.
pub fn use_item(
    character: &mut Character,
    catalog: &ItemCatalog,
    id: &str,
) -> QcResult<StatEffect> {
    let item = carried_item(character, catalog, id, ItemKind::Consumable)?;
    let effect = item.effect;
    character.inventory.remove(id)?;
    apply_stat_effect(character, effect);
    Ok(effect)
}

/// Equip a carried weapon. A previously equipped weapon goes back to the
/// inventory with its bonus removed; its id is returned.
pub fn equip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
    id: &str,
) -> QcResult<Option<ItemId>> {
    equip(character, catalog, id, EquipSlot::Weapon)
}

/// Equip carried armor. Previously equipped armor goes back to the
/// inventory with its bonus removed; its id is returned.
pub fn equip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
    id: &str,
) -> QcResult<Option<ItemId>> {
    equip(character, catalog, id, EquipSlot::Armor)
}

fn equip(
    character: &mut Character,
    catalog: &ItemCatalog,
    id: &str,
    slot: EquipSlot,
) -> QcResult<Option<ItemId>> {
    let item = carried_item(character, catalog, id, slot.kind())?;
    let previous = match character.equipment.get(slot) {
        Some(old) => Some(lookup(catalog, old.as_str())?),
        None => None,
    };

    ensure_reversible(character, item, previous)?;

    // Taking the new item out first frees the slot the old one returns to.
    let new_id = character.inventory.remove(id)?;
    let previous_id = match previous {
        Some(old) => {
            apply_stat_effect(character, old.effect.inverse());
            character.inventory.add(old.id.clone())?;
            Some(old.id.clone())
        }
        None => None,
    };
    apply_stat_effect(character, item.effect);
    *character.equipment.slot_mut(slot) = Some(new_id);
    Ok(previous_id)
}

/// Take off whatever is in a slot and return it to the inventory.
///
/// Returns `Ok(None)` for an empty slot. A full inventory fails with
/// [`QcError::InventoryFull`] and leaves the item equipped.
pub fn unequip(
    character: &mut Character,
    catalog: &ItemCatalog,
    slot: EquipSlot,
) -> QcResult<Option<ItemId>> {
    let Some(id) = character.equipment.get(slot).cloned() else {
        return Ok(None);
    };
    if character.inventory.is_full() {
        return Err(QcError::InventoryFull {
            capacity: character.inventory.capacity(),
        });
    }
    let effect = lookup(catalog, id.as_str())?.effect;
    apply_stat_effect(character, effect.inverse());
    character.inventory.add(id.clone())?;
    *character.equipment.slot_mut(slot) = None;
    Ok(Some(id))
}

/// Equipment bonuses must come off exactly as they went on, so an item may
/// not push strength or magic below zero, or max health below one.
fn ensure_reversible(character: &Character, item: &Item, previous: Option<&Item>) -> QcResult<()> {
    let effect = item.effect;
    let stats = &character.stats;
    let (current, floor) = match effect.stat {
        Stat::Health => return Ok(()),
        Stat::MaxHealth => (stats.max_health(), 1),
        Stat::Strength => (stats.strength, 0),
        Stat::Magic => (stats.magic, 0),
    };
    let mut value = i64::from(current) + i64::from(effect.value);
    if let Some(old) = previous
        && old.effect.stat == effect.stat
    {
        value -= i64::from(old.effect.value);
    }
    if value < floor {
        return Err(QcError::InvalidItemEffect(format!(
            "equipping {} would lower {} below {floor}",
            item.name, effect.stat
        )));
    }
    Ok(())
}

fn lookup<'a>(catalog: &'a ItemCatalog, id: &str) -> QcResult<&'a Item> {
    catalog
        .get(id)
        .ok_or_else(|| QcError::ItemNotFound(ItemId::new(id)))
}

fn carried_item<'a>(
    character: &Character,
    catalog: &'a ItemCatalog,
    id: &str,
    expected: ItemKind,
) -> QcResult<&'a Item> {
    if !character.inventory.has(id) {
        return Err(QcError::ItemNotFound(ItemId::new(id)));
    }
    let item = lookup(catalog, id)?;
    if item.kind != expected {
        return Err(QcError::InvalidItemType {
            item: item.id.clone(),
            expected,
        });
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;

    fn catalog() -> ItemCatalog {
        [
            Item::new(
                "health_potion",
                "Health Potion",
                ItemKind::Consumable,
                StatEffect::new(Stat::Health, 20),
                25,
            ),
            Item::new(
                "iron_sword",
                "Iron Sword",
                ItemKind::Weapon,
                StatEffect::new(Stat::Strength, 5),
                100,
            ),
            Item::new(
                "steel_sword",
                "Steel Sword",
                ItemKind::Weapon,
                StatEffect::new(Stat::Strength, 9),
                200,
            ),
            Item::new(
                "leather_armor",
                "Leather Armor",
                ItemKind::Armor,
                StatEffect::new(Stat::MaxHealth, 10),
                80,
            ),
        ]
        .into_iter()
        .collect()
    }

    fn hero() -> Character {
        Character::new("Hero", CharacterClass::Warrior)
    }

    #[test]
    fn potion_heals_and_is_consumed() {
        let mut c = hero();
        c.stats.take_damage(50);
        c.inventory.add("health_potion").unwrap();
        let effect = use_item(&mut c, &catalog(), "health_potion").unwrap();
        assert_eq!(effect.value, 20);
        assert_eq!(c.stats.health(), 90);
        assert!(!c.inventory.has("health_potion"));
    }

    #[test]
    fn potion_heal_is_capped() {
        let mut c = hero();
        c.stats.take_damage(5);
        c.inventory.add("health_potion").unwrap();
        use_item(&mut c, &catalog(), "health_potion").unwrap();
        assert!(c.stats.is_full());
    }

    #[test]
    fn cannot_use_weapon() {
        let mut c = hero();
        c.inventory.add("iron_sword").unwrap();
        assert_eq!(
            use_item(&mut c, &catalog(), "iron_sword"),
            Err(QcError::InvalidItemType {
                item: ItemId::new("iron_sword"),
                expected: ItemKind::Consumable,
            })
        );
        assert!(c.inventory.has("iron_sword"));
    }

    #[test]
    fn use_missing_item() {
        let mut c = hero();
        assert!(matches!(
            use_item(&mut c, &catalog(), "health_potion"),
            Err(QcError::ItemNotFound(_))
        ));
    }

    #[test]
    fn equip_and_swap_weapon() {
        let items = catalog();
        let mut c = hero();
        c.inventory.add("iron_sword").unwrap();
        c.inventory.add("steel_sword").unwrap();

        assert_eq!(equip_weapon(&mut c, &items, "iron_sword").unwrap(), None);
        assert_eq!(c.stats.strength, 20);
        assert_eq!(c.equipment.weapon.as_deref(), Some("iron_sword"));
        assert!(!c.inventory.has("iron_sword"));

        let previous = equip_weapon(&mut c, &items, "steel_sword").unwrap();
        assert_eq!(previous.as_deref(), Some("iron_sword"));
        assert_eq!(c.stats.strength, 24);
        assert!(c.inventory.has("iron_sword"));
        assert!(!c.inventory.has("steel_sword"));
    }

    #[test]
    fn swap_with_full_inventory() {
        let items = catalog();
        let mut c = hero();
        c.inventory = crate::inventory::Inventory::with_capacity(1);
        c.inventory.add("iron_sword").unwrap();
        equip_weapon(&mut c, &items, "iron_sword").unwrap();
        c.inventory.add("steel_sword").unwrap();
        equip_weapon(&mut c, &items, "steel_sword").unwrap();
        assert_eq!(c.inventory.items(), ["iron_sword"]);
    }

    #[test]
    fn equip_armor_raises_max_health() {
        let items = catalog();
        let mut c = hero();
        c.inventory.add("leather_armor").unwrap();
        equip_armor(&mut c, &items, "leather_armor").unwrap();
        assert_eq!(c.stats.max_health(), 130);
        assert!(matches!(
            equip_armor(&mut c, &items, "iron_sword"),
            Err(QcError::ItemNotFound(_))
        ));
    }

    #[test]
    fn equip_wrong_slot() {
        let items = catalog();
        let mut c = hero();
        c.inventory.add("leather_armor").unwrap();
        assert!(matches!(
            equip_weapon(&mut c, &items, "leather_armor"),
            Err(QcError::InvalidItemType { expected: ItemKind::Weapon, .. })
        ));
    }

    #[test]
    fn unequip_returns_item() {
        let items = catalog();
        let mut c = hero();
        assert_eq!(unequip(&mut c, &items, EquipSlot::Armor).unwrap(), None);

        c.inventory.add("leather_armor").unwrap();
        equip_armor(&mut c, &items, "leather_armor").unwrap();
        let removed = unequip(&mut c, &items, EquipSlot::Armor).unwrap();
        assert_eq!(removed.as_deref(), Some("leather_armor"));
        assert_eq!(c.stats.max_health(), 120);
        assert!(c.equipment.armor.is_none());
        assert!(c.inventory.has("leather_armor"));
    }

    #[test]
    fn unequip_full_inventory_keeps_item() {
        let items = catalog();
        let mut c = hero();
        c.inventory = crate::inventory::Inventory::with_capacity(1);
        c.inventory.add("iron_sword").unwrap();
        equip_weapon(&mut c, &items, "iron_sword").unwrap();
        c.inventory.add("health_potion").unwrap();

        assert_eq!(
            unequip(&mut c, &items, EquipSlot::Weapon),
            Err(QcError::InventoryFull { capacity: 1 })
        );
        assert_eq!(c.stats.strength, 20);
        assert_eq!(c.equipment.weapon.as_deref(), Some("iron_sword"));
    }

    fn cursed_catalog() -> ItemCatalog {
        [
            Item::new(
                "cursed_blade",
                "Cursed Blade",
                ItemKind::Weapon,
                StatEffect::new(Stat::Strength, -20),
                10,
            ),
            Item::new(
                "rusty_blade",
                "Rusty Blade",
                ItemKind::Weapon,
                StatEffect::new(Stat::Strength, -3),
                5,
            ),
            Item::new(
                "hair_shirt",
                "Hair Shirt",
                ItemKind::Armor,
                StatEffect::new(Stat::MaxHealth, -80),
                5,
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn penalty_beyond_stat_is_refused() {
        let items = cursed_catalog();
        let mut c = Character::new("Aria", CharacterClass::Mage);
        c.inventory.add("cursed_blade").unwrap();
        c.inventory.add("hair_shirt").unwrap();
        let before = c.clone();

        assert!(matches!(
            equip_weapon(&mut c, &items, "cursed_blade"),
            Err(QcError::InvalidItemEffect(_))
        ));
        assert!(matches!(
            equip_armor(&mut c, &items, "hair_shirt"),
            Err(QcError::InvalidItemEffect(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn penalty_round_trip_restores_stat() {
        let items = cursed_catalog();
        let mut c = Character::new("Aria", CharacterClass::Mage);
        c.inventory.add("rusty_blade").unwrap();

        equip_weapon(&mut c, &items, "rusty_blade").unwrap();
        assert_eq!(c.stats.strength, 5);
        unequip(&mut c, &items, EquipSlot::Weapon).unwrap();
        assert_eq!(c.stats.strength, 8);
    }

    #[test]
    fn swap_counts_outgoing_bonus() {
        let mut items = catalog();
        items
            .insert(Item::new(
                "heavy_blade",
                "Heavy Blade",
                ItemKind::Weapon,
                StatEffect::new(Stat::Strength, -17),
                5,
            ))
            .unwrap();
        let mut c = hero();
        c.inventory.add("iron_sword").unwrap();
        c.inventory.add("heavy_blade").unwrap();
        equip_weapon(&mut c, &items, "iron_sword").unwrap();
        assert_eq!(c.stats.strength, 20);

        // 20 - 5 - 17 < 0 even though 20 - 17 is not.
        assert!(matches!(
            equip_weapon(&mut c, &items, "heavy_blade"),
            Err(QcError::InvalidItemEffect(_))
        ));
        assert_eq!(c.stats.strength, 20);
        assert_eq!(c.equipment.weapon.as_deref(), Some("iron_sword"));
    }

    #[test]
    fn negative_health_effect_damages() {
        let mut c = hero();
        apply_stat_effect(&mut c, StatEffect::new(Stat::Health, -30));
        assert_eq!(c.stats.health(), 90);
        apply_stat_effect(&mut c, StatEffect::new(Stat::Magic, -100));
        assert_eq!(c.stats.magic, 0);
    }
}
