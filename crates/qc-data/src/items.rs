//! Item data files.
//!
//! ```text
//! ITEM_ID: iron_sword
//! NAME: Iron Sword
//! TYPE: weapon
//! EFFECT: strength:5
//! COST: 100
//! DESCRIPTION: A sturdy iron blade.
//! ```

use std::path::Path;

use qc_core::{Item, ItemCatalog, ItemKind, StatEffect};

use crate::blocks::{Block, parse_blocks};
use crate::diagnostics::Diagnostic;
use crate::error::DataResult;
use crate::{Parsed, read_data_file};

const KEYS: &[&str] = &["ITEM_ID", "NAME", "TYPE", "EFFECT", "COST", "DESCRIPTION"];

/// Parse item definitions, collecting every problem.
pub fn parse_items(source: &str) -> Parsed<ItemCatalog> {
    let (blocks, mut diagnostics) = parse_blocks(source);
    let mut catalog = ItemCatalog::new();

    for block in &blocks {
        block.warn_unknown(KEYS, &mut diagnostics);
        let Some(item) = parse_block(block, &mut diagnostics) else {
            continue;
        };
        if let Err(duplicate) = catalog.insert(item) {
            let span = block
                .get("ITEM_ID")
                .map(|f| f.value_span.clone())
                .unwrap_or_default();
            diagnostics.push(
                Diagnostic::error(span, format!("duplicate item id '{}'", duplicate.id))
                    .with_label("already defined earlier in the file"),
            );
        }
    }

    diagnostics.sort_by_key(|d| d.span.start);
    Parsed {
        value: catalog,
        diagnostics,
    }
}

fn parse_block(block: &Block, diagnostics: &mut Vec<Diagnostic>) -> Option<Item> {
    let id = block.require("ITEM_ID", diagnostics);
    let name = block.require("NAME", diagnostics);
    let kind = block.require("TYPE", diagnostics).and_then(|field| {
        field
            .value
            .parse::<ItemKind>()
            .map_err(|e| {
                diagnostics.push(
                    Diagnostic::error(field.value_span.clone(), e)
                        .with_label("expected weapon, armor, or consumable"),
                );
            })
            .ok()
    });
    let effect = block.require("EFFECT", diagnostics).and_then(|field| {
        field
            .value
            .parse::<StatEffect>()
            .map_err(|e| {
                diagnostics.push(
                    Diagnostic::error(field.value_span.clone(), e.to_string())
                        .with_label("expected stat:value, e.g. health:20"),
                );
            })
            .ok()
    });
    let cost = block.require_number("COST", diagnostics);
    let description = block.require("DESCRIPTION", diagnostics);

    if let Some(field) = id
        && field.value.is_empty()
    {
        diagnostics.push(Diagnostic::error(field.value_span.clone(), "ITEM_ID is empty"));
        return None;
    }

    Some(
        Item::new(id?.value.as_str(), name?.value.as_str(), kind?, effect?, cost?)
            .with_description(description?.value.as_str()),
    )
}

/// Load and validate an item data file.
pub fn load_items(path: &Path) -> DataResult<ItemCatalog> {
    let source = read_data_file(path)?;
    parse_items(&source).into_result(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_ITEMS;
    use qc_core::Stat;

    #[test]
    fn parses_default_items() {
        let parsed = parse_items(DEFAULT_ITEMS);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        let catalog = parsed.value;
        assert_eq!(catalog.len(), 3);
        let sword = catalog.get("iron_sword").unwrap();
        assert_eq!(sword.name, "Iron Sword");
        assert_eq!(sword.kind, ItemKind::Weapon);
        assert_eq!(sword.effect, StatEffect::new(Stat::Strength, 5));
        assert_eq!(sword.cost, 100);
        assert_eq!(sword.description, "A sturdy iron blade.");
        assert_eq!(
            catalog.get("leather_armor").unwrap().effect,
            StatEffect::new(Stat::MaxHealth, 10)
        );
    }

    #[test]
    fn reports_bad_type_and_effect() {
        let source = "\
ITEM_ID: amulet
NAME: Amulet
TYPE: trinket
EFFECT: luck:3
COST: 10
DESCRIPTION: Shiny.
";
        let parsed = parse_items(source);
        assert!(parsed.has_errors());
        let spans: Vec<_> = parsed
            .diagnostics
            .iter()
            .map(|d| &source[d.span.clone()])
            .collect();
        assert_eq!(spans, ["trinket", "luck:3"]);
        assert!(parsed.value.is_empty());
    }

    #[test]
    fn duplicate_item_ids() {
        let source = format!("{DEFAULT_ITEMS}\n{DEFAULT_ITEMS}");
        let parsed = parse_items(&source);
        assert_eq!(parsed.diagnostics.len(), 3);
        assert_eq!(parsed.value.len(), 3);
    }
}
