use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use qc_core::{Character, EquipSlot};
use qc_session::SessionConfig;

pub fn run(config: &SessionConfig, name: &str, json: bool) -> Result<(), String> {
    let character =
        qc_data::load_character(&config.save_dir(), name).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&character).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    print_sheet(&character);
    Ok(())
}

fn print_sheet(c: &Character) {
    let status = if c.is_dead() {
        "dead".red().to_string()
    } else {
        "alive".green().to_string()
    };
    println!("  {} [{}, level {}] {status}", c.name.bold(), c.class, c.level);
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec![
        "Health".to_string(),
        format!("{}/{}", c.stats.health(), c.stats.max_health()),
    ]);
    table.add_row(vec!["Strength".to_string(), c.stats.strength.to_string()]);
    table.add_row(vec!["Magic".to_string(), c.stats.magic.to_string()]);
    table.add_row(vec![
        "Experience".to_string(),
        format!(
            "{}/{}",
            c.experience,
            qc_core::progression::xp_to_next_level(c.level)
        ),
    ]);
    table.add_row(vec!["Gold".to_string(), c.gold.to_string()]);
    println!("{table}");
    println!();

    let equipped = |slot: EquipSlot| {
        c.equipment
            .get(slot)
            .map_or_else(|| "—".to_string(), |id| id.to_string())
    };
    println!("  weapon:     {}", equipped(EquipSlot::Weapon));
    println!("  armor:      {}", equipped(EquipSlot::Armor));
    println!("  inventory:  {}", join_or_dash(c.inventory.items()));
    println!("  active:     {}", join_or_dash(c.quests.active()));
    println!("  completed:  {}", join_or_dash(c.quests.completed()));
}

fn join_or_dash<T: std::fmt::Display>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "—".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
