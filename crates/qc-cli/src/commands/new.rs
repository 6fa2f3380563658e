use colored::Colorize;
use qc_core::{Character, CharacterClass};
use qc_data::save::save_path;
use qc_session::SessionConfig;

pub fn run(config: &SessionConfig, name: &str, class: &str) -> Result<(), String> {
    let class: CharacterClass = class.parse().map_err(|e: qc_core::QcError| e.to_string())?;
    let dir = config.save_dir();

    let path = save_path(&dir, name).map_err(|e| e.to_string())?;
    if path.exists() {
        return Err(format!("character '{name}' already exists"));
    }

    let character = Character::new(name, class);
    qc_data::save_character(&dir, &character).map_err(|e| e.to_string())?;

    println!(
        "  Created {} the {} ({})",
        character.name.bold(),
        character.class,
        character.stats
    );
    println!("  Special ability: {}", class.ability_name());
    Ok(())
}
