use comfy_table::{ContentArrangement, Table};
use qc_session::SessionConfig;

pub fn run(config: &SessionConfig) -> Result<(), String> {
    let dir = config.save_dir();
    let names = qc_data::list_saved_characters(&dir).map_err(|e| e.to_string())?;

    if names.is_empty() {
        println!("  No saved characters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Class", "Level", "Gold"]);

    for name in &names {
        match qc_data::load_character(&dir, name) {
            Ok(c) => {
                table.add_row(vec![
                    c.name,
                    c.class.to_string(),
                    c.level.to_string(),
                    c.gold.to_string(),
                ]);
            }
            Err(_) => {
                table.add_row(vec![
                    name.clone(),
                    "(unreadable)".into(),
                    "—".into(),
                    "—".into(),
                ]);
            }
        }
    }

    println!("{table}");
    println!();
    println!(
        "  {} character{}",
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
