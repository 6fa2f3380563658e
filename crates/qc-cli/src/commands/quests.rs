use comfy_table::{ContentArrangement, Table};
use qc_session::SessionConfig;

pub fn run(config: &SessionConfig) -> Result<(), String> {
    let book = qc_data::load_quests(&config.quests_path()).map_err(super::report)?;

    if book.is_empty() {
        println!("  No quests defined.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Level", "Rewards", "Chain"]);

    for quest in &book {
        let chain = book
            .prerequisite_chain(&quest.id)
            .map_err(|e| e.to_string())?
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        table.add_row(vec![
            quest.id.to_string(),
            quest.title.clone(),
            quest.required_level.to_string(),
            quest.rewards().to_string(),
            chain,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} quests", book.len());

    Ok(())
}
