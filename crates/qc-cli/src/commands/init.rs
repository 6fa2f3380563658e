use qc_session::SessionConfig;

pub fn run(config: &SessionConfig) -> Result<(), String> {
    let dir = config.data_dir();
    let written = qc_data::create_default_data_files(dir).map_err(|e| e.to_string())?;

    if written.is_empty() {
        println!("  Data files already present in {}/", dir.display());
        return Ok(());
    }

    println!("Created data files in {}/", dir.display());
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("  {}", name.to_string_lossy());
        }
    }
    println!();
    println!("Get started:");
    println!("  qc new <name> <class>   # warrior, mage, rogue, or cleric");
    println!("  qc play <name>          # Start an adventure");

    Ok(())
}
