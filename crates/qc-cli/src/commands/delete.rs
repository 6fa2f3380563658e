use qc_session::SessionConfig;

pub fn run(config: &SessionConfig, name: &str) -> Result<(), String> {
    qc_data::delete_character(&config.save_dir(), name).map_err(|e| e.to_string())?;
    println!("  Deleted '{name}'.");
    Ok(())
}
