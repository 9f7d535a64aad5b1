use crate::error::Result;
use crate::settings::{load_settings, settings_path};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let path = settings_path();

    println!(
        "Settings:   {}{}",
        path.display(),
        if path.exists() { "" } else { " (not saved, using defaults)" }
    );
    println!("Data dir:   {}", settings.data_dir);
    println!("Output dir: {}", settings.output_dir);
    Ok(())
}
