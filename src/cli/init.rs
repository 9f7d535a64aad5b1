use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

pub fn run(data_dir: Option<String>, output_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(dir) = output_dir {
        settings.output_dir = shellexpand_path(&dir);
    }

    std::fs::create_dir_all(PathBuf::from(&settings.data_dir))?;
    save_settings(&settings)?;

    println!("Data dir:   {}", settings.data_dir);
    println!("Output dir: {}", settings.output_dir);
    println!("Saved {}", settings_path().display());
    Ok(())
}
