use crate::commands::{CmdMessage, CmdResult, VfolderPaths};
use crate::config::VfolderConfig;
use crate::error::Result;
use std::fs;

pub fn run(paths: &VfolderPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.data)?;
    if !paths.data.join("config.json").exists() {
        VfolderConfig::default().save(&paths.data)?;
    }
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized vfolder data at {}",
        paths.data.display()
    )));
    Ok(result)
}
