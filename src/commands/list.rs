//! `--list` handler

use anyhow::Result;

use crate::ui::views::list::{render_task_list, render_task_list_json};

pub fn cmd_list(json: bool) -> Result<()> {
    if json {
        println!("{}", render_task_list_json());
    } else {
        print!("{}", render_task_list());
    }
    Ok(())
}
