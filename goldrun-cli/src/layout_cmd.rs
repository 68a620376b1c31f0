//! Layout command - print or export a board layout
//!
//! - Level 1: run() - orchestration
//! - Level 2: select_layout(), emit_layout()

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use goldrun_core::{render_board, Layout};

use crate::config::load_layout;

#[derive(Args)]
pub struct LayoutArgs {
    /// Layout JSON file to check and show (defaults to the classic board)
    #[arg(long, value_name = "FILE", conflicts_with = "open")]
    pub layout: Option<PathBuf>,

    /// Use an empty board of this size instead
    #[arg(long, value_name = "SIZE")]
    pub open: Option<i16>,

    /// Write the layout JSON here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also draw the board
    #[arg(long)]
    pub render: bool,
}

/// Run layout command
pub fn run(args: LayoutArgs) -> Result<()> {
    let layout = select_layout(&args)?;
    emit_layout(&layout, &args)
}

fn select_layout(args: &LayoutArgs) -> Result<Layout> {
    let layout = match args.open {
        Some(size) => Layout::open(size),
        None => load_layout(args.layout.as_deref())?,
    };
    layout.validate()?;
    Ok(layout)
}

fn emit_layout(layout: &Layout, args: &LayoutArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            layout
                .save(path)
                .with_context(|| format!("Failed to write layout: {}", path.display()))?;
            tracing::info!("Saved layout '{}' to {}", layout.name, path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(layout)?),
    }

    if args.render {
        print!("{}", render_board(&layout.to_board_state()?));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_open_layout() {
        let args = LayoutArgs {
            layout: None,
            open: Some(4),
            output: None,
            render: false,
        };
        let layout = select_layout(&args).unwrap();
        assert_eq!(layout.grid_size, 4);
        assert!(layout.obstacles.is_empty());
    }

    #[test]
    fn test_select_rejects_bad_size() {
        let args = LayoutArgs {
            layout: None,
            open: Some(0),
            output: None,
            render: false,
        };
        assert!(select_layout(&args).is_err());
    }
}
