//! Preview command: show the collage layout for a set of photos

use anyhow::{bail, Result};
use postcard_studio::{GridShape, PostcardSession};

use super::{ingest_files, load_config};

pub fn run(files: &[String], size: Option<&str>, orientation: Option<&str>, format: &str) -> Result<()> {
    let config = load_config();
    let mut session = PostcardSession::new();
    session.size = match size {
        Some(s) => s.parse()?,
        None => config.defaults.size.unwrap_or_default(),
    };
    session.orientation = match orientation {
        Some(o) => o.parse()?,
        None => config.defaults.orientation.unwrap_or_default(),
    };

    ingest_files(&mut session, files);
    let layout = session.layout();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&layout)?),
        "text" => {
            let sc = layout.size.config();
            println!(
                "Postcard {} {} ({}, aspect {:.3})",
                sc.label, layout.orientation, sc.description, layout.aspect_ratio
            );
            match layout.grid {
                GridShape::Empty => println!("  No photos yet"),
                GridShape::Grid { columns, rows } => {
                    println!("  Grid {} x {}", columns, rows);
                    for cell in layout.visible_cells() {
                        println!(
                            "    {}  {:<32} {}x{}",
                            cell.id, cell.name, cell.col_span, cell.row_span
                        );
                    }
                    let hidden = layout.cells.len() - layout.visible_cells().len();
                    if hidden > 0 {
                        println!("  {} more photo(s) not shown", hidden);
                    }
                }
            }
        }
        other => bail!("Unknown format '{}'. Use 'text' or 'json'.", other),
    }
    Ok(())
}
