mod layout;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use slide_bind_core::{MenuState, parse_menu_config};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut menu = match args.get(1) {
        Some(arg) if arg == "-h" || arg == "--help" => {
            eprintln!("Usage: slide-bind [menu.json]");
            return Ok(());
        }
        Some(arg) => {
            let path = PathBuf::from(arg);
            let data = std::fs::read(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config = parse_menu_config(&data)
                .with_context(|| format!("parsing {}", path.display()))?;
            MenuState::new(config)
        }
        None => MenuState::default(),
    };
    log::info!("menu with {} items", menu.items().len());

    renderer::render_tui(&mut menu)?;
    Ok(())
}
