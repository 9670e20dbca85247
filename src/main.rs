// rvtty: RISC-V simulator workbench for the terminal

use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use rvtty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("rvtty");
        eprintln!("Usage: {} [program]", program_name);
        eprintln!();
        eprintln!("  program   optional assembly (.s), C (.c), or ELF file to load");
        eprintln!();
        eprintln!("Started with no arguments, rvtty opens an empty editor;");
        eprintln!("bundled examples are available from inside the app (Ctrl+E).");
        std::process::exit(1);
    }

    let mut app = App::new()?;

    if let Some(arg) = args.get(1) {
        let path = Path::new(arg);
        if !path.exists() {
            eprintln!("Error: file '{}' not found", arg);
            std::process::exit(1);
        }
        if let Err(e) = app.load_path(path) {
            eprintln!("Error: failed to load '{}': {}", arg, e);
            std::process::exit(1);
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
