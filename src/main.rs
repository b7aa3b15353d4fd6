use ChemTranslate::cli::run_interactive_menu;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    if let Err(e) = run_interactive_menu() {
        eprintln!("Fatal: {}", e);
        std::process::exit(1);
    }
}
