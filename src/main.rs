use clap::Parser;
use tydid::cli::commands::Cli;
use tydid::io::TaskStore;

fn main() {
    let cli = Cli::parse();

    let dir = match cli.dir {
        Some(dir) => dir,
        None => match TaskStore::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
    };

    let store = match TaskStore::open(dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = tydid::tui::run(store) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
