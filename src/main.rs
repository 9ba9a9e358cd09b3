use std::io;

use the_word::catalog::WordCatalog;
use the_word::cli::{self, parse_cli};
use the_word::daily::DateKey;
use the_word::store::{FileStore, GameStore};
use the_word::tui;

fn main() {
    env_logger::init();
    let cli = parse_cli();

    let catalog = match &cli.words_path {
        Some(path) => {
            let data = match std::fs::read_to_string(path) {
                Ok(data) => data,
                Err(e) => {
                    eprintln!("Failed to read word list '{path}': {e}");
                    return;
                }
            };
            match WordCatalog::from_str_data(&data) {
                Ok(catalog) => catalog,
                Err(e) => {
                    eprintln!("Invalid word list '{path}': {e}");
                    return;
                }
            }
        }
        None => match WordCatalog::embedded() {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Embedded word list is broken: {e}");
                return;
            }
        },
    };

    let today = match &cli.date {
        Some(raw) => match DateKey::parse(raw) {
            Some(date) => date,
            None => {
                eprintln!("Invalid --date '{raw}': expected YYYY-MM-DD");
                return;
            }
        },
        None => DateKey::today(),
    };

    let data_dir = cli.data_dir.clone().unwrap_or_else(FileStore::default_dir);
    let mut store = GameStore::new(FileStore::new(data_dir));

    if cli.stats {
        cli::display_statistics(&store.statistics());
        return;
    }

    if cli.plain {
        let stdin = io::stdin();
        cli::game_loop(&catalog, &mut store, today, stdin.lock());
    } else if let Err(e) = tui::run(&catalog, &mut store, today) {
        eprintln!("Terminal error: {e}");
    }
}
