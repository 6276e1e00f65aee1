use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;

use pigmusic::audio::LogAudio;
use pigmusic::save::JsonFileStore;
use pigmusic::{rng, render_staff, Clef, Effect, Game, GameConfig, Pitch, Settings, StaffView};

/// Name the note on the staff by pressing its piano key.
#[derive(Parser, Debug)]
#[command(name = "pigmusic", version)]
struct Args {
    /// Clef to read
    #[arg(long, value_enum, default_value_t = Clef::Treble)]
    clef: Clef,

    /// Level to play (1-4)
    #[arg(long, default_value_t = 1)]
    level: u8,

    /// Seed for a repeatable note sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Save file
    #[arg(long, default_value = "pigmusic-save.json")]
    save: PathBuf,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never show hints
    #[arg(long)]
    no_hints: bool,
}

fn load_config(path: Option<&PathBuf>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading config '{}': {}", path.display(), e);
            process::exit(1);
        }
    };
    match GameConfig::from_yaml(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn print_view(view: &StaffView) {
    println!();
    print!("{}", render_staff(view.clef, view.note.as_ref(), view.hint));
    println!(
        "Note {}/{}   streak {}   coins {}   score {}",
        view.notes_completed + 1,
        view.notes_in_level,
        view.streak,
        view.pig_coins,
        view.score
    );
    let keys: Vec<String> = view
        .keys
        .iter()
        .filter(|k| k.available)
        .map(|k| k.pitch.to_string())
        .collect();
    println!("Keys: {}", keys.join(" "));
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_ref());
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let rng = match config.seed {
        Some(seed) => rng::create_rng(seed),
        None => rng::from_entropy(),
    };

    let mut game = Game::new(JsonFileStore::new(&args.save), LogAudio, rng, config);
    if args.no_hints && game.settings().show_hints {
        let settings = Settings {
            show_hints: false,
            ..*game.settings()
        };
        if let Err(e) = game.update_settings(settings) {
            eprintln!("{}", e);
        }
    }

    game.select_clef(args.clef);
    game.open_level_select();
    for card in game.level_cards() {
        println!(
            "Level {} {:<34} {}{}",
            card.level,
            card.description,
            "*".repeat(card.oinks as usize),
            if card.unlocked { "" } else { " (locked)" }
        );
    }

    if let Err(e) = game.start_level(args.level) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_view(&game.view());
        print!("Your answer (e.g. C4, F#3) or 'quit': ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Error writing to stdout: {}", e);
            process::exit(1);
        }
        let shown_at = Instant::now();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            game.leave_level();
            break;
        }

        let pitch: Pitch = match input.parse() {
            Ok(pitch) => pitch,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let effects = match game.press_key(pitch, shown_at.elapsed()) {
            Ok(effects) => effects,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };

        if let Some(e) = game.take_save_error() {
            eprintln!("Progress not saved: {}", e);
        }

        if effects.is_empty() {
            println!("{} isn't on this level's keyboard.", pitch);
        }
        for effect in &effects {
            match effect {
                Effect::PlayCorrect => println!("Oink! {} is right.", pitch),
                Effect::PlayIncorrect => println!("Not quite, try again."),
                Effect::LevelComplete(result) => {
                    println!(
                        "\nLevel {} complete! {} oink(s), {:.0}% accuracy, {} points.",
                        result.level, result.oinks, result.accuracy, result.score
                    );
                }
                _ => {}
            }
        }

        if game.last_result().is_some() {
            break;
        }
    }
}
