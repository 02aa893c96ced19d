use std::io;
use std::process;

use clap::{Arg, ArgAction, Command};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use gammon_hints::engine::{Engine, HintSetting, MoveHint};
use gammon_hints::position::{Dice, Position};

/// The move in standard notation, with hits marked by `*`
fn move_notation(hint: &MoveHint) -> String {
    if hint.mv.is_pass() {
        return hint.mv.to_string();
    }
    hint.mv
        .steps()
        .iter()
        .zip(&hint.outcomes)
        .map(|(step, outcome)| {
            if outcome.hit {
                format!("{}*", step)
            } else {
                step.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_hints(hints: &[MoveHint]) {
    if hints.is_empty() {
        println!("No complete move for this roll");
    }
    for hint in hints {
        println!("#{}: {}", hint.rank, move_notation(hint));
        println!("    score {:.3} ({:+.3})", hint.score, hint.difference);
    }
}

#[cfg(feature = "json")]
fn print_json(hints: &[MoveHint]) -> io::Result<()> {
    println!("{}", serde_json::to_string_pretty(hints)?);
    Ok(())
}

#[cfg(not(feature = "json"))]
fn print_json(_hints: &[MoveHint]) -> io::Result<()> {
    Ok(())
}

pub fn main() -> io::Result<()> {
    let mut app = Command::new("Backgammon move hints")
        .version("0.1")
        .about("Print the best moves for a position and a roll")
        .arg(
            Arg::new("positionId")
                .value_name("POSITION_ID")
                .help("GNU Backgammon position id, with the player on roll first")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("dice")
                .value_name("DICE")
                .help("The roll, as \"3 1\", \"3,1\" or \"[3,1]\". Rolled randomly if omitted")
                .num_args(0..=2),
        )
        .arg(
            Arg::new("maxHints")
                .short('n')
                .long("max-hints")
                .env("MAX_HINTS")
                .help("Number of hints to show")
                .num_args(1)
                .default_value("5")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("cube")
                .long("cube")
                .env("SHOW_CUBE")
                .help("Also show the double and take decisions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("logfile")
                .short('l')
                .long("logfile")
                .env("LOGFILE")
                .value_name("hints.log")
                .help("Name of debug logfile")
                .num_args(1),
        );

    if cfg!(feature = "json") {
        app = app.arg(
            Arg::new("json")
                .long("json")
                .env("JSON_OUTPUT")
                .help("Print the hints as json")
                .action(ArgAction::SetTrue),
        );
    }
    let matches = app.get_matches();

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    let logger = if let Some(log_file) = matches.get_one::<String>("logfile") {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Warn)
                    .chain(io::stderr()),
            )
            .apply()
    } else {
        log_dispatcher
            .level(log::LevelFilter::Warn)
            .chain(io::stderr())
            .apply()
    };
    if let Err(err) = logger {
        eprintln!("Failed to set up logging: {}", err);
    }

    let position_id = matches
        .get_one::<String>("positionId")
        .map(String::as_str)
        .unwrap_or_default();
    let position = match Position::from_position_id(position_id) {
        Ok(position) => position,
        Err(err) => {
            eprintln!("Invalid position id \"{}\": {}", position_id, err);
            process::exit(1)
        }
    };

    let dice_words: Vec<&str> = matches
        .get_many::<String>("dice")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    let dice = if dice_words.is_empty() {
        let dice = Dice::roll(&mut SmallRng::from_entropy());
        debug!("Rolled {}", dice);
        dice
    } else {
        match dice_words.join(" ").parse::<Dice>() {
            Ok(dice) => dice,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1)
            }
        }
    };

    let max_hints = matches.get_one::<usize>("maxHints").copied().unwrap_or(5);

    let mut engine = Engine::new(HintSetting::default().default_max_hints(max_hints));
    if let Err(err) = engine.initialize() {
        eprintln!("Failed to initialize engine: {}", err);
        process::exit(1)
    }

    let hints = match engine.move_hints(&position, dice, max_hints) {
        Ok(hints) => hints,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1)
        }
    };

    #[cfg(feature = "json")]
    let json_output = matches.get_flag("json");
    #[cfg(not(feature = "json"))]
    let json_output = false;
    if json_output {
        print_json(&hints)?;
        engine.shutdown();
        return Ok(());
    }

    println!("Position: {}, dice: {}", position.position_id(), dice);
    debug!("{:?}", position);
    print_hints(&hints);

    if matches.get_flag("cube") {
        match engine.double_hint(&position, None) {
            Ok(hint) => println!(
                "Double: {}, cubeful equity {:.3}",
                hint.action, hint.cubeful_equity
            ),
            Err(err) => eprintln!("{}", err),
        }
        match engine.take_hint(&position, None) {
            Ok(hint) => println!(
                "Take: {}, take equity {:.3}, drop equity {:.3}",
                hint.action, hint.take_equity, hint.drop_equity
            ),
            Err(err) => eprintln!("{}", err),
        }
    }

    engine.shutdown();
    Ok(())
}
