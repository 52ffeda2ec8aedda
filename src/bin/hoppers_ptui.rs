use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anstream::print;
use anstream::println;
use clap::Parser;
use indoc::indoc;
use owo_colors::OwoColorize;

use puzzles::model::HoppersModel;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const HELP: &str = indoc! {"
    h(int)              -- hint next move
    c(heck)             -- check for a solution
    l(oad) filename     -- load new puzzle file
    s(elect) r c        -- select cell at r, c
    q(uit)              -- quit the game
    r(eset)             -- reset the current game
"};

/// Plays a Hoppers board from the terminal.
#[derive(Parser, Debug)]
#[clap(long_version = puzzles::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Board file.
    #[arg(env = "PUZZLES_BOARD")]
    pub board: PathBuf,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Hint,
    Check,
    Load(&'a str),
    Select(isize, isize),
    Reset,
    Quit,
}

impl<'a> Command<'a> {
    /// Commands match on their first letter. `None` for anything malformed.
    fn parse(line: &'a str) -> Option<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (cmd, rest) = words.split_first()?;
        match (cmd.chars().next()?, rest) {
            ('h', []) => Some(Command::Hint),
            ('c', []) => Some(Command::Check),
            ('l', [file]) => Some(Command::Load(*file)),
            ('s', [r, c]) => Some(Command::Select(r.parse().ok()?, c.parse().ok()?)),
            ('r', []) => Some(Command::Reset),
            ('q', []) => Some(Command::Quit),
            _ => None,
        }
    }
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();
    #[cfg(feature = "coz_profile")]
    coz::thread_init();

    env_logger::init();
    let args = Args::parse();
    args.color.write_global();

    let mut model = HoppersModel::new(&args.board).map_err(std::io::Error::other)?;
    model.add_observer(|model: &HoppersModel, msg: &str| {
        println!("{}", msg.green());
        print!("{model}");
    });

    println!("Loaded: {:?}", args.board.yellow());
    print!("{model}");
    print!("{HELP}");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        // Failures were already reported through the observer.
        match Command::parse(&line) {
            Some(Command::Hint) => {
                model.hint();
            }
            Some(Command::Check) => {
                model.check();
            }
            Some(Command::Load(file)) => {
                let _ = model.load(Path::new(file));
            }
            Some(Command::Select(r, c)) => {
                model.select(r, c);
            }
            Some(Command::Reset) => {
                let _ = model.reset();
            }
            Some(Command::Quit) => break,
            None => print!("{HELP}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("h"), Some(Command::Hint));
        assert_eq!(Command::parse("hint"), Some(Command::Hint));
        assert_eq!(Command::parse("check"), Some(Command::Check));
        assert_eq!(
            Command::parse("l data/hoppers/one_jump.txt"),
            Some(Command::Load("data/hoppers/one_jump.txt"))
        );
        assert_eq!(Command::parse("s 0 -2"), Some(Command::Select(0, -2)));
        assert_eq!(Command::parse("  reset "), Some(Command::Reset));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("l"), None);
        assert_eq!(Command::parse("s 1"), None);
        assert_eq!(Command::parse("s 1 x"), None);
        assert_eq!(Command::parse("h now"), None);
        assert_eq!(Command::parse("x"), None);
    }
}
