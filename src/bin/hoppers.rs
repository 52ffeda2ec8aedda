use std::path::PathBuf;

use anstream::print;
use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;

use puzzles::algorithms::bfs::BfsSearch;
use puzzles::problem::Instance;
use puzzles::problems::hoppers::HoppersState;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Solves a Hoppers board, leaving only the red frog.
#[derive(Parser, Debug)]
#[clap(long_version = puzzles::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Board file.
    #[arg(env = "PUZZLES_BOARD")]
    pub board: PathBuf,

    /// Print search statistics to stderr.
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();
    #[cfg(feature = "coz_profile")]
    coz::thread_init();

    env_logger::init();
    let args = Args::parse();
    args.color.write_global();

    let start = HoppersState::load(&args.board).map_err(std::io::Error::other)?;
    println!("Board: {:?}", args.board.yellow());
    print!("{start}");

    let mut search = BfsSearch::<_, HoppersState>::new(Instance::new(start));
    let path = search.run();

    println!("Total Configs: {}", search.generated());
    println!("Unique configs: {}", search.unique());
    if path.is_empty() {
        println!("{}", "No Solution".red());
    } else {
        for (i, s) in path.steps() {
            println!("Step {i}:");
            print!("{s}");
        }
    }

    if args.stats {
        search.write_stats(std::io::stderr().lock())?;
    }
    Ok(())
}
