use std::time::Instant;

use anstream::print;
use anstream::println;
use clap::Parser;
use human_duration::human_duration;
use owo_colors::OwoColorize;

use puzzles::algorithms::bfs::BfsSearch;
use puzzles::problem::Instance;
use puzzles::problems::strings::StringsState;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Turns one word into another, changing a letter at a time.
#[derive(Parser, Debug)]
#[clap(long_version = puzzles::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Uppercase word to start from.
    pub start: String,
    /// Uppercase word of the same length to reach.
    pub finish: String,

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

    let start = StringsState::parse(&args.start, &args.finish).map_err(std::io::Error::other)?;
    println!(
        "Start: {}, Finish: {}",
        args.start.yellow(),
        args.finish.yellow()
    );

    let timer = Instant::now();
    let finish = start.finish();
    let mut search = BfsSearch::<_, StringsState>::new(Instance::with_target(start, finish));
    let path = search.run();
    let elapsed = timer.elapsed();

    println!("Total Configs: {}", search.generated());
    println!("Unique configs: {}", search.unique());
    if path.is_empty() {
        println!("{}", "No Solution".red());
    } else {
        print!("{path}");
    }
    println!("Elapsed: {}", human_duration(&elapsed).cyan());

    if args.stats {
        search.write_stats(std::io::stderr().lock())?;
    }
    Ok(())
}
