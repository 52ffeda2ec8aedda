use anstream::print;
use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;

use puzzles::algorithms::bfs::BfsSearch;
use puzzles::problem::Instance;
use puzzles::problems::crossing::Count;
use puzzles::problems::crossing::CrossingState;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Moves pups and wolves across the river, one boat trip at a time.
#[derive(Parser, Debug)]
#[clap(long_version = puzzles::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    pub pups: Count,
    pub wolves: Count,

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

    println!(
        "Pups: {}, Wolves: {}",
        args.pups.yellow(),
        args.wolves.yellow()
    );

    let start = CrossingState::start(args.pups, args.wolves);
    let finish = CrossingState::finish(args.pups, args.wolves);
    let mut search = BfsSearch::<_, CrossingState>::new(Instance::with_target(start, finish));
    let path = search.run();

    println!("Total Configs: {}", search.generated());
    println!("Unique configs: {}", search.unique());
    if path.is_empty() {
        println!("{}", "No Solution".red());
    } else {
        print!("{path}");
    }

    if args.stats {
        search.write_stats(std::io::stderr().lock())?;
    }
    Ok(())
}
