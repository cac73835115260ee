//! Seeker - resource discovery in an unstructured P2P overlay
//!
//! Validates network descriptions and runs flooding / random-walk searches
//! over them, optionally exporting per-visit frames.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use seeker_cache::{InMemoryLookupCache, JsonFileCache, LookupCache};
use seeker_core::{NeighborBounds, PeerId, ResourceId, Topology, TopologyConfig, validate_with};
use seeker_logging::{FileConfig, LogConfig, SeekerSubscriberBuilder};
use seeker_search::{
    CachePolicy, MessageAccounting, NoopObserver, SearchConfig, SearchEngine, Strategy,
    VisitObserver,
};
use tracing::info;

use seeker_simulation::{FrameRecorder, render, scenarios};

#[derive(Parser)]
#[command(
    name = "seeker",
    about = "Resource discovery simulation over an unstructured P2P overlay",
    version
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write JSONL logs into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a network description against the topology invariants
    Validate {
        /// Path to the JSON network description
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Print the peers, resources and edges of a network description
    Show {
        /// Path to the JSON network description
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Search a network for a resource
    Search {
        /// Path to the JSON network description
        #[arg(short, long)]
        config: PathBuf,

        /// Peer the search starts at
        #[arg(long)]
        start: String,

        /// Resource to look for
        #[arg(short, long)]
        resource: String,

        /// Hop budget
        #[arg(short, long, default_value = "8")]
        ttl: u32,

        /// flooding, informed_flooding, random_walk or informed_random_walk
        #[arg(short, long, default_value = "flooding")]
        strategy: Strategy,

        /// Lookup cache file for informed strategies (in-memory if omitted)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Seed for random walks
        #[arg(long)]
        seed: Option<u64>,

        /// Write one snapshot per visited peer into this directory
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Write all snapshots into a single animation file
        #[arg(long)]
        animation: Option<PathBuf>,

        /// Flooding message accounting: delivered, pushed or popped
        #[arg(long, default_value = "delivered")]
        accounting: MessageAccounting,

        /// Ignore cached peers that no longer host the resource
        #[arg(long)]
        verify_cache: bool,
    },

    /// Run the reference network scenario
    Demo {
        #[arg(short, long, default_value = "flooding")]
        strategy: Strategy,

        #[arg(short, long, default_value = "8")]
        ttl: u32,

        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Run an informed search on the reference network twice, cold then warm
    Warmup {
        #[arg(short, long, default_value = "informed_flooding")]
        strategy: Strategy,

        #[arg(short, long, default_value = "8")]
        ttl: u32,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.verbose {
        LogConfig::development()
    } else {
        LogConfig::default()
    };
    if let Some(dir) = &cli.log_dir {
        config.file = Some(FileConfig {
            directory: dir.clone(),
            ..FileConfig::default()
        });
    }
    let _guard = SeekerSubscriberBuilder::new().with_config(config).init();

    match cli.command {
        Commands::Validate { config } => {
            let (topology, bounds) = load_topology(&config)?;
            validate_with(&topology, bounds)
                .with_context(|| format!("{} failed validation", config.display()))?;
            println!(
                "{}: valid ({} peers, {} edges)",
                config.display(),
                topology.peer_count(),
                topology.edge_count()
            );
        }
        Commands::Show { config } => {
            let (topology, _) = load_topology(&config)?;
            println!("{}", render::overview(&topology));
        }
        Commands::Search {
            config,
            start,
            resource,
            ttl,
            strategy,
            cache,
            seed,
            frames,
            animation,
            accounting,
            verify_cache,
        } => {
            let (topology, bounds) = load_topology(&config)?;
            validate_with(&topology, bounds)
                .with_context(|| format!("{} failed validation", config.display()))?;

            let start = PeerId::new(&start).context("start peer must not be empty")?;
            let resource = ResourceId::new(&resource).context("resource must not be empty")?;

            let store: Box<dyn LookupCache> = match cache {
                Some(path) => Box::new(JsonFileCache::new(path)),
                None => Box::new(InMemoryLookupCache::new()),
            };
            let search_config = SearchConfig::default()
                .with_accounting(accounting)
                .with_cache_policy(if verify_cache {
                    CachePolicy::Verify
                } else {
                    CachePolicy::TrustBlindly
                });

            let mut engine = match seed {
                Some(seed) => SearchEngine::seeded(&topology, store, seed),
                None => SearchEngine::new(&topology, store),
            }
            .with_config(search_config);

            let record = frames.is_some() || animation.is_some();
            let mut recorder = FrameRecorder::new(&topology);
            let mut noop = NoopObserver;
            let observer: &mut dyn VisitObserver = if record { &mut recorder } else { &mut noop };

            let result = engine.search_observed(&start, &resource, ttl, strategy, observer)?;

            println!("Search result ({strategy}):");
            println!("{result}");
            match result.found_at() {
                Some(peer) => info!("Resource {} found at {}", resource, peer),
                None => info!("Resource {} not found within TTL {}", resource, ttl),
            }

            if let Some(dir) = frames {
                let paths = recorder
                    .write_frames(&dir)
                    .with_context(|| format!("failed to write frames to {}", dir.display()))?;
                println!("Wrote {} frame(s) to {}", paths.len(), dir.display());
            }
            if let Some(path) = animation {
                recorder
                    .write_animation(&path)
                    .with_context(|| format!("failed to write animation to {}", path.display()))?;
                println!("Wrote animation to {}", path.display());
            }
        }
        Commands::Demo { strategy, ttl, seed } => {
            scenarios::run_reference_search(strategy, ttl, seed)?;
        }
        Commands::Warmup { strategy, ttl, seed } => {
            if !strategy.is_informed() {
                anyhow::bail!("warm-up needs an informed strategy, got {strategy}");
            }
            scenarios::run_cache_warmup(strategy, ttl, seed)?;
        }
    }

    Ok(())
}

fn load_topology(path: &Path) -> anyhow::Result<(Topology, NeighborBounds)> {
    let config = TopologyConfig::from_path(path)?;
    let topology = config
        .into_topology()
        .with_context(|| format!("failed to build topology from {}", path.display()))?;
    Ok(topology)
}
