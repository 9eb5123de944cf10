//! Creep CLI - Minecraft mod package manager

use clap::{Parser, Subcommand};
use creep::cli;
use creep::prelude::*;
use creep::repository::FETCH_TIMEOUT;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "creep")]
#[command(author, version, about = "Minecraft mod package manager", long_about = None)]
struct Cli {
    /// App data directory (default: ~/.creep)
    #[arg(long, global = true)]
    app_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show client version, minecraft target and profile path
    Version,
    /// View or set the targeted minecraft version
    Target {
        /// Minecraft version to target (e.g. 1.20.1)
        version: Option<String>,
    },
    /// View or set the profile directory where mods are managed
    Profile {
        /// Path to a minecraft profile directory
        path: Option<PathBuf>,
    },
    /// List available packages, or installed mods
    List {
        /// Pass `installed` to list the profile's mods directory
        installed: Option<String>,
        /// Short list (don't display descriptions)
        #[arg(short, long)]
        short: bool,
    },
    /// Search for a package in the registry
    Search {
        /// Search term
        #[arg(required = true)]
        term: Vec<String>,
    },
    /// Display details for a specific package
    Info {
        /// Package name (name, vendor/name, or name:version)
        name: String,
    },
    /// Install a package and its dependencies
    Install {
        /// Packages to install (name, vendor/name, or name:version)
        #[arg(required_unless_present = "listfile")]
        packages: Vec<String>,
        /// Do not install dependencies automatically
        #[arg(short = 'n', long)]
        no_dependencies: bool,
        /// Install packages from file, one per line
        #[arg(short, long)]
        listfile: Option<PathBuf>,
    },
    /// Uninstall a package from the profile
    Uninstall {
        /// Package name
        name: String,
    },
    /// Stash installed mods and bring them back later
    Stash {
        #[command(subcommand)]
        action: StashAction,
    },
    /// Delete all installed mods from the profile
    Purge,
    /// Force a refresh of the package registry
    Refresh,
}

#[derive(Subcommand)]
enum StashAction {
    /// List the available stashes
    List,
    /// Move the currently installed mods into a new stash
    Save {
        /// Stash name
        name: String,
    },
    /// Show the mod files present in a stash
    Info {
        /// Stash name
        name: String,
    },
    /// Move a stash's mods back into the profile and delete the stash
    Restore {
        /// Stash name
        name: String,
    },
    /// Copy a stash's mods back into the profile and keep the stash
    Apply {
        /// Stash name
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> creep::Result<ExitCode> {
    let dirs = AppDirs::resolve(cli.app_dir)?;
    let mut options = Options::load(&dirs.app_dir)?;

    let registry_fetcher = HttpDownloader::with_timeout(FETCH_TIMEOUT)?;
    let (mut repository, events) = cli::open_repository(&dirs, &options, &registry_fetcher)?;
    for event in &events {
        println!("{}", cli::format_cache_event(event));
    }

    match cli.command {
        Commands::Version => {
            print!("{}", cli::format_version_banner(&options));
        }
        Commands::Target { version } => {
            if let Some(version) = version {
                options.minecraft_target = version;
                repository.set_minecraft_target(&options.minecraft_target);
                options.save(&dirs.app_dir)?;
            }
            println!(
                "Targetting minecraft version {}",
                options.minecraft_target
            );
        }
        Commands::Profile { path } => {
            if let Some(path) = path {
                if !path.is_dir() {
                    println!("Invalid directory '{}'", path.display());
                    return Ok(ExitCode::FAILURE);
                }
                options.profile_dir = path;
                options.save(&dirs.app_dir)?;
            }
            println!("Profile path '{}'", options.profile_dir.display());
        }
        Commands::List { installed, short } => {
            if installed.as_deref() == Some("installed") {
                let mods_dir = options.profile_dir.join("mods");
                let scan = creep::stash::scan_directory(&repository, &mods_dir)?;
                print!("{}", cli::format_directory_listing(&scan, &mods_dir, short));
            } else {
                for package in repository.latest_packages() {
                    println!("{}", cli::format_package_line(package, short));
                }
            }
        }
        Commands::Search { term } => {
            let results = repository.search(&term.join(" "));
            print!("{}", cli::format_search_results(&results));
        }
        Commands::Info { name } => {
            let package = repository.resolve(&name)?;
            print!("{}", cli::format_package_details(&package));
        }
        Commands::Install {
            packages,
            no_dependencies,
            listfile,
        } => {
            let downloader = HttpDownloader::new()?;
            let engine = InstallEngine::new(
                &repository,
                &downloader,
                dirs.cache_dir.clone(),
                options.profile_dir.clone(),
            )
            .with_skip_dependencies(no_dependencies);

            if no_dependencies {
                println!("Performing install and skipping dependencies\n");
            }

            let mut report = |event: InstallEvent| {
                println!("{}", cli::format_install_event(&event));
            };

            let mut all_succeeded = true;
            for name in &packages {
                if !engine.install(name, &mut report)?.succeeded() {
                    all_succeeded = false;
                }
            }
            if let Some(path) = listfile {
                if !engine.install_from_listfile(&path, &mut report)?.succeeded() {
                    all_succeeded = false;
                }
            }

            if !all_succeeded {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Uninstall { name } => {
            let downloader = HttpDownloader::new()?;
            let engine = InstallEngine::new(
                &repository,
                &downloader,
                dirs.cache_dir.clone(),
                options.profile_dir.clone(),
            );
            let (package, dir) = engine.uninstall(&name)?;
            println!("Removed mod '{}' from '{}'", package.name, dir.display());
        }
        Commands::Stash { action } => {
            return handle_stash(&repository, &options, action);
        }
        Commands::Purge => {
            let downloader = HttpDownloader::new()?;
            let engine = InstallEngine::new(
                &repository,
                &downloader,
                dirs.cache_dir.clone(),
                options.profile_dir.clone(),
            );
            println!(
                "Purging all installed mods in {}...",
                options.profile_dir.join("mods").display()
            );
            for filename in engine.purge()? {
                println!("Removing file {filename}");
            }
            println!("Done.");
        }
        Commands::Refresh => {
            repository.clear_cache()?;
            // Start from an empty record set so the refreshed registry
            // replaces the one loaded at startup instead of appending to it.
            let mut refreshed = Repository::new(&dirs.app_dir);
            refreshed.set_minecraft_target(&options.minecraft_target);
            let summary = refreshed.populate(&registry_fetcher, None, true)?;
            for event in &summary.events {
                println!("{}", cli::format_cache_event(event));
            }
            print!("{}", cli::format_refresh_summary(&refreshed));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_stash(
    repository: &Repository,
    options: &Options,
    action: StashAction,
) -> creep::Result<ExitCode> {
    let manager = StashManager::new(repository, options.profile_dir.clone());

    match action {
        StashAction::List => {
            let stashes = manager.list();
            if stashes.is_empty() {
                println!("Looking in {}", manager.stashes_dir().display());
                println!("No stashes");
            } else {
                for name in stashes {
                    println!("{name}");
                }
            }
        }
        StashAction::Save { name } => {
            let files = manager.save(&name)?;
            println!("Will stash the following files into stash {name}:");
            for file in files {
                println!("{file}");
            }
        }
        StashAction::Info { name } => {
            let scan = manager.scan(&name)?;
            let stash_dir = manager.stashes_dir().join(&name);
            print!("{}", cli::format_directory_listing(&scan, &stash_dir, false));
        }
        StashAction::Restore { name } => {
            let stash_dir = manager.stashes_dir().join(&name);
            let files = manager.restore(&name, false)?;
            println!(
                "Moving files from stash {} to install dir.",
                stash_dir.display()
            );
            for file in files {
                println!("{file}");
            }
            println!("Deleting stash dir {name}");
        }
        StashAction::Apply { name } => {
            let stash_dir = manager.stashes_dir().join(&name);
            let files = manager.restore(&name, true)?;
            println!(
                "Applying files from stash {} to install dir.",
                stash_dir.display()
            );
            for file in files {
                println!("{file}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
