//! Sonicly - terminal music discovery with a demo-tone fallback.
//!
//! Lists popular and trending music from the YouTube Data API, searches it,
//! and plays tracks through a configurable audio extraction service. Without
//! an API key the built-in catalog is used, and when no audio stream can be
//! resolved a short synthesized tone is played instead, so every command
//! works offline.
//!
//! Listings are filtered by the language and genre preferences set with
//! `sonicly prefs setup`.

use clap::{Args, CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use owo_colors::OwoColorize;
use sonicly::config::CONFIG_KEYS;
use sonicly::preferences::PREFERENCE_KEYS;
use std::error::Error;
use std::io;

mod cli;

#[derive(Parser)]
#[command(name = "sonicly")]
#[command(about = "Discover and play music from the terminal")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the API key and audio extraction service
    Init,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show or change music preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Popular tracks for your region and preferences
    Popular {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// A shuffled pick of popular tracks
    Trending {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Search for tracks
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Browse the built-in catalog by genre or language
    Browse {
        /// Genre id, e.g. bollywood
        #[arg(short, long, conflicts_with = "language")]
        genre: Option<String>,
        /// Language code, e.g. ta
        #[arg(short, long)]
        language: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Play a track by catalog id, video id or search query
    Play {
        /// Track id, video id, or search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Save the demo tone to this WAV file instead of playing
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Generate the demo tone for a seed
    Tone {
        /// Seed, normally a track id
        seed: String,
        /// Duration in seconds (defaults to 3-5s picked from the seed)
        #[arg(short, long)]
        duration: Option<f64>,
        /// Output WAV file
        #[arg(short, long)]
        out: Option<String>,
        /// Play the tone
        #[arg(short, long)]
        play: bool,
    },
    /// Check that the configured YouTube API key works
    TestConnection,
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(CONFIG_KEYS.iter().copied()))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// View current preferences
    View,
    /// Pick languages, genres and region interactively
    Setup,
    /// Set a preference; lists are comma separated
    Set {
        #[arg(value_parser = PossibleValuesParser::new(PREFERENCE_KEYS.iter().copied()))]
        key: String,
        value: String,
    },
    /// Restore the default preferences
    Reset,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

async fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Init => {
            cli::init::handle_init()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Prefs { action } => match action {
            PrefsAction::View => {
                cli::prefs::handle_prefs_view()?;
            }
            PrefsAction::Setup => {
                cli::prefs::handle_prefs_setup()?;
            }
            PrefsAction::Set { key, value } => {
                cli::prefs::handle_prefs_set(&key, &value)?;
            }
            PrefsAction::Reset => {
                cli::prefs::handle_prefs_reset()?;
            }
        },
        Commands::Popular { output } => {
            cli::discover::handle_popular(output.json).await?;
        }
        Commands::Trending { output } => {
            cli::discover::handle_trending(output.json).await?;
        }
        Commands::Search { query, output } => {
            cli::discover::handle_search(&query.join(" "), output.json).await?;
        }
        Commands::Browse {
            genre,
            language,
            output,
        } => {
            cli::discover::handle_browse(genre.as_deref(), language.as_deref(), output.json)?;
        }
        Commands::Play { query, out } => {
            cli::play::handle_play(&query.join(" "), out.as_deref()).await?;
        }
        Commands::Tone {
            seed,
            duration,
            out,
            play,
        } => {
            cli::tone::handle_tone(&seed, duration, out.as_deref(), play).await?;
        }
        Commands::TestConnection => {
            cli::connection::handle_test_connection().await?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(e) = sonicly::logging::init_logging(cli.verbose) {
        eprintln!("{} logging disabled: {e}", "Warning:".yellow());
    }

    run(cli.command).await
}
