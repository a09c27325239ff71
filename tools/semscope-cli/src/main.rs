mod config;
mod output;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use config::{Config, OutputFormat};
use semscope_analyzer::{render_text, DependencySource, SemanticAnalyzer, SentenceGraph};
use semscope_conllu::Reader;
use semscope_protocol::{Corpus, Sentence};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Version written into corpus archives.
const ARCHIVE_VERSION: u32 = 1;

#[derive(Parser)]
#[command(author, version, about = "Extracts predicate/subject/object relations from CoNLL-U parses")]
struct Cli {
    /// Config file (default: ~/.semscope/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// -v for info, -vv for debug (RUST_LOG takes precedence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct InputArgs {
    /// CoNLL-U file, or - for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Also follow enhanced dependencies (DEPS column)
    #[arg(long)]
    enhanced: bool,

    /// Accept heads pointing outside their sentence
    #[arg(long)]
    lenient: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphKind {
    Semantic,
    Syntactic,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze sentences and print their relations
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the semantic or syntactic graph
    Graph {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, value_enum, default_value = "semantic")]
        kind: GraphKind,

        /// Point edges from predicate to term (governor to dependent)
        #[arg(long)]
        reverse: bool,

        /// Graphviz DOT instead of the plain listing
        #[arg(long)]
        dot: bool,
    },

    /// Analyze and write sentences with their relations as a binary archive
    Archive {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the relations stored in an archive
    Inspect {
        #[arg(value_name = "FILE")]
        archive: PathBuf,

        #[arg(long)]
        full: bool,
    },

    /// Manage the label sets
    Labels {
        #[command(subcommand)]
        action: LabelsAction,
    },
}

#[derive(Subcommand)]
enum LabelsAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Delete the configuration file
    Reset,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(args: &InputArgs) -> anyhow::Result<Vec<Sentence>> {
    let text = if args.input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input.display()))?
    };

    let reader = if args.lenient { Reader::lenient() } else { Reader::new() };
    let sentences = reader.read(&text)?;
    info!(sentences = sentences.len(), "read input");
    Ok(sentences)
}

fn analyzer(config: &Config, args: &InputArgs) -> SemanticAnalyzer {
    let source = if args.enhanced || config.output.enhanced {
        DependencySource::Enhanced
    } else {
        DependencySource::Basic
    };
    SemanticAnalyzer::new(config.labels.clone()).with_source(source)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command {
        Command::Analyze { input, format } => {
            let config = Config::load(&config_path)?;
            let sentences = read_input(&input)?;
            let analyses = analyzer(&config, &input).analyze(&sentences);

            let format = format.unwrap_or(config.output.format);
            print!("{}", output::render(&sentences, &analyses, format)?);
        }

        Command::Graph { input, kind, reverse, dot } => {
            let config = Config::load(&config_path)?;
            let sentences = read_input(&input)?;
            let listing = match kind {
                GraphKind::Semantic => {
                    let analyses = analyzer(&config, &input).analyze(&sentences);
                    let graph = SentenceGraph::semantic(&sentences, &analyses, reverse);
                    if dot { graph.to_dot() } else { graph.to_string() }
                }
                GraphKind::Syntactic => {
                    let graph = SentenceGraph::syntactic(&sentences, reverse);
                    if dot { graph.to_dot() } else { graph.to_string() }
                }
            };
            print!("{}", listing);
        }

        Command::Archive { input, output } => {
            let config = Config::load(&config_path)?;
            let sentences = read_input(&input)?;
            let analyses = analyzer(&config, &input).analyze(&sentences);
            let corpus = Corpus {
                version: ARCHIVE_VERSION,
                sentences,
                analyses,
            };

            let bytes = rkyv::to_bytes::<_, 4096>(&corpus).map_err(|e| anyhow!("failed to archive corpus: {:?}", e))?;
            fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;

            eprintln!("✅ Archived {} sentences to {:?}", corpus.sentences.len(), output);
        }

        Command::Inspect { archive, full } => {
            let corpus = load_archive(&archive)?;
            print!("{}", render_text(&corpus.sentences, &corpus.analyses, full));
        }

        Command::Labels { action } => match action {
            LabelsAction::Show => {
                let config = Config::load(&config_path)?;
                print!("{}", toml::to_string_pretty(&config)?);
            }
            LabelsAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", config_path.display());
                }
                Config::default().save(&config_path)?;
                eprintln!("✅ Wrote default labels to {:?}", config_path);
            }
            LabelsAction::Reset => {
                if Config::remove(&config_path)? {
                    eprintln!("Removed {:?}", config_path);
                } else {
                    eprintln!("No configuration at {:?}", config_path);
                }
            }
        },
    }

    Ok(())
}

/// Validate and load a corpus written by `archive`.
fn load_archive(path: &Path) -> anyhow::Result<Corpus> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    // Archived data must be aligned before validation
    let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(&bytes);

    let corpus: Corpus = rkyv::from_bytes(&aligned).map_err(|e| anyhow!("invalid archive {}: {:?}", path.display(), e))?;
    if corpus.version != ARCHIVE_VERSION {
        bail!("unsupported archive version {} (expected {})", corpus.version, ARCHIVE_VERSION);
    }
    Ok(corpus)
}
