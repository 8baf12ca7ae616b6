use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::{QuizSettings, allocate};
use services::QuizService;
use storage::{QuizData, Storage};
use tracing_subscriber::EnvFilter;

mod play;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLimit { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play   [--data <dir>] [--limit <n>] [--seed <n>] [--topics <a,b,c>]");
    eprintln!("  cargo run -p app -- topics [--data <dir>]");
    eprintln!("  cargo run -p app -- plan   [--data <dir>] [--limit <n>] --topics <a,b,c>");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data data");
    eprintln!("  --limit {}", QuizSettings::DEFAULT_QUESTION_LIMIT);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR, QUIZ_QUESTION_LIMIT, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Topics,
    Plan,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "topics" => Some(Self::Topics),
            "plan" => Some(Self::Plan),
            _ => None,
        }
    }
}

struct Args {
    data_dir: PathBuf,
    question_limit: usize,
    seed: Option<u64>,
    topics: Vec<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("QUIZ_DATA_DIR")
            .ok()
            .map_or_else(|| PathBuf::from("data"), PathBuf::from);
        let mut question_limit = match std::env::var("QUIZ_QUESTION_LIMIT") {
            Ok(raw) => parse_limit(raw)?,
            Err(_) => QuizSettings::DEFAULT_QUESTION_LIMIT,
        };
        let mut seed = match std::env::var("QUIZ_SEED") {
            Ok(raw) => Some(parse_seed(raw)?),
            Err(_) => None,
        };
        let mut topics = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => data_dir = PathBuf::from(require_value(args, "--data")?),
                "--limit" => question_limit = parse_limit(require_value(args, "--limit")?)?,
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                "--topics" => {
                    topics = require_value(args, "--topics")?
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_owned)
                        .collect();
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            question_limit,
            seed,
            topics,
        })
    }
}

fn parse_limit(raw: String) -> Result<usize, ArgsError> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ArgsError::InvalidLimit { raw }),
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let settings = QuizSettings::with_question_limit(parsed.question_limit)?;
    let data = QuizData::load_dir(&parsed.data_dir)?;
    tracing::debug!(
        data_dir = %parsed.data_dir.display(),
        question_limit = settings.question_limit(),
        seeded = parsed.seed.is_some(),
        "configuration resolved"
    );

    match cmd {
        Command::Topics => {
            for topic in data.weights.iter() {
                println!(
                    "{:>3}  {:<40} {} questions",
                    topic.weight(),
                    topic.name(),
                    data.bank.ids_for_topic(topic.name()).len()
                );
            }
            Ok(())
        }
        Command::Plan => {
            let allocation = allocate(&parsed.topics, &data.weights, settings.question_limit())?;
            for (topic, count) in allocation.iter() {
                let available = data.bank.ids_for_topic(topic).len();
                println!("{count:>3}  {topic} ({available} available)");
            }
            println!("{:>3}  total", allocation.total());
            Ok(())
        }
        Command::Play => {
            let storage = Storage::in_memory();
            let mut service = QuizService::new(
                Arc::new(data.bank),
                Arc::new(data.weights),
                settings,
                Arc::clone(&storage.sessions),
            );
            if let Some(seed) = parsed.seed {
                service = service.with_seed(seed);
            }
            play::run(&service, parsed.topics).await
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
