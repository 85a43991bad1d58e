use clap::Parser;
use creativity_core::config::LookupConfig;
use creativity_core::persistence::{load_samples, save_report};
use creativity_core::report::ReportFormatter;
use creativity_core::{HttpLookup, Language, Result, ScoringEngine, WeightSpec};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(name = "creativity-scorer")]
#[command(about = "Measure language creativity with phonetic analysis")]
struct Args {
    /// The input file (e.g., data/de_sentences.csv)
    #[arg(short, long)]
    input_file: PathBuf,

    /// The output file (e.g., data/de_scores.csv)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Creativity scores with weightings (e.g., WORD_NOVELTY:0.6,RHYTHMIC_SCORE:+0.4)
    #[arg(short = 's', long)]
    creativity_scores: Option<String>,

    /// The language (DE or EN)
    #[arg(short, long, default_value = "DE")]
    language: String,

    /// Print rows without colors
    #[arg(long)]
    no_color: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    // Configuration errors abort before anything is scored.
    let weights = match &args.creativity_scores {
        Some(spec) => WeightSpec::parse(spec)?,
        None => WeightSpec::default(),
    };
    let language: Language = args.language.parse()?;
    let lookup = HttpLookup::new(LookupConfig::from_env())?;

    let samples = load_samples(&args.input_file)?;
    info!("Loaded {} valid samples from {}", samples.len(), args.input_file.display());

    let engine = ScoringEngine::new(weights, language, lookup);
    let formatter = ReportFormatter::new(engine.weights());
    let colored = !args.no_color;

    let mut lines = vec![formatter.header(false)];
    println!("{}", formatter.header(colored));
    for (sample, record) in engine.score_all(&samples) {
        println!("{}", formatter.row(sample, &record, colored));
        lines.push(formatter.row(sample, &record, false));
    }

    if let Some(path) = &args.output_file {
        save_report(path, &lines)?;
        info!("Scores written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
