use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bigram_core::model::sampling_options::DEFAULT_MAX_LEN;
use bigram_core::{BigramModel, Generator, SamplingOptions};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PROMPT: &str =
    "Press Enter to generate a new name, 'P' to plot bigram probabilities, or 'Q' to quit: ";

/// Width of a bar for probability 1.0.
const BAR_WIDTH: usize = 50;

/// Interactive name generator backed by a character bigram model.
#[derive(Parser, Debug)]
#[command(name = "bigram-cli", version)]
struct Flags {
    /// Whitespace-separated list of training names
    #[arg(long, default_value = "data/names.txt")]
    names: PathBuf,

    /// Seed for reproducible sessions (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of characters in a generated name
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,

    /// Extra attempts when a training name comes out
    #[arg(long, default_value_t = 0)]
    nb_try: usize,
}

/// One line of user input, as understood by the menu.
#[derive(Debug, PartialEq)]
enum Command {
    Generate,
    Plot,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "q" => Command::Quit,
            "p" => Command::Plot,
            _ => Command::Generate,
        }
    }
}

/// Prints every bigram probability as a horizontal text bar.
fn plot_bigram_probabilities<W: Write>(model: &BigramModel, out: &mut W) -> io::Result<()> {
    let bigrams = model.bigram_probabilities();
    let label_width = bigrams
        .iter()
        .map(|entry| entry.bigram.chars().count())
        .max()
        .unwrap_or(0);

    writeln!(out, "Bigram Probabilities")?;
    for entry in &bigrams {
        let bar = "#".repeat((entry.probability * BAR_WIDTH as f64).round() as usize);
        writeln!(
            out,
            "{:>width$} | {:<bar_width$} {:.3}",
            entry.bigram,
            bar,
            entry.probability,
            width = label_width,
            bar_width = BAR_WIDTH
        )?;
    }
    writeln!(out)
}

/// Runs the menu until 'q' or end of input.
fn run<R, I, W>(
    generator: &Generator,
    options: &SamplingOptions,
    rng: &mut R,
    input: &mut I,
    out: &mut W,
) -> io::Result<()>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    writeln!(out, "Name Generator - Bigram Language Model")?;
    writeln!(out, "--------------------------------------")?;

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Plot => plot_bigram_probabilities(generator.model(), out)?,
            Command::Generate => {
                let name = generator.generate_with(rng, options);
                writeln!(out, "Generated Name: {name}")?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = Flags::parse();

    // A missing or empty corpus ends the run
    let generator = Generator::new(&flags.names)?;

    let options = SamplingOptions::new()
        .with_max_len(flags.max_len)?
        .with_nb_try(flags.nb_try)?;

    let mut rng = match flags.seed {
        Some(seed) => {
            info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&generator, &options, &mut rng, &mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
