//! md5rev CLI
//!
//! Recover a plaintext from an (iterated) MD5 digest by brute force or word list.

mod range;
mod tags;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use md5rev_core::{
    format_count, md5_iter, range_size, Alphabet, Keyspace, Materialized, Md5Search,
    PartialDecision, Phase, SearchConfig, SearchOutcome, SearchResult, SearchTarget,
};
use tracing::warn;

use crate::range::parse_range;
use crate::tags::TagTable;

#[derive(Parser)]
#[command(name = "md5rev")]
#[command(author = "md5rev Team")]
#[command(version = "0.1.0")]
#[command(about = "Recover plaintexts from MD5 digests by brute force", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the plaintext of a digest
    Crack {
        /// Length range: 'min-max' or a single length
        range: String,

        /// MD5 digest to match (lowercase hex)
        hash: String,

        /// Characters to build candidates from; tags like <digits> are expanded
        alphabet: String,

        /// Fixed start of every candidate (tags are expanded)
        #[arg(long = "start-char", visible_alias = "start")]
        start_char: Option<String>,

        /// Scan the lines of this file instead of generating candidates
        #[arg(long)]
        word_list: Option<PathBuf>,

        /// Maximum number of times to apply MD5 per candidate
        #[arg(long, default_value = "1")]
        brute_collision: u32,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Candidates per thread per round
        #[arg(long, default_value = "4096")]
        batch_size: usize,

        /// Maximum time in seconds (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_time: u64,

        /// Maximum candidates tested (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_candidates: u64,

        /// Generate each length fully before scanning it (Ctrl+C offers to keep partial results)
        #[arg(long)]
        materialize: bool,

        /// Drop repeated alphabet characters
        #[arg(long)]
        dedup: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Do not print live progress
        #[arg(long)]
        no_progress: bool,
    },

    /// Print the iterated MD5 of a word
    Hash {
        word: String,

        /// Number of MD5 rounds
        #[arg(short, long, default_value = "1")]
        times: u32,
    },

    /// List alphabet tags
    Tags,

    /// Print the characters of a phrase without repeats, in first-seen order
    Unique { phrase: String },
}

/// Where `crack` takes its candidates from
enum CandidateMode {
    WordList(PathBuf),
    Generated {
        alphabet: Alphabet,
        prefix: Option<String>,
        materialize: bool,
    },
}

/// Parameters of a `crack` invocation after tag expansion
struct CrackArgs {
    min_length: usize,
    max_length: usize,
    target: SearchTarget,
    mode: CandidateMode,
    config: SearchConfig,
    json: bool,
    progress: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tags = TagTable::standard();

    match cli.command {
        Commands::Crack {
            range,
            hash,
            alphabet,
            start_char,
            word_list,
            brute_collision,
            threads,
            batch_size,
            max_time,
            max_candidates,
            materialize,
            dedup,
            json,
            no_progress,
        } => {
            if tags.suggest_tags(&alphabet) {
                eprintln!(
                    "Note: You can use tags to specify character ranges: {}.\nFor example: md5rev crack {} {} <digits><symbols>",
                    tags.names(),
                    range,
                    hash
                );
            }

            let (min_length, max_length) = parse_range(&range)?;
            let mode = candidate_mode(
                &tags,
                &alphabet,
                start_char.as_deref(),
                word_list,
                dedup,
                materialize,
            )?;

            let args = CrackArgs {
                min_length,
                max_length,
                target: SearchTarget::new(hash).with_max_collisions(brute_collision),
                mode,
                config: SearchConfig {
                    threads,
                    batch_size,
                    max_time_secs: max_time,
                    max_candidates,
                },
                json,
                progress: !no_progress && !json,
            };
            cmd_crack(args)?;
        }
        Commands::Hash { word, times } => {
            println!("{}", md5_iter(&word, times));
        }
        Commands::Tags => {
            cmd_tags(&tags);
        }
        Commands::Unique { phrase } => {
            let unique = Alphabet::new(&phrase)
                .map(|a| a.deduplicated().to_string())
                .unwrap_or_default();
            println!("{}", unique);
        }
    }

    Ok(())
}

/// Word lists never look at the alphabet, so it is only validated for generated candidates
fn candidate_mode(
    tags: &TagTable,
    alphabet: &str,
    start_char: Option<&str>,
    word_list: Option<PathBuf>,
    dedup: bool,
    materialize: bool,
) -> Result<CandidateMode> {
    if let Some(path) = word_list {
        return Ok(CandidateMode::WordList(path));
    }

    let mut alphabet = Alphabet::new(&tags.expand(alphabet))?;
    if dedup {
        alphabet = alphabet.deduplicated();
    }
    Ok(CandidateMode::Generated {
        alphabet,
        prefix: start_char.map(|s| tags.expand(s)),
        materialize,
    })
}

fn cmd_crack(args: CrackArgs) -> Result<()> {
    let search = Md5Search::new(args.target.clone(), args.config.clone())?;

    // Ctrl+C
    let stats = search.stats();
    if let Err(e) = ctrlc::set_handler(move || stats.interrupt()) {
        warn!("Could not install Ctrl+C handler: {}", e);
    }

    if !args.json {
        print_header(&args, &search);
    }

    let run = |s: &Md5Search| -> Result<SearchOutcome, md5rev_core::SearchError> {
        match &args.mode {
            CandidateMode::WordList(path) => s.run_wordlist(path),
            CandidateMode::Generated {
                alphabet,
                prefix,
                materialize: true,
            } => s.run_lengths_eager(
                args.min_length,
                args.max_length,
                alphabet,
                prefix.as_deref(),
                prompt_partial,
            ),
            CandidateMode::Generated {
                alphabet, prefix, ..
            } => s.run_lengths(args.min_length, args.max_length, alphabet, prefix.as_deref()),
        }
    };

    let outcome = if args.progress {
        let outcome = search.with_progress(Duration::from_millis(250), run, |stats| {
            if matches!(stats.phase(), Phase::Generating | Phase::Scanning) {
                eprint!("\r{}", stats.format());
            }
        });
        eprintln!(); // New line after stats
        outcome
    } else {
        run(&search)
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) if e.is_resource_error() => {
            // The run ends here; nothing else to clean up
            if args.json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                eprintln!("{}.", e);
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        SearchOutcome::Found(result) => print_result(result),
        SearchOutcome::Exhausted { time_secs, .. } => {
            let generated = matches!(args.mode, CandidateMode::Generated { .. });
            if generated && args.min_length == args.max_length {
                println!(
                    "\n==> Word not found. Try using brute by dictionary or the --brute-collision parameter"
                );
            } else {
                println!("\n==> Word not found.");
            }
            println!("==> Execution time: {:.2} seconds", time_secs);
        }
        SearchOutcome::Stopped {
            candidates_tested,
            time_secs,
        } => {
            println!(
                "\n==> Search stopped after {} candidates.",
                format_count(*candidates_tested as f64)
            );
            println!("==> Execution time: {:.2} seconds", time_secs);
        }
    }

    Ok(())
}

fn print_header(args: &CrackArgs, search: &Md5Search) {
    eprintln!("md5rev v0.1.0");
    eprintln!("Target: {}", args.target.hash);
    eprintln!("Max collisions: {}", args.target.max_collisions);
    match &args.mode {
        CandidateMode::WordList(path) => eprintln!("Word list: {}", path.display()),
        CandidateMode::Generated {
            alphabet, prefix, ..
        } => {
            let prefix_len = prefix.as_deref().map_or(0, |p| p.chars().count());
            eprintln!("Lengths: {}-{}", args.min_length, args.max_length);
            eprintln!("Alphabet: {} characters", alphabet.len());
            if let Some(prefix) = prefix {
                eprintln!("Start: {}", prefix);
            }
            eprintln!(
                "Keyspace: {}",
                format_count(range_size(
                    alphabet.len(),
                    prefix_len,
                    args.min_length,
                    args.max_length
                ))
            );
        }
    }
    eprintln!("Threads: {}", search.threads());
    eprintln!();
}

/// Ask whether to scan the candidates generated before Ctrl+C
fn prompt_partial(keyspace: &Keyspace, materialized: &Materialized) -> PartialDecision {
    eprint!(
        "\nProcessing interrupted at length {} ({} of {} combinations). Continue iteration with generated combinations? Y/N: ",
        keyspace.length(),
        materialized.candidates.len(),
        keyspace.size()
    );
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return PartialDecision::Abort;
    }
    if answer.trim().eq_ignore_ascii_case("y") {
        PartialDecision::Continue
    } else {
        // Nothing to keep: end the process right here
        std::process::exit(0);
    }
}

fn cmd_tags(tags: &TagTable) {
    println!("Alphabet Tags:");
    println!("{:-<60}", "");
    for (tag, chars) in tags.iter() {
        let shown = if chars == " " { "' '" } else { chars };
        println!("{:<16} {}", tag, shown);
    }
}

fn print_result(result: &SearchResult) {
    println!();
    println!(
        "==> Found: {} with {} collisions",
        result.word, result.collisions
    );
    println!(
        "==> Target: {} -> Source: {} -> Decrypted: {}",
        result.target, result.digest, result.word
    );
    println!("{:-<60}", "");
    println!("Candidates Tested: {}", result.candidates_tested);
    println!("Speed:             {:.2} Mcand/s", result.candidates_per_second / 1_000_000.0);
    println!("==> Execution time: {:.2} seconds", result.time_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_ignores_empty_alphabet() {
        let tags = TagTable::standard();
        let mode = candidate_mode(&tags, "", None, Some(PathBuf::from("words.txt")), false, false)
            .unwrap();
        assert!(matches!(mode, CandidateMode::WordList(path) if path == PathBuf::from("words.txt")));
    }

    #[test]
    fn test_generated_mode_requires_alphabet() {
        let tags = TagTable::standard();
        assert!(candidate_mode(&tags, "", None, None, false, false).is_err());
    }

    #[test]
    fn test_generated_mode_expands_tags() {
        let tags = TagTable::standard();
        let mode = candidate_mode(&tags, "aa<digits>", Some("x<space>"), None, true, true).unwrap();
        match mode {
            CandidateMode::Generated {
                alphabet,
                prefix,
                materialize,
            } => {
                assert_eq!(alphabet.to_string(), "a0123456789");
                assert_eq!(prefix.as_deref(), Some("x "));
                assert!(materialize);
            }
            CandidateMode::WordList(_) => panic!("expected generated candidates"),
        }
    }
}
