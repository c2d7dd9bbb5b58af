use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use std::{env, fs};

use anyhow::{anyhow, Context, Result};
use samudra::chat::stream::stream_words;
use samudra::chat::ui::{chart_caption, render_table};
use samudra::config::{load_or_default, workspace_root};
use samudra::plots::Figure;
use samudra::{ChatEngine, ChatSession, Reply};
use tracing_subscriber::EnvFilter;

const TABLE_ROWS: usize = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse()?;
    let root = workspace_root()?;
    let config = load_or_default()?;
    let engine = Arc::new(ChatEngine::bootstrap(&config, &root)?);
    let delay = Duration::from_millis(config.chat.stream_delay_ms);
    let mut session = ChatSession::new(engine);
    let mut figure_count = 0usize;

    println!("Samudra: tanyakan tentang tinggi muka laut (TML). Ketik /reset atau /quit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        match text {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                session.reset();
                println!("Riwayat percakapan dihapus.");
                continue;
            }
            _ => {}
        }

        let outcome = session.handle_message(text);
        for reply in outcome.replies {
            match reply {
                Reply::Text(message) => {
                    for word in stream_words(&message, delay) {
                        print!("{word}");
                        stdout.flush()?;
                    }
                    println!();
                }
                Reply::Warning(message) => println!("[!] {message}"),
                Reply::Chart(figure) => {
                    println!("{}", chart_caption(&figure));
                    if let Some(dir) = &args.figures {
                        figure_count += 1;
                        let path = write_figure(dir, figure_count, &figure)?;
                        println!("    disimpan ke {}", path.display());
                    }
                }
                Reply::Table(frame) => println!("{}", render_table(&frame, TABLE_ROWS)),
            }
        }
    }

    if let Some(path) = &args.history {
        session.history().save_jsonl(path)?;
        println!("Riwayat disimpan ke {}", path.display());
    }
    Ok(())
}

fn write_figure(dir: &Path, index: usize, figure: &Figure) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create figure directory {}", dir.display()))?;
    let path = dir.join(format!("figure-{index:03}.json"));
    let data = serde_json::to_string_pretty(figure)?;
    fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

struct CliArgs {
    figures: Option<PathBuf>,
    history: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut figures = None;
        let mut history = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--figures" => {
                    let value = args
                        .next()
                        .context("Expected a directory after --figures")?;
                    figures = Some(PathBuf::from(value));
                }
                "--history" => {
                    let value = args.next().context("Expected a file after --history")?;
                    history = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(Self { figures, history })
    }
}

fn print_usage() {
    println!("Samudra sea-level chatbot");
    println!("Reads questions from stdin and answers with text, charts and tables.");
    println!();
    println!("Usage: samudra [--figures <dir>] [--history <file>]");
    println!("  --figures <dir>   write every chart as JSON into <dir>");
    println!("  --history <file>  append the conversation as JSON lines on exit");
    println!();
    println!("Data and config live under $SAMUDRA_HOME (or the OS data directory).");
    println!("Set RUST_LOG=info for diagnostic output.");
}
