//! Invezt: search-grounded stock analysis in the terminal
//!
//! # Usage
//!
//! ```bash
//! # Gemini is the default backend
//! export GEMINI_API_KEY="..."
//!
//! # One-shot
//! cargo run -p invezt-cli -- NVDA
//!
//! # Interactive
//! cargo run -p invezt-cli
//!
//! # Anthropic instead, record as JSON
//! ANTHROPIC_API_KEY="..." cargo run -p invezt-cli -- --provider anthropic --json AAPL
//! ```

mod terminal;

use clap::Parser;
use invezt_report::{
    AnalysisConfig, AnalysisSession, LlmBackend, ReportRenderer, StockAnalyzer, Theme,
    input::{HINT, PLACEHOLDER},
};
use invezt_utils::{LogFormat, init_tracing, load_dotenv};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use terminal::TerminalView;
use tracing::{debug, info};

const DEFAULT_LOG_FILTER: &str = "warn,invezt=info";

#[derive(Parser, Debug)]
#[command(name = "invezt")]
#[command(version, about = "Search-grounded investment memos for any listed company", long_about = None)]
struct Args {
    /// Ticker symbol or company name; omit for interactive mode
    ticker: Option<String>,

    /// Model backend: gemini or anthropic [env: INVEZT_PROVIDER]
    #[arg(long, value_name = "NAME")]
    provider: Option<LlmBackend>,

    /// Model identifier [env: INVEZT_MODEL]
    #[arg(long)]
    model: Option<String>,

    /// Print the decoded record as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Disable terminal styling
    #[arg(long)]
    plain: bool,

    /// Log line format: pretty or json
    #[arg(long, value_name = "FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                          Invezt                              ║
║                                                              ║
║  Type a ticker or company name and press Enter.              ║
║                                                              ║
║  Commands:                                                   ║
║    /help              - Show help                            ║
║    /exit              - Exit                                 ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

fn print_help() {
    println!("{PLACEHOLDER}");
    println!("{HINT}");
    println!();
    println!("  /help  - Show this help");
    println!("  /exit  - Exit (also: exit, quit, Ctrl-D)");
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let dotenv = load_dotenv();
    let args = Args::parse();

    init_tracing(DEFAULT_LOG_FILTER, args.log_format);
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "Loaded .env");
    }

    let mut builder = AnalysisConfig::builder();
    if let Some(provider) = args.provider {
        builder = builder.backend(provider);
    }
    if let Some(model) = &args.model {
        builder = builder.model(model);
    }
    let config = builder.with_env()?.build()?;
    info!(provider = %config.backend, model = %config.model, "Configuration loaded");

    let mut session = AnalysisSession::new(StockAnalyzer::from_config(config)?);

    if args.plain {
        console::set_colors_enabled(false);
    }
    let theme = if args.plain {
        Theme::plain()
    } else {
        Theme::styled()
    };
    let width = console::Term::stdout()
        .size_checked()
        .map_or(80, |(_, cols)| usize::from(cols));
    let mut view = TerminalView::new(ReportRenderer::new(theme).with_width(width), args.json);

    match args.ticker {
        Some(ticker) => one_shot(&mut session, &mut view, ticker).await,
        None => {
            repl(&mut session, &mut view).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Analyse one ticker; an error state is a failing exit
async fn one_shot(
    session: &mut AnalysisSession,
    view: &mut TerminalView,
    ticker: String,
) -> anyhow::Result<ExitCode> {
    session.edit_input(ticker);
    if !session.submit(|s| view.observe(s)).await {
        eprintln!("{PLACEHOLDER}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(if session.state().error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Read tickers line by line until EOF or an exit command
///
/// Input is not read while a request is in flight.
async fn repl(session: &mut AnalysisSession, view: &mut TerminalView) -> anyhow::Result<()> {
    print_banner();
    view.observe(session);

    let provider = session.analyzer().provider_name().to_string();
    let model = session.analyzer().config().model.clone();
    println!("Configuration:");
    println!("  Provider: {provider}");
    println!("  Model: {model}");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">>> ");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        match line.trim() {
            "" => continue,
            "/exit" | "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "/help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        session.edit_input(line);
        session.submit(|s| view.observe(s)).await;
    }

    Ok(())
}
