//! `sqlifsm` command-line interface.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sqlifsm::{Scanner, SignatureSet};
use sqlifsm_cli::{serve, ScanReport, ServerConfig};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,sqlifsm=info,sqlifsm_cli=info";

#[derive(Parser, Debug)]
#[command(name = "sqlifsm", version)]
#[command(about = "Heuristic SQL injection detection for raw HTTP requests")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, env = "SQLIFSM_VERBOSE")]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "SQLIFSM_LOG_JSON")]
    log_json: bool,

    /// Signature families to report (comma-separated, or "all")
    #[arg(
        long,
        global = true,
        env = "SQLIFSM_SIGNATURES",
        default_value = "all",
        value_parser = SignatureSet::parse_list
    )]
    signatures: SignatureSet,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan one raw HTTP request; exits with status 1 when it is malicious
    Scan {
        /// Request text to scan
        #[arg(short, long, conflicts_with = "file")]
        input: Option<String>,

        /// File holding the request (stdin when neither this nor --input is given)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output the result in JSON format
        #[arg(long)]
        json: bool,

        /// Treat the input as a single field instead of an HTTP request
        #[arg(long)]
        raw_text: bool,
    },

    /// Serve the scanner over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1", env = "SQLIFSM_HOST")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = 5000, env = "SQLIFSM_PORT")]
        port: u16,

        /// Allow cross-origin requests from any origin
        #[arg(long, default_value_t = true, action = ArgAction::Set, env = "SQLIFSM_CORS")]
        cors: bool,
    },
}

fn init_logging(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { DEFAULT_FILTER };
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic payload");
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());
        error!(panic_payload = %payload, panic_location = %location, "sqlifsm panicked");
        default_hook(panic_info);
    }));
}

fn read_input(input: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(input) = input {
        return Ok(input);
    }
    if let Some(file) = file {
        return fs::read_to_string(&file)
            .with_context(|| format!("Failed to read file: {:?}", file));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read request from stdin")?;
    Ok(buf)
}

fn run_scan(
    signatures: SignatureSet,
    input: Option<String>,
    file: Option<PathBuf>,
    json: bool,
    raw_text: bool,
) -> Result<ExitCode> {
    let text = read_input(input, file)?;
    debug!(bytes = text.len(), raw_text, "scanning input");

    let mut scanner = Scanner::new().with_signatures(signatures);
    let report = if raw_text {
        ScanReport::from_text(&text, scanner.scan_text(&text))
    } else {
        ScanReport::from_verdict(&scanner.scan(&text))
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(if report.is_malicious {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    install_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match cli.command {
        Command::Scan {
            input,
            file,
            json,
            raw_text,
        } => run_scan(cli.signatures, input, file, json, raw_text),
        Command::Serve { host, port, cors } => {
            serve(ServerConfig {
                host,
                port,
                cors,
                signatures: cli.signatures,
            })
            .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
