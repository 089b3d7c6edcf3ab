//! mudcore CLI entry point.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use mudcore_runtime::{Repl, RuntimeConfig, demo, logging};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    scripts: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    no_banner: bool,
    admin: bool,
    prompt: Option<String>,
    name: Option<String>,
    tick_ms: Option<u64>,
    log_filter: Option<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn take_value(
    args: &[String],
    i: &mut usize,
    flag: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--no-banner" => config.no_banner = true,
            "--admin" => config.admin = true,
            "--prompt" => config.prompt = Some(take_value(&args, &mut i, "--prompt")?),
            "--name" => config.name = Some(take_value(&args, &mut i, "--name")?),
            "--log" => config.log_filter = Some(take_value(&args, &mut i, "--log")?),
            "--tick-ms" => {
                let value = take_value(&args, &mut i, "--tick-ms")?;
                config.tick_ms = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --tick-ms value: {value}"))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.scripts.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn runtime_config(cli: &CliConfig) -> RuntimeConfig {
    let mut config = RuntimeConfig::default()
        .with_banner(!cli.no_banner && cli.scripts.is_empty())
        .with_admin(cli.admin);
    if let Some(prompt) = &cli.prompt {
        config = config.with_prompt(prompt.clone());
    }
    if let Some(name) = &cli.name {
        config = config.with_player_name(name.clone());
    }
    if let Some(ms) = cli.tick_ms {
        config = config.with_tick_interval(Duration::from_millis(ms));
    }
    if let Some(filter) = &cli.log_filter {
        config = config.with_log_filter(filter.clone());
    }
    config
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("mudcore {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = runtime_config(&cli);
    logging::init(config.log_filter.as_deref())?;
    tracing::info!(player = %config.player_name, admin = config.admin, "starting");

    let session = demo::build(&config)?;
    let mut repl = Repl::new(session, config)?;

    for script in &cli.scripts {
        let source = fs::read_to_string(script)
            .map_err(|e| format!("cannot read {}: {e}", script.display()))?;
        repl.run_script(&source)?;
    }

    if cli.batch_mode {
        return Ok(());
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mmudcore\x1b[0m - command dispatch and conversations for text worlds

\x1b[1mUSAGE:\x1b[0m
    mudcore [OPTIONS] [SCRIPTS...]

\x1b[1mARGUMENTS:\x1b[0m
    [SCRIPTS...]    Files of commands to run, one per line, before the shell starts

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Run scripts and exit (no shell)
    --no-banner        Skip the welcome banner
    --admin            Grant admin commands to the player
    --name NAME        Player name (default: Wanderer)
    --prompt TEXT      Prompt to show before each line
    --tick-ms N        Logical milliseconds that pass per line (default: 1000)
    --log FILTER       tracing filter, e.g. mudcore_dispatch=debug (default: RUST_LOG or warn)

\x1b[1mEXAMPLES:\x1b[0m
    mudcore                              Start the shell in the demo village
    mudcore --admin --name Ash           Play as an admin called Ash
    mudcore -b walk.txt                  Run walk.txt and exit
    mudcore --log mudcore_dispatch=trace Show dispatch decisions on stderr

\x1b[1mSHELL COMMANDS:\x1b[0m
    /help                Show shell commands
    /wait [SECS]         Let time pass
    /status              Show world and scheduler counts
    /quit                Leave
    Ctrl+D               Leave
    Ctrl+C               Cancel the current line"
    );
}
