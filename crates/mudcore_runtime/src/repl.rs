//! The interactive shell.
//!
//! Each line typed is dispatched as the session's player, then logical time
//! advances by the configured tick interval. Lines starting with `/` are
//! shell commands and never reach the world.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

use crate::config::RuntimeConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;
use mudcore_foundation::{Error, ErrorKind, Result};

/// What a shell command asks the loop to do next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    config: RuntimeConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session, config: RuntimeConfig) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session, config))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(mut editor: E, session: Session, config: RuntimeConfig) -> Self {
        editor.set_keywords(command_words(&session));
        Self {
            editor,
            session,
            config,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.config.show_banner = false;
        self
    }

    /// The session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The session, mutably.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Runs the loop until EOF or `/quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            print_banner();
        }
        print_text(&self.session.submit("look").join("\n"));

        loop {
            let line = match self.editor.read_line(&self.config.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    println!();
                    continue;
                }
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);
            match self.eval(&line) {
                Ok((text, Flow::Continue)) => print_text(&text),
                Ok((text, Flow::Quit)) => {
                    print_text(&text);
                    break;
                }
                Err(e) => print_error(&e),
            }
        }

        println!("\nFarewell!");
        Ok(())
    }

    /// Runs every line of `script` in order, echoing each after the prompt.
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first shell-command error.
    pub fn run_script(&mut self, script: &str) -> Result<()> {
        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            println!("{}{line}", self.config.prompt);
            let (text, flow) = self.eval(line)?;
            print_text(&text);
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one line and returns the text to show.
    fn eval(&mut self, line: &str) -> Result<(String, Flow)> {
        if let Some(meta) = line.trim().strip_prefix('/') {
            return self.eval_meta(meta);
        }
        let mut out = self.session.submit(line);
        out.extend(self.session.tick(self.config.tick_interval));
        self.session.check_player()?;
        Ok((out.join("\n"), Flow::Continue))
    }

    fn eval_meta(&mut self, meta: &str) -> Result<(String, Flow)> {
        let mut words = meta.split_whitespace();
        let text = match words.next().unwrap_or_default() {
            "quit" | "q" => return Ok((String::new(), Flow::Quit)),
            "help" | "h" => META_HELP.to_string(),
            "time" => format!("Logical time: {:.1}s", self.session.world().now().as_secs_f64()),
            "wait" => {
                let secs: f64 = match words.next() {
                    Some(arg) => arg
                        .parse()
                        .map_err(|_| invalid_meta(format!("not a number: {arg}")))?,
                    None => self.config.tick_interval.as_secs_f64(),
                };
                let delta = Duration::try_from_secs_f64(secs)
                    .map_err(|e| invalid_meta(e.to_string()))?;
                self.session.tick(delta).join("\n")
            }
            "status" => self.status(),
            other => return Err(invalid_meta(format!("unknown shell command: /{other}"))),
        };
        Ok((text, Flow::Continue))
    }

    fn status(&self) -> String {
        let world = self.session.world();
        let conversations = self.session.dispatcher().conversations();
        let mut out = format!(
            "time {:.1}s, {} characters, {} conversations, {} scheduled",
            world.now().as_secs_f64(),
            world.characters().count(),
            conversations.len(),
            conversations.scheduler().len(),
        );
        if let Some(next) = conversations.scheduler().next_due() {
            let _ = write!(out, ", next at {:.1}s", next.as_secs_f64());
        }
        out
    }
}

const META_HELP: &str = "Shell commands:
  /help          Show this help
  /time          Show logical time
  /wait [SECS]   Let time pass
  /status        Show world and scheduler counts
  /quit          Leave";

fn invalid_meta(message: String) -> Error {
    Error::new(ErrorKind::Internal(message))
}

fn command_words(session: &Session) -> Vec<String> {
    let mut words: Vec<String> = session
        .dispatcher()
        .registries()
        .global()
        .definitions()
        .into_iter()
        .flat_map(|d| std::iter::once(d.name().to_string()).chain(d.aliases().iter().cloned()))
        .collect();
    words.extend(["/help", "/time", "/wait", "/status", "/quit"].map(String::from));
    words.sort_unstable();
    words.dedup();
    words
}

fn print_text(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
    let _ = io::stdout().flush();
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}

fn print_banner() {
    println!("\x1b[1;36m");
    println!("  __  __           _                    ");
    println!(" |  \\/  |_   _  __| | ___ ___  _ __ ___ ");
    println!(" | |\\/| | | | |/ _` |/ __/ _ \\| '__/ _ \\");
    println!(" | |  | | |_| | (_| | (_| (_) | | |  __/");
    println!(" |_|  |_|\\__,_|\\__,_|\\___\\___/|_|  \\___|");
    println!("\x1b[0m");
    println!("Welcome to mudcore v{}", env!("CARGO_PKG_VERSION"));
    println!("Type `commands` for the command list, `/help` for the shell. Ctrl+D leaves.\n");
    let _ = io::stdout().flush();
}
