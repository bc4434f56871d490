//! Interactive terminal client for the-nav.
//!
//! Resolves the typed shortcut on every keystroke and shows the resulting
//! address, a proportional ribbon of matched fragments, and the legal
//! continuations. With a positional argument the client runs one-shot
//! instead: resolve, print, exit.

mod ctx;
mod input;
mod render;
mod terminal;

use std::{
  fs,
  path::{
    Path,
    PathBuf,
  },
  process::ExitCode,
  time::Duration,
};

use anyhow::{
  Context,
  Result,
};
use clap::{
  ArgAction,
  Parser,
};
use crossterm::event::{
  self,
  Event,
};
use the_nav_config::CompiledConfig;
use the_nav_core::resolve::{
  ResolvedView,
  resolve,
};

use crate::ctx::Ctx;

#[derive(Debug, Parser)]
#[command(name = "the-nav", about = "Type-ahead shortcut navigation")]
struct Cli {
  /// Load shortcut definitions from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Print the resolved record as JSON (one-shot mode only)
  #[arg(long = "json", requires = "input")]
  json: bool,

  /// Resolve this input and print the address instead of running
  /// interactively
  #[arg(value_name = "input")]
  input: Option<String>,
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();
  setup_logging(&cli)?;

  let compiled = load_config(cli.config_file.as_deref())?;

  if let Some(input) = &cli.input {
    return one_shot(&compiled, input, cli.json);
  }

  let mut ctx = Ctx::new(compiled, cli.config_file.clone());
  if let Some(url) = run(&mut ctx)? {
    println!("{url}");
  }
  Ok(ExitCode::SUCCESS)
}

fn load_config(path: Option<&Path>) -> Result<CompiledConfig> {
  let source = match path {
    Some(path) => {
      fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    },
    None => the_nav_config::DEFAULT_SOURCE.to_string(),
  };
  the_nav_config::compile(&source)
    .map_err(|error| anyhow::anyhow!("invalid shortcut config at {error}"))
}

/// Resolve once, print the address (or the whole record as JSON), and use
/// the exit status to report match/no-match.
fn one_shot(compiled: &CompiledConfig, input: &str, json: bool) -> Result<ExitCode> {
  let Some(view) = one_shot_view(compiled, input) else {
    return Ok(ExitCode::FAILURE);
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&view.record)?);
  } else {
    println!("{}", view.record.to_url(&compiled.scheme));
  }
  Ok(ExitCode::SUCCESS)
}

/// The compiled root is a sequence, which degenerates to pure suggestions
/// instead of failing, so a record that never got a host means nothing
/// actually matched. Same filter as [`Ctx::url`].
fn one_shot_view(compiled: &CompiledConfig, input: &str) -> Option<ResolvedView> {
  resolve(&compiled.root, input).filter(|view| !view.record.host.is_empty())
}

fn run(ctx: &mut Ctx) -> Result<Option<String>> {
  let mut terminal = terminal::Terminal::new()?;
  terminal.enter_raw_mode()?;
  let result = event_loop(ctx, &mut terminal);
  terminal.leave_raw_mode()?;
  result
}

fn event_loop(ctx: &mut Ctx, terminal: &mut terminal::Terminal) -> Result<Option<String>> {
  render::render(ctx, terminal)?;

  loop {
    if ctx.should_quit {
      return Ok(ctx.submitted.take());
    }

    if event::poll(Duration::from_millis(100))?
      && let Event::Key(key) = event::read()?
    {
      input::handle_key(ctx, key);
    }

    if ctx.needs_render {
      render::render(ctx, terminal)?;
      ctx.needs_render = false;
    }
  }
}

fn setup_logging(cli: &Cli) -> Result<()> {
  let level = match cli.verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  let dispatch = fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level);

  match (&cli.log_file, cli.input.is_some()) {
    (Some(path), _) => dispatch.chain(fern::log_file(path)?).apply()?,
    (None, true) => dispatch.chain(std::io::stderr()).apply()?,
    // Interactive mode never logs to the screen: raw mode owns it. Without
    // --log the log file sits beside the config; the built-in shortcuts
    // have no file to reload, so nothing needs a logger.
    (None, false) => match default_log_file(cli.config_file.as_deref()) {
      Some(path) => dispatch.chain(fern::log_file(path)?).apply()?,
      None => {},
    },
  }
  Ok(())
}

fn default_log_file(config_file: Option<&Path>) -> Option<PathBuf> {
  config_file.map(|path| path.with_extension("log"))
}
