use notegraph::labels::readable_entity_label;
use notegraph::view::{HeadlessError, HeadlessRenderer, Selection, render_svg};
use notegraph::{Config, Note, notes_from_json, notes_from_pipeline_json, related_notes};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Notes(notegraph::Error),
    View(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Notes(err) => write!(f, "{err}"),
            CliError::View(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<notegraph::Error> for CliError {
    fn from(value: notegraph::Error) -> Self {
        Self::Notes(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::View(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Graph,
    Layout,
    Render,
    Related,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pipeline: bool,
    pretty: bool,
    max_ticks: Option<u64>,
    width: Option<f64>,
    height: Option<f64>,
    label: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelatedOut<'a> {
    label: &'a str,
    readable_label: &'a str,
    notes: Vec<notegraph::view::PanelEntry>,
}

fn usage() -> &'static str {
    "notegraph-cli\n\
\n\
USAGE:\n\
  notegraph-cli [graph] [--pretty] [--pipeline] [--config <path>] [<path>|-]\n\
  notegraph-cli layout [--pretty] [--pipeline] [--config <path>] [--max-ticks <n>] [--width <w>] [--height <h>] [<path>|-]\n\
  notegraph-cli render [--pipeline] [--config <path>] [--max-ticks <n>] [--width <w>] [--height <h>] [--out <path>] [<path>|-]\n\
  notegraph-cli related --label <LABEL> [--pretty] [--pipeline] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - The command must be the first positional argument; a later word is a path.\n\
    Use `--` before a path that starts with '-' or names a command (`-- graph`).\n\
  - Input is a JSON array of notes; --pipeline accepts NER pipeline results instead.\n\
  - --config reads a JSON5 file with optional `graph`, `layout` and `interaction` sections.\n\
  - graph prints nodes and edges; layout prints the settled frame; render prints SVG.\n\
  - Logging goes to stderr and is controlled by RUST_LOG (default: warn).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    // Only the first positional may name a command; later ones are paths.
    let mut positional_seen = false;
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--pipeline" => args.pipeline = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--max-ticks" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_ticks = Some(n.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = Some(parse_extent(w)?);
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = Some(parse_extent(h)?);
            }
            "--label" => {
                let Some(label) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.label = Some(label.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if let Some(command) = command_word(path).filter(|_| !positional_seen) {
                    positional_seen = true;
                    args.command = command;
                    continue;
                }
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                positional_seen = true;
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Related) && args.label.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn command_word(word: &str) -> Option<Command> {
    match word {
        "graph" => Some(Command::Graph),
        "layout" => Some(Command::Layout),
        "render" => Some(Command::Render),
        "related" => Some(Command::Related),
        _ => None,
    }
}

fn parse_extent(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> Result<Config, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => Config::load(std::path::Path::new(path))?,
        None => Config::default(),
    };
    if let Some(w) = args.width {
        config.layout.width = w;
    }
    if let Some(h) = args.height {
        config.layout.height = h;
    }
    Ok(config)
}

fn load_notes(args: &Args) -> Result<Vec<Note>, CliError> {
    let text = read_input(args.input.as_deref())?;
    let notes = if args.pipeline {
        notes_from_pipeline_json(&text)?
    } else {
        notes_from_json(&text)?
    };
    tracing::debug!(notes = notes.len(), "loaded notes");
    Ok(notes)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let notes = load_notes(&args)?;
    let mut renderer = HeadlessRenderer::new().with_config(config);
    if let Some(n) = args.max_ticks {
        renderer = renderer.with_max_ticks(n);
    }
    let out = args.out.as_deref();

    match args.command {
        Command::Graph => {
            let graph = renderer.graph(&notes);
            write_json(&graph, args.pretty, out)
        }
        Command::Layout => {
            let frame = renderer.layout(notes)?;
            write_json(&frame, args.pretty, out)
        }
        Command::Render => {
            let frame = renderer.layout(notes)?;
            write_text(&render_svg(&frame), out)
        }
        Command::Related => {
            let label = args.label.as_deref().unwrap_or_default();
            let readable_label = readable_entity_label(label).into_owned();
            let selection = Selection::EntityType {
                label,
                readable_label: readable_label.clone(),
                notes: related_notes(&notes, label),
            };
            let related = RelatedOut {
                label,
                readable_label: &readable_label,
                notes: selection.panel_entries(),
            };
            write_json(&related, args.pretty, out)
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
