use clap::{Parser, Subcommand};
use notify::{RecursiveMode, Watcher};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tagdepth_highlight::{Debouncer, Decoration, HighlightConfig, Highlighter, Update};

mod render;

#[derive(Parser)]
#[command(name = "tagdepth")]
#[command(about = "Paint markup tag names by nesting depth")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a markup file with tag names colored by nesting level
    Scan {
        /// Input file
        path: String,

        /// Language id (html, javascriptreact, typescriptreact, vue, xml).
        /// Inferred from the file extension when omitted.
        #[arg(long)]
        lang: Option<String>,

        /// Print levels and ranges as JSON instead of painted source
        #[arg(long)]
        json: bool,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the color used for a nesting level
    Color {
        level: usize,

        #[arg(long, default_value_t = 60)]
        saturation: u8,

        #[arg(long, default_value_t = 60)]
        lightness: u8,

        /// Print as #rrggbb
        #[arg(long)]
        hex: bool,
    },

    /// Re-scan a file whenever it changes
    Watch {
        /// Input file
        path: String,

        #[arg(long)]
        lang: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            lang,
            json,
            config,
        } => cmd_scan(&path, lang, json, config.as_deref()),
        Command::Color {
            level,
            saturation,
            lightness,
            hex,
        } => cmd_color(level, saturation, lightness, hex),
        Command::Watch { path, lang, config } => cmd_watch(&path, lang, config.as_deref()),
    }
}

/// Install a stderr subscriber when `TAGDEPTH_LOG` or `RUST_LOG` is set.
fn init_tracing() {
    let filter = match std::env::var("TAGDEPTH_LOG") {
        Ok(val) => tracing_subscriber::EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => {
            tracing_subscriber::EnvFilter::from_default_env()
        }
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> HighlightConfig {
    let Some(path) = path else {
        return HighlightConfig::default();
    };
    match HighlightConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Language id for a file, from `--lang` or the extension.
fn language_for(path: &str, lang: Option<String>) -> String {
    if let Some(lang) = lang {
        return lang;
    }
    match language_from_extension(Path::new(path)) {
        Some(lang) => lang.to_string(),
        None => {
            eprintln!("Error: cannot infer language of {path}, pass --lang");
            std::process::exit(1);
        }
    }
}

fn language_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some("html"),
        "jsx" => Some("javascriptreact"),
        "tsx" => Some("typescriptreact"),
        "vue" => Some("vue"),
        "xml" | "svg" => Some("xml"),
        _ => None,
    }
}

fn cmd_scan(path: &str, lang: Option<String>, json: bool, config: Option<&Path>) {
    let config = load_config(config);
    let language = language_for(path, lang);
    let source = read_source(path);

    let mut highlighter = Highlighter::new(config);
    match highlighter.update(&language, &source) {
        Update::Clear => {
            eprintln!("Error: language '{language}' is not colored");
            std::process::exit(1);
        }
        Update::TooLarge { .. } => {
            eprintln!("Error: file is too large for colored tags");
            std::process::exit(1);
        }
        Update::Paint(decorations) if json => print_json(&decorations),
        Update::Paint(decorations) => {
            show(&render::paint(&source, &decorations));
        }
    }
}

fn print_json(decorations: &[Decoration]) {
    let levels: Vec<serde_json::Value> = decorations
        .iter()
        .map(|d| {
            serde_json::json!({
                "level": d.level,
                "color": d.color.to_string(),
                "hex": d.color.to_hex(),
                "spans": d.spans.iter().map(|s| [s.start, s.end]).collect::<Vec<_>>(),
                "ranges": d.ranges,
            })
        })
        .collect();

    match serde_json::to_string_pretty(&levels) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing levels: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_color(level: usize, saturation: u8, lightness: u8, hex: bool) {
    let color = tagdepth_levels::color_for_level_with(level, saturation, lightness);
    if hex {
        println!("{}", color.to_hex());
    } else {
        println!("{color}");
    }
}

fn cmd_watch(path: &str, lang: Option<String>, config: Option<&Path>) {
    let config = load_config(config);
    let language = language_for(path, lang);
    let delay = config.debounce_delay();

    let mut highlighter = Highlighter::new(config);
    let file = PathBuf::from(path);
    redraw(&mut highlighter, &file, &language);

    let debouncer = Debouncer::new(delay, move |()| {
        redraw(&mut highlighter, &file, &language)
    });

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = match notify::recommended_watcher(tx) {
        Ok(watcher) => watcher,
        Err(e) => {
            eprintln!("Error starting watcher: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = watcher.watch(Path::new(path), RecursiveMode::NonRecursive) {
        eprintln!("Error watching {path}: {e}");
        std::process::exit(1);
    }

    for event in rx {
        match event {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                tracing::debug!(kind = ?event.kind, "file changed");
                debouncer.call(());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "watch error"),
        }
    }
}

fn redraw(highlighter: &mut Highlighter, path: &Path, language: &str) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            return;
        }
    };

    let body = match highlighter.update(language, &source) {
        Update::Clear => source,
        Update::TooLarge { warn } => {
            if warn {
                eprintln!("File is too large for colored tags. Coloring disabled.");
            }
            source
        }
        Update::Paint(decorations) => render::paint(&source, &decorations),
    };
    // Clear screen, cursor home.
    show(&format!("\x1b[2J\x1b[H{body}"));
}

/// Print to stdout and flush, so output without a trailing newline shows up
/// right away (the watch redraw runs on the debounce thread).
fn show(text: &str) {
    if let Err(e) = write_flushed(&mut io::stdout().lock(), text) {
        tracing::warn!(error = %e, "failed to write output");
    }
}

fn write_flushed(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}
