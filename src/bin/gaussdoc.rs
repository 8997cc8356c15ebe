//! Command-line interface for gaussdoc
//! Highlights GAUSS sources and renders the documentation helpers from the shell.
//!
//! Usage:
//!   gaussdoc highlight `<path>` [--format `<format>`] [--lexer `<name>`]  - Highlight a source file
//!   gaussdoc detect `<path>`                                          - Print the lexer chosen for a file
//!   gaussdoc menusel `<text>` [--role `<name>`]                        - Render menu-selection markup
//!   gaussdoc signature `<text>`                                       - Render a procedure signature
//!   gaussdoc classify `<word>`...                                     - Report which word list a word is in
//!   gaussdoc list-lexers                                            - List registered lexers
//!   gaussdoc list-formats                                           - List output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use gaussdoc::gauss::config::GaussDocConfig;
use gaussdoc::gauss::formats::{FormatterRegistry, HtmlFormatter};
use gaussdoc::gauss::lexing::words::classify_word;
use gaussdoc::gauss::registry::LexerRegistry;
use gaussdoc::gauss::roles::{RoleRegistry, MENUSELECTION};
use gaussdoc::gauss::signature::{render_signature, Signature};
use gaussdoc::gauss::GaussDocError;
use gaussdoc::gauss::Token;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let matches = Command::new("gaussdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Documentation tooling for GAUSS sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("highlight")
                .about("Highlight a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'html', 'raw', 'json')")
                        .default_value("html"),
                )
                .arg(
                    Arg::new("lexer")
                        .long("lexer")
                        .short('l')
                        .help("Lexer name or alias; detected from the file when omitted"),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Print the lexer selected for a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("menusel")
                .about("Render menu-selection markup as HTML")
                .arg(
                    Arg::new("text")
                        .help("Role content, e.g. 'File-->&Open'")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .short('r')
                        .help("Role name")
                        .default_value(MENUSELECTION),
                ),
        )
        .subcommand(
            Command::new("signature")
                .about("Render a procedure signature as HTML")
                .arg(
                    Arg::new("text")
                        .help("Signature, e.g. '{ a, b } = f(x[, y])'")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Report which fixed word list each word belongs to")
                .arg(
                    Arg::new("words")
                        .help("Words to look up")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-lexers").about("List registered lexers"))
        .subcommand(Command::new("list-formats").about("List output formats"))
        .get_matches();

    if let Err(e) = init_logging(matches.get_flag("verbose")) {
        eprintln!("Error: {}", e);
    }

    let result = load_config(matches.get_one::<String>("config"))
        .and_then(|config| run(&matches, &config));
    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: bool) -> Result<(), String> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}

fn load_config(path: Option<&String>) -> Result<GaussDocConfig, GaussDocError> {
    Ok(GaussDocConfig::load(path.map(Path::new))?)
}

fn run(matches: &ArgMatches, config: &GaussDocConfig) -> Result<String, GaussDocError> {
    match matches.subcommand() {
        Some(("highlight", sub)) => {
            let path = required(sub, "path");
            let format = required(sub, "format");
            handle_highlight_command(config, path, format, sub.get_one::<String>("lexer"))
        }
        Some(("detect", sub)) => handle_detect_command(config, required(sub, "path")),
        Some(("menusel", sub)) => {
            handle_menusel_command(config, required(sub, "text"), required(sub, "role"))
        }
        Some(("signature", sub)) => handle_signature_command(config, required(sub, "text")),
        Some(("classify", sub)) => {
            let words: Vec<&str> = sub
                .get_many::<String>("words")
                .map(|values| values.map(String::as_str).collect())
                .unwrap_or_default();
            Ok(handle_classify_command(&words))
        }
        Some(("list-lexers", _)) => Ok(handle_list_lexers_command(config)),
        Some(("list-formats", _)) => Ok(handle_list_formats_command(config)),
        _ => unreachable!(),
    }
}

/// Arguments that are required or carry a default are always present.
fn required<'m>(matches: &'m ArgMatches, name: &str) -> &'m str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Handle the highlight command
fn handle_highlight_command(
    config: &GaussDocConfig,
    path: &str,
    format: &str,
    lexer_name: Option<&String>,
) -> Result<String, GaussDocError> {
    let source = std::fs::read_to_string(path)?;
    let lexers = LexerRegistry::with_options(config.lexer.clone());
    let lexer = match lexer_name {
        Some(name) => lexers.get(name)?,
        None => lexers.select(path, &source)?,
    };
    debug!(lexer = lexer.name(), format, "highlighting {}", path);

    let text = lexer.preprocess(&source);
    let tokens: Vec<Token<'_>> = lexer.tokens(&text).collect();
    let formatters = FormatterRegistry::with_html(HtmlFormatter::new(config.html.clone()));
    Ok(formatters.format(&tokens, format)?)
}

/// Handle the detect command
fn handle_detect_command(config: &GaussDocConfig, path: &str) -> Result<String, GaussDocError> {
    let source = std::fs::read_to_string(path)?;
    let lexers = LexerRegistry::with_options(config.lexer.clone());
    let lexer = lexers.select(path, &source)?;
    Ok(format!("{}\n", lexer.name()))
}

/// Handle the menusel command
fn handle_menusel_command(
    config: &GaussDocConfig,
    text: &str,
    role: &str,
) -> Result<String, GaussDocError> {
    let roles = RoleRegistry::with_defaults();
    let rawtext = format!(":{}:`{}`", role, text);
    let (nodes, messages) = roles.dispatch(role, &rawtext, text, 1, &config.inliner())?;
    for message in &messages {
        eprintln!("{:?}: {}", message.level, message.message);
    }
    let mut out: String = nodes.iter().map(|node| node.to_html()).collect();
    out.push('\n');
    Ok(out)
}

/// Handle the signature command
fn handle_signature_command(config: &GaussDocConfig, text: &str) -> Result<String, GaussDocError> {
    let signature = Signature::parse(text)?.with_separator(&config.signature.separator);
    let mut out = render_signature(&signature);
    out.push('\n');
    Ok(out)
}

/// Handle the classify command
fn handle_classify_command(words: &[&str]) -> String {
    let mut out = String::new();
    for word in words {
        let class = classify_word(word).map_or("name", |class| class.as_str());
        out.push_str(&format!("{}\t{}\n", word, class));
    }
    out
}

/// Handle the list-lexers command
fn handle_list_lexers_command(config: &GaussDocConfig) -> String {
    let lexers = LexerRegistry::with_options(config.lexer.clone());
    let mut out = String::from("Available lexers:\n\n");
    for name in lexers.list_lexers() {
        if let Ok(lexer) = lexers.get(&name) {
            out.push_str(&format!("  {}\n", name));
            out.push_str(&format!("    aliases: {}\n", lexer.aliases().join(", ")));
            out.push_str(&format!("    filenames: {}\n", lexer.filenames().join(", ")));
        }
    }
    out
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &GaussDocConfig) -> String {
    let formatters = FormatterRegistry::with_html(HtmlFormatter::new(config.html.clone()));
    let mut out = String::from("Available formats:\n\n");
    for name in formatters.list_formats() {
        if let Ok(formatter) = formatters.get(&name) {
            out.push_str(&format!("  {}\n", name));
            out.push_str(&format!("    {}\n", formatter.description()));
        }
    }
    out
}
