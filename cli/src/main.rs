use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as CmarkParser, Tag, TagEnd};
use tracing_subscriber::EnvFilter;

use habitt::{FENCE_TAG, HabitSettings, ParseError, render_document};

const SUBCOMMANDS: &[&str] = &["render", "check", "help"];

/// Stylesheet for the `habitt-*` class contract, inlined by
/// `render --standalone`.
const STYLESHEET: &str = include_str!("../assets/habitt.css");

#[derive(Parser)]
#[command(name = "habitt", version, about = "Habit-tracker block renderer")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// TOML settings file overriding the render defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown file with habit blocks substituted
    Render(RenderArgs),

    /// Parse every habit block and report failures
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown source file
    file: PathBuf,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a full HTML page with the stylesheet inlined
    #[arg(long)]
    standalone: bool,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Markdown source file
    file: PathBuf,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    // Backwards compatibility: if the first positional arg is not a
    // known subcommand, inject "render" so `habitt file.md` works like
    // `habitt render file.md`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(first_pos) = args.iter().skip(1).find(|a| !a.starts_with('-')) {
        let first_pos = first_pos.clone();
        if !SUBCOMMANDS.contains(&first_pos.as_str()) {
            if let Some(pos) = args.iter().position(|a| *a == first_pos) {
                args.insert(pos, "render".to_string());
            }
        }
    }

    let cli = Cli::parse_from(&args);
    let settings = load_settings(cli.config.as_deref());

    match cli.command {
        Command::Render(render_args) => do_render(render_args, &settings),
        Command::Check(check_args) => do_check(check_args, &settings, cli.no_color),
    }
}

fn load_settings(config: Option<&Path>) -> HabitSettings {
    let Some(path) = config else {
        return HabitSettings::default();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    };
    match toml::from_str(&text) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: invalid settings in '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn read_source(file: &Path) -> String {
    match std::fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", file.display(), e);
            process::exit(1);
        }
    }
}

fn do_render(args: RenderArgs, settings: &HabitSettings) {
    let source = read_source(&args.file);
    let body = render_document(&source, settings);
    tracing::debug!(bytes = body.len(), "rendered document");

    let html = if args.standalone {
        standalone_page(&body)
    } else {
        body
    };

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, html) {
                eprintln!("error: cannot write '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
        None => print!("{html}"),
    }
}

fn standalone_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\n{STYLESHEET}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn do_check(args: CheckArgs, settings: &HabitSettings, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = read_source(&args.file);

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.display().to_string(), source.clone());

    let blocks = habit_blocks(&source);
    if blocks.is_empty() {
        eprintln!("no habit blocks in '{}'", args.file.display());
        return;
    }

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let mut failures = 0usize;

    for block in &blocks {
        if let Err(error) = habitt::parse(&block.content, settings) {
            failures += 1;
            let diagnostic = block_diagnostic(block, &error, file_id);
            let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
        }
    }

    if failures > 0 {
        eprintln!("{} of {} habit block(s) failed", failures, blocks.len());
        process::exit(1);
    }
    eprintln!("ok: {} habit block(s) parsed", blocks.len());
}

/// Map a block-relative parse error onto the source file.
fn block_diagnostic(block: &HabitBlock, error: &ParseError, file_id: usize) -> Diagnostic<usize> {
    let span = match error.span() {
        Some(span) => block.content_offset + span.start..block.content_offset + span.end,
        None => block.fence_span.clone(),
    };
    Diagnostic::error()
        .with_message(error.to_string())
        .with_labels(vec![Label::primary(file_id, span)])
}

struct HabitBlock {
    /// Byte span of the whole fence in the source file.
    fence_span: Range<usize>,
    /// Byte offset of the fence body in the source file.
    content_offset: usize,
    content: String,
}

/// Collect every `habitt` fence with its source offsets.
fn habit_blocks(source: &str) -> Vec<HabitBlock> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let mut events = CmarkParser::new_ext(source, options).into_offset_iter();

    let mut blocks = Vec::new();
    while let Some((event, fence_span)) = events.next() {
        let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = &event else {
            continue;
        };
        if info.as_ref() != FENCE_TAG {
            continue;
        }

        let mut content = String::new();
        let mut content_offset = fence_span.start;
        let mut seen_text = false;
        for (inner_event, inner_span) in events.by_ref() {
            match inner_event {
                Event::Text(text) => {
                    if !seen_text {
                        content_offset = inner_span.start;
                        seen_text = true;
                    }
                    content.push_str(&text);
                }
                Event::End(TagEnd::CodeBlock) => break,
                _ => {}
            }
        }
        blocks.push(HabitBlock {
            fence_span,
            content_offset,
            content,
        });
    }
    blocks
}
