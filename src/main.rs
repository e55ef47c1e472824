//! CLI for wprich - WordPress rich text renderer

use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use wprich::{
    JsonRenderer, MarkdownRenderer, PlainTextRenderer, RenderOptions, Renderer, RichTextRenderer,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input HTML file path (reads stdin if omitted or "-")
    input: Option<PathBuf>,

    /// Output file path (optional, prints to stdout if not specified)
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Keep whitespace at block and line edges
    #[arg(long)]
    preserve_whitespace: bool,

    /// Keep list items that have no enclosing list as paragraphs
    #[arg(long)]
    keep_orphan_items: bool,

    /// Print every formatting loss to stderr
    #[arg(long)]
    report: bool,
}

fn read_input(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) if path.as_path() != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut html = String::new();
            std::io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}

fn main() {
    let args = Args::parse();

    let html = match read_input(args.input.as_ref()) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };

    let options = RenderOptions {
        preserve_whitespace: args.preserve_whitespace,
        drop_orphan_list_items: !args.keep_orphan_items,
        ..Default::default()
    };
    let outcome = RichTextRenderer::new(options).render_with_report(&html);

    if args.report {
        for degradation in &outcome.degradations {
            eprintln!("warning: {}", degradation);
        }
    }

    let rendered = match args.format {
        Format::Markdown => MarkdownRenderer::default().render(&outcome.document),
        Format::Text => PlainTextRenderer::default().render(&outcome.document),
        Format::Json => JsonRenderer {
            pretty: args.pretty,
        }
        .render(&outcome.document),
    };

    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error rendering document: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(output) = args.output {
        if let Err(e) = std::fs::write(&output, &rendered) {
            eprintln!("Error writing output: {}", e);
            std::process::exit(1);
        }
        println!("Successfully rendered to {:?}", output);
    } else {
        print!("{}", rendered);
    }
}
