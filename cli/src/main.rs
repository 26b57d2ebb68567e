//! unwrite CLI - Stylus Labs Write document converter

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use colored::Colorize;

use unwrite::{ConvertOptions, ConvertResult, OutputFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "unwrite")]
#[command(version)]
#[command(about = "Convert Stylus Labs Write documents to HTML or PDF", long_about = None)]
struct Cli {
    /// Input Write document (.svg or .svgz)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: Format,

    /// Document title
    #[arg(short, long)]
    title: Option<String>,

    /// Document author
    #[arg(short, long)]
    author: Option<String>,

    /// Document description (PDF subject)
    #[arg(short, long)]
    description: Option<String>,

    /// Comma-separated keywords (HTML only)
    #[arg(short, long)]
    keywords: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Single HTML document with inline SVG pages
    Html,
    /// Paginated PDF
    Pdf,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Pdf => OutputFormat::Pdf,
        }
    }
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        let mut render = RenderOptions::new();
        if let Some(ref title) = self.title {
            render = render.with_title(title);
        }
        if let Some(ref author) = self.author {
            render = render.with_author(author);
        }
        if let Some(ref description) = self.description {
            render = render.with_description(description);
        }
        if let Some(ref keywords) = self.keywords {
            render = render.with_keywords(keywords);
        }

        ConvertOptions::new()
            .with_format(self.format.into())
            .with_render_options(render)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = cmd_convert(&cli.input, &cli.output, &cli.convert_options());

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!(
        "Converting {} to {} ({})",
        input.display(),
        output.display(),
        options.format
    );
    let result = unwrite::convert_file(input, output, options)?;
    print_summary(output, &result);
    Ok(())
}

fn print_summary(output: &Path, result: &ConvertResult) {
    println!(
        "{} {} ({} {}, {} {}, {} {})",
        "Saved to".green(),
        output.display(),
        result.page_count,
        plural(result.page_count as usize, "page"),
        result.bookmark_count,
        plural(result.bookmark_count, "bookmark"),
        result.link_count,
        plural(result.link_count, "link"),
    );
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}
