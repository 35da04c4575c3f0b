//! bionic-preview CLI - bionic reading pages from Markdown and text

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use bionic_preview::render::{self, output_path, to_html_with_stats, to_json};
use bionic_preview::{
    detect, BionicSegmenter, BoldFormula, FixationLevel, GradientTheme, JsonFormat, MarkdownMode,
    PlainTextConverter, RenderOptions, SettingsPatch, SettingsStore, StoredState,
};

/// Settings file used when neither `--settings` nor `BIONIC_SETTINGS` is set.
const DEFAULT_SETTINGS_FILE: &str = "bionic-settings.json";

#[derive(Parser)]
#[command(name = "bionic-preview")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render Markdown and text as bionic reading pages", long_about = None)]
struct Cli {
    /// Input file (`-` for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output HTML file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a file as a standalone reader page
    Render {
        /// Input file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert Markdown to an HTML fragment
    #[command(alias = "md")]
    Markdown {
        /// Input Markdown file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print element counts to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Apply bionic emphasis to plain text
    Text {
        /// Input text file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fixation level (1-5)
        #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=5))]
        fixation: u8,

        /// Use the legacy bold-length formula
        #[arg(long)]
        legacy: bool,
    },

    /// Check whether a file is Markdown
    Detect {
        /// Input file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show content statistics
    Info {
        /// Input file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// List gradient themes with color swatches
    Themes,

    /// Render many files into a directory
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show or change stored settings
    Settings {
        /// Settings file
        #[arg(long, env = "BIONIC_SETTINGS", value_name = "FILE")]
        settings: Option<PathBuf>,

        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings
    Show {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Update stored settings
    Set {
        /// Fixation level (1-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        fixation: Option<u8>,

        /// Dim opacity (0.0-1.0)
        #[arg(long)]
        opacity: Option<f32>,

        /// Gradient theme name
        #[arg(long)]
        theme: Option<String>,

        /// Render Markdown files automatically
        #[arg(long)]
        auto_markdown: Option<bool>,

        /// Leave the reader enabled
        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Restore default settings
    Reset,
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Fixation level (1-5)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    fixation: Option<u8>,

    /// Dim opacity (0.0-1.0)
    #[arg(long)]
    opacity: Option<f32>,

    /// Gradient theme name
    #[arg(short, long)]
    theme: Option<String>,

    /// Use dark-background palettes
    #[arg(long)]
    dark: bool,

    /// Treat input as plain text
    #[arg(long, conflicts_with = "markdown")]
    no_markdown: bool,

    /// Always treat input as Markdown
    #[arg(long)]
    markdown: bool,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Omit the embedded stylesheet
    #[arg(long)]
    no_style: bool,

    /// Use the legacy bold-length formula
    #[arg(long)]
    legacy: bool,

    /// Start from a settings file
    #[arg(long, env = "BIONIC_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,
}

impl RenderArgs {
    fn to_options(&self) -> Result<RenderOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.settings {
            Some(path) => RenderOptions::from_settings(&SettingsStore::new(path).load()?.settings),
            None => RenderOptions::new(),
        };

        if let Some(level) = self.fixation {
            options = options.with_fixation(FixationLevel::new(level)?);
        }
        if let Some(opacity) = self.opacity {
            options = options.with_dim_opacity(opacity);
        }
        if let Some(name) = &self.theme {
            options = options.with_theme(name.parse::<GradientTheme>()?);
        }
        if self.dark {
            options = options.with_dark_mode(true);
        }
        if self.no_markdown {
            options = options.with_markdown_mode(MarkdownMode::Never);
        } else if self.markdown {
            options = options.with_markdown_mode(MarkdownMode::Always);
        }
        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        if self.no_style {
            options = options.with_stylesheet(false);
        }
        if self.legacy {
            options = options.with_formula(BoldFormula::Legacy);
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            render,
        }) => cmd_render(&input, output.as_deref(), &render),
        Some(Commands::Markdown {
            input,
            output,
            stats,
        }) => cmd_markdown(&input, output.as_deref(), stats),
        Some(Commands::Text {
            input,
            output,
            fixation,
            legacy,
        }) => cmd_text(&input, output.as_deref(), fixation, legacy),
        Some(Commands::Detect { input }) => cmd_detect(&input),
        Some(Commands::Info {
            input,
            json,
            compact,
        }) => cmd_info(&input, json, compact),
        Some(Commands::Themes) => {
            cmd_themes();
            Ok(())
        }
        Some(Commands::Batch {
            inputs,
            output,
            render,
        }) => cmd_batch(&inputs, &output, &render),
        Some(Commands::Settings { settings, action }) => cmd_settings(settings, action),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, cli.output.as_deref(), &RenderArgs::default())
            } else {
                println!("{}", "Usage: bionic-preview <FILE> [OUTPUT]".yellow());
                println!("       bionic-preview --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read an input file, or stdin for `-`. Returns the name used for detection.
fn read_input(input: &Path) -> io::Result<(Option<String>, String)> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok((None, text))
    } else {
        let text = fs::read_to_string(input)?;
        Ok((Some(input.to_string_lossy().into_owned()), text))
    }
}

fn write_output(output: Option<&Path>, content: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let (name, source) = read_input(input)?;
    let result = render::render_source(name.as_deref(), &source, &options);
    write_output(output, &result.html)?;
    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, source) = read_input(input)?;
    let (html, counts) = to_html_with_stats(&source);
    write_output(output, &html)?;
    if stats {
        eprintln!("{} {}", "Stats:".cyan(), counts);
    }
    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    fixation: u8,
    legacy: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, source) = read_input(input)?;
    let formula = if legacy {
        BoldFormula::Legacy
    } else {
        BoldFormula::TextVide
    };
    let segmenter = BionicSegmenter::new(FixationLevel::new(fixation)?).with_formula(formula);
    write_output(output, &segmenter.process_text(&source))?;
    Ok(())
}

fn cmd_detect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (name, source) = read_input(input)?;
    let detection = detect::detect_from_str(name.as_deref(), &source);

    let label = detection.to_string();
    let label = if detection.is_markdown {
        label.as_str().green().bold()
    } else {
        label.as_str().yellow()
    };
    println!("{}: {}", input.display(), label);
    Ok(())
}

fn cmd_info(input: &Path, json: bool, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (name, source) = read_input(input)?;
    let detection = detect::detect_from_str(name.as_deref(), &source);
    let html = if detection.is_markdown {
        bionic_preview::parse(&source)
    } else {
        PlainTextConverter::new().convert(&source)
    };
    let stats = render::ConversionStats::from_html(&html);

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "markdown": detection.is_markdown,
            "detection": detection.to_string(),
            "bytes": source.len(),
            "stats": stats,
        });
        println!("{}", to_json(&info, format)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), detection);
    println!("{}: {}", "Bytes".bold(), source.len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Words".bold(), stats.words);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {} ({} items)", "Lists".bold(), stats.lists, stats.list_items);
    println!("{}: {} ({} rows)", "Tables".bold(), stats.tables, stats.table_rows);
    println!("{}: {}", "Code blocks".bold(), stats.code_blocks);
    println!("{}: {}", "Blockquotes".bold(), stats.blockquotes);
    println!("{}: {}", "Images".bold(), stats.images);
    println!("{}: {}", "Links".bold(), stats.links);

    Ok(())
}

fn cmd_themes() {
    println!("{}", "Gradient Themes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for theme in GradientTheme::ALL {
        let swatches: String = theme
            .colors()
            .iter()
            .map(|color| {
                let (r, g, b) = color.to_rgb();
                "  ".on_truecolor(r, g, b).to_string()
            })
            .collect();
        println!(
            "{} {:<14} {}",
            format!("{:<12}", theme.name()).as_str().bold(),
            theme.display_name(),
            swatches
        );
    }
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Rendering...");

    let results = render::render_batch(inputs, &options);

    pb.set_message("Writing...");
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(page) => fs::write(output_path(&path, output_dir), page.html)?,
            Err(e) => failures.push((path, e)),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} rendered into {}",
        "Done!".green().bold(),
        inputs.len() - failures.len(),
        output_dir.display()
    );
    for (path, e) in &failures {
        eprintln!("  {} {}: {}", "✗".red(), path.display(), e);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} files failed", failures.len(), inputs.len()).into())
    }
}

fn cmd_settings(
    path: Option<PathBuf>,
    action: SettingsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::new(path.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE)));

    match action {
        SettingsAction::Show { json } => {
            let state = store.load()?;
            if json {
                println!("{}", to_json(&state, JsonFormat::Pretty)?);
            } else {
                print_state(&store, &state);
            }
        }
        SettingsAction::Set {
            fixation,
            opacity,
            theme,
            auto_markdown,
            enabled,
        } => {
            let patch = SettingsPatch {
                fixation_point: fixation,
                dim_opacity: opacity,
                gradient_theme: theme,
                auto_markdown,
            };
            let mut state = if patch.is_empty() {
                store.load()?
            } else {
                store.update(&patch)?
            };
            if let Some(enabled) = enabled {
                store.set_enabled(enabled)?;
                state.is_enabled = enabled;
            }
            println!("{} {}", "Saved to".green(), store.path().display());
            print_state(&store, &state);
        }
        SettingsAction::Reset => {
            store.save(&StoredState::default())?;
            println!("{} {}", "Reset".green(), store.path().display());
        }
    }

    Ok(())
}

fn print_state(store: &SettingsStore, state: &StoredState) {
    let settings = &state.settings;
    println!("{}", "Settings".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), store.path().display());
    println!(
        "{}: {}",
        "Enabled".bold(),
        if state.is_enabled { "Yes" } else { "No" }
    );
    println!("{}: {}", "Fixation".bold(), settings.fixation_point);
    println!("{}: {}", "Dim opacity".bold(), settings.dim_opacity);
    println!(
        "{}: {}",
        "Theme".bold(),
        bionic_preview::theme::display_name(&settings.gradient_theme)
    );
    println!(
        "{}: {}",
        "Auto Markdown".bold(),
        if settings.auto_markdown { "Yes" } else { "No" }
    );
}

fn cmd_version() {
    println!(
        "{} {}",
        "bionic-preview".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Bionic reading pages from Markdown and text");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/bionic-preview".dimmed()
    );
    println!("License: MIT");
}
