//! unmd CLI - Markdown to plain text tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unmd::{ConversionOptions, Converter, ListMarker, OptionOverrides};

#[derive(Parser)]
#[command(name = "unmd")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert Markdown to plain text", long_about = None)]
struct Cli {
    /// Input Markdown files (stdin if none)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output file (single input only; stdout if not specified)
    #[arg(short, long, value_name = "FILE", conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Output directory; writes <name>.txt per input
    #[arg(short = 'd', long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    options: OptionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip whitespace and invisible characters from both ends
    Trim {
        /// Input file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Conversion flags. Flags override values from `--options`.
#[derive(Args, Default)]
struct OptionArgs {
    /// JSON file with conversion options (camelCase keys)
    #[arg(long, value_name = "FILE", env = "UNMD_OPTIONS")]
    options: Option<PathBuf>,

    /// Keep line breaks instead of collapsing to one line
    #[arg(long)]
    multiline: bool,

    /// Replace list markers with this character
    #[arg(long, value_name = "CHAR")]
    list_char: Option<String>,

    /// Keep list markers
    #[arg(long)]
    keep_list_leaders: bool,

    /// Disable GitHub-flavored Markdown handling
    #[arg(long)]
    no_gfm: bool,

    /// Drop images entirely instead of keeping alt text
    #[arg(long)]
    no_img_alt: bool,

    /// Remove abbreviation definitions
    #[arg(long)]
    abbr: bool,

    /// Replace links with their URL
    #[arg(long)]
    links_as_url: bool,

    /// HTML tag to keep (repeatable)
    #[arg(long = "keep-tag", value_name = "TAG")]
    keep_tags: Vec<String>,

    /// Maximum output length in characters
    #[arg(long, value_name = "N")]
    max_length: Option<usize>,

    /// Trim whitespace and invisible characters from both ends
    #[arg(long)]
    trim: bool,
}

impl OptionArgs {
    /// Overrides set explicitly on the command line.
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            one_line: self.multiline.then_some(false),
            list_unicode_char: self.list_char.clone().map(ListMarker::Char),
            strip_list_leaders: self.keep_list_leaders.then_some(false),
            gfm: self.no_gfm.then_some(false),
            use_img_alt_text: self.no_img_alt.then_some(false),
            abbr: self.abbr.then_some(true),
            replace_links_with_url: self.links_as_url.then_some(true),
            html_tags_to_skip: (!self.keep_tags.is_empty()).then(|| self.keep_tags.clone()),
            max_length: self.max_length,
            trim: self.trim.then_some(true),
        }
    }

    /// Resolve the options file, then the flags, onto the defaults.
    fn resolve(&self) -> unmd::Result<ConversionOptions> {
        let base = match &self.options {
            Some(path) => {
                log::debug!("Loading options from {}", path.display());
                OptionOverrides::from_file(path)?
            }
            None => OptionOverrides::default(),
        };
        Ok(base.merge(self.overrides()).resolve())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Trim { input, output }) => cmd_trim(input.as_deref(), output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_convert(
            &cli.inputs,
            cli.output.as_deref(),
            cli.out_dir.as_deref(),
            &cli.options,
        ),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, text: &str) -> io::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// `<out_dir>/<stem>.txt` for an input file.
fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    out_dir.join(format!("{}.txt", stem))
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    out_dir: Option<&Path>,
    args: &OptionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.resolve()?;
    // Report bad keep-tags here rather than silently echoing the input.
    let converter = Converter::new(options)?;

    if inputs.len() > 1 && out_dir.is_none() {
        return Err("Multiple inputs require --out-dir".into());
    }

    match out_dir {
        Some(dir) => convert_to_dir(&converter, inputs, dir),
        None => {
            let text = read_input(inputs.first().map(PathBuf::as_path))?;
            write_output(output, &converter.convert(&text))?;
            Ok(())
        }
    }
}

fn convert_to_dir(
    converter: &Converter,
    inputs: &[PathBuf],
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if inputs.is_empty() {
        return Err("--out-dir requires at least one input file".into());
    }

    fs::create_dir_all(out_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for input in inputs {
        pb.set_message(input.display().to_string());
        let markdown = fs::read_to_string(input)?;
        let text = converter.convert(&markdown);
        fs::write(output_path(out_dir, input), text)?;
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    println!(
        "\n{} {} files written to {}",
        "Done!".green().bold(),
        inputs.len(),
        out_dir.display()
    );

    Ok(())
}

fn cmd_trim(input: Option<&Path>, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    write_output(output, unmd::trim(&text))?;
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unmd".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown to plain text tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unmd".dimmed());
    println!("License: MIT");
}
