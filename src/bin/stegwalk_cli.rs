//! stegwalk CLI: embed text in an image, read it back, or visualise what changed.
//!
//! ```bash
//! stegwalk-cli -c config.json encode
//! stegwalk-cli --channel blue --entry 1 --key 3 --eot '#' decode --input stego.png
//! stegwalk-cli compare --first cover.png --second stego.png --output diff.png
//! ```

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use stegwalk_lib::config::{Config, DEFAULT_CONFIG_FILE};
use stegwalk_lib::{diff, media, BitstreamCodec, Channel, ChannelPacker};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Color channel carrying the payload: red, green or blue
    #[arg(long)]
    channel: Option<Channel>,

    /// First bit-slot index
    #[arg(long, allow_negative_numbers = true)]
    entry: Option<i64>,

    /// Step key
    #[arg(long, allow_negative_numbers = true)]
    key: Option<i64>,

    /// End-of-text marker
    #[arg(long)]
    eot: Option<String>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Hide text in a cover image
    Encode {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output image (png or bmp)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Text to hide, or @path to read it from a file
        #[arg(long)]
        text: Option<String>,
    },
    /// Read hidden text back from an image
    Decode {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Write an image marking every pixel that differs between two images
    Compare {
        #[arg(long)]
        first: Option<PathBuf>,
        #[arg(long)]
        second: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Walk parameters after command-line overrides.
struct Walk {
    channel: Channel,
    entry: i64,
    key: i64,
    eot: String,
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = if args.config.as_os_str() == DEFAULT_CONFIG_FILE && !args.config.exists() {
        log::debug!("no {DEFAULT_CONFIG_FILE} found, using command-line values only");
        Config::default()
    } else {
        Config::load(&args.config)?
    };
    let walk = Walk {
        channel: args.channel.unwrap_or_else(|| config.channel()),
        entry: args.entry.unwrap_or(config.entry),
        key: args.key.unwrap_or(config.key),
        eot: args.eot.unwrap_or_else(|| config.eot.clone()),
    };
    if walk.key == 0 || walk.entry == 0 {
        log::warn!(
            "entry {} with key {} never leaves its first slot",
            walk.entry,
            walk.key
        );
    }

    match args.mode {
        Mode::Encode {
            input,
            output,
            text,
        } => {
            let input = required(input.or(config.encode.input), "encode.input")?;
            let output = required(output.or(config.encode.output), "encode.output")?;
            let text = match text {
                Some(text) => read_text(&text)?,
                None => config.encode.text,
            };
            run_encode(&walk, &input, &output, &text)?;
            println!("Image successfully saved!");
        }
        Mode::Decode { input } => {
            let input = required(input.or(config.decode.input), "decode.input")?;
            let payload = run_decode(&walk, &input)?;
            let text = match String::from_utf8(payload) {
                Ok(text) => text,
                Err(e) => format!(
                    "base64:{}",
                    base64::engine::general_purpose::STANDARD.encode(e.as_bytes())
                ),
            };
            println!("Decoded text: \"{text}\"");
        }
        Mode::Compare {
            first,
            second,
            output,
        } => {
            let first = required(first.or(config.compare.first), "compare.first")?;
            let second = required(second.or(config.compare.second), "compare.second")?;
            let output = required(output.or(config.compare.output), "compare.output")?;
            run_compare(&first, &second, &output)?;
        }
    }
    Ok(())
}

fn required(path: Option<PathBuf>, name: &str) -> Result<PathBuf> {
    path.with_context(|| format!("{name} is not set (config file or command line)"))
}

fn read_text(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read text file {path}"))
        }
        None => Ok(value.to_string()),
    }
}

fn run_encode(walk: &Walk, input: &Path, output: &Path, text: &str) -> Result<()> {
    let cover = media::load_image(input).context("Failed to load cover image")?;
    let packer = ChannelPacker::new(cover, walk.channel);
    let stego = BitstreamCodec::new(packer, walk.entry, walk.key, walk.eot.as_str())
        .encode(text)
        .context("Failed to encode text to image")?;

    media::save_image(&stego, output).context("Failed to save image")?;
    log::info!(
        "embedded {} bytes in the {} channel of {}",
        text.len(),
        walk.channel,
        output.display()
    );
    Ok(())
}

fn run_decode(walk: &Walk, input: &Path) -> Result<Vec<u8>> {
    let img = media::load_image(input).context("Failed to load image")?;
    let packer = ChannelPacker::new(img, walk.channel);
    BitstreamCodec::new(packer, walk.entry, walk.key, walk.eot.as_str())
        .decode()
        .context("Failed to decode text from image")
}

fn run_compare(first: &Path, second: &Path, output: &Path) -> Result<()> {
    let first = media::load_image(first).context("Failed to load first image")?;
    let second = media::load_image(second).context("Failed to load second image")?;
    let difference = diff::compare(&first, &second).context("Failed to compare images")?;

    media::save_image(&difference.image, output).context("Failed to save diff image")?;
    log::info!(
        "{} pixels differ; map written to {}",
        difference.changed,
        output.display()
    );
    Ok(())
}
