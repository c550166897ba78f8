//! SVG Math Captcha CLI
//!
//! Usage:
//!   svg-math-captcha [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>    Configuration file (TOML format)
//!   -n, --count <N>        Number of captchas to generate
//!   -f, --format <FORMAT>  Output format: svg, json or data-uri
//!   --seed <SEED>          Deterministic output for a given seed
//!   -o, --output <FILE>    Write to a file instead of stdout
//!   -h, --help             Print help

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use svg_math_captcha::{
    Captcha, CaptchaConfig, CaptchaError, CaptchaGenerator, RandomSource, RngSource, SecureRandom,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Raw SVG documents
    Svg,
    /// JSON objects with data, text and question
    Json,
    /// Base64 data URIs, one per line
    DataUri,
}

#[derive(Parser)]
#[command(name = "svg-math-captcha")]
#[command(about = "Generate arithmetic captchas as SVG images")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height
    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    font_size: Option<u32>,

    /// Noise level from 0 to 10
    #[arg(long)]
    noise: Option<i32>,

    /// Use the grayscale palette
    #[arg(long)]
    grayscale: bool,

    /// Background fill, e.g. "#ffffff"
    #[arg(long)]
    background: Option<String>,

    /// Operators to draw from: "+", "-" or "+-"
    #[arg(long)]
    operator: Option<String>,

    /// Smallest operand
    #[arg(long)]
    min: Option<i32>,

    /// Largest operand
    #[arg(long)]
    max: Option<i32>,

    /// Number of captchas to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then environment, then the config file, then flags
    fn resolve_config(&self) -> Result<CaptchaConfig, CaptchaError> {
        let mut config = CaptchaConfig::from_env();
        if let Some(path) = &self.config {
            config = config.merge_file(path)?;
        }

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if let Some(noise) = self.noise {
            config.noise = noise;
        }
        if self.grayscale {
            config.color = false;
        }
        if let Some(background) = &self.background {
            config.background = background.clone();
        }
        if let Some(operator) = &self.operator {
            config.math_operator = operator.clone();
        }
        if let Some(min) = self.min {
            config.math_min = min;
        }
        if let Some(max) = self.max {
            config.math_max = max;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let output = match run(&cli) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error [{}]: {}", e.kind(), e);
            std::process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, output) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", output),
    }
}

fn run(cli: &Cli) -> Result<String, CaptchaError> {
    let config = cli.resolve_config()?;
    log::info!(
        "generating {} captcha(s) at {}x{}, noise {}",
        cli.count,
        config.width,
        config.height,
        config.noise
    );

    let generator = CaptchaGenerator::new(config);
    let mut rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(SecureRandom::new()),
    };
    let captchas = generator.generate_multiple_with_rng(cli.count, rng.as_mut())?;

    format_output(&captchas, cli.format)
}

fn format_output(captchas: &[Captcha], format: Format) -> Result<String, CaptchaError> {
    let output = match format {
        Format::Svg => captchas
            .iter()
            .map(|c| c.data.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        Format::DataUri => captchas
            .iter()
            .map(Captcha::to_data_uri)
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Json => {
            let json = match captchas {
                [single] => serde_json::to_string_pretty(single),
                _ => serde_json::to_string_pretty(captchas),
            };
            json.map_err(|e| CaptchaError::rendering(e.to_string()))?
        }
    };
    Ok(output)
}
