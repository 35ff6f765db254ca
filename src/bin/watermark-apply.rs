use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use watermark_applier::{
    default_output_path, resolve_input, ProcessResult, WatermarkParams, Watermarker,
};

#[derive(Parser)]
#[command(
    name = "watermark-apply",
    about = "Apply an image watermark with adjustable opacity, size and position",
    version,
    after_help = "Simple usage: watermark-apply <photo> -w <logo.png>\n\n\
                  If INPUT is a directory, the first PNG/JPEG file in it (by name) is used.\n\
                  If OUTPUT is a directory or omitted, the result is written as\n\
                  watermarked_image.png."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input image file or directory
    input: PathBuf,

    /// Watermark image file
    #[arg(short, long)]
    watermark: PathBuf,

    /// Output file or directory (default: input directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Watermark opacity (0.0-1.0)
    #[arg(long, default_value_t = WatermarkParams::default().opacity)]
    opacity: f32,

    /// Watermark size as a percentage of the image (1-100)
    #[arg(short, long, default_value_t = WatermarkParams::default().size_percent)]
    size: f32,

    /// Horizontal position (0.0 = left, 1.0 = right)
    #[arg(short = 'x', long = "pos-x", default_value_t = WatermarkParams::default().position_x)]
    position_x: f32,

    /// Vertical position (0.0 = top, 1.0 = bottom)
    #[arg(short = 'y', long = "pos-y", default_value_t = WatermarkParams::default().position_y)]
    position_y: f32,

    /// Repeat the watermark across the whole image
    #[arg(short, long)]
    tile: bool,

    /// Render at preview size (fit within 400x400) instead of full resolution
    #[arg(short, long)]
    preview: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn params(&self) -> WatermarkParams {
        WatermarkParams {
            opacity: self.opacity,
            size_percent: self.size,
            position_x: self.position_x,
            position_y: self.position_y,
            tile: self.tile,
        }
    }

    fn level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "[{style}{}{style:#}] {}", record.level(), record.args())
        })
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.level());

    let params = cli.params();
    if let Err(e) = params.validate() {
        error!("{e}");
        process::exit(1);
    }

    if !cli.input.exists() {
        error!("Input path does not exist: {}", cli.input.display());
        process::exit(1);
    }

    let input = match resolve_input(&cli.input) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    debug!("using input image {}", input.display());

    let marker = match Watermarker::open(&cli.watermark) {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to load watermark: {e}");
            process::exit(1);
        }
    };

    let output = output_path(cli.output.as_deref(), &input);
    let result = marker.process_file(&input, &output, &params, cli.preview);
    report(&result);

    if !result.success {
        process::exit(1);
    }
}

/// Where to write the result: an explicit file, or `watermarked_image.png` in
/// an explicit directory or next to the input.
fn output_path(output: Option<&Path>, input: &Path) -> PathBuf {
    match output {
        Some(o) if o.is_dir() || o.extension().is_none() => default_output_path(o),
        Some(o) => o.to_path_buf(),
        None => default_output_path(input.parent().unwrap_or(Path::new("."))),
    }
}

fn report(result: &ProcessResult) {
    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        info!(
            "[OK] {filename} -> {} ({})",
            result.output.display(),
            result.message
        );
    } else {
        error!("[FAIL] {filename}: {}", result.message);
    }
}
