//! Turns the positional command line into render jobs

use crate::job::{derive_output_path, CarouselBatch, RenderJob};
use crate::{preset, UsageError, Viewport};

pub const USAGE: &str = "\
Render HTML templates to PNG at exact Instagram dimensions.

Usage:
  Single post:
    postshot input.html output.png 1080 1350

  Carousel (multiple slides):
    postshot --carousel output_dir/ slide1.html slide2.html slide3.html

  With custom dimensions:
    postshot input.html output.png 1080 1080      # Square
    postshot input.html output.png 1080 1920      # Reels/Story

Preset formats:
    postshot input.html output.png --format carousel   # 1080x1350
    postshot input.html output.png --format square     # 1080x1080
    postshot input.html output.png --format reels      # 1080x1920

  Without an output path, input.html is written to input.png.

Options (before the job arguments):
    --delay-ms <MS>      Fixed wait before capture [env: POSTSHOT_DELAY_MS] [default: 1500]
    --wait-ready         Wait for document and fonts to finish loading instead
    --max-wait-ms <MS>   Upper bound for --wait-ready [default: 10000]
    --timeout-ms <MS>    Timeout for each browser operation [default: 30000]
    --chrome <PATH>      Chrome/Chromium binary [env: CHROME]
    --no-sandbox         Launch Chrome without its sandbox

Requirements:
    A Chrome or Chromium installation.
";

const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
const CAROUSEL_FLAG: &str = "--carousel";
const FORMAT_FLAG: &str = "--format";

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Single(RenderJob),
    Carousel(CarouselBatch),
}

/// Resolve the job arguments (everything after the global options).
pub fn resolve<S: AsRef<str>>(args: &[S]) -> Result<Invocation, UsageError> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

    let Some(&first) = args.first() else {
        return Ok(Invocation::Help);
    };
    if HELP_FLAGS.contains(&first) {
        return Ok(Invocation::Help);
    }

    if first == CAROUSEL_FLAG {
        if args.len() < 3 {
            return Err(UsageError::CarouselArguments);
        }
        let batch = CarouselBatch::new(args[1], &args[2..], Viewport::default())?;
        return Ok(Invocation::Carousel(batch));
    }

    let input = first;
    // `input.html --format square` leaves the output to be derived
    let (output, options) = match args.get(1) {
        Some(second) if !second.starts_with(FORMAT_FLAG) => (second.to_string(), &args[2..]),
        _ => (derive_output_path(input), &args[1..]),
    };

    let viewport = resolve_viewport(options)?;
    Ok(Invocation::Single(RenderJob::new(input, output, viewport)))
}

fn resolve_viewport(options: &[&str]) -> Result<Viewport, UsageError> {
    match options {
        [flag, rest @ ..] if flag.starts_with(FORMAT_FLAG) => {
            let name = match flag.split('=').nth(1) {
                Some(name) => name,
                None => rest.first().copied().ok_or_else(|| UsageError::MissingFormat {
                    available: preset::available(),
                })?,
            };
            preset::lookup(name).ok_or_else(|| UsageError::UnknownFormat {
                name: name.to_string(),
                available: preset::available(),
            })
        }
        [width, height, ..] => {
            let width = parse_dimension(width)?;
            let height = parse_dimension(height)?;
            Ok(Viewport::new(width, height))
        }
        _ => Ok(Viewport::default()),
    }
}

fn parse_dimension(arg: &str) -> Result<u32, UsageError> {
    match arg.parse::<u32>() {
        Ok(0) => Err(UsageError::ZeroDimension),
        Ok(v) => Ok(v),
        Err(_) => Err(UsageError::NonIntegerDimensions),
    }
}
