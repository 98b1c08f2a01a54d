//! Postshot command-line entry point.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use postshot::cdp::CdpEngine;
use postshot::cli::{self, Invocation};
use postshot::render::{self, RenderConfig, WaitStrategy};
use postshot::EngineConfig;

/// Render HTML documents to PNG at social-media post sizes
#[derive(Parser, Debug)]
#[command(name = "postshot", version, about, disable_help_flag = true)]
struct Args {
    /// Fixed wait between navigation and capture
    #[arg(long, env = "POSTSHOT_DELAY_MS", default_value_t = 1500)]
    delay_ms: u64,

    /// Poll for document and font readiness instead of the fixed wait
    #[arg(long)]
    wait_ready: bool,

    /// Upper bound for --wait-ready
    #[arg(long, default_value_t = 10_000)]
    max_wait_ms: u64,

    /// Timeout for each browser operation
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Chrome/Chromium binary to launch
    #[arg(long, env = "CHROME")]
    chrome: Option<PathBuf>,

    /// Launch Chrome without its sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// Job arguments: <input.html> [output.png] [width height | --format <name>]
    /// or --carousel <output_dir> <slide.html>...
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    job: Vec<String>,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        let wait = if self.wait_ready {
            WaitStrategy::Ready {
                poll: Duration::from_millis(100),
                max: Duration::from_millis(self.max_wait_ms),
            }
        } else {
            WaitStrategy::Fixed(Duration::from_millis(self.delay_ms))
        };

        RenderConfig {
            engine: EngineConfig {
                timeout_ms: self.timeout_ms,
                chrome_path: self.chrome.clone(),
                sandbox: !self.no_sandbox,
                ..Default::default()
            },
            wait,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let invocation = match cli::resolve(&args.job) {
        Ok(invocation) => invocation,
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    };
    let config = args.render_config();

    match invocation {
        Invocation::Help => {
            print!("{}", cli::USAGE);
        }
        Invocation::Single(job) => {
            let output = render::render_job::<CdpEngine>(&job, &config).await?;
            println!("{} ({})", output.display(), job.viewport);
        }
        Invocation::Carousel(batch) => {
            render::render_batch::<CdpEngine, _>(&batch, &config, |job, output| {
                println!("{} ({})", output.display(), job.viewport);
            })
            .await?;
            println!(
                "\nCarousel rendered: {} slides in {}",
                batch.len(),
                batch.output_dir.display()
            );
        }
    }

    Ok(())
}
