use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use torque_rgba::{
    CompositeOpts, MaskVolume, PngCompression, batch_create_rgba, create_rgba_single,
    load_mask_plane, load_mask_volume, optimization_info, plan_job_dir,
};

#[derive(Parser, Debug)]
#[command(name = "torque-rgba", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite every frame in a directory with its mask and print a JSON report.
    Batch(BatchArgs),
    /// Composite one frame with one mask.
    Single(SingleArgs),
    /// Print runtime parallelism and SIMD capabilities as JSON.
    Info,
}

#[derive(Args, Debug)]
struct OptsArgs {
    /// JSON options file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker cap (defaults to 4, never more than the hardware threads).
    #[arg(long)]
    threads: Option<usize>,

    /// PNG compression: fast, default or best.
    #[arg(long)]
    compression: Option<PngCompression>,

    /// Fail instead of creating missing output directories.
    #[arg(long, default_value_t = false)]
    no_create_dirs: bool,
}

impl OptsArgs {
    fn resolve(&self) -> anyhow::Result<CompositeOpts> {
        let mut opts = match &self.config {
            Some(path) => CompositeOpts::from_json_path(path)?,
            None => CompositeOpts::default(),
        };
        if let Some(n) = self.threads {
            opts.max_workers = n;
        }
        if let Some(c) = self.compression {
            opts.png_compression = c;
        }
        if self.no_create_dirs {
            opts.create_parent_dirs = false;
        }
        opts.validate()?;
        Ok(opts)
    }
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Directory of input frames (jpg, jpeg, png, heic).
    #[arg(long)]
    images: PathBuf,

    /// Directory holding one `<frame stem>.png` mask per frame.
    #[arg(long, conflicts_with = "mask", required_unless_present = "mask")]
    masks: Option<PathBuf>,

    /// One mask image applied to every frame.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Output directory; frames are written as `<stem>_rgba.png`.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    opts: OptsArgs,
}

#[derive(Args, Debug)]
struct SingleArgs {
    /// Input frame.
    #[arg(long)]
    image: PathBuf,

    /// Mask image (non-zero luma is foreground).
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    opts: OptsArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Batch(args) => cmd_batch(args),
        Command::Single(args) => cmd_single(args),
        Command::Info => cmd_info(),
    }
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let opts = args.opts.resolve()?;
    let plan = plan_job_dir(&args.images, args.masks.as_deref(), &args.out)?;
    if plan.is_empty() {
        anyhow::bail!("no images found in '{}'", args.images.display());
    }

    let masks = match &args.mask {
        Some(path) => {
            let plane = load_mask_plane(path)?;
            MaskVolume::from_planes(vec![plane; plan.len()])?
        }
        None => load_mask_volume(&plan.masks)?,
    };

    tracing::info!(
        images = plan.len(),
        dims = %masks.dimensions(),
        out = %args.out.display(),
        "compositing job"
    );
    let report = batch_create_rgba(&plan.inputs, &masks, &plan.outputs, &opts)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize batch report")?
    );
    Ok(())
}

fn cmd_single(args: SingleArgs) -> anyhow::Result<()> {
    let opts = args.opts.resolve()?;
    let mask = load_mask_plane(&args.mask)?;
    if !create_rgba_single(&args.image, mask.as_plane(), &args.out, &opts) {
        anyhow::bail!("failed to composite '{}'", args.image.display());
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_info() -> anyhow::Result<()> {
    let info = optimization_info();
    println!(
        "{}",
        serde_json::to_string_pretty(&info).context("serialize capability info")?
    );
    Ok(())
}
