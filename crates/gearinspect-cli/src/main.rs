//! gearinspect CLI — command-line interface for gear ring inspection.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const SAMPLES_DESCRIPTION: &str = "Samples Description.txt";
const REFERENCE_FILE: &str = "ideal.jpg";

#[derive(Parser)]
#[command(name = "gearinspect")]
#[command(about = "Count worn and missing teeth and check the inner diameter of a gear ring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a test image against the reference image.
    Inspect(CliInspectArgs),

    /// List the available sample images.
    Samples {
        /// Directory holding the reference, the samples and their description.
        #[arg(long, default_value = "task_images")]
        dir: PathBuf,
    },

    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct CliInspectArgs {
    /// Reference (ideal part) image. Defaults to `<samples-dir>/ideal.jpg`.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Test image. Alternative to --sample.
    #[arg(long, conflicts_with = "sample")]
    test: Option<PathBuf>,

    /// Sample number; resolves to `<samples-dir>/sample<N>.jpg`.
    #[arg(long)]
    sample: Option<u32>,

    /// Directory holding the reference and the sample images.
    #[arg(long, default_value = "task_images")]
    samples_dir: PathBuf,

    /// Inspection configuration (JSON). Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write the inspection report (JSON).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to write the overall difference image (PNG).
    #[arg(long)]
    overall_diff: Option<PathBuf>,

    /// Path to write the significant difference contours image (PNG).
    #[arg(long)]
    contours: Option<PathBuf>,

    /// Path to write the reference rim outlines (PNG).
    #[arg(long)]
    reference_contours: Option<PathBuf>,

    /// Path to write the test rim outlines (PNG).
    #[arg(long)]
    test_contours: Option<PathBuf>,

    #[command(flatten)]
    tuning: CliTuningArgs,
}

#[derive(Debug, Clone, Args, Default)]
struct CliTuningArgs {
    /// Inner-diameter disc radius in pixels.
    #[arg(long)]
    mask_radius: Option<i32>,
    /// Disc center x in pixels. If set, --mask-center-y is required too.
    #[arg(long, requires = "mask_center_y")]
    mask_center_x: Option<i32>,
    /// Disc center y in pixels. If set, --mask-center-x is required too.
    #[arg(long, requires = "mask_center_x")]
    mask_center_y: Option<i32>,
    /// Global threshold for the inner-diameter region.
    #[arg(long)]
    global_threshold: Option<u8>,
    /// Reference deviation area of the inner diameter (px²).
    #[arg(long)]
    inner_diameter_normal_size: Option<f64>,
    /// Adaptive threshold weighting for the rim.
    #[arg(long, value_enum)]
    adaptive_method: Option<AdaptiveMethodArg>,
    /// Adaptive threshold window size (odd, >= 3).
    #[arg(long)]
    block_size: Option<u32>,
    /// Adaptive threshold bias subtracted from the local mean.
    #[arg(long, allow_negative_numbers = true)]
    bias: Option<f32>,
    /// Lower bound of the missing-tooth area band (px², inclusive).
    #[arg(long)]
    missing_min_area: Option<f64>,
    /// Upper bound of the missing-tooth area band (px², inclusive).
    #[arg(long)]
    missing_max_area: Option<f64>,
    /// Minimum contour point count for a deviation to be classified.
    #[arg(long)]
    min_points: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AdaptiveMethodArg {
    Gaussian,
    Mean,
}

impl AdaptiveMethodArg {
    fn to_core(self) -> gearinspect::AdaptiveMethod {
        match self {
            Self::Gaussian => gearinspect::AdaptiveMethod::Gaussian,
            Self::Mean => gearinspect::AdaptiveMethod::Mean,
        }
    }
}

impl CliTuningArgs {
    fn apply(&self, config: &mut gearinspect::InspectConfig) {
        if let Some(r) = self.mask_radius {
            config.mask.radius = r;
        }
        if let (Some(x), Some(y)) = (self.mask_center_x, self.mask_center_y) {
            config.mask.center = Some([x, y]);
        }
        if let Some(t) = self.global_threshold {
            config.diameter.threshold = t;
        }
        if let Some(a) = self.inner_diameter_normal_size {
            config.diameter.inner_diameter_normal_size = a;
        }
        if let Some(m) = self.adaptive_method {
            config.adaptive.method = m.to_core();
        }
        if let Some(bs) = self.block_size {
            config.adaptive.block_size = bs;
        }
        if let Some(b) = self.bias {
            config.adaptive.bias = b;
        }
        if let Some(a) = self.missing_min_area {
            config.tooth_band.min_area = a;
        }
        if let Some(a) = self.missing_max_area {
            config.tooth_band.max_area = a;
        }
        if let Some(n) = self.min_points {
            config.min_contour_points = n;
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Samples { dir } => run_samples(&dir),
        Commands::DefaultConfig => run_default_config(),
    }
}

// ── samples ────────────────────────────────────────────────────────────

fn run_samples(dir: &Path) -> CliResult<()> {
    let path = dir.join(SAMPLES_DESCRIPTION);
    let text = std::fs::read_to_string(&path).map_err(|e| -> CliError {
        format!("Failed to read {}: {}", path.display(), e).into()
    })?;
    // First line is a title.
    for line in text.lines().skip(1) {
        println!("{}", line);
    }
    Ok(())
}

// ── default-config ─────────────────────────────────────────────────────

fn run_default_config() -> CliResult<()> {
    println!("{}", gearinspect::InspectConfig::default().to_json_pretty()?);
    Ok(())
}

// ── inspect ────────────────────────────────────────────────────────────

fn resolve_test_path(args: &CliInspectArgs) -> CliResult<PathBuf> {
    if let Some(test) = &args.test {
        return Ok(test.clone());
    }
    let Some(n) = args.sample else {
        return Err("either --test or --sample is required".into());
    };
    let path = args.samples_dir.join(format!("sample{}.jpg", n));
    if !path.is_file() {
        return Err(format!("Invalid sample number: {} ({} not found)", n, path.display()).into());
    }
    Ok(path)
}

fn load_gray(path: &Path) -> CliResult<image::GrayImage> {
    let img = image::open(path).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", path.display(), e).into()
    })?;
    Ok(img.to_luma8())
}

fn build_config(args: &CliInspectArgs) -> CliResult<gearinspect::InspectConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            gearinspect::InspectConfig::from_json_file(path)?
        }
        None => gearinspect::InspectConfig::default(),
    };
    args.tuning.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn run_inspect(args: &CliInspectArgs) -> CliResult<()> {
    let config = build_config(args)?;

    let reference_path = args
        .reference
        .clone()
        .unwrap_or_else(|| args.samples_dir.join(REFERENCE_FILE));
    let test_path = resolve_test_path(args)?;

    tracing::info!("Loading reference: {}", reference_path.display());
    let reference = load_gray(&reference_path)?;
    tracing::info!("Loading test: {}", test_path.display());
    let test = load_gray(&test_path)?;

    let (w, h) = reference.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let inspector = gearinspect::Inspector::with_config(config);
    let outcome = inspector.inspect(&reference, &test)?;
    let report = &outcome.report;

    println!("Number of missing teeth: {}", report.missing_teeth);
    println!("-------------------");
    println!("Number of worn teeth: {}", report.worn_teeth);
    println!("-------------------");
    println!(
        "The condition of the inner diameter is: {}",
        report.diameter_status
    );

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(out, &json)?;
        tracing::info!("Report written to {}", out.display());
    }

    let images = &outcome.images;
    if let Some(path) = &args.overall_diff {
        images.overall_difference.save(path)?;
        tracing::info!("Overall difference written to {}", path.display());
    }
    if let Some(path) = &args.contours {
        images.significant_contours.save(path)?;
        tracing::info!("Significant contours written to {}", path.display());
    }
    if let Some(path) = &args.reference_contours {
        images.reference_contours.save(path)?;
        tracing::info!("Reference outlines written to {}", path.display());
    }
    if let Some(path) = &args.test_contours {
        images.test_contours.save(path)?;
        tracing::info!("Test outlines written to {}", path.display());
    }

    Ok(())
}
