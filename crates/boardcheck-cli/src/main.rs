//! boardcheck CLI - batch PCB defect inspection.

mod inputs;

use boardcheck_core::Rect;
use boardcheck_eval::{Sample, Score, SweepGrid, read_annotation, score};
use boardcheck_io::ImageFormat;
use boardcheck_pipeline::{Detection, PipelineParameters, Recipe};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error + Send + Sync>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "boardcheck")]
#[command(about = "Detect missing holes and mouse bites in PCB photographs")]
#[command(version)]
struct Cli {
    /// Log every pipeline stage (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a defect recipe and write annotated images.
    Detect(DetectArgs),

    /// Mark differences against a defect-free reference image.
    Diff(DiffArgs),

    /// Score a recipe against annotation files.
    Eval(EvalArgs),

    /// Rank area and fill-ratio settings against annotation files.
    Sweep(SweepArgs),

    /// Print the effective parameters as JSON.
    Params(ParamArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RecipeArg {
    MissingHole,
    MouseBite,
}

impl RecipeArg {
    fn to_core(self) -> Recipe {
        match self {
            Self::MissingHole => Recipe::MissingHole,
            Self::MouseBite => Recipe::MouseBite,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct ParamArgs {
    /// JSON parameter file; absent fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exclusive lower area bound of the recipe's area filter.
    #[arg(long)]
    min_area: Option<u32>,

    /// Exclusive upper area bound of the recipe's area filter.
    #[arg(long)]
    max_area: Option<u32>,

    /// Missing-Hole fill-ratio cutoff in (0, 1).
    #[arg(long)]
    fill_threshold: Option<f64>,
}

impl ParamArgs {
    fn build(&self, recipe: Option<Recipe>) -> CliResult<PipelineParameters> {
        let mut params = match &self.config {
            Some(path) => PipelineParameters::from_json_file(path)?,
            None => PipelineParameters::default(),
        };
        match recipe {
            Some(Recipe::MissingHole) | None => {
                let p = &mut params.missing_hole;
                p.min_area = self.min_area.unwrap_or(p.min_area);
                p.max_area = self.max_area.unwrap_or(p.max_area);
                p.fill_threshold = self.fill_threshold.unwrap_or(p.fill_threshold);
            }
            Some(Recipe::MouseBite) => {
                if self.fill_threshold.is_some() {
                    tracing::warn!("--fill-threshold has no effect on the mouse-bite recipe");
                }
                let p = &mut params.mouse_bite;
                p.min_area = self.min_area.unwrap_or(p.min_area);
                p.max_area = self.max_area.unwrap_or(p.max_area);
            }
        }
        params.validate()?;
        Ok(params)
    }
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    #[arg(long, value_enum)]
    recipe: RecipeArg,

    /// Image files or directories of images.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output root; each image goes to <out-dir>/<stem>/<file name>.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Debug, Clone, Args)]
struct DiffArgs {
    /// Defect-free reference image.
    #[arg(long)]
    reference: PathBuf,

    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Debug, Clone, Args)]
struct EvalArgs {
    #[arg(long, value_enum)]
    recipe: RecipeArg,

    /// Directory holding <stem>.xml for every input image.
    #[arg(long)]
    annotations: PathBuf,

    /// Only score boxes of this object class.
    #[arg(long)]
    class: Option<String>,

    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Debug, Clone, Args)]
struct SweepArgs {
    #[arg(long, value_enum)]
    recipe: RecipeArg,

    #[arg(long)]
    annotations: PathBuf,

    #[arg(long)]
    class: Option<String>,

    /// JSON sweep grid; the built-in grid is used when omitted.
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Number of ranked settings to print.
    #[arg(long, default_value_t = 10)]
    top: usize,

    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    params: ParamArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Diff(args) => run_diff(&args),
        Commands::Eval(args) => run_eval(&args),
        Commands::Sweep(args) => run_sweep(&args),
        Commands::Params(args) => run_params(&args),
    };

    match &outcome {
        Ok(0) => {}
        Ok(failed) => tracing::error!("{} image(s) failed", failed),
        Err(e) => tracing::error!("{}", e),
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 when every image succeeded, 1 when some images failed, 2 when the
/// run could not start (bad parameters, unreadable inputs).
fn exit_status(outcome: &CliResult<usize>) -> u8 {
    match outcome {
        Ok(0) => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn write_detection(detection: &Detection, input: &Path, out_dir: &Path) -> CliResult<PathBuf> {
    let out = inputs::output_path(out_dir, input);
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let format = ImageFormat::from_path(input)?;
    boardcheck_io::write_image(&detection.annotated, &out, format)?;
    Ok(out)
}

/// Run `job` on every input in parallel and log the outcome of each in
/// input order. Returns the number of failures.
fn run_batch<F>(inputs: &[PathBuf], job: F) -> usize
where
    F: Fn(&Path) -> CliResult<(usize, PathBuf)> + Sync,
{
    let results: Vec<_> = inputs.par_iter().map(|p| job(p)).collect();
    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok((circles, out)) => tracing::info!(
                "{}: {} circle(s) -> {}",
                input.display(),
                circles,
                out.display()
            ),
            Err(e) => {
                failed += 1;
                tracing::error!("{}: {}", input.display(), e);
            }
        }
    }
    failed
}

fn run_detect(args: &DetectArgs) -> CliResult<usize> {
    let recipe = args.recipe.to_core();
    let params = args.params.build(Some(recipe))?;
    let inputs = inputs::collect_inputs(&args.inputs)?;
    tracing::info!("Running {} on {} image(s)", recipe, inputs.len());

    Ok(run_batch(&inputs, |input| {
        let image = boardcheck_io::read_image(input)?;
        let detection = recipe.run(&image, &params)?;
        let out = write_detection(&detection, input, &args.out_dir)?;
        Ok((detection.circles.len(), out))
    }))
}

fn run_diff(args: &DiffArgs) -> CliResult<usize> {
    let params = args.params.build(None)?;
    let reference = boardcheck_io::read_image(&args.reference)?;
    let inputs = inputs::collect_inputs(&args.inputs)?;
    tracing::info!(
        "Comparing {} image(s) against {}",
        inputs.len(),
        args.reference.display()
    );

    Ok(run_batch(&inputs, |input| {
        let inspected = boardcheck_io::read_image(input)?;
        let detection = boardcheck_pipeline::difference(&inspected, &reference, &params)?;
        let out = write_detection(&detection, input, &args.out_dir)?;
        Ok((detection.circles.len(), out))
    }))
}

fn load_sample(input: &Path, annotations: &Path, class: Option<&str>) -> CliResult<Sample> {
    let image = boardcheck_io::read_image(input)?;
    let annotation = read_annotation(inputs::annotation_path(annotations, input))?;
    let boxes: Vec<Rect> = match class {
        Some(name) => annotation.boxes_named(name),
        None => annotation.boxes(),
    };
    Ok(Sample {
        name: input.display().to_string(),
        image,
        boxes,
    })
}

fn run_eval(args: &EvalArgs) -> CliResult<usize> {
    let recipe = args.recipe.to_core();
    let params = args.params.build(Some(recipe))?;
    let inputs = inputs::collect_inputs(&args.inputs)?;

    let results: Vec<CliResult<Score>> = inputs
        .par_iter()
        .map(|input| {
            let sample = load_sample(input, &args.annotations, args.class.as_deref())?;
            let detection = recipe.run(&sample.image, &params)?;
            Ok(score(&detection.circles, &sample.boxes))
        })
        .collect();

    let mut total = Score::default();
    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(s) => {
                total += s;
                let line = serde_json::json!({ "image": input.display().to_string(), "score": s });
                println!("{}", line);
            }
            Err(e) => {
                failed += 1;
                tracing::error!("{}: {}", input.display(), e);
            }
        }
    }
    let summary = serde_json::json!({
        "total": total,
        "recall": total.recall(),
        "precision": total.precision(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(failed)
}

fn run_sweep(args: &SweepArgs) -> CliResult<usize> {
    let recipe = args.recipe.to_core();
    let base = args.params.build(Some(recipe))?;
    let grid: SweepGrid = match &args.grid {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SweepGrid::default(),
    };
    let inputs = inputs::collect_inputs(&args.inputs)?;

    let samples = inputs
        .par_iter()
        .map(|input| load_sample(input, &args.annotations, args.class.as_deref()))
        .collect::<CliResult<Vec<_>>>()?;

    let ranked = boardcheck_eval::sweep(recipe, &samples, &base, &grid)?;
    let top: Vec<_> = ranked.into_iter().take(args.top).collect();
    println!("{}", serde_json::to_string_pretty(&top)?);
    Ok(0)
}

fn run_params(args: &ParamArgs) -> CliResult<usize> {
    let params = args.build(None)?;
    println!("{}", params.to_json_string()?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn no_overrides() -> ParamArgs {
        ParamArgs {
            config: None,
            min_area: None,
            max_area: None,
            fill_threshold: None,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_defaults() {
        let args = no_overrides();
        assert_eq!(args.build(None).unwrap(), PipelineParameters::default());
        assert_eq!(
            args.build(Some(Recipe::MouseBite)).unwrap(),
            PipelineParameters::default()
        );
    }

    #[test]
    fn test_overrides_follow_recipe() {
        let args = ParamArgs {
            min_area: Some(300),
            max_area: Some(900),
            fill_threshold: Some(0.6),
            ..no_overrides()
        };
        let defaults = PipelineParameters::default();

        let hole = args.build(Some(Recipe::MissingHole)).unwrap();
        assert_eq!(hole.missing_hole.min_area, 300);
        assert_eq!(hole.missing_hole.max_area, 900);
        assert_eq!(hole.missing_hole.fill_threshold, 0.6);
        assert_eq!(hole.mouse_bite, defaults.mouse_bite);

        // Area bounds move to the mouse-bite filter; the fill cutoff is ignored
        let bite = args.build(Some(Recipe::MouseBite)).unwrap();
        assert_eq!(bite.mouse_bite.min_area, 300);
        assert_eq!(bite.mouse_bite.max_area, 900);
        assert_eq!(bite.missing_hole, defaults.missing_hole);
    }

    #[test]
    fn test_overrides_are_validated() {
        let inverted = ParamArgs {
            min_area: Some(700),
            ..no_overrides()
        };
        assert!(inverted.build(Some(Recipe::MissingHole)).is_err());
        // 700 < 37500, so the mouse-bite bounds stay ordered
        assert!(inverted.build(Some(Recipe::MouseBite)).is_ok());

        let fill = ParamArgs {
            fill_threshold: Some(1.5),
            ..no_overrides()
        };
        assert!(fill.build(None).is_err());
        assert!(fill.build(Some(Recipe::MouseBite)).is_ok());
    }

    #[test]
    fn test_config_file_then_overrides() {
        let path = std::env::temp_dir().join("boardcheck_cli_param_args.json");
        std::fs::write(
            &path,
            r#"{ "missing_hole": { "min_area": 150, "fill_threshold": 0.5 } }"#,
        )
        .unwrap();
        let from_file = ParamArgs {
            config: Some(path.clone()),
            ..no_overrides()
        };
        let params = from_file.build(None).unwrap();
        assert_eq!(params.missing_hole.min_area, 150);
        assert_eq!(params.missing_hole.fill_threshold, 0.5);
        assert_eq!(params.missing_hole.max_area, 600);

        let overridden = ParamArgs {
            min_area: Some(250),
            ..from_file
        };
        let params = overridden.build(None).unwrap();
        assert_eq!(params.missing_hole.min_area, 250);
        assert_eq!(params.missing_hole.fill_threshold, 0.5);
        let _ = std::fs::remove_file(&path);

        let missing = ParamArgs {
            config: Some(std::env::temp_dir().join("boardcheck_cli_no_such_params.json")),
            ..no_overrides()
        };
        assert!(missing.build(None).is_err());
    }

    #[test]
    fn test_parse_detect() {
        let cli = Cli::try_parse_from([
            "boardcheck",
            "detect",
            "--recipe",
            "mouse-bite",
            "--out-dir",
            "out",
            "--min-area",
            "200",
            "a.jpg",
            "b.jpg",
        ])
        .unwrap();
        let Commands::Detect(args) = cli.command else {
            panic!("expected the detect subcommand");
        };
        assert!(matches!(args.recipe, RecipeArg::MouseBite));
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.params.min_area, Some(200));
        let unknown = ["boardcheck", "detect", "--recipe", "short", "--out-dir", "out", "a.jpg"];
        assert!(Cli::try_parse_from(unknown).is_err());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(0)), 0);
        assert_eq!(exit_status(&Ok(3)), 1);
        assert_eq!(exit_status(&Err("bad parameters".into())), 2);
    }
}
