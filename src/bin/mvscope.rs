use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, Subcommand, error::ErrorKind};

use mvscope::{
    BenchmarkInvocation, CombinedVideoOpts, ComparisonReport, FrameRange, VectorTable,
    VectorVideoOpts, VisualizationConfig, compare_frames, fastest_per_stream,
    merge_method_outputs, prune_stream_outputs, render_combined_video, render_frame_png,
    render_vector_video, run_sweep,
};

#[derive(Parser, Debug)]
#[command(name = "mvscope", version, about = "Compare and visualize motion vectors")]
struct Cli {
    /// Visualization config JSON (break points, styles, per-frame cap).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two per-method CSVs over an inclusive frame range.
    Compare(CompareArgs),
    /// Render one frame's vectors as a PNG.
    Frame(FrameArgs),
    /// Render every frame's vectors into an MP4 (requires `ffmpeg` on PATH).
    VectorsVideo(VectorsVideoArgs),
    /// Lay vector overlays and the source video side by side in one MP4.
    CombineVideo(CombineVideoArgs),
    /// Merge `method{0..=8}_output_0.csv` into one CSV.
    MergeCsv(MergeCsvArgs),
    /// Run the benchmark executable over a range of stream counts.
    Bench(BenchArgs),
}

#[derive(Parser, Debug)]
struct CompareArgs {
    /// First method's CSV (reported as method0).
    file_a: PathBuf,
    /// Second method's CSV (reported as method7).
    file_b: PathBuf,
    start_frame: u64,
    end_frame: u64,
    /// Output text file.
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Motion-vector CSV.
    csv: PathBuf,

    /// Frame number to draw.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,
}

#[derive(Parser, Debug)]
struct VectorsVideoArgs {
    /// Motion-vector CSV.
    csv: PathBuf,

    /// Directory receiving `motion_vectors_video_optimized.mp4`.
    results_dir: PathBuf,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    #[arg(long, default_value_t = 24)]
    fps: u32,

    /// Font file for the frame captions.
    #[arg(long, conflicts_with = "no_captions")]
    caption_font: Option<PathBuf>,

    /// Leave the "Frame:" and "Vectors:" captions off.
    #[arg(long)]
    no_captions: bool,
}

#[derive(Parser, Debug)]
struct CombineVideoArgs {
    /// Source video.
    video: PathBuf,

    /// One CSV per vector segment, left to right.
    #[arg(required = true)]
    csv: Vec<PathBuf>,

    /// Segment position of the source video (defaults to after every CSV).
    #[arg(long)]
    video_index: Option<usize>,

    /// Highest frame number rendered.
    #[arg(long, default_value_t = 660)]
    max_frames: u64,

    /// Output MP4 path.
    #[arg(long, default_value = "combined_motion_vectors_with_video.mp4")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MergeCsvArgs {
    /// Directory holding the per-method outputs.
    dir: PathBuf,

    /// Output CSV (defaults to `<dir>/all_motion_vectors.csv`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BenchArgs {
    /// Benchmark executable.
    executable: PathBuf,

    /// Input video file or stream URL.
    input: String,

    /// Largest stream count to test.
    #[arg(long, default_value_t = 1)]
    max_streams: u32,

    /// Directory receiving method outputs and `benchmark_results.csv`.
    #[arg(long)]
    results_dir: PathBuf,

    /// Project root handed to the executable.
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Delete per-stream method outputs other than the first stream's.
    #[arg(long)]
    prune: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = e.print();
            return code;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Compare(args) => cmd_compare(args),
        Command::Frame(args) => cmd_frame(args, &config),
        Command::VectorsVideo(args) => cmd_vectors_video(args, &config),
        Command::CombineVideo(args) => cmd_combine_video(args, &config),
        Command::MergeCsv(args) => cmd_merge_csv(args),
        Command::Bench(args) => cmd_bench(args),
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<VisualizationConfig> {
    let cfg = match path {
        Some(p) => VisualizationConfig::from_path(p)?,
        None => VisualizationConfig::default(),
    };
    Ok(cfg.with_env_overrides())
}

fn cmd_compare(args: CompareArgs) -> anyhow::Result<()> {
    let range = FrameRange::new(args.start_frame, args.end_frame)?;
    let a = VectorTable::load(&args.file_a)?;
    let b = VectorTable::load(&args.file_b)?;

    let report = ComparisonReport::new(range, compare_frames(&a, &b, range));
    report.write_to(&args.output)?;

    println!(
        "Comparison complete. Results written to {}",
        args.output.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs, config: &VisualizationConfig) -> anyhow::Result<()> {
    let table = VectorTable::load(&args.csv)?;
    let opts = VectorVideoOpts {
        width: args.width,
        height: args.height,
        ..VectorVideoOpts::single_frame(config)
    };
    let drawn = render_frame_png(&table, args.frame, &args.out, &opts)?;
    println!(
        "Frame {} written to {} ({drawn} vectors)",
        args.frame,
        args.out.display()
    );
    Ok(())
}

fn cmd_vectors_video(args: VectorsVideoArgs, config: &VisualizationConfig) -> anyhow::Result<()> {
    let table = VectorTable::load(&args.csv)?;
    println!("Loaded {} motion vectors.", table.len());

    let out = args.results_dir.join("motion_vectors_video_optimized.mp4");
    let opts = VectorVideoOpts {
        width: args.width,
        height: args.height,
        fps: args.fps,
        captions: !args.no_captions,
        caption_font: args.caption_font,
        ..VectorVideoOpts::from_config(config)
    };
    let summary = render_vector_video(&table, &out, &opts)?;
    println!(
        "Saved motion vector video: {} ({} frames)",
        out.display(),
        summary.frames
    );
    Ok(())
}

fn cmd_combine_video(args: CombineVideoArgs, config: &VisualizationConfig) -> anyhow::Result<()> {
    let tables = args
        .csv
        .iter()
        .map(|p| VectorTable::load(p))
        .collect::<Result<Vec<_>, _>>()?;
    let opts = CombinedVideoOpts {
        video_segment_index: args.video_index,
        max_frames: args.max_frames,
        ..CombinedVideoOpts::from_config(config)
    };
    let summary = render_combined_video(&tables, &args.video, &args.out, &opts)?;
    println!(
        "Combined video saved as {} ({} frames)",
        args.out.display(),
        summary.frames
    );
    Ok(())
}

fn cmd_merge_csv(args: MergeCsvArgs) -> anyhow::Result<()> {
    let out = args
        .out
        .unwrap_or_else(|| args.dir.join("all_motion_vectors.csv"));
    let merged = merge_method_outputs(&args.dir, &out)?;
    println!("Combined CSV: {} created from {merged} files.", out.display());
    Ok(())
}

fn cmd_bench(args: BenchArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.results_dir)
        .with_context(|| format!("create results dir '{}'", args.results_dir.display()))?;

    let inv = BenchmarkInvocation {
        executable: args.executable,
        input: args.input,
        streams: 1,
        results_dir: args.results_dir.clone(),
        project_dir: args.project_dir,
    };
    let outcome = run_sweep(&inv, args.max_streams, &args.results_dir)?;
    println!("Saved complete data table: {}", outcome.csv_path.display());

    if args.prune {
        let removed = prune_stream_outputs(&args.results_dir)?;
        println!("Removed {removed} per-stream outputs.");
    }

    let fastest = fastest_per_stream(&outcome.rows);
    if fastest.is_empty() {
        println!("No high profile methods found in results.");
        return Ok(());
    }
    println!("Streams | Method | Time/Frame (ms) | FPS | CPU (%)");
    for row in fastest {
        println!(
            "{} | {} | {} | {} | {}",
            row.streams, row.method, row.time_per_frame, row.fps, row.cpu
        );
    }
    Ok(())
}
