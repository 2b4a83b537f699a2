use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use sort_visualiser_core::{default_program, AppConfig, Session, StreamFormat, StreamSink};
use tracing_subscriber::EnvFilter;

mod canvas;

use canvas::SoftCanvas;

fn main() -> sort_visualiser_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            video_out,
            audio_out,
            seed,
        } => run_session(&video_out, &audio_out, seed),
        Commands::PrintFormat => print_format(),
    }
}

fn run_session(
    video_out: &Path,
    audio_out: &Path,
    seed: Option<u64>,
) -> sort_visualiser_core::Result<()> {
    let config = AppConfig::default();
    tracing::info!(?video_out, ?audio_out, "opening output channels");

    let video = BufWriter::new(open_channel(video_out)?);
    let audio = BufWriter::new(open_channel(audio_out)?);
    let sink = StreamSink::new(video, audio);
    let canvas = SoftCanvas::new(config.video.width, config.video.height);

    let mut session = match seed {
        Some(seed) => Session::with_seed(&config, canvas, sink, seed),
        None => Session::new(&config, canvas, sink),
    };

    for stage in &default_program() {
        tracing::info!(
            algorithm = stage.algorithm.name(),
            array_size = stage.array_size,
            skip_frames = stage.skip_frames,
            "running stage"
        );
        session.run_stage(stage)?;
    }

    session.finish()
}

fn open_channel(path: &Path) -> sort_visualiser_core::Result<File> {
    // `create` is a no-op for the /dev/fd/N channels an encoder wrapper
    // passes in; plain paths get created as regular files. Never truncate:
    // the channel may be a pipe.
    let file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    Ok(file)
}

fn print_format() -> sort_visualiser_core::Result<()> {
    let format = StreamFormat::from_config(&AppConfig::default());
    println!("{}", format.to_json()?);
    println!();
    println!("# example encoder invocation:");
    println!("{}", format.ffmpeg_example("video.raw", "audio.raw", "out.mp4"));
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Sorting-algorithm visualiser emitting raw video and audio streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the full algorithm programme to the raw output channels.
    Run {
        /// Destination for the raw video stream.
        #[arg(long, default_value = "/dev/fd/3")]
        video_out: PathBuf,
        /// Destination for the raw audio stream.
        #[arg(long, default_value = "/dev/fd/4")]
        audio_out: PathBuf,
        /// Shuffle seed; the fixed default keeps sessions reproducible.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the out-of-band stream format description as JSON.
    PrintFormat,
}
