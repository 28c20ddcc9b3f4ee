use clap::{CommandFactory, Parser, error::ErrorKind};
use jewelcase::{batch, config, output, process};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "jewelcase")]
#[command(about = "Put album art inside a CD jewel case")]
#[command(long_about = "\
Put album art inside a CD jewel case

The art is scaled and centre-cropped to a square, lightly aged (colour
correction, soft edges, rounded corners, a reflection and a slight
rotation) and composited into a jewel case frame.

Usage:
  jewelcase [options] <input-image> <output-image>
  jewelcase [options] --inplace <image>
  jewelcase [options] --recursive <directory>

JPEG and PNG are supported; the output format follows the file extension.
Images that are already the size of the frame are skipped unless --force
is given, so running over the same directory twice is harmless.")]
#[command(version = env!("JEWELCASE_VERSION"))]
struct Cli {
    /// Input and output image, or a single image/directory with --inplace/--recursive
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Modify the image in place
    #[arg(long, conflicts_with = "recursive")]
    inplace: bool,

    /// Process every JPEG and PNG under a directory, in place
    #[arg(long)]
    recursive: bool,

    /// Process images even if they appear to be already processed
    #[arg(long)]
    force: bool,

    /// Skip the colour correction effect
    #[arg(long)]
    no_colour: bool,

    /// Skip the rounded corners effect
    #[arg(long)]
    no_corners: bool,

    /// Skip the edge softening effect
    #[arg(long)]
    no_edges: bool,

    /// Skip the random position offset
    #[arg(long)]
    no_offset: bool,

    /// Skip the random rotation
    #[arg(long)]
    no_rotation: bool,

    /// Skip the reflection effect
    #[arg(long)]
    no_reflection: bool,

    /// TOML file with effect and processing defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a documented config file with all defaults and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded config.
    fn options(&self, base: &config::EffectsConfig) -> process::Options {
        let mut opts = process::Options::from(base);
        opts.colour_correction &= !self.no_colour;
        opts.rounded_corners &= !self.no_corners;
        opts.edge_softening &= !self.no_edges;
        opts.random_offset &= !self.no_offset;
        opts.random_rotation &= !self.no_rotation;
        opts.reflection &= !self.no_reflection;
        opts.force |= self.force;
        opts
    }

    fn expect_paths(&self, count: usize) {
        if self.paths.len() != count {
            let msg = match (self.recursive, self.inplace) {
                (true, _) => "--recursive takes exactly one directory",
                (_, true) => "--inplace takes exactly one image",
                _ => "expected <input-image> <output-image>",
            };
            Cli::command().error(ErrorKind::WrongNumberOfValues, msg).exit();
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let settings = config::resolve_config(cli.config.as_deref())?;
    let opts = cli.options(&settings.effects);
    log::debug!("effective options: {opts:?}");

    if cli.recursive {
        cli.expect_paths(1);
        init_thread_pool(&settings.processing);

        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                output::print_file_event(&event);
            }
        });
        let summary = batch::process_directory(&cli.paths[0], opts, Some(tx))?;
        printer
            .join()
            .map_err(|_| "progress printer thread panicked")?;
        output::print_summary(&summary);
        return Ok(ExitCode::SUCCESS);
    }

    let (input, output_path) = if cli.inplace {
        cli.expect_paths(1);
        (&cli.paths[0], &cli.paths[0])
    } else {
        cli.expect_paths(2);
        (&cli.paths[0], &cli.paths[1])
    };

    match process::process_file(input, output_path, opts) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_already_processed() => {
            println!("{}", output::format_skipped(input));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error applying jewel case: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can lower it, not raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
