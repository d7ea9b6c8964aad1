use clap::{Parser, Subcommand};
use log::{info, warn};
use simple_retouch::config::{self, DEFAULT_CONFIG_FILE, RetouchConfig};
use simple_retouch::controls::{ControlValues, OutputFormat};
use simple_retouch::editor::{Action, DEFAULT_SAVE_NAME, Editor, Step};
use simple_retouch::imaging::{RustBackend, is_supported_input, supported_input_extensions};
use simple_retouch::output;
use simple_retouch::session::ImageSession;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-retouch")]
#[command(about = "Load an image, edit it step by step, save the result")]
#[command(long_about = "\
Load an image, edit it step by step, save the result

Each --step moves some controls and presses a button, in order:

  resize=WxH       width and height sliders (10-2000), then Resize
  filter=NAME      filter selector, then Apply Filter
                   (none, blur, contour, detail, edge-enhance, sharpen)
  adjust=B,C       brightness and contrast sliders (0-200, 100 = unchanged),
                   then Adjust
  revert           back to the image as loaded

Without --format the result is saved as PNG/JPEG/... by the extension of
--output (default manipulated_image.png). With --format it is converted to
that format (default converted_image.<ext>).

Run 'simple-retouch options' to list every filter, format and slider range.
Run 'simple-retouch gen-config' to generate a documented retouch.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply edit steps to an image and write the result
    Edit {
        /// Image to load
        input: PathBuf,
        /// Edit step, repeatable (resize=WxH, filter=NAME, adjust=B,C, revert)
        #[arg(long = "step", short = 's')]
        steps: Vec<Step>,
        /// Where to write the result
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Convert to this format instead of inferring it from --output
        #[arg(long, short = 'f')]
        format: Option<OutputFormat>,
        /// Also write the final preview bitmap as a PNG
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Write the preview bitmap of an image as a PNG
    Preview {
        input: PathBuf,
        output: PathBuf,
    },
    /// Show size, color mode and preview size of an image
    Info {
        input: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List filters, output formats and slider ranges
    Options,
    /// Print a stock retouch.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Edit {
            input,
            steps,
            output,
            format,
            preview,
        } => {
            let config = config::load_config(&cli.config)?;
            run_edit(&config, &input, &steps, output, format, preview.as_deref())?;
        }
        Command::Preview { input, output } => {
            let config = config::load_config(&cli.config)?;
            let mut editor = build_editor(&config);
            warn_if_unsupported(&input);
            editor.dispatch(&Action::Load(input), &config.controls.initial_controls())?;
            if let Some(bitmap) = editor.preview() {
                output::write_preview(bitmap, &output)?;
                println!("{}", output::format_preview_written(&output, bitmap));
            }
        }
        Command::Info { input, json } => {
            let config = config::load_config(&cli.config)?;
            let mut session = ImageSession::new(RustBackend);
            warn_if_unsupported(&input);
            let image = session.load(&input)?;
            let summary = output::ImageSummary::new(&input, image, config.preview.viewport());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                output::print_image_summary(&summary);
            }
        }
        Command::Options => {
            output::print_options();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn build_editor(config: &RetouchConfig) -> Editor {
    let session = ImageSession::new(RustBackend).with_jpeg_quality(config.output.jpeg_quality());
    Editor::new(session, config.preview.viewport())
}

/// The file picker only offers these extensions; anything else still gets a
/// decode attempt by content.
fn warn_if_unsupported(input: &Path) {
    if !is_supported_input(input) {
        warn!(
            "{}: extension not in {}; trying anyway",
            input.display(),
            supported_input_extensions().join(", ")
        );
    }
}

fn run_edit(
    config: &RetouchConfig,
    input: &Path,
    steps: &[Step],
    output_path: Option<PathBuf>,
    format: Option<OutputFormat>,
    preview: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = build_editor(config);
    let mut controls: ControlValues = config.controls.initial_controls();

    warn_if_unsupported(input);
    editor.dispatch(&Action::Load(input.to_path_buf()), &controls)?;
    if let Some(image) = editor.current() {
        println!("{}", output::format_loaded(input, image));
    }
    controls = editor.suggested_controls(controls);

    for (index, step) in steps.iter().enumerate() {
        let (action, next) = step.apply(controls);
        controls = next;
        let outcome = editor.dispatch(&action, &controls)?;
        let dims = editor.current().map(|img| (img.width(), img.height()));
        println!(
            "{}",
            output::format_step(index, &action, &controls, outcome, dims)
        );
    }

    let (action, written) = match format {
        Some(format) => {
            controls.format = format;
            let path = output_path.unwrap_or_else(|| PathBuf::from(format.default_filename()));
            (Action::ConvertFormat(path.clone()), Some((path, format)))
        }
        None => {
            let path = output_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_NAME));
            let format = OutputFormat::from_path(&path);
            (Action::Save(path.clone()), format.map(|f| (path, f)))
        }
    };
    editor.dispatch(&action, &controls)?;
    if let Some((path, format)) = written {
        info!("wrote {}", path.display());
        println!("{}", output::format_saved(&path, format));
    }

    if let (Some(path), Some(bitmap)) = (preview, editor.preview()) {
        output::write_preview(bitmap, path)?;
        println!("{}", output::format_preview_written(path, bitmap));
    }

    Ok(())
}
