//! bfplot - Savage-Dickey Bayes factor CLI.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use bf_common::{Error, OutputFormat, Result};
use bf_config::{load_file, resolve_config, ConfigSnapshot};
use bf_core::data::{synthetic, InferenceData, SampleArray};
use bf_core::exit_codes::ExitCode;
use bf_core::logging::{init_logging, LogFormat};
use bf_core::plot::{
    BackendKwargs, BfPlotArgs, BfPlotter, HistKwargs, PlotKwargs, RendererRegistry, PLOT_KIND,
};
use bf_core::report::{report_schema, BfReport};
use bf_render::output::write_document;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::Serialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "bfplot")]
#[command(about = "Savage-Dickey Bayes factors for point-null hypotheses")]
#[command(version)]
struct Cli {
    /// Output format for results on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Config file (TOML or JSON); overrides BFPLOT_CONFIG and the XDG location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Raise log verbosity when BFPLOT_LOG is unset (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the Bayes factor for one variable and draw the figure
    Plot(PlotCmd),

    /// Write a synthetic dataset: posterior a ~ N(1, 0.5), prior a ~ N(0, 1)
    Demo {
        /// Destination JSON file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Draws per group
        #[arg(long, default_value_t = 5000)]
        draws: usize,
    },

    /// Inspect the resolved plot defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List registered renderer backends
    Backends,

    /// Print the JSON schema of the plot result document
    Schema,

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective defaults and where they came from
    Show,
    /// Check a config file, or the resolved one when no file is given
    Validate { file: Option<PathBuf> },
}

#[derive(Args)]
struct PlotCmd {
    /// Inference data JSON: {"posterior": {...}, "prior": {...}}
    #[arg(long)]
    data: PathBuf,

    /// Variable to test
    #[arg(long = "var")]
    var_name: String,

    /// JSON array of prior draws replacing the dataset's prior group
    #[arg(long)]
    prior_file: Option<PathBuf>,

    /// Point-null value
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    ref_val: f64,

    /// Renderer backend (see `bfplot backends`)
    #[arg(long)]
    backend: Option<String>,

    /// Prior and posterior colors, e.g. C0,C1 or red,#1f77b4
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,

    /// Figure width and height in inches, e.g. 10,6
    #[arg(long, value_delimiter = ',')]
    figsize: Vec<f64>,

    /// Text scaling factor
    #[arg(long)]
    textsize: Option<f64>,

    #[arg(long)]
    dpi: Option<f64>,

    /// Histogram bins for discrete draws
    #[arg(long)]
    bins: Option<usize>,

    /// Density line width in points
    #[arg(long)]
    linewidth: Option<f64>,

    /// Density line style: -, --, :, -.
    #[arg(long)]
    linestyle: Option<String>,

    /// Replace the default Bayes factor title
    #[arg(long)]
    title: Option<String>,

    /// Minify HTML output
    #[arg(long)]
    minify: bool,

    /// Write the figure document to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the figure to a kept temporary file
    #[arg(long)]
    show: bool,
}

impl PlotCmd {
    fn to_plot_args(&self, prior: Option<SampleArray>) -> Result<BfPlotArgs> {
        let colors = match self.colors.as_slice() {
            [] => None,
            [prior, posterior] => Some([prior.clone(), posterior.clone()]),
            other => {
                return Err(Error::malformed(
                    "colors",
                    format!("expected two comma-separated colors, got {}", other.len()),
                ))
            }
        };
        let figsize = match self.figsize.as_slice() {
            [] => None,
            [w, h] => Some((*w, *h)),
            other => {
                return Err(Error::malformed(
                    "figsize",
                    format!("expected WIDTH,HEIGHT, got {} values", other.len()),
                ))
            }
        };
        Ok(BfPlotArgs {
            prior,
            ref_val: self.ref_val,
            colors,
            figsize,
            textsize: self.textsize,
            hist_kwargs: self.bins.map(|bins| HistKwargs {
                bins: Some(bins),
                alpha: None,
            }),
            plot_kwargs: Some(PlotKwargs {
                linewidth: self.linewidth,
                linestyle: self.linestyle.clone(),
                alpha: None,
            }),
            ax: None,
            backend: self.backend.clone(),
            backend_kwargs: Some(BackendKwargs {
                dpi: self.dpi,
                title: self.title.clone(),
                minify: Some(self.minify),
                ..Default::default()
            }),
            show: self.show.then_some(true),
        })
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_format, cli.verbose) {
        eprintln!("bfplot: {err}");
    }
    let format = cli.format;
    let code = match run(cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            print_error(format, &err);
            ExitCode::from_error(&err)
        }
    };
    process::exit(code.as_i32());
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plot(cmd) => cmd_plot(cli.format, cli.config, &cmd),
        Commands::Demo {
            output,
            seed,
            draws,
        } => cmd_demo(cli.format, output, seed, draws),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(cli.format, cli.config),
            ConfigAction::Validate { file } => cmd_config_validate(cli.format, file.or(cli.config)),
        },
        Commands::Backends => cmd_backends(cli.format, cli.config),
        Commands::Schema => emit(OutputFormat::Json, &report_schema(), String::new),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bfplot", &mut io::stdout());
            Ok(())
        }
    }
}

fn cmd_plot(format: OutputFormat, config: Option<PathBuf>, cmd: &PlotCmd) -> Result<()> {
    let snapshot = resolve_config(config.as_deref())?;
    let dataset = InferenceData::from_path(&cmd.data)?;
    let prior = cmd
        .prior_file
        .as_deref()
        .map(SampleArray::from_path)
        .transpose()?;
    let args = cmd.to_plot_args(prior)?;

    let plotter = BfPlotter::from_defaults(snapshot.config);
    let plot = plotter.plot(&dataset, &cmd.var_name, args)?;
    if let Some(path) = &cmd.output {
        write_document(path, &plot.axes.document)?;
    }

    let report = BfReport::new(&cmd.var_name, cmd.ref_val, &plot, cmd.output.clone());
    emit(format, &report, || report.to_text())
}

fn cmd_demo(format: OutputFormat, output: PathBuf, seed: u64, draws: usize) -> Result<()> {
    if draws == 0 {
        return Err(Error::InvalidDataset("--draws must be at least 1".to_string()));
    }
    let dataset = synthetic::demo_dataset(seed, draws);
    std::fs::write(&output, dataset.to_json_string()?)?;
    let summary = json!({
        "output": &output,
        "var_name": "a",
        "draws": draws,
        "seed": seed,
    });
    emit(format, &summary, || {
        format!("wrote {draws} draws per group to {}\n", output.display())
    })
}

fn cmd_config_show(format: OutputFormat, config: Option<PathBuf>) -> Result<()> {
    let snapshot = resolve_config(config.as_deref())?;
    emit(format, &snapshot, || config_text(&snapshot))
}

fn cmd_config_validate(format: OutputFormat, file: Option<PathBuf>) -> Result<()> {
    let snapshot = match file {
        Some(path) => {
            let config = load_file(&path)?;
            ConfigSnapshot::new(bf_config::ConfigSource::Explicit, Some(path), config)
        }
        None => resolve_config(None)?,
    };
    let summary = json!({
        "valid": true,
        "source": snapshot.source,
        "path": &snapshot.path,
    });
    emit(format, &summary, || match &snapshot.path {
        Some(path) => format!("{}: ok\n", path.display()),
        None => "built-in defaults: ok\n".to_string(),
    })
}

fn cmd_backends(format: OutputFormat, config: Option<PathBuf>) -> Result<()> {
    let snapshot = resolve_config(config.as_deref())?;
    let registry = RendererRegistry::with_builtins();
    let backends = registry.backends(PLOT_KIND);
    let summary = json!({
        "plot_kind": PLOT_KIND,
        "backends": &backends,
        "default": &snapshot.config.backend,
    });
    emit(format, &summary, || {
        let mut out = String::new();
        for name in &backends {
            let marker = if *name == snapshot.config.backend { " (default)" } else { "" };
            out.push_str(&format!("{name}{marker}\n"));
        }
        out
    })
}

fn config_text(snapshot: &ConfigSnapshot) -> String {
    let c = &snapshot.config;
    let path = snapshot
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let (w, h) = c.effective_figsize();
    format!(
        "source:   {:?}\npath:     {path}\nbackend:  {}\nshow:     {}\ncolors:   {}, {}\nfigsize:  {w} x {h} in\ndpi:      {}\ntextsize: {}\n",
        snapshot.source,
        c.backend,
        c.show,
        c.colors[0],
        c.colors[1],
        c.dpi,
        c.effective_textsize(),
    )
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
        OutputFormat::Text => write!(stdout, "{}", text())?,
    }
    Ok(())
}

fn print_error(format: OutputFormat, err: &Error) {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = std::error::Error::source(cause);
    }
    match format {
        OutputFormat::Json => {
            let body = json!({
                "error": {
                    "code": err.code(),
                    "message": err.to_string(),
                    "causes": causes,
                }
            });
            println!("{body}");
        }
        OutputFormat::Text => {
            eprintln!("bfplot: {err}");
            for cause in causes {
                eprintln!("  caused by: {cause}");
            }
        }
    }
}
