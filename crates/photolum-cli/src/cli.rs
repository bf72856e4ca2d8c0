use clap::{Args, Parser, Subcommand, ValueEnum};
use photolum::core::math::kernels::Kernel;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "photolum - photoluminescence lineshapes of point defects from Huang-Rhys theory and the generating-function method.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the luminescence lineshape for one zero-phonon line and damping.
    Spectrum(SpectrumArgs),
    /// Run the lineshape calculation over a grid of zero-phonon lines and dampings.
    Sweep(SweepArgs),
}

/// Options shared by every calculation command.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    // --- Inputs and outputs ---
    /// Ground-state structure in POSCAR/CONTCAR format [default: CONTCAR_GS].
    #[arg(short, long, value_name = "PATH")]
    pub ground: Option<PathBuf>,

    /// Excited-state structure in POSCAR/CONTCAR format [default: CONTCAR_ES].
    #[arg(short, long, value_name = "PATH")]
    pub excited: Option<PathBuf>,

    /// Ground-state phonons in phonopy band.yaml format [default: band.yaml].
    #[arg(short, long, value_name = "PATH")]
    pub phonons: Option<PathBuf>,

    /// Directory that receives the CSV tables [default: photolum-output].
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Spectrum overrides ---
    /// Time-domain extent in fs; sets the energy resolution [default: 2000].
    #[arg(short = 't', long = "t-max", value_name = "FS")]
    pub t_max: Option<f64>,

    /// Broadening kernel for the phonon spectral function.
    #[arg(short, long, value_enum, value_name = "KERNEL")]
    pub kernel: Option<KernelArg>,

    /// Broadening width in meV [default: 6].
    #[arg(short, long, value_name = "MEV")]
    pub sigma: Option<f64>,

    /// Use every listed phonon mode instead of the distinct first half.
    #[arg(long)]
    pub all_modes: bool,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S window.below-zpl=400
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `spectrum` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SpectrumArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Zero-phonon line in meV [default: 1945].
    #[arg(short = 'z', long, value_name = "MEV")]
    pub zpl: Option<f64>,

    /// Homogeneous damping in meV [default: 4].
    #[arg(short = 'y', long, value_name = "MEV")]
    pub gamma: Option<f64>,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Zero-phonon lines in meV, comma separated.
    #[arg(short = 'z', long, value_name = "MEV,...", value_delimiter = ',')]
    pub zpl: Vec<f64>,

    /// Dampings in meV, comma separated.
    #[arg(short = 'y', long, value_name = "MEV,...", value_delimiter = ',')]
    pub gamma: Vec<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelArg {
    Gaussian,
    Lorentzian,
}

impl From<KernelArg> for Kernel {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Gaussian => Kernel::Gaussian,
            KernelArg::Lorentzian => Kernel::Lorentzian,
        }
    }
}
