use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scoperec",
    version,
    about = "Capture and convert scope recordings from a serial link",
    long_about = "Watches a board's serial output for begin/end-delimited scope \
                  recordings, decodes the hex-encoded samples and restores their \
                  chronological order from the device-side ring buffer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Watch a serial port and capture recordings as they arrive
    Monitor(MonitorArgs),
    /// Convert a captured record file to CSV or JSON
    Convert(ConvertArgs),
    /// List captured record files in chronological order
    List(ListArgs),
}

#[derive(Args)]
pub struct MonitorArgs {
    /// Serial port to open (e.g. /dev/ttyACM0)
    #[arg(long)]
    pub port: String,

    /// Baud rate
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Directory record files are written to
    #[arg(long, env = "SCOPEREC_RECORDS_DIR", default_value = "records")]
    pub records_dir: String,

    /// Keep the raw record file only, skip CSV export
    #[arg(long, default_value_t = false)]
    pub raw_only: bool,

    /// Do not echo received text to stdout
    #[arg(long, default_value_t = false)]
    pub no_echo: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Captured record file (.txt)
    #[arg(long)]
    pub file: String,

    /// Output CSV path (default: input with .csv extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the reassembled table as JSON instead of writing CSV
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Directory to scan for record files
    #[arg(long, env = "SCOPEREC_RECORDS_DIR", default_value = "records")]
    pub records_dir: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
