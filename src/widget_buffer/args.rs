use clap::{Parser, Subcommand};
use std::path::PathBuf;
use widget_buffer::model::{LayoutId, DEFAULT_STATE_ID};

/// Returns the version string, with the git hash appended for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "wbuf", bin_name = "wbuf", version = get_version())]
#[command(about = "Copy and paste dashboard widgets between dashboard files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Buffer directory (defaults to $WBUF_HOME, then the user data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy a widget into the buffer
    #[command(alias = "c")]
    Copy {
        /// Dashboard JSON file holding the widget
        dashboard: PathBuf,

        /// Id of the widget to copy
        #[arg(short, long)]
        widget: String,

        /// State the widget is shown in
        #[arg(short, long, default_value = DEFAULT_STATE_ID)]
        state: String,

        /// Layout of that state (main or right)
        #[arg(short, long, default_value = "main")]
        layout: LayoutId,

        /// Copy a reference to the widget instead of the widget itself
        #[arg(short, long)]
        reference: bool,
    },

    /// Paste the buffered widget into a dashboard
    #[command(alias = "p")]
    Paste {
        /// Dashboard JSON file to paste into
        dashboard: PathBuf,

        /// Target state
        #[arg(short, long, default_value = DEFAULT_STATE_ID)]
        state: String,

        /// Target layout (main or right)
        #[arg(short, long, default_value = "main")]
        layout: LayoutId,

        /// Target row; auto-placed when omitted or negative
        #[arg(long, requires = "col", allow_negative_numbers = true)]
        row: Option<i32>,

        /// Target column; auto-placed when omitted or negative
        #[arg(long, requires = "row", allow_negative_numbers = true)]
        col: Option<i32>,

        /// Paste the buffered reference instead of the buffered widget
        #[arg(short, long)]
        reference: bool,

        /// Write the updated dashboard here instead of overwriting the input
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show what the buffer holds
    #[command(alias = "st")]
    Status {
        /// Dashboard JSON file to check reference eligibility against
        dashboard: Option<PathBuf>,

        /// State to check
        #[arg(short, long, default_value = DEFAULT_STATE_ID)]
        state: String,

        /// Layout to check
        #[arg(short, long, default_value = "main")]
        layout: LayoutId,
    },

    /// Empty the buffer
    Clear {
        /// Clear the reference slot instead of the widget slot
        #[arg(short, long, conflicts_with = "all")]
        reference: bool,

        /// Clear both slots
        #[arg(short, long)]
        all: bool,
    },
}
