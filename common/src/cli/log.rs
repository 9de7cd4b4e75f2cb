use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

#[derive(Clone, Debug, clap::Args)]
#[command(next_help_heading = "Logging")]
pub struct Logging {
    /// Be quiet. Conflicts with 'verbose'.
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Be more verbose. May be repeated multiple times to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Add timestamps to the output messages
    #[arg(long, global = true)]
    pub log_timestamps: bool,

    /// Provide a RUST_LOG filter, conflicts with --verbose and --quiet
    #[arg(long, global = true, conflicts_with_all(["verbose", "quiet"]), env("RUST_LOG"))]
    pub log: Option<String>,
}

impl Logging {
    /// Initialize the global logger.
    ///
    /// Verbosity raises the level of `app_modules` (and this crate) before raising the level of
    /// everything else.
    pub fn init(self, app_modules: &[&'static str]) {
        let mut builder = Builder::new();

        if let Some(filter) = &self.log {
            builder.parse_filters(filter);
            builder.init();
            return;
        }

        if !self.log_timestamps {
            builder.format(|buf, record| writeln!(buf, "{}", record.args()));
        }

        let (global, app) = levels(self.quiet, self.verbose);
        builder.filter_level(global);

        if let Some(app) = app {
            builder.filter_module("nexpose_common", app);
            for module in app_modules {
                builder.filter_module(module, app);
            }
        }

        builder.init();
    }
}

/// Global level and, if different, the level for application modules.
fn levels(quiet: bool, verbose: u8) -> (LevelFilter, Option<LevelFilter>) {
    if quiet {
        return (LevelFilter::Off, None);
    }

    match verbose {
        0 => (LevelFilter::Warn, None),
        1 => (LevelFilter::Warn, Some(LevelFilter::Info)),
        2 => (LevelFilter::Warn, Some(LevelFilter::Debug)),
        3 => (LevelFilter::Info, Some(LevelFilter::Debug)),
        4 => (LevelFilter::Debug, None),
        5 => (LevelFilter::Debug, Some(LevelFilter::Trace)),
        _ => (LevelFilter::Trace, None),
    }
}
