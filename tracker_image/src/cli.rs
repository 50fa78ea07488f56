use std::{io, path::Path};

use clap::Parser;
use constcat::concat;
use log::{debug, warn};

use crate::{
    builder::{BuildArgs, Builder, DockerBuilder},
    config::{
        self, BuildConfig, DEFAULT_RUN_AS_USER, DEFAULT_USER_UID, RUN_AS_USER_VAR, USER_UID_VAR,
    },
    process, version, Result,
};

pub const IMAGE_TAG: &str = "torrust-tracker";
pub const BUILD_CONTEXT: &str = ".";
const ANNOUNCEMENT: &str = "Building docker image ...";

const ENVIRONMENT_HELP: &str = concat!(
    "Environment:\n  ",
    USER_UID_VAR,
    "     User id passed as the `",
    config::USER_UID_BUILD_ARG,
    "` build argument [default: ",
    DEFAULT_USER_UID,
    "]\n  ",
    RUN_AS_USER_VAR,
    "  Username passed as the `",
    config::RUN_AS_USER_BUILD_ARG,
    "` build argument [default: ",
    DEFAULT_RUN_AS_USER,
    "]",
);

/// Builds the tracker container image from the current directory with `docker build`.
///
/// Exits with the exit code of `docker build`.
#[derive(Debug, Parser)]
#[command(version = version::VERSION, about, after_help = ENVIRONMENT_HELP)]
pub struct Cli {}

impl Cli {
    pub fn run(self) -> Result<u8> {
        debug!("tracker-image {version}", version = version::VERSION);

        // The terminal delivers SIGINT to docker as well. Outlive it so its exit code is ours.
        ctrlc::set_handler(|| debug!("interrupted, waiting for the build to exit"))?;

        invoke(
            &BuildConfig::from_env(),
            &DockerBuilder::default(),
            &mut io::stdout().lock(),
        )
    }
}

/// The exit code for an error returned by [`Cli::run`].
pub fn exit_code(error: &(dyn std::error::Error + Send + Sync + 'static)) -> u8 {
    error
        .downcast_ref::<process::Error>()
        .map_or(1, process::Error::exit_code)
}

fn status_lines(config: &BuildConfig) -> [String; 3] {
    [
        ANNOUNCEMENT.to_owned(),
        format!(
            "{USER_UID_VAR}: {value}",
            value = config.user_uid.to_string_lossy()
        ),
        format!(
            "{RUN_AS_USER_VAR}: {value}",
            value = config.run_as_user.to_string_lossy()
        ),
    ]
}

fn print_status_lines(config: &BuildConfig, out: &mut impl io::Write) -> io::Result<()> {
    for line in status_lines(config) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Prints the status lines to `out` and runs the build once, returning the exit code of the build
/// tool. Failing to print does not prevent the build.
fn invoke(config: &BuildConfig, builder: &dyn Builder, out: &mut impl io::Write) -> Result<u8> {
    if let Err(error) = print_status_lines(config, out) {
        warn!("unable to print status: {error}");
    }

    let build_args = config.build_args();
    let output = builder.build(BuildArgs {
        build_args: &build_args,
        tag: IMAGE_TAG,
        context: Path::new(BUILD_CONTEXT),
    })?;

    Ok(output.exit_code)
}
