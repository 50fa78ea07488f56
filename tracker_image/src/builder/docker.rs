use std::ffi::OsString;

use log::debug;

use super::{BuildArgs, BuildOutput, Builder};
use crate::{docker, Result};

/// Builds with the docker command line, `docker` from `PATH` unless another program is given.
pub struct DockerBuilder {
    program: OsString,
}

impl DockerBuilder {
    pub fn with_program<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DockerBuilder {
    fn default() -> Self {
        Self::with_program(docker::PROGRAM)
    }
}

impl Builder for DockerBuilder {
    fn build(&self, args: BuildArgs) -> Result<BuildOutput> {
        let status = docker::build(&self.program, &args)?;
        debug!("{status}");
        Ok(BuildOutput {
            exit_code: status.code(),
        })
    }
}
