mod docker;

pub use docker::*;

pub use crate::docker::BuildArgs;
use crate::Result;

pub struct BuildOutput {
    /// The exit code of the build tool, to be reported as our own.
    pub exit_code: u8,
}

pub trait Builder {
    fn build(&self, args: BuildArgs) -> Result<BuildOutput>;
}
