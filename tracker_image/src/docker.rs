use std::{
    ffi::{OsStr, OsString},
    path::Path,
};

use crate::process;

pub const PROGRAM: &str = "docker";

pub struct BuildArgs<'a> {
    /// Pairs of build-time variable names and values, passed as `--build-arg NAME=VALUE`.
    pub build_args: &'a [(&'a str, &'a OsStr)],
    pub tag: &'a str,
    pub context: &'a Path,
}

fn build_arg(name: &str, value: &OsStr) -> OsString {
    let mut arg = OsString::with_capacity(name.len() + 1 + value.len());
    arg.push(name);
    arg.push("=");
    arg.push(value);
    arg
}

/// Constructs `<program> build [--build-arg NAME=VALUE]... -t TAG CONTEXT` where `program` is
/// normally [`PROGRAM`].
/// See https://docs.docker.com/reference/cli/docker/buildx/build/.
pub fn build_command(program: &OsStr, args: &BuildArgs) -> process::Command {
    let mut command = process::command!(program, "build");
    for &(name, value) in args.build_args {
        command = process::args!(command, "--build-arg", build_arg(name, value));
    }
    process::args!(command, "-t", args.tag, args.context)
}

pub fn build(program: &OsStr, args: &BuildArgs) -> process::Result<process::ExitStatus> {
    build_command(program, args).try_status()
}
