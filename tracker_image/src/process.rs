use std::{ffi::OsStr, fmt, io, process};

use log::debug;

pub struct Command(process::Command);

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Command {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self(process::Command::new(program))
    }

    pub fn args<'a, I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = &'a OsStr>,
    {
        self.0.args(args);
        self
    }

    pub fn get_program(&self) -> &OsStr {
        self.0.get_program()
    }

    pub fn get_args(&self) -> process::CommandArgs<'_> {
        self.0.get_args()
    }

    /// Runs the command to completion with inherited stdio. A non-zero exit status is not an
    /// error, inspect the returned [`ExitStatus`] instead.
    pub fn try_status(mut self) -> Result<ExitStatus, Error> {
        if log::log_enabled!(log::Level::Debug) {
            debug!("running `{command:?}`...", command = &self.0);
        }

        match self.0.status() {
            Ok(status) => Ok(ExitStatus {
                command: self,
                status,
            }),
            Err(error) => Err(Error {
                command: self,
                kind: error.into(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct ExitStatus {
    command: Command,
    status: process::ExitStatus,
}

impl ExitStatus {
    /// The exit code a shell would report for this status: the child's own exit code, or
    /// `128 + N` when it was terminated by signal `N`.
    pub fn code(&self) -> u8 {
        if let Some(code) = self.status.code() {
            return u8::try_from(code).unwrap_or(1);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;

            if let Some(signal) = self.status.signal() {
                return u8::try_from(128 + signal).unwrap_or(u8::MAX);
            }
        }

        1
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{command:?}` {status}",
            command = &self.command.0,
            status = self.status
        )
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Other(io::Error),
}

impl From<io::Error> for ErrorKind {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::Other(value),
        }
    }
}

#[derive(Debug)]
pub struct Error {
    pub command: Command,
    pub kind: ErrorKind,
}

impl Error {
    /// Exit codes follow the shell: 127 for a missing program, 126 for one that can not be
    /// executed.
    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::NotFound => 127,
            ErrorKind::PermissionDenied => 126,
            ErrorKind::Other(_) => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to run `{command:?}`: ",
            command = &self.command.0
        )?;
        let program = self.command.get_program().to_string_lossy();
        match &self.kind {
            ErrorKind::NotFound => {
                write!(f, "the `{program}` command is required but not available on your system, please install it")
            }
            ErrorKind::PermissionDenied => {
                write!(f, "the `{program}` command is available but does not have the right permissions, please make sure the binary is executable")
            }
            ErrorKind::Other(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Other(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Creates a new [`Command`] and supplies the provided arguments, if any, while calling
/// [`std::convert::AsRef::as_ref`] on each.
macro_rules! command {
    ($program:expr, $($arg:expr),* $(,)?) => {
        $crate::process::args!($crate::process::Command::new($program), $($arg,)*)
    };
}

/// Calls [`Command::args`] on the provided [`Command`] while calling [`std::convert::AsRef::as_ref`]
/// on each argument.
macro_rules! args {
    ($program:expr, $($arg:expr),+ $(,)?) => {
        $program.args([
            $(($arg).as_ref(),)*
        ])
    }
}

pub(crate) use args;
pub(crate) use command;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_propagated() {
        let status = command!("sh", "-c", "exit 3").try_status().unwrap();
        assert_eq!(status.code(), 3);

        let status = command!("sh", "-c", "exit 0").try_status().unwrap();
        assert_eq!(status.code(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_maps_to_shell_exit_code() {
        let status = command!("sh", "-c", "kill -TERM $$").try_status().unwrap();
        assert_eq!(status.code(), 128 + 15);
    }

    #[test]
    fn test_missing_program() {
        let error = command!("tracker-image-test-no-such-program", "build")
            .try_status()
            .unwrap_err();
        assert!(matches!(error.kind, ErrorKind::NotFound));
        assert_eq!(error.exit_code(), 127);

        let message = error.to_string();
        assert!(message.contains(
            "the `tracker-image-test-no-such-program` command is required but not available"
        ));
    }

    #[test]
    fn test_io_error_kind() {
        let kind = ErrorKind::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(kind, ErrorKind::PermissionDenied));

        let kind = ErrorKind::from(io::Error::from(io::ErrorKind::Interrupted));
        assert!(matches!(kind, ErrorKind::Other(_)));
        let error = Error {
            command: Command::new("docker"),
            kind,
        };
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_args_macro() {
        let command = command!("docker", "build", String::from("."));
        assert_eq!(command.get_program(), "docker");
        assert_eq!(command.get_args().collect::<Vec<_>>(), ["build", "."]);
    }
}
