use std::{ffi::OsString, path::PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use iconkit::{
    data::DEFAULT_ASSETS_DIR,
    icon::{Padding, TargetSize},
    inspect::DEFAULT_SUBJECT,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Center and inspect app icon assets
pub(crate) struct Args {
    #[arg(short, long, env = "ICONKIT_ASSETS_DIR", default_value = DEFAULT_ASSETS_DIR)]
    /// Directory holding the icon assets
    pub(crate) assets_dir: PathBuf,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Center icon.png onto itself and derive adaptive-icon.png from it (default)
    Center {
        #[arg(long, env = "ICONKIT_SIZE", default_value_t = TargetSize::default())]
        /// Output canvas size, WIDTHxHEIGHT or a single side length
        size: TargetSize,

        #[arg(long, env = "ICONKIT_PADDING", default_value_t = Padding::default())]
        /// Fraction of each edge kept empty, in [0, 0.5)
        padding: Padding,
    },
    /// Print size, center pixel and bounding box of an asset
    CheckImage {
        #[arg(default_value = DEFAULT_SUBJECT)]
        name: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Print the average visible color and first visible pixel of an asset
    CheckColor {
        #[arg(default_value = DEFAULT_SUBJECT)]
        name: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

/// Parsed command line with the subcommand resolved.
#[derive(Debug)]
pub(crate) struct Invocation {
    pub(crate) assets_dir: PathBuf,
    pub(crate) command: Command,
}

impl Args {
    /// Parse `argv`, running `center` when no subcommand is given so its
    /// flags and environment fallbacks still apply.
    pub(crate) fn try_parse_invocation<I, T>(argv: I) -> Result<Invocation, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let args = match Args::try_parse_from(argv.iter().cloned())? {
            Args { command: None, .. } => {
                Args::try_parse_from(argv.into_iter().chain([OsString::from("center")]))?
            }
            args => args,
        };
        let Some(command) = args.command else {
            return Err(Args::command().error(ErrorKind::MissingSubcommand, "no command to run"));
        };
        Ok(Invocation {
            assets_dir: args.assets_dir,
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_settings(argv: &[&str]) -> (TargetSize, Padding) {
        match Args::try_parse_invocation(argv.iter().copied()).unwrap().command {
            Command::Center { size, padding } => (size, padding),
            other => panic!("expected center, got {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_centers_with_env_settings() {
        // one test so the environment changes don't race
        std::env::remove_var("ICONKIT_SIZE");
        std::env::remove_var("ICONKIT_PADDING");
        assert_eq!(
            center_settings(&["iconkit", "-a", "assets"]),
            (TargetSize::default(), Padding::default())
        );
        assert_eq!(
            center_settings(&["iconkit", "center", "--padding", "0.1", "--size", "512"]),
            (TargetSize::square(512).unwrap(), Padding::new(0.1).unwrap())
        );

        std::env::set_var("ICONKIT_PADDING", "0.4");
        std::env::set_var("ICONKIT_SIZE", "256x128");
        let expected = (TargetSize::new(256, 128).unwrap(), Padding::new(0.4).unwrap());
        assert_eq!(center_settings(&["iconkit", "-a", "assets"]), expected);
        assert_eq!(center_settings(&["iconkit", "center"]), expected);
        std::env::remove_var("ICONKIT_SIZE");
        std::env::remove_var("ICONKIT_PADDING");
    }

    #[test]
    fn parses_inspection_commands() {
        let invocation =
            Args::try_parse_invocation(["iconkit", "--assets-dir", "art", "check-color", "--json"])
                .unwrap();
        assert_eq!(invocation.assets_dir, PathBuf::from("art"));
        assert!(matches!(
            invocation.command,
            Command::CheckColor { json: true, ref name } if name == &PathBuf::from(DEFAULT_SUBJECT)
        ));
    }

    #[test]
    fn rejects_half_padding() {
        let err = Args::try_parse_invocation(["iconkit", "center", "--padding", "0.5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
