//! Studio settings, read from a TOML file.
//!
//! Every setting has a default, so a missing file or a file with only some of the
//! keys is valid. For example:
//!
//! ```toml
//! tolerance = 16
//! stroke_width = 6
//! stroke_color = "#222"
//! ```
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::brush::{self, Brush};
use crate::coloring::DEFAULT_HISTORY_LIMIT;
use crate::gfx::color::DEFAULT_TOLERANCE;
use crate::gfx::pixels::MAX_DIMENSION;
use crate::gfx::prelude::{ParseError, Rgba8, Size};

/// Name of the settings file inside the configuration directory.
pub const FILE_NAME: &str = "config.toml";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("'{path}': {err}")]
    Io { path: PathBuf, err: io::Error },
    #[error("'{path}': {err}")]
    Syntax { path: PathBuf, err: toml::de::Error },
    #[error("'{path}': `{key}`: {reason}")]
    InvalidValue {
        path: PathBuf,
        key: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Per-channel tolerance used by fills.
    pub tolerance: u8,
    /// Sketch brush diameter, in pixels.
    pub stroke_width: u32,
    /// Sketch brush color, as a hex code.
    pub stroke_color: String,
    /// Initial width of the drawing surfaces.
    pub surface_width: u32,
    /// Initial height of the drawing surfaces.
    pub surface_height: u32,
    /// Number of snapshots kept for undo on the coloring surface.
    pub history_limit: usize,
    /// Log level, eg. `info` or `debug`.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            stroke_width: 4,
            stroke_color: String::from("#000000"),
            surface_width: 512,
            surface_height: 512,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log: String::from("info"),
        }
    }
}

impl Settings {
    /// Load settings from the given file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| Error::Io {
            path: path.to_path_buf(),
            err,
        })?;
        let settings: Settings = toml::from_str(&text).map_err(|err| Error::Syntax {
            path: path.to_path_buf(),
            err,
        })?;

        settings
            .validate()
            .map_err(|(key, reason)| Error::InvalidValue {
                path: path.to_path_buf(),
                key,
                reason,
            })?;
        debug!("settings: loaded {}", path.display());

        Ok(settings)
    }

    /// Load settings from the given file, falling back to the defaults if it
    /// doesn't exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        match Self::load(path) {
            Err(Error::Io { err, .. }) if err.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Check values that can't be expressed in the types alone. Returns the offending
    /// key and the reason it was rejected.
    fn validate(&self) -> Result<(), (&'static str, String)> {
        if let Err(err) = self.stroke_color() {
            return Err(("stroke_color", err.to_string()));
        }
        if !(1..=brush::MAX_SIZE).contains(&self.stroke_width) {
            return Err((
                "stroke_width",
                format!("must be between 1 and {}", brush::MAX_SIZE),
            ));
        }
        for (key, value) in [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
        ] {
            if !(1..=MAX_DIMENSION).contains(&value) {
                return Err((key, format!("must be between 1 and {}", MAX_DIMENSION)));
            }
        }
        Ok(())
    }

    pub fn stroke_color(&self) -> Result<Rgba8, ParseError> {
        self.stroke_color.parse()
    }

    pub fn surface_size(&self) -> Size<u32> {
        Size::new(self.surface_width, self.surface_height)
    }

    /// The sketch brush described by these settings.
    pub fn brush(&self) -> Result<Brush, ParseError> {
        Ok(Brush::new(self.stroke_width, self.stroke_color()?))
    }

    /// The configured log level. Unknown levels fall back to `info`.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_partial() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);
        fs::write(&path, "tolerance = 16\nstroke_color = \"#222\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.tolerance, 16);
        assert_eq!(settings.stroke_color(), Ok(Rgba8::new(0x22, 0x22, 0x22, 0xff)));
        assert_eq!(settings.surface_size(), Size::new(512, 512));
        assert_eq!(settings.brush().unwrap().size, 4);
    }

    #[test]
    fn test_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);

        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
        assert!(matches!(Settings::load(&path), Err(Error::Io { .. })));
    }

    #[test]
    fn test_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);

        fs::write(&path, "tolerance = 300\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Syntax { .. })));

        fs::write(&path, "colour = \"red\"\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Syntax { .. })));

        fs::write(&path, "stroke_color = \"black\"\n").unwrap();
        assert!(matches!(
            Settings::load_or_default(&path),
            Err(Error::InvalidValue { key: "stroke_color", .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);

        for (text, expected) in [
            ("stroke_width = 100000\n", "stroke_width"),
            ("stroke_width = 0\n", "stroke_width"),
            ("surface_width = 0\n", "surface_width"),
            ("surface_height = 65537\n", "surface_height"),
        ] {
            fs::write(&path, text).unwrap();

            match Settings::load(&path) {
                Err(Error::InvalidValue { key, .. }) => assert_eq!(key, expected, "{}", text),
                other => panic!("{}: unexpected result {:?}", text, other),
            }
        }

        fs::write(&path, "stroke_width = 256\nsurface_width = 16384\n").unwrap();
        assert!(Settings::load(&path).is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_level(), log::LevelFilter::Info);

        settings.log = String::from("debug");
        assert_eq!(settings.log_level(), log::LevelFilter::Debug);

        settings.log = String::from("loud");
        assert_eq!(settings.log_level(), log::LevelFilter::Info);
    }
}
