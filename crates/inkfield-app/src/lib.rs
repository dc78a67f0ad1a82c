//! Inkfield Application
//!
//! Headless host shell: loads configuration, replays recorded sessions
//! through the interaction engine and reports the result.

mod session;
mod shortcuts;

pub use session::{Session, SessionError, SessionEvent, SessionSummary, WidthSetting};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};

use inkfield_core::{ConfigError, EngineConfig, InteractionEngine};
use std::path::Path;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Load an optional configuration, replay a session file and summarize.
pub fn run(config: Option<&Path>, session: &Path) -> Result<SessionSummary, AppError> {
    let config = match config {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    let session = Session::load(session)?;
    let mut engine = InteractionEngine::with_config(config)?;
    Ok(session.replay(&mut engine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_run_with_config() {
        let config = temp_json(r#"{ "max_scale": 1.5 }"#);
        let session = temp_json(
            r#"[
                { "type": "wheel", "x": 0, "y": 0, "delta_y": -1 },
                { "type": "wheel", "x": 0, "y": 0, "delta_y": -1 },
                { "type": "wheel", "x": 0, "y": 0, "delta_y": -1 },
                { "type": "wheel", "x": 0, "y": 0, "delta_y": -1 },
                { "type": "wheel", "x": 0, "y": 0, "delta_y": -1 },
                { "type": "wheel", "x": 0, "y": 0, "delta_y": -1 }
            ]"#,
        );

        let summary = run(Some(config.path()), session.path()).unwrap();
        assert!(summary.scale <= 1.5);
        assert!(summary.scale * 1.1 > 1.5);
    }

    #[test]
    fn test_run_reports_bad_config() {
        let config = temp_json(r#"{ "zoom_step": 0.5 }"#);
        let session = temp_json("[]");
        let err = run(Some(config.path()), session.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_run_reports_missing_session() {
        let session = temp_json("[]");
        let missing = session.path().with_extension("missing");
        let err = run(None, &missing).unwrap_err();
        assert!(matches!(err, AppError::Session(SessionError::Io(_))));
    }
}
