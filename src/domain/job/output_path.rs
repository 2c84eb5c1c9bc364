//! Deterministic output path derivation

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::domain::audio::{SourceFilename, TargetFormat};
use crate::domain::project::ProjectLabel;

/// strftime pattern for the timestamp prefix (second resolution)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Library-relative location of a converted file:
/// `<project>/<timestamp>_<base>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputPath {
    project: ProjectLabel,
    file_name: String,
}

impl OutputPath {
    /// Derive the output location for a submission.
    /// Same inputs always yield the same path.
    pub fn derive<Tz: TimeZone>(
        project: &ProjectLabel,
        source: &SourceFilename,
        target: TargetFormat,
        submitted_at: &DateTime<Tz>,
    ) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let stamp = submitted_at.format(TIMESTAMP_FORMAT);
        Self {
            project: project.clone(),
            file_name: format!("{}_{}.{}", stamp, source.base_name(), target.extension()),
        }
    }

    pub fn project(&self) -> &ProjectLabel {
        &self.project
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path relative to the library root
    pub fn relative(&self) -> PathBuf {
        Path::new(self.project.as_str()).join(&self.file_name)
    }

    /// Absolute path under the given library root
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(self.relative())
    }
}

impl fmt::Display for OutputPath {
    /// Always `/`-separated, as reported to HTTP clients
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    fn fixed_time(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, secs).unwrap()
    }

    fn inputs() -> (ProjectLabel, SourceFilename) {
        (
            ProjectLabel::parse("kitabo").unwrap(),
            SourceFilename::parse("i-lose-my-cool.m4a").unwrap(),
        )
    }

    #[test]
    fn derives_expected_layout() {
        let (project, source) = inputs();
        let path = OutputPath::derive(&project, &source, TargetFormat::Mp3, &fixed_time(7));
        assert_eq!(path.to_string(), "kitabo/20261019-140507_i-lose-my-cool.mp3");
        assert_eq!(path.file_name(), "20261019-140507_i-lose-my-cool.mp3");
        assert_eq!(path.project().as_str(), "kitabo");
    }

    #[test]
    fn derivation_is_deterministic() {
        let (project, source) = inputs();
        let a = OutputPath::derive(&project, &source, TargetFormat::Mp3, &fixed_time(7));
        let b = OutputPath::derive(&project, &source, TargetFormat::Mp3, &fixed_time(7));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_timestamps_do_not_collide() {
        let (project, source) = inputs();
        let a = OutputPath::derive(&project, &source, TargetFormat::Mp3, &fixed_time(7));
        let b = OutputPath::derive(&project, &source, TargetFormat::Mp3, &fixed_time(8));
        assert_ne!(a, b);
    }

    #[test]
    fn target_extension_is_used() {
        let (project, source) = inputs();
        let path = OutputPath::derive(&project, &source, TargetFormat::Flac, &fixed_time(0));
        assert!(path.file_name().ends_with(".flac"));
    }

    #[test]
    fn resolve_joins_root() {
        let (project, source) = inputs();
        let path = OutputPath::derive(&project, &source, TargetFormat::Mp3, &fixed_time(7));
        let abs = path.resolve(Path::new("/srv/audio"));
        assert_eq!(
            abs,
            PathBuf::from("/srv/audio/kitabo/20261019-140507_i-lose-my-cool.mp3")
        );
    }

    #[test]
    fn local_time_is_accepted() {
        let (project, source) = inputs();
        let path = OutputPath::derive(&project, &source, TargetFormat::Mp3, &Local::now());
        assert!(path.file_name().ends_with("_i-lose-my-cool.mp3"));
    }
}
