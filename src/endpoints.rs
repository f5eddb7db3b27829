//! Backend routes the dashboard talks to.

use crate::trimester::Trimester;

pub const GENERATE_PATH: &str = "/generate_schedule";
pub const DOWNLOAD_EXCEL_PATH: &str = "/download_excel";
pub const DOWNLOAD_JSON_PATH: &str = "/download_json";
pub const CHECK_PATH: &str = "/check";

/// Exported artifact kinds offered after a successful generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Excel,
    Json,
}

impl ArtifactKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Excel => DOWNLOAD_EXCEL_PATH,
            Self::Json => DOWNLOAD_JSON_PATH,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Json => "json",
        }
    }

    /// File name used when the server does not name the attachment.
    pub fn fallback_file_name(self, trimester: Trimester) -> String {
        format!("timetable_T{trimester}.{}", self.extension())
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excel => write!(f, "excel"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// URL builder rooted at the backend origin.
///
/// The browser uses an empty base so every URL stays relative to the page
/// origin; native callers pass the configured backend URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Endpoints relative to the current page origin.
    pub fn relative() -> Self {
        Self::default()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn generate(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base)
    }

    pub fn download(&self, kind: ArtifactKind, trimester: Trimester) -> String {
        format!("{}{}?trimester={trimester}", self.base, kind.path())
    }

    /// Join an arbitrary request path (with query) onto the base.
    pub fn join(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_urls_match_page_routes() {
        let ep = Endpoints::relative();
        assert_eq!(ep.generate(), "/generate_schedule");
        assert_eq!(
            ep.download(ArtifactKind::Excel, Trimester::Second),
            "/download_excel?trimester=2"
        );
        assert_eq!(
            ep.download(ArtifactKind::Json, Trimester::Third),
            "/download_json?trimester=3"
        );
    }

    #[test]
    fn absolute_base_drops_trailing_slash() {
        let ep = Endpoints::new("http://127.0.0.1:5000/");
        assert_eq!(ep.generate(), "http://127.0.0.1:5000/generate_schedule");
        assert_eq!(
            ep.join("/download_json?trimester=1"),
            "http://127.0.0.1:5000/download_json?trimester=1"
        );
    }

    #[test]
    fn fallback_names_carry_trimester() {
        assert_eq!(
            ArtifactKind::Excel.fallback_file_name(Trimester::First),
            "timetable_T1.xlsx"
        );
        assert_eq!(
            ArtifactKind::Json.fallback_file_name(Trimester::Third),
            "timetable_T3.json"
        );
    }
}
