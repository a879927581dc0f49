//! Views of the operations console and their route declarations.

use serde::{Deserialize, Serialize};

/// Top-level views the console can show. The rendering itself lives in the
/// UI crate; the session layer only needs their paths and access flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsoleView {
    Login,
    Device,
    Inspect,
    Topology,
    Report,
    Monitor,
    Alert,
    ReportExport,
}

impl ConsoleView {
    pub const ALL: [Self; 8] = [
        Self::Login,
        Self::Device,
        Self::Inspect,
        Self::Topology,
        Self::Report,
        Self::Monitor,
        Self::Alert,
        Self::ReportExport,
    ];

    /// Default route path. The login path can be overridden by config.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Device => "/device",
            Self::Inspect => "/inspect",
            Self::Topology => "/topology",
            Self::Report => "/report",
            Self::Monitor => "/monitor",
            Self::Alert => "/alert",
            Self::ReportExport => "/report-export",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Device => "Device management",
            Self::Inspect => "Inspection",
            Self::Topology => "Topology",
            Self::Report => "Reports",
            Self::Monitor => "Monitoring",
            Self::Alert => "Alert rules",
            Self::ReportExport => "Report export",
        }
    }

    /// Everything except the login view needs a session.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login)
    }
}
