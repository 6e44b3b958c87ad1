//! Core journal type definitions.
//!
//! Defines [`JournalRoot`] (where an entry lives), [`Section`] (the named
//! parts of an entry), and the [`Sections`] / [`EntryMetadata`] inputs to a
//! write.

use serde::{Deserialize, Serialize};

/// The two logical storage roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalRoot {
    /// `<project-dir>/.private-journal` — notes about the current codebase.
    Project,
    /// The user-global journal, local or inside a synced vault.
    User,
}

impl JournalRoot {
    pub const ALL: [JournalRoot; 2] = [JournalRoot::Project, JournalRoot::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for JournalRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JournalRoot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Self::Project),
            "user" => Ok(Self::User),
            _ => Err(format!("unknown journal type: {s}")),
        }
    }
}

/// Parse a root filter where `"both"` (or nothing) means no filter.
pub fn parse_root_filter(value: Option<&str>) -> Result<Option<JournalRoot>, String> {
    match value {
        None | Some("both") | Some("") => Ok(None),
        Some(other) => other.parse().map(Some),
    }
}

/// A named part of an entry, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Feelings,
    ProjectNotes,
    UserContext,
    TechnicalInsights,
    WorldKnowledge,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Feelings,
        Section::ProjectNotes,
        Section::UserContext,
        Section::TechnicalInsights,
        Section::WorldKnowledge,
    ];

    /// Header text as written in the markdown.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Feelings => "Feelings",
            Self::ProjectNotes => "Project Notes",
            Self::UserContext => "User Context",
            Self::TechnicalInsights => "Technical Insights",
            Self::WorldKnowledge => "World Knowledge",
        }
    }

    /// Frontmatter tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Feelings => "feelings",
            Self::ProjectNotes => "project-notes",
            Self::UserContext => "user-context",
            Self::TechnicalInsights => "technical-insights",
            Self::WorldKnowledge => "world-knowledge",
        }
    }

    /// Project notes belong to the project journal; everything else is personal.
    pub fn root(&self) -> JournalRoot {
        match self {
            Self::ProjectNotes => JournalRoot::Project,
            _ => JournalRoot::User,
        }
    }
}

/// Section contents for one write. Blank contents count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub feelings: Option<String>,
    pub project_notes: Option<String>,
    pub user_context: Option<String>,
    pub technical_insights: Option<String>,
    pub world_knowledge: Option<String>,
}

impl Sections {
    pub fn get(&self, section: Section) -> Option<&str> {
        let value = match section {
            Section::Feelings => &self.feelings,
            Section::ProjectNotes => &self.project_notes,
            Section::UserContext => &self.user_context,
            Section::TechnicalInsights => &self.technical_insights,
            Section::WorldKnowledge => &self.world_knowledge,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Present sections in declaration order.
    pub fn present(&self) -> Vec<(Section, &str)> {
        Section::ALL
            .iter()
            .filter_map(|&s| self.get(s).map(|content| (s, content)))
            .collect()
    }

    /// Present sections destined for `root`, in declaration order.
    pub fn for_root(&self, root: JournalRoot) -> Vec<(Section, &str)> {
        self.present()
            .into_iter()
            .filter(|(s, _)| s.root() == root)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}

/// Optional provenance recorded in the frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub project: Option<String>,
    pub agent: Option<String>,
}
