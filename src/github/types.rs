use serde::Deserialize;

/// Represents a repository in an organization listing
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Repository {
    pub name: String,
}

/// Represents a GitHub release as returned by the releases endpoint
#[derive(Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: String,
}
