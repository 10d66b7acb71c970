//! Embedded template assets.

/// Container build recipe copied into projects that lack one
pub const DOCKERFILE: &str = include_str!("../../templates/Dockerfile");

/// Ignore list copied next to the Dockerfile
pub const DOCKERIGNORE: &str = include_str!("../../templates/dockerignore");

/// Handlebars source for new post files
pub const POST: &str = include_str!("../../templates/post.md.hbs");

/// A template stored under the state directory and copied into projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Dockerfile,
    DockerIgnore,
}

impl Template {
    /// All templates written at first run.
    pub const ALL: [Template; 2] = [Template::Dockerfile, Template::DockerIgnore];

    /// File name inside the templates directory.
    pub fn stored_name(self) -> &'static str {
        match self {
            Template::Dockerfile => "Dockerfile",
            Template::DockerIgnore => "dockerignore",
        }
    }

    /// File name inside a project directory.
    pub fn project_name(self) -> &'static str {
        match self {
            Template::Dockerfile => "Dockerfile",
            Template::DockerIgnore => ".dockerignore",
        }
    }

    /// Content shipped with the binary.
    pub fn embedded(self) -> &'static str {
        match self {
            Template::Dockerfile => DOCKERFILE,
            Template::DockerIgnore => DOCKERIGNORE,
        }
    }
}
