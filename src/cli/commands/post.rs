//! new-post: create a dated Markdown post with front matter.

use crate::cli::Context;
use crate::config::templates::POST;
use crate::error::{JekyllDockerError, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use handlebars::Handlebars;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Directory posts are written to
pub const POSTS_DIR: &str = "_posts";

/// Category written into every new post
pub const DEFAULT_CATEGORY: &str = "blog";

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static slug pattern is valid"));

/// Lower-cases `title` and joins its alphanumeric runs with single hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// `<yyyy-mm-dd>-<slug>.md`
pub fn post_file_name(date: NaiveDate, slug: &str) -> String {
    format!("{}-{}.md", date.format("%Y-%m-%d"), slug)
}

/// Renders the post file for `title` created at `now`.
pub fn render_post<Tz>(title: &str, now: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);

    let mut data = BTreeMap::new();
    data.insert("title", yaml_quote_escape(title));
    data.insert("timestamp", now.format("%Y-%m-%d %H:%M:%S %z").to_string());
    data.insert("category", DEFAULT_CATEGORY.to_string());

    Ok(registry.render_template(POST, &data)?)
}

fn yaml_quote_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Writes `_posts/<today>-<slug>.md` for the given title words.
///
/// Refuses to replace an existing post unless `force` is set.
pub fn new_post(ctx: &Context, title: &[String], force: bool) -> Result<()> {
    let title = title.join(" ");
    let title = title.trim();
    if title.is_empty() {
        return Err(JekyllDockerError::missing_argument(
            "title",
            "jekyll-docker new-post \"<title>\"",
        ));
    }

    let slug = slugify(title);
    if slug.is_empty() {
        return Err(JekyllDockerError::invalid_arguments(format!(
            "title '{}' must contain at least one letter or digit",
            title
        )));
    }

    let now = Local::now();
    let path = write_post(&ctx.project_dir.join(POSTS_DIR), title, &slug, &now, force)?;

    log::info!("Created post {}", path.display());
    ctx.runtime
        .success(&format!("Created {}", path.display()))?;
    Ok(())
}

fn write_post(
    posts_dir: &std::path::Path,
    title: &str,
    slug: &str,
    now: &DateTime<Local>,
    force: bool,
) -> Result<PathBuf> {
    std::fs::create_dir_all(posts_dir)?;
    let path = posts_dir.join(post_file_name(now.date_naive(), slug));
    if path.exists() && !force {
        return Err(JekyllDockerError::invalid_arguments(format!(
            "{} already exists; use --force to overwrite it",
            path.display()
        )));
    }

    std::fs::write(&path, render_post(title, now)?)?;
    Ok(path)
}
