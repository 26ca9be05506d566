//! Create a new post or project

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::Folio;

/// What `folio new` creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Post,
    Project,
}

impl EntryKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "post" | "posts" => Ok(Self::Post),
            "project" | "projects" => Ok(Self::Project),
            _ => anyhow::bail!("Unknown kind: {}. Available: post, project", s),
        }
    }

    fn dir(&self) -> &'static str {
        match self {
            Self::Post => "blog",
            Self::Project => "projects",
        }
    }
}

/// Create the markdown file and register it in the listing index.
/// Returns the slug.
pub fn create_entry(folio: &Folio, title: &str, kind: EntryKind, draft: bool) -> Result<String> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable slug", title);
    }

    let target_dir = folio.content_dir.join(kind.dir());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let content = match kind {
        EntryKind::Post => format!(
            "---\ntitle: \"{}\"\ndate: {}\ntags: []\n---\n",
            title, today
        ),
        EntryKind::Project => format!("---\ntitle: \"{}\"\ntags: []\ngithub: \n---\n", title),
    };

    let entry = match kind {
        EntryKind::Post => serde_json::json!({
            "slug": slug,
            "title": title,
            "date": today,
            "excerpt": "",
            "tags": [],
            "draft": draft,
        }),
        EntryKind::Project => serde_json::json!({
            "slug": slug,
            "title": title,
            "description": "",
            "tags": [],
        }),
    };
    // The index must never list a file that was not written
    fs::write(&file_path, &content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;
    if let Err(e) = append_to_index(&target_dir.join("_index.json"), entry) {
        if let Err(cleanup) = fs::remove_file(&file_path) {
            tracing::warn!("Failed to remove {:?}: {}", file_path, cleanup);
        }
        return Err(e);
    }
    println!("Created: {:?}", file_path);

    Ok(slug)
}

/// Append `entry` to the `items` array, creating the index if needed.
/// Unknown keys in the existing file are preserved.
fn append_to_index(index_path: &Path, entry: Value) -> Result<()> {
    let mut index: Value = if index_path.exists() {
        let raw = fs::read_to_string(index_path)?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {:?}", index_path))?
    } else {
        serde_json::json!({ "title": "", "intro": "", "items": [] })
    };

    let Some(object) = index.as_object_mut() else {
        anyhow::bail!("{:?} is not a JSON object", index_path);
    };
    let items = object
        .entry("items")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(items) = items.as_array_mut() else {
        anyhow::bail!("`items` in {:?} is not an array", index_path);
    };
    items.push(entry);

    fs::write(index_path, serde_json::to_string_pretty(&index)? + "\n")?;
    tracing::debug!("Updated {:?}", index_path);
    Ok(())
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, kind: &str, draft: bool) -> Result<()> {
    let kind = EntryKind::parse(kind)?;
    create_entry(folio, title, kind, draft)?;
    Ok(())
}
