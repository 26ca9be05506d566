//! List site content

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{BlogIndex, ProjectIndex, Publications};
use crate::Folio;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {:?}", path))
}

/// Markdown files under `dir` whose stem is not in `slugs`
pub fn unindexed_files(dir: &Path, slugs: &HashSet<&str>) -> Vec<String> {
    let mut missing: Vec<String> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|e| {
            let stem = e.path().file_stem()?.to_str()?.to_string();
            (!slugs.contains(stem.as_str())).then_some(stem)
        })
        .collect();
    missing.sort();
    missing
}

fn report_unindexed(dir: &Path, slugs: &HashSet<&str>) {
    for stem in unindexed_files(dir, slugs) {
        println!("  ! {}.md is not in the index", stem);
    }
}

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, drafts: bool) -> Result<()> {
    let content = &folio.content_dir;

    match content_type {
        "post" | "posts" => {
            let index: BlogIndex = read_json(&content.join("blog/_index.json"))?;
            let posts: Vec<_> = if drafts {
                index.items.iter().collect()
            } else {
                index.published().collect()
            };
            println!("Posts ({}):", posts.len());
            for post in posts {
                let marker = if post.draft { " (draft)" } else { "" };
                println!("  {} - {} [#blog/{}]{}", post.date, post.title, post.slug, marker);
            }
            let slugs = index.items.iter().map(|p| p.slug.as_str()).collect();
            report_unindexed(&content.join("blog"), &slugs);
        }
        "project" | "projects" => {
            let index: ProjectIndex = read_json(&content.join("projects/_index.json"))?;
            println!("Projects ({}):", index.items.len());
            for project in &index.items {
                match &project.year {
                    Some(year) => println!(
                        "  {} - {} [#projects/{}]",
                        year, project.title, project.slug
                    ),
                    None => println!("  {} [#projects/{}]", project.title, project.slug),
                }
            }
            let slugs = index.items.iter().map(|p| p.slug.as_str()).collect();
            report_unindexed(&content.join("projects"), &slugs);
        }
        "publication" | "publications" => {
            let pubs: Publications = read_json(&content.join("publications.json"))?;
            println!("Publications ({}):", pubs.items.len());
            for item in &pubs.items {
                let year = item.year.map(|y| y.to_string()).unwrap_or_else(|| "----".into());
                println!("  {} - {} ({})", year, item.title, item.venue);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, projects, publications",
                content_type
            );
        }
    }

    Ok(())
}
