//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

const CONFIG: &str = r#"# Portfolio configuration

# Shell page title
title: Portfolio

# Directory
content_dir: content
static_dir: static

# Page shown for an empty fragment
default_route: home

highlight:
  theme: base16-ocean.dark
  line_number: false

server:
  ip: localhost
  port: 4000
  live_reload: true
"#;

const SITE_JSON: &str = r##"{
  "nav": [
    { "href": "#home", "label": "Home" },
    { "href": "#about", "label": "About" },
    { "href": "#projects", "label": "Projects" },
    { "href": "#publications", "label": "Publications" },
    { "href": "#blog", "label": "Blog" }
  ],
  "social": [
    { "platform": "github", "url": "https://github.com/", "label": "GitHub" },
    { "platform": "email", "url": "mailto:you@example.com", "label": "Email" }
  ],
  "contact": {
    "email": "you@example.com"
  }
}
"##;

const HOME: &str = r#"---
title: Home
---
# Hello!

This site is rendered from the files in `content/`. Edit `home.md` to change this page.
"#;

const ABOUT: &str = r#"---
title: About
---
# About me

A few words about who you are and what you work on.
"#;

const PROJECTS_INDEX: &str = r#"{
  "title": "Projects",
  "intro": "Things I have built.",
  "items": [
    {
      "slug": "sample-project",
      "title": "Sample Project",
      "description": "A short description shown on the project card.",
      "tags": ["rust"]
    }
  ]
}
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Sample Project
tags: [rust, web]
github: https://github.com/
---
Describe the project here. Front-matter keys `github`, `paper` and `demo`
become links in the project header.
"#;

const BLOG_INDEX: &str = r#"{
  "title": "Blog",
  "intro": "Notes and longer posts.",
  "items": [
    {
      "slug": "hello-world",
      "title": "Hello World",
      "date": "2024-01-01",
      "excerpt": "The first post on this site.",
      "tags": ["meta"]
    }
  ]
}
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: 2024-01-01
tags: [meta]
---
Run `folio new "My Post"` to add another post to the blog.
"#;

const PUBLICATIONS: &str = r#"{
  "title": "Publications",
  "intro": "",
  "items": [],
  "note": "For copies of any paper, email {contact.email}."
}
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");

    // Create directory structure
    fs::create_dir_all(content_dir.join("projects"))?;
    fs::create_dir_all(content_dir.join("blog"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;

    let files: [(&Path, &str, &str); 9] = [
        (target_dir, crate::CONFIG_FILE, CONFIG),
        (&content_dir, "site.json", SITE_JSON),
        (&content_dir, "home.md", HOME),
        (&content_dir, "about.md", ABOUT),
        (&content_dir, "projects/_index.json", PROJECTS_INDEX),
        (&content_dir, "projects/sample-project.md", SAMPLE_PROJECT),
        (&content_dir, "blog/_index.json", BLOG_INDEX),
        (&content_dir, "blog/hello-world.md", SAMPLE_POST),
        (&content_dir, "publications.json", PUBLICATIONS),
    ];

    for (dir, name, body) in files {
        let path = dir.join(name);
        if path.exists() {
            tracing::info!("Keeping existing {:?}", path);
            continue;
        }
        fs::write(&path, body)?;
        tracing::debug!("Created {:?}", path);
    }

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}
