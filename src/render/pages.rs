//! HTML fragments for each page type

use std::collections::BTreeMap;

use crate::config::SiteConfig;
use crate::content::{
    BlogIndex, MarkdownDoc, MarkdownRenderer, ProjectIndex, Publication, Publications,
};
use crate::helpers::{
    html_escape, link_to, link_with_class, resolve_template_vars, tag_list, time_tag,
};

/// Home and about: the markdown body as-is
pub fn markdown_page(doc: &MarkdownDoc) -> String {
    format!(r#"<article class="prose">{}</article>"#, doc.html)
}

fn page_header(title: &str, intro: &str, md: &MarkdownRenderer) -> String {
    let mut html = String::from(r#"<header class="page-header">"#);
    if !title.is_empty() {
        html.push_str(&format!("<h1>{}</h1>", html_escape(title)));
    }
    if !intro.is_empty() {
        html.push_str(&format!(
            r#"<p class="intro">{}</p>"#,
            md.render_inline(intro)
        ));
    }
    html.push_str("</header>");
    html
}

/// Project cards linking to `#projects/<slug>`
pub fn project_list(index: &ProjectIndex, md: &MarkdownRenderer) -> String {
    let mut html = page_header(&index.title, &index.intro, md);
    html.push_str(r#"<div class="project-grid">"#);

    for project in &index.items {
        let year = project
            .year
            .as_deref()
            .map(|y| format!(r#"<span class="project-year">{}</span>"#, html_escape(y)))
            .unwrap_or_default();
        html.push_str(&format!(
            r##"<a class="project-card" href="#projects/{}"><h2>{}</h2>{}<p>{}</p>{}</a>"##,
            html_escape(&project.slug),
            html_escape(&project.title),
            year,
            html_escape(&project.description),
            tag_list(&project.tags)
        ));
    }

    html.push_str("</div>");
    html
}

/// A single project: title, tags, external links, then the body
pub fn project_detail(doc: &MarkdownDoc) -> String {
    let mut html = link_with_class("#projects", "\u{2190} All projects", "back-link");
    html.push_str(r#"<article class="project">"#);
    html.push_str(r#"<header class="project-header">"#);
    if let Some(title) = doc.get_display("title") {
        html.push_str(&format!("<h1>{}</h1>", html_escape(&title)));
    }
    html.push_str(&tag_list(&doc.tags()));

    let links: Vec<String> = [("github", "Code"), ("paper", "Paper"), ("demo", "Demo")]
        .iter()
        .filter_map(|(key, label)| doc.get_str(key).map(|href| link_to(href, label)))
        .collect();
    if !links.is_empty() {
        html.push_str(&format!(
            r#"<nav class="project-links">{}</nav>"#,
            links.join("")
        ));
    }

    html.push_str("</header>");
    html.push_str(&format!(r#"<div class="prose">{}</div>"#, doc.html));
    html.push_str("</article>");
    html
}

/// Publications grouped by year, newest first, followed by the note
pub fn publications(pubs: &Publications, site: &SiteConfig, md: &MarkdownRenderer) -> String {
    let mut html = page_header(&pubs.title, &pubs.intro, md);

    let mut by_year: BTreeMap<Option<u32>, Vec<&Publication>> = BTreeMap::new();
    for item in &pubs.items {
        by_year.entry(item.year).or_default().push(item);
    }

    // Undated entries sort first in the map; show them last
    for (year, items) in by_year.iter().rev() {
        html.push_str(r#"<section class="publication-year">"#);
        if let Some(year) = year {
            html.push_str(&format!("<h2>{}</h2>", year));
        }
        html.push_str(r#"<ul class="publications">"#);
        for item in items {
            html.push_str(&publication_entry(item));
        }
        html.push_str("</ul></section>");
    }

    if let Some(note) = pubs.note.as_deref().filter(|n| !n.is_empty()) {
        let note = resolve_template_vars(note, site);
        html.push_str(&format!(
            r#"<p class="publications-note">{}</p>"#,
            md.render_inline(&note)
        ));
    }

    html
}

fn publication_entry(item: &Publication) -> String {
    let title = match item.url.as_deref() {
        Some(url) => link_to(url, &item.title),
        None => html_escape(&item.title),
    };

    let mut html = format!(
        r#"<li class="publication"><span class="pub-title">{}</span>"#,
        title
    );
    if !item.authors.is_empty() {
        html.push_str(&format!(
            r#"<span class="pub-authors">{}</span>"#,
            html_escape(&item.authors)
        ));
    }
    if !item.venue.is_empty() {
        html.push_str(&format!(
            r#"<span class="pub-venue">{}</span>"#,
            html_escape(&item.venue)
        ));
    }
    if let Some(pdf) = item.pdf.as_deref() {
        html.push_str(&link_with_class(pdf, "PDF", "pub-pdf"));
    }
    html.push_str("</li>");
    html
}

/// Post previews linking to `#blog/<slug>`; drafts are left out
pub fn blog_list(index: &BlogIndex, md: &MarkdownRenderer) -> String {
    let mut html = page_header(&index.title, &index.intro, md);
    html.push_str(r#"<div class="post-list">"#);

    for post in index.published() {
        html.push_str(r#"<article class="post-preview">"#);
        html.push_str(&format!(
            r##"<h2><a href="#blog/{}">{}</a></h2>"##,
            html_escape(&post.slug),
            html_escape(&post.title)
        ));
        if !post.date.is_empty() {
            html.push_str(&time_tag(&post.date));
        }
        if !post.excerpt.is_empty() {
            html.push_str(&format!("<p>{}</p>", md.render_inline(&post.excerpt)));
        }
        html.push_str(&tag_list(&post.tags));
        html.push_str("</article>");
    }

    html.push_str("</div>");
    html
}

/// A single post: title, date, tags, then the body
pub fn post_detail(doc: &MarkdownDoc) -> String {
    let mut html = link_with_class("#blog", "\u{2190} All posts", "back-link");
    html.push_str(r#"<article class="post">"#);
    html.push_str(r#"<header class="post-header">"#);
    if let Some(title) = doc.get_display("title") {
        html.push_str(&format!("<h1>{}</h1>", html_escape(&title)));
    }
    if let Some(date) = doc.get_display("date") {
        html.push_str(&time_tag(&date));
    }
    html.push_str(&tag_list(&doc.tags()));
    html.push_str("</header>");
    html.push_str(&format!(r#"<div class="prose">{}</div>"#, doc.html));
    html.push_str("</article>");
    html
}

pub fn not_found() -> String {
    r##"<div class="text-center"><h1>404</h1><p>Page not found</p><a href="#home">Go home</a></div>"##
        .to_string()
}

pub fn startup_error() -> String {
    r#"<div class="text-center"><h1>Something went wrong</h1><p>The site could not be loaded. Please try again later.</p></div>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, PostSummary, ProjectSummary};

    fn doc(raw: &str, md: &MarkdownRenderer) -> MarkdownDoc {
        let fm = FrontMatter::parse(raw);
        MarkdownDoc {
            html: md.render(&fm.body),
            meta: fm.meta,
        }
    }

    #[test]
    fn test_project_list_links_to_detail() {
        let md = MarkdownRenderer::new();
        let index = ProjectIndex {
            title: "Projects".to_string(),
            intro: "Things I *built*".to_string(),
            items: vec![ProjectSummary {
                slug: "demo".to_string(),
                title: "Demo <App>".to_string(),
                description: "A demo".to_string(),
                tags: vec!["rust".to_string()],
                year: Some("2024".to_string()),
            }],
        };
        let html = project_list(&index, &md);
        assert!(html.contains(r##"href="#projects/demo""##));
        assert!(html.contains("Demo &lt;App&gt;"));
        assert!(html.contains("<em>built</em>"));
        assert!(html.contains(r#"<li class="tag">rust</li>"#));
    }

    #[test]
    fn test_project_detail() {
        let md = MarkdownRenderer::new();
        let doc = doc(
            "---\ntitle: Demo\ntags: [a, b]\ngithub: https://github.com/me/demo\ndemo:\n---\nHello",
            &md,
        );
        let html = project_detail(&doc);
        assert!(html.contains(r##"<a class="back-link" href="#projects">"##));
        assert!(html.contains("<h1>Demo</h1>"));
        assert!(html.contains(r#"href="https://github.com/me/demo""#));
        assert!(!html.contains(">Demo</a>"));
        assert!(!html.contains("Paper"));
        assert!(html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_blog_list_hides_drafts() {
        let md = MarkdownRenderer::new();
        let index = BlogIndex {
            title: "Blog".to_string(),
            intro: String::new(),
            items: vec![
                PostSummary {
                    slug: "live".to_string(),
                    title: "Live".to_string(),
                    date: "2024-02-01".to_string(),
                    ..Default::default()
                },
                PostSummary {
                    slug: "secret".to_string(),
                    title: "Secret".to_string(),
                    draft: true,
                    ..Default::default()
                },
            ],
        };
        let html = blog_list(&index, &md);
        assert!(html.contains(r##"href="#blog/live""##));
        assert!(html.contains("February 1, 2024"));
        assert!(!html.contains("secret"));
        assert!(!html.contains("Secret"));
    }

    #[test]
    fn test_post_detail_numeric_date() {
        let md = MarkdownRenderer::new();
        let doc = doc("---\ntitle: Old\ndate: 2019\n---\nText", &md);
        let html = post_detail(&doc);
        assert!(html.contains("<time>2019</time>"));
        assert!(html.contains(r##"href="#blog""##));
    }

    #[test]
    fn test_non_string_titles_still_render() {
        let md = MarkdownRenderer::new();
        let post = post_detail(&doc("---\ntitle: 1984\n---\nBody", &md));
        assert!(post.contains("<h1>1984</h1>"));

        let project = project_detail(&doc("---\ntitle: true\n---\nBody", &md));
        assert!(project.contains("<h1>true</h1>"));
    }

    #[test]
    fn test_publications_grouped_with_note() {
        let md = MarkdownRenderer::new();
        let site: SiteConfig =
            serde_json::from_str(r#"{"contact": {"email": "me@example.com"}}"#).unwrap();
        let pubs: Publications = serde_json::from_str(
            r#"{
                "title": "Publications",
                "items": [
                    {"title": "Older", "year": 2021, "venue": "Conf"},
                    {"title": "Newer", "year": 2023, "url": "https://doi.org/x"},
                    {"title": "Undated"}
                ],
                "note": "Ask me for a copy at **{contact.email}** or {contact.fax}."
            }"#,
        )
        .unwrap();

        let html = publications(&pubs, &site, &md);
        let newer = html.find("Newer").unwrap();
        let older = html.find("Older").unwrap();
        let undated = html.find("Undated").unwrap();
        assert!(newer < older && older < undated);
        assert!(html.contains("<h2>2023</h2>"));
        assert!(html.contains("<strong>me@example.com</strong>"));
        assert!(html.contains("{contact.fax}"));
    }
}
