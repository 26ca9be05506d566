//! Page renderers
//!
//! Each [`PageKind`] loads its content files and turns them into an HTML
//! fragment for the content container.

pub mod pages;

use crate::config::SiteConfig;
use crate::content::{BlogIndex, ContentLoader, LoadError, ProjectIndex, Publications};
use crate::router::PageKind;

/// Container HTML plus the CSS class for the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub page_class: &'static str,
}

impl Rendered {
    pub fn not_found() -> Self {
        Self {
            html: pages::not_found(),
            page_class: PageKind::NotFound(String::new()).page_class(),
        }
    }

    pub fn startup_error() -> Self {
        Self {
            html: pages::startup_error(),
            page_class: "page-error",
        }
    }
}

/// Renders pages from content fetched through a [`ContentLoader`]
pub struct PageRenderer {
    loader: ContentLoader,
}

impl PageRenderer {
    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Render one page. Unknown pages fail with [`LoadError::NotFound`].
    pub async fn render(&self, kind: &PageKind, site: &SiteConfig) -> Result<Rendered, LoadError> {
        let md = self.loader.markdown();

        // `#blog/` asks for a detail page without naming one
        let empty_slug = match kind {
            PageKind::Project(slug) if slug.is_empty() => Some("projects/"),
            PageKind::Post(slug) if slug.is_empty() => Some("blog/"),
            _ => None,
        };
        if let Some(route) = empty_slug {
            return Err(LoadError::NotFound(route.to_string()));
        }

        let html = match kind {
            PageKind::Home => pages::markdown_page(&self.loader.load_markdown("home.md").await?),
            PageKind::About => {
                pages::markdown_page(&self.loader.load_markdown("about.md").await?)
            }
            PageKind::ProjectList => {
                let index: ProjectIndex = self.loader.load_json("projects/_index.json").await?;
                pages::project_list(&index, md)
            }
            PageKind::Project(slug) => {
                let doc = self
                    .loader
                    .load_markdown(&format!("projects/{}.md", slug))
                    .await?;
                pages::project_detail(&doc)
            }
            PageKind::Publications => {
                let pubs: Publications = self.loader.load_json("publications.json").await?;
                pages::publications(&pubs, site, md)
            }
            PageKind::BlogList => {
                let index: BlogIndex = self.loader.load_json("blog/_index.json").await?;
                pages::blog_list(&index, md)
            }
            // Drafts are only hidden from the listing; direct links still work
            PageKind::Post(slug) => {
                let doc = self
                    .loader
                    .load_markdown(&format!("blog/{}.md", slug))
                    .await?;
                pages::post_detail(&doc)
            }
            PageKind::NotFound(page) => return Err(LoadError::NotFound(page.clone())),
        };

        Ok(Rendered {
            html,
            page_class: kind.page_class(),
        })
    }
}
