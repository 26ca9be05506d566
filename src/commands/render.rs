//! Render a single route to stdout

use anyhow::Result;
use std::sync::Arc;

use crate::shell::HtmlShell;
use crate::Folio;

/// Run one navigation and return the container (or full document) HTML.
/// A failed navigation is an error carrying the reason.
pub async fn render_route(folio: &Folio, fragment: &str, full: bool) -> Result<String> {
    let shell = Arc::new(HtmlShell::new(&folio.config.title));
    let navigator = folio.navigator(shell.clone()).await;

    if navigator.startup_failed() {
        anyhow::bail!("Could not load site configuration from {:?}", folio.content_dir);
    }

    let outcome = navigator.navigate(fragment).await;
    if let Some(error) = outcome.error {
        anyhow::bail!("Failed to render #{}: {}", outcome.route.fragment(), error);
    }

    tracing::debug!(
        "Rendered #{} as {}",
        outcome.route.fragment(),
        outcome.rendered.page_class
    );

    Ok(if full {
        shell.document()
    } else {
        shell.container().1
    })
}

/// Run the render command
pub async fn run(folio: &Folio, fragment: &str, full: bool) -> Result<()> {
    let html = render_route(folio, fragment, full).await?;
    println!("{}", html);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[tokio::test]
    async fn test_render_default_route() {
        let (_dir, folio) = site();
        let html = render_route(&folio, "", false).await.unwrap();
        assert!(html.contains("<h1>Hello!</h1>"));
    }

    #[tokio::test]
    async fn test_render_full_document() {
        let (_dir, folio) = site();
        let html = render_route(&folio, "#projects/sample-project", true)
            .await
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"class="page-project""#));
        assert!(html.contains("nav-link active"));
    }

    #[tokio::test]
    async fn test_render_failures() {
        let (dir, folio) = site();
        assert!(render_route(&folio, "#nowhere", false).await.is_err());

        fs::remove_file(dir.path().join("content/site.json")).unwrap();
        assert!(render_route(&folio, "#home", false).await.is_err());
    }
}
