//! Initialize a new folio site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Folio configuration

# Site
title: Folio
tagline: ''
description: ''
full_name: ''
email: ''
language: en

# URL
## Leave site_url empty to derive canonical links from each request
site_url: ''
root: /
blog_dir: blog
project_dir: projects

# Directory
source_dir: source

# Listing
per_page: 4
page_window: 5
related_posts: 3

# Writing
date_format: '%Y-%m-%d'
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false
"#;

const DEFAULT_TAXONOMY: &str = r#"categories:
  - name: General
    description: Everything else
tags:
  - Notes
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    let source = target_dir.join("source");
    for dir in ["_posts", "_projects", "_data"] {
        fs::create_dir_all(source.join(dir))
            .with_context(|| format!("Failed to create {:?}", source.join(dir)))?;
    }

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(source.join("_data/taxonomy.yml"), DEFAULT_TAXONOMY)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
published: true
categories: General
tags: [Notes]
---
Welcome to your new site. Math is written inline as $e^{{i\pi}} + 1 = 0$
or on its own line:

$$\int_0^1 x^2\,dx = \frac{{1}}{{3}}$$

<!-- more -->

Create another post with `folio new "My New Post"` and preview everything
with `folio server`.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(source.join("_posts/hello-world.md"), sample_post)?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostRepository;
    use crate::Folio;

    #[test]
    fn test_init_creates_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Folio");
        let store = folio.load_store().unwrap();
        let post = store.post_by_slug("hello-world").unwrap();
        assert_eq!(post.categories, vec!["general"]);
        assert!(post.excerpt.contains(r"$e^{i\pi} + 1 = 0$"));
        assert!(folio.projects_dir().is_dir());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
