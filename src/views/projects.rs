//! Portfolio views

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, Project, ProjectRepository};
use crate::error::Result;
use crate::helpers::{format_date, url_for};

const ACTIVE_PAGE: &str = "projects";

/// A project as shown in the portfolio grid
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub summary: String,
    pub technologies: Vec<String>,
    pub featured_image: Option<String>,
    pub live_url: Option<String>,
    pub repository: Option<String>,
    pub date: String,
}

impl ProjectSummary {
    fn build(project: &Project, config: &SiteConfig) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            slug: project.slug.clone(),
            url: url_for(config, &format!("{}/{}", config.project_dir, project.id)),
            summary: project.summary.clone(),
            technologies: project.technologies.clone(),
            featured_image: project.featured_image.clone(),
            live_url: project.url.clone(),
            repository: project.repository.clone(),
            date: format_date(&project.created, &config.date_format),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectListView {
    pub active_page: &'static str,
    pub projects: Vec<ProjectSummary>,
}

impl ProjectListView {
    pub fn build<R>(repo: &R, config: &SiteConfig) -> Self
    where
        R: ProjectRepository + ?Sized,
    {
        Self {
            active_page: ACTIVE_PAGE,
            projects: repo
                .projects()
                .iter()
                .map(|p| ProjectSummary::build(p, config))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetailView {
    pub active_page: &'static str,
    #[serde(flatten)]
    pub project: ProjectSummary,
    pub description_html: String,
}

impl ProjectDetailView {
    pub fn build<R>(
        repo: &R,
        renderer: &MarkdownRenderer,
        config: &SiteConfig,
        id: u64,
    ) -> Result<Self>
    where
        R: ProjectRepository + ?Sized,
    {
        let project = repo.project(id)?;
        Ok(Self {
            active_page: ACTIVE_PAGE,
            project: ProjectSummary::build(project, config),
            description_html: renderer.render(&project.description),
        })
    }
}
