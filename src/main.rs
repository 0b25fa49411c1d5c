//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::new::NewPost;
use folio::commands::show::ShowTarget;
use folio::views::BlogQuery;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content backend for a personal website with math-safe markdown", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Author (defaults to the configured full name)
        #[arg(short, long)]
        author: Option<String>,

        /// Slug (derived from the title when omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Category name, may repeat
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Tag name, may repeat
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Publish immediately
        #[arg(short, long)]
        publish: bool,
    },

    /// List site content
    List {
        /// Type of content to list (post, category, tag, project)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Create published sample posts
    Seed {
        /// Number of posts to create
        #[arg(default_value_t = 10)]
        count: usize,
    },

    /// Print a view as JSON
    Show {
        #[command(subcommand)]
        target: ShowCommand,
    },

    /// Start the JSON preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },
}

#[derive(Subcommand)]
enum ShowCommand {
    /// One page of the blog list
    Blog {
        /// Category slug, may repeat
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Tag slug, may repeat
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Page number
        #[arg(long)]
        page: Option<String>,
    },

    /// A published post
    Post { slug: String },

    /// The project list
    Projects,

    /// A single project
    Project { id: u64 },
}

impl From<ShowCommand> for ShowTarget {
    fn from(command: ShowCommand) -> Self {
        match command {
            ShowCommand::Blog {
                categories,
                tags,
                page,
            } => ShowTarget::Blog(BlogQuery {
                categories,
                tags,
                page,
            }),
            ShowCommand::Post { slug } => ShowTarget::Post(slug),
            ShowCommand::Projects => ShowTarget::Projects,
            ShowCommand::Project { id } => ShowTarget::Project(id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            title,
            author,
            slug,
            categories,
            tags,
            publish,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let post = NewPost {
                title,
                author,
                slug,
                categories,
                tags,
                publish,
            };
            let path = folio::commands::new::create_post(&site, &post)?;
            println!("Created: {:?}", path);
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type)?;
        }

        Commands::Seed { count } => {
            let site = folio::Folio::new(&base_dir)?;
            for slug in folio::commands::seed::run(&site, count)? {
                println!("Created: {}", slug);
            }
        }

        Commands::Show { target } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &target.into())?;
        }

        Commands::Server { port, ip } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port).await?;
        }
    }

    Ok(())
}
