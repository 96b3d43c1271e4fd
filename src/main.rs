use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use listing_board::board::form::split_features;
use listing_board::config::{AppConfig, Backend};
use listing_board::generator::{
    fallback_message, DescriptionGenerator, DescriptionRequest, GeminiGenerator,
};
use listing_board::storage::{ListingStore, LocalStore, RemoteStore};
use listing_board::workspace::DescribeError;
use listing_board::{ui, ListingForm, MediaItem, MediaKind, Status, Workspace};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "listing-board")]
#[command(about = "Kanban board for real-estate listings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(long, global = true, default_value = "listing-board.toml")]
    config: PathBuf,

    /// Directory of the local store (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use the remote document store at this URL
    #[arg(long, global = true, env = "LISTING_BOARD_REMOTE")]
    remote: Option<String>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the board, one section per column
    Board {
        /// Only listings whose name or address contains this text
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// List listings, one per line
    List {
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only listings in this column
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Show one listing in full
    Show { id: String },

    /// Add a new listing to the general catalog
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Comma separated features
        #[arg(long, default_value = "")]
        features: String,

        /// Cover image URL
        #[arg(long)]
        cover: Option<String>,

        /// Draft the description with the generation API
        #[arg(long)]
        generate: bool,
    },

    /// Edit fields of a listing
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Comma separated features, replacing the current ones
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        cover: Option<String>,
    },

    /// Move a listing to another column
    Move { id: String, status: Status },

    /// Delete a listing
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Attach media to a listing's gallery
    MediaAdd {
        id: String,

        url: String,

        #[arg(long, default_value = "image")]
        kind: MediaKind,
    },

    /// Remove one media item from a listing's gallery
    MediaRemove { id: String, media_id: String },

    /// Draft marketing copy for a listing
    Describe {
        id: String,

        /// Store the draft as the listing's description
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(&cli.config)?.with_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = dir;
    }
    if let Some(url) = cli.remote.clone() {
        config.storage.backend = Backend::Remote;
        config.storage.remote_url = Some(url);
    }

    let generator = GeminiGenerator::with_timeout(
        config.generator.api_key.clone(),
        Duration::from_secs(config.generator.timeout_secs),
    )?
    .with_base_url(config.generator.base_url.clone())
    .with_model(config.generator.model.clone());

    match config.storage.backend {
        Backend::Local => {
            let store = LocalStore::with_key(&config.storage.data_dir, config.storage.key.clone());
            info!("Using local store at {}", store.path().display());
            run(store, cli.command, &generator).await
        }
        Backend::Remote => {
            let url = config
                .storage
                .remote_url
                .clone()
                .context("Remote backend selected but no remote_url configured")?;
            info!("Using remote store at {}", url);
            let store = RemoteStore::with_collection(url, config.storage.collection.clone())?
                .with_token(config.storage.token.clone());
            run(store, cli.command, &generator).await
        }
    }
}

async fn run<S: ListingStore>(
    store: S,
    command: Commands,
    generator: &impl DescriptionGenerator,
) -> Result<()> {
    let mut workspace = Workspace::open(store)
        .await
        .context("Failed to load listings")?;

    match command {
        Commands::Board { query } => {
            workspace.set_query(query);
            print!("{}", ui::render_board(workspace.board()));
        }

        Commands::List { query, status } => {
            workspace.set_query(query);
            let houses = workspace.board().filtered();
            let shown: Vec<_> = houses
                .into_iter()
                .filter(|h| status.map_or(true, |s| h.status == s))
                .collect();
            for (i, house) in shown.iter().enumerate() {
                println!("{}. {} [{}]", i + 1, ui::render_card(house), house.status);
            }
            info!("{} listings shown", shown.len());
        }

        Commands::Show { id } => {
            let house = workspace
                .board()
                .get(&id)
                .with_context(|| format!("No listing with id {}", id))?;
            print!("{}", ui::render_details(house));
        }

        Commands::Add {
            name,
            price,
            address,
            mut description,
            features,
            cover,
            generate,
        } => {
            if generate {
                let request = DescriptionRequest::new(
                    name.clone(),
                    split_features(&features).join(", "),
                    price.clone(),
                )?;
                description = match generator.generate(&request).await {
                    Ok(generated) => generated.text,
                    Err(e) => {
                        eprintln!("{}", fallback_message(&e));
                        return Err(e).context("Listing not added");
                    }
                };
            }
            let form = ListingForm {
                name,
                price,
                address,
                description,
                features,
                cover_image: cover,
            };
            let id = workspace
                .add_from_form(form)
                .await
                .context("Failed to save new listing")?;
            println!("Added listing {}", id);
        }

        Commands::Edit {
            id,
            name,
            price,
            address,
            description,
            features,
            cover,
        } => {
            let mut house = workspace
                .board()
                .get(&id)
                .cloned()
                .with_context(|| format!("No listing with id {}", id))?;
            if let Some(name) = name {
                house.name = name;
            }
            if let Some(price) = price {
                house.price = price;
            }
            if let Some(address) = address {
                house.address = address;
            }
            if let Some(description) = description {
                house.description = description;
            }
            if let Some(features) = features {
                house.features = split_features(&features);
            }
            if let Some(cover) = cover {
                house.cover_image = cover;
            }
            workspace
                .update(house)
                .await
                .context("Failed to save listing")?;
            println!("Updated listing {}", id);
        }

        Commands::Move { id, status } => {
            if !workspace.move_house(&id, status).await? {
                bail!("No listing with id {}", id);
            }
            println!("Moved {} to {}", id, status.column().title);
        }

        Commands::Delete { id, yes } => {
            let name = workspace
                .board()
                .get(&id)
                .map(|h| h.name.clone())
                .with_context(|| format!("No listing with id {}", id))?;
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Delete \"{}\"? This cannot be undone", name))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Kept {}", id);
                return Ok(());
            }
            workspace
                .remove(&id)
                .await
                .context("Failed to delete listing")?;
            println!("Deleted {}", id);
        }

        Commands::MediaAdd { id, url, kind } => {
            let item = MediaItem::new(url, kind);
            let media_id = item.id.clone();
            if workspace.add_media(&id, vec![item]).await?.is_none() {
                bail!("No listing with id {}", id);
            }
            println!("Attached {} to {}", media_id, id);
        }

        Commands::MediaRemove { id, media_id } => {
            if workspace.board().get(&id).is_none() {
                bail!("No listing with id {}", id);
            }
            if workspace.remove_media(&id, &media_id).await?.is_none() {
                bail!("No media {} on listing {}", media_id, id);
            }
            println!("Removed {} from {}", media_id, id);
        }

        Commands::Describe { id, save: false } => {
            let house = workspace
                .board()
                .get(&id)
                .with_context(|| format!("No listing with id {}", id))?;
            let request =
                DescriptionRequest::new(house.name.clone(), house.feature_text(), house.price.clone())?;
            println!("{}", generator.describe(&request).await);
        }

        Commands::Describe { id, save: true } => {
            match workspace.save_generated_description(&id, generator).await {
                Ok(Some(generated)) => println!("{}", generated.text),
                Ok(None) => bail!("No listing with id {}", id),
                Err(DescribeError::Generation(e)) => {
                    eprintln!("{}", fallback_message(&e));
                    return Err(e).context("Description not saved");
                }
                Err(DescribeError::Storage(e)) => {
                    return Err(e).context("Failed to save description");
                }
            }
        }
    }

    Ok(())
}
