use std::time::Duration;

use anyhow::{Context, Result};
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database, IndexModel};

use crate::config::settings::Settings;

pub const PRODUCTS: &str = "products";
pub const PRODUCT_CATEGORIES: &str = "productcategories";
pub const NEWS: &str = "news";
pub const NEWS_CATEGORIES: &str = "newscategories";
pub const BANNERS: &str = "banners";
pub const HEADERS: &str = "headers";
pub const FOOTERS: &str = "footers";
pub const MENUS: &str = "menus";
pub const LOGOS: &str = "logos";

const MAX_POOL_SIZE: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_IDLE_TIME: Duration = Duration::from_secs(60);

/// Open the client and verify the deployment answers a ping.
/// The caller owns the handle and shuts it down when the server stops.
pub async fn connect(settings: &Settings) -> Result<(Client, Database)> {
    let mut options = ClientOptions::parse(&settings.mongodb_uri)
        .await
        .context("Invalid MONGODB_URI")?;
    options.app_name = Some(String::from("chemsite"));
    options.max_pool_size = Some(MAX_POOL_SIZE);
    options.min_pool_size = Some(0);
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.max_idle_time = Some(MAX_IDLE_TIME);

    let client = Client::with_options(options).context("Failed to build MongoDB client")?;
    let db = client.database(&settings.database_name);
    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB did not answer ping")?;

    log::info!("Connected to MongoDB database {}", settings.database_name);
    Ok((client, db))
}

/// Lookup indexes backing the slug router and the listing queries.
/// Failures are logged, the site still serves without them.
pub async fn ensure_indexes(db: &Database) {
    let indexes = [
        (PRODUCTS, doc! { "slug": 1 }),
        (PRODUCTS, doc! { "status": 1, "categories": 1 }),
        (PRODUCT_CATEGORIES, doc! { "slug": 1 }),
        (NEWS, doc! { "slug": 1 }),
        (NEWS, doc! { "status": 1, "createdAt": -1 }),
        (NEWS_CATEGORIES, doc! { "slug": 1 }),
        (BANNERS, doc! { "section": 1, "status": 1, "priority": 1 }),
    ];

    for (collection, keys) in indexes {
        let model = IndexModel::builder().keys(keys.clone()).build();
        match db.collection::<Document>(collection).create_index(model).await {
            Ok(result) => log::debug!("Index {} ready on {}", result.index_name, collection),
            Err(e) => log::warn!("Could not create index {:?} on {}: {}", keys, collection, e),
        }
    }
}
