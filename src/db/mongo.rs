use log::{info, warn};
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

pub async fn create_mongo_client(
    uri: &str,
    db_name: &str,
) -> Result<Arc<Client>, mongodb::error::Error> {
    info!("Connecting to MongoDB database '{}'", db_name);

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);
    client_options.app_name = Some("weekend-traveller-api".to_string());

    // Stable API for MongoDB 5.0+
    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal: the driver reconnects lazily.
    match client.database(db_name).run_command(doc! {"ping": 1}).await {
        Ok(_) => info!("Connected to MongoDB and verified with ping"),
        Err(e) => {
            warn!("Connected to MongoDB but ping failed: {}", e);
            warn!("Trip persistence may be unavailable until the server is reachable");
        }
    }

    Ok(Arc::new(client))
}
