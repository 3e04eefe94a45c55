mod domain;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, CatalogConfig, CatalogSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CatalogConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting product catalog");

    let system = CatalogSystem::new(config);
    let catalog = &system.product_service;

    let span = tracing::info_span!("catalog_seeding");
    let (widget, gadget) = async {
        info!("Creating plain products");
        let widget = catalog.create_product("Widget", 10.0).await?;
        let gadget = catalog.create_product("Gadget", 20.0).await?;
        Ok::<_, crate::product_actor::ProductError>((widget, gadget))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    info!(widget_id = %widget.id, gadget_id = %gadget.id, "Products created successfully");

    let span = tracing::info_span!("bundle_creation");
    let combo = async {
        info!("Creating bundle from existing products");
        catalog
            .create_bundle("Combo", 25.0, vec![widget.id.clone(), gadget.id.clone()])
            .await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    match serde_json::to_string_pretty(&combo) {
        Ok(json) => info!(bundle = %json, "Bundle created"),
        Err(e) => error!(error = %e, "Could not serialise bundle"),
    }

    // A duplicate of a bundle is a plain product
    let copy = catalog
        .duplicate_product(combo.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(copy_id = %copy.id, is_bundle = copy.is_bundle(), "Bundle duplicated");

    let renamed = catalog
        .update_product(widget.id.clone(), "Widget Pro", 12.0)
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %renamed.id, name = %renamed.name, "Product renamed");

    catalog
        .delete_product(copy.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %copy.id, "Duplicate removed");

    // Expected rejection: the source does not exist
    if let Err(e) = catalog
        .create_bundle("Broken", 5.0, vec!["product_404".to_string()])
        .await
    {
        warn!(error = %e, "Bundle rejected");
    }

    let products = catalog.list_products().await.map_err(|e| e.to_string())?;
    info!(product_count = products.len(), "Catalog contents listed");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
