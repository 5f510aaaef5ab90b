use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use serde_json::Value;

use crate::types::{Product, ProductDraft};

use super::super::context::CommandContext;
use super::super::dispatch::spawn_request;

pub async fn handle_list(context: &CommandContext) -> Result<()> {
    spawn_request(context, "product listing", {
        let context = context.clone();
        async move { list_products(&context).await }
    });
    Ok(())
}

pub async fn list_products(context: &CommandContext) -> Result<()> {
    match context.api().list_products().await {
        Ok(reply) if reply.is_ok() => match serde_json::from_str::<Vec<Product>>(&reply.body) {
            Ok(products) => {
                let pretty = serde_json::to_string_pretty(&products)
                    .unwrap_or_else(|_| reply.body.clone());
                context.record(
                    format!("Found {} products:\n{}", products.len(), pretty),
                    false,
                );
            }
            Err(e) => context.record(format!("Error fetching products: {}", e), true),
        },
        Ok(reply) => context.record(
            format!(
                "Failed to fetch products: {}\n{}",
                reply.status_line(),
                reply.body
            ),
            true,
        ),
        Err(e) => context.record(format!("Error fetching products: {}", e), true),
    }
    Ok(())
}

pub async fn handle_show(parts: &[&str], context: &CommandContext) -> Result<()> {
    let id = match parts.get(1) {
        Some(id) => id.to_string(),
        None => match context.prompts().ask("Enter product ID", "1").await {
            Some(id) => id,
            None => return Ok(()),
        },
    };

    spawn_request(context, "product lookup", {
        let context = context.clone();
        async move { show_product(&context, &id).await }
    });
    Ok(())
}

pub async fn show_product(context: &CommandContext, id: &str) -> Result<()> {
    match context.api().get_product(id).await {
        Ok(reply) if reply.is_ok() => match serde_json::from_str::<Product>(&reply.body) {
            Ok(product) => {
                let pretty =
                    serde_json::to_string_pretty(&product).unwrap_or_else(|_| reply.body.clone());
                context.record(&pretty, false);
            }
            Err(e) => context.record(format!("Product lookup error: {}", e), true),
        },
        Ok(reply) => context.record(
            format!(
                "Product lookup failed: {}\n{}",
                reply.status_line(),
                reply.body
            ),
            true,
        ),
        Err(e) => context.record(format!("Product lookup error: {}", e), true),
    }
    Ok(())
}

pub async fn handle_search(context: &CommandContext) -> Result<()> {
    let Some(query) = context.prompts().ask("Enter search query", "iPhone").await else {
        return Ok(());
    };

    spawn_request(context, "product search", {
        let context = context.clone();
        async move { search_products(&context, &query).await }
    });
    Ok(())
}

pub async fn search_products(context: &CommandContext, query: &str) -> Result<()> {
    match context.api().search_products(query).await {
        Ok(reply) if reply.is_ok() => match serde_json::from_str::<Value>(&reply.body) {
            Ok(results) => {
                let pretty =
                    serde_json::to_string_pretty(&results).unwrap_or_else(|_| reply.body.clone());
                context.record(
                    format!("Search results for \"{}\":\n{}", query, pretty),
                    false,
                );
            }
            Err(e) => context.record(format!("Search error: {}", e), true),
        },
        Ok(reply) => {
            // Failed searches carry a human-readable `message` field.
            let message = serde_json::from_str::<Value>(&reply.body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            context.record(format!("Search failed: {}", message), true);
        }
        Err(e) => context.record(format!("Search error: {}", e), true),
    }
    Ok(())
}

pub async fn handle_create(context: &CommandContext) -> Result<()> {
    let default_name = format!("Test Product {}", Utc::now().timestamp_millis());
    let Some(name) = context
        .prompts()
        .ask("Enter product name", &default_name)
        .await
    else {
        return Ok(());
    };

    let mut rng = rand::thread_rng();
    let draft = ProductDraft {
        name,
        description: Some("Test product created from the demo console".to_string()),
        price: rng.gen_range(100..1100) as f64,
        stock: rng.gen_range(10..60),
        category: "Test".to_string(),
    };

    spawn_request(context, "product creation", {
        let context = context.clone();
        async move { create_product(&context, draft).await }
    });
    Ok(())
}

pub async fn create_product(context: &CommandContext, draft: ProductDraft) -> Result<()> {
    match context.api().create_product(&draft).await {
        Ok(reply) if reply.is_ok() => match serde_json::from_str::<Product>(&reply.body) {
            Ok(product) => {
                let pretty =
                    serde_json::to_string_pretty(&product).unwrap_or_else(|_| reply.body.clone());
                context.record(format!("Product created:\n{}", pretty), false);
            }
            Err(e) => context.record(format!("Create product error: {}", e), true),
        },
        Ok(reply) => context.record(format!("Failed to create product: {}", reply.body), true),
        Err(e) => context.record(format!("Create product error: {}", e), true),
    }
    Ok(())
}
