use anyhow::Result;

use super::super::context::CommandContext;
use super::super::dispatch::spawn_request;

/// Error simulations the service exposes under `/api/demo/errors/`.
pub const ERROR_KINDS: &[&str] = &[
    "null-pointer",
    "array-index",
    "arithmetic",
    "illegal-argument",
    "product-not-found/999",
    "insufficient-stock",
    "external-service",
    "database-error",
    "unauthorized",
    "random",
    "async-error",
    "slow-operation",
    "memory-leak",
];

pub async fn handle_trigger(parts: &[&str], context: &CommandContext) -> Result<()> {
    let Some(kind) = parts.get(1) else {
        println!("Usage: error <kind>   (see 'help' for the list of kinds)");
        return Ok(());
    };

    let kind = kind.to_string();
    spawn_request(context, "error trigger", {
        let context = context.clone();
        async move { trigger_error(&context, &kind).await }
    });
    Ok(())
}

pub async fn trigger_error(context: &CommandContext, kind: &str) -> Result<()> {
    match context.api().trigger_error(kind).await {
        Ok(reply) if reply.is_ok() => context.record(&reply.body, false),
        Ok(reply) => context.record(format!("{}\n{}", reply.status_line(), reply.body), true),
        Err(e) => context.record(format!("Network error: {}", e), true),
    }
    Ok(())
}

pub async fn handle_validation(context: &CommandContext) -> Result<()> {
    spawn_request(context, "validation error", {
        let context = context.clone();
        async move { validation_error(&context).await }
    });
    Ok(())
}

pub async fn validation_error(context: &CommandContext) -> Result<()> {
    match context.api().validation_error().await {
        Ok(reply) if reply.is_ok() => context.record(&reply.body, false),
        Ok(reply) => context.record(format!("Validation Error: {}", reply.body), true),
        Err(e) => context.record(format!("Network error: {}", e), true),
    }
    Ok(())
}
