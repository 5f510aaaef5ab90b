use anyhow::Result;

use super::super::context::CommandContext;
use super::super::dispatch::spawn_request;

pub async fn handle_purchase(context: &CommandContext) -> Result<()> {
    let Some(id) = context
        .prompts()
        .ask("Enter product ID to purchase", "1")
        .await
    else {
        return Ok(());
    };
    let Some(quantity) = context.prompts().ask("Enter quantity", "5").await else {
        return Ok(());
    };

    spawn_request(context, "purchase", {
        let context = context.clone();
        async move { purchase_product(&context, &id, &quantity).await }
    });
    Ok(())
}

pub async fn purchase_product(context: &CommandContext, id: &str, quantity: &str) -> Result<()> {
    match context.api().purchase_product(id, quantity).await {
        Ok(reply) if reply.is_ok() => {
            context.record(format!("Purchase successful:\n{}", reply.body), false)
        }
        Ok(reply) => context.record(format!("Purchase failed: {}", reply.body), true),
        Err(e) => context.record(format!("Purchase error: {}", e), true),
    }
    Ok(())
}
