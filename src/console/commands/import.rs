use anyhow::Result;

use crate::types::{ImportReport, ProductDraft};

use super::super::context::CommandContext;
use super::super::dispatch::spawn_request;

/// The fixed import batch. Two entries are crafted to fail on the server:
/// a duplicate of a seed-catalog product and a negative price.
pub fn demo_batch() -> Vec<ProductDraft> {
    vec![
        ProductDraft::new("Bulk Product 1", 99.99, 10, "Bulk"),
        ProductDraft::new("Bulk Product 2", 149.99, 20, "Bulk"),
        ProductDraft::new("iPhone 15", 999.99, 5, "Bulk"),
        ProductDraft::new("Bulk Product 3", -50.0, 15, "Bulk"),
        ProductDraft::new("Bulk Product 4", 199.99, 30, "Bulk"),
    ]
}

pub async fn handle_import(context: &CommandContext) -> Result<()> {
    spawn_request(context, "bulk import", {
        let context = context.clone();
        async move { bulk_import(&context).await }
    });
    Ok(())
}

pub async fn bulk_import(context: &CommandContext) -> Result<()> {
    let batch = demo_batch();
    match context.api().bulk_import(&batch).await {
        Ok(reply) => match serde_json::from_str::<ImportReport>(&reply.body) {
            Ok(report) => {
                let pretty =
                    serde_json::to_string_pretty(&report).unwrap_or_else(|_| reply.body.clone());
                // Partial failures surface in the report body, not the HTTP
                // status: a non-zero failureCount marks the entry as an error
                // even though the batch endpoint answered ok.
                context.record(
                    format!("Bulk import results:\n{}", pretty),
                    report.failure_count > 0,
                );
            }
            Err(e) => context.record(format!("Bulk import error: {}", e), true),
        },
        Err(e) => context.record(format!("Bulk import error: {}", e), true),
    }
    Ok(())
}
