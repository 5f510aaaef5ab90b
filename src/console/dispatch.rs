use std::future::Future;

use anyhow::Result;
use tracing::debug;

use super::commands::{errors, import, products, purchase};
use super::context::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    Exit,
}

/// Routes one console line to its command handler.
///
/// Parameter prompts run before the request task is spawned, so console
/// input stays serialized while requests run concurrently.
pub async fn dispatch_command(line: &str, context: &CommandContext) -> Result<DispatchOutcome> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&command) = parts.first() else {
        return Ok(DispatchOutcome::Continue);
    };

    match command {
        "exit" | "quit" => return Ok(DispatchOutcome::Exit),
        "help" => print_help(),
        "error" => errors::handle_trigger(&parts, context).await?,
        "validation" => errors::handle_validation(context).await?,
        "products" => products::handle_list(context).await?,
        "product" => products::handle_show(&parts, context).await?,
        "search" => products::handle_search(context).await?,
        "create" => products::handle_create(context).await?,
        "purchase" => purchase::handle_purchase(context).await?,
        "import" => import::handle_import(context).await?,
        other => println!(
            "Unknown command '{}'. Type 'help' for the command list.",
            other
        ),
    }

    Ok(DispatchOutcome::Continue)
}

/// Runs one request in the background, independent of the console loop.
///
/// A handler that returns an error is caught here and recorded as an error
/// entry, so no dispatched request can take the console down.
pub(crate) fn spawn_request<F>(context: &CommandContext, label: &'static str, request: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let context = context.clone();
    tokio::spawn(async move {
        debug!("Dispatching '{}' request in the background", label);
        if let Err(e) = request.await {
            context.record(format!("{} failed: {}", label, e), true);
        }
    });
}

fn print_help() {
    println!("Commands:");
    println!("  error <kind>   Trigger an error simulation on the service");
    println!("  validation     Post a payload missing its required field");
    println!("  products       List all products");
    println!("  product [id]   Show one product");
    println!("  search         Search products (prompts for a query)");
    println!("  create         Create a product (prompts for a name)");
    println!("  purchase       Purchase a product (prompts for ID and quantity)");
    println!("  import         Bulk-import the demo batch");
    println!("  log            Print the session transcript, newest first");
    println!("  help           Show this list");
    println!("  exit           Leave the console");
    println!();
    println!(
        "Error kinds: {}",
        errors::ERROR_KINDS.join(", ")
    );
    println!("Unknown kinds are passed through and surface the service's 404.");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::ApiClient;
    use crate::console::prompt::ScriptedPrompts;
    use crate::output::SessionLog;

    fn context() -> (CommandContext, Arc<SessionLog>) {
        let sink = Arc::new(SessionLog::new());
        let context = CommandContext::new(
            Arc::new(ApiClient::new("http://127.0.0.1:1")),
            sink.clone(),
            Arc::new(ScriptedPrompts::new(Vec::new())),
        );
        (context, sink)
    }

    #[tokio::test]
    async fn exit_and_quit_end_the_session() {
        let (context, _) = context();
        assert_eq!(
            dispatch_command("exit", &context).await.unwrap(),
            DispatchOutcome::Exit
        );
        assert_eq!(
            dispatch_command("quit", &context).await.unwrap(),
            DispatchOutcome::Exit
        );
    }

    #[tokio::test]
    async fn blank_and_unknown_lines_do_not_touch_the_log() {
        let (context, sink) = context();
        assert_eq!(
            dispatch_command("", &context).await.unwrap(),
            DispatchOutcome::Continue
        );
        assert_eq!(
            dispatch_command("frobnicate", &context).await.unwrap(),
            DispatchOutcome::Continue
        );
        assert!(sink.contents().is_empty());
    }

    #[tokio::test]
    async fn declined_prompt_aborts_without_logging() {
        // The scripted provider has no answers, so `search` declines.
        let (context, sink) = context();
        assert_eq!(
            dispatch_command("search", &context).await.unwrap(),
            DispatchOutcome::Continue
        );
        assert!(sink.contents().is_empty());
    }
}
