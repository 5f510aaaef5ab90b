use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::ApiClient;
use crate::console::{
    dispatch_command, CommandContext, DispatchOutcome, InteractivePrompts,
};
use crate::keepalive;
use crate::output::SessionLog;

use super::setup::PreparedApp;

pub async fn run(prepared: PreparedApp) -> Result<()> {
    let api = Arc::new(ApiClient::new(&prepared.base_url));
    let sink = Arc::new(SessionLog::new());

    // Echo rendered log entries to the console as requests complete.
    let (echo_tx, mut echo_rx) = mpsc::unbounded_channel();
    sink.set_echo(echo_tx);
    tokio::spawn(async move {
        while let Some(entry) = echo_rx.recv().await {
            if entry.is_error {
                println!("{}\n", entry.line.red());
            } else {
                println!("{}\n", entry.line);
            }
        }
    });

    if let Some(interval) = prepared.ping_interval {
        keepalive::spawn(api.clone(), interval);
    }

    let prompts = Arc::new(InteractivePrompts::new()?);
    let context = CommandContext::new(api, sink.clone(), prompts.clone());

    println!("Type 'help' for the command list.\n");

    loop {
        let Some(line) = prompts.read_command("catalog> ").await else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        // The transcript view is console plumbing, not a dispatcher: it
        // issues no request and writes no entry.
        if line == "log" {
            let transcript = sink.contents();
            if transcript.is_empty() {
                println!("No requests dispatched yet.\n");
            } else {
                print!("{}", transcript);
            }
            continue;
        }

        match dispatch_command(&line, &context).await {
            Ok(DispatchOutcome::Exit) => break,
            Ok(DispatchOutcome::Continue) => {}
            Err(e) => debug!("Command dispatch failed: {}", e),
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}
