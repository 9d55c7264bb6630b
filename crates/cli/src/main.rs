//! Waitline CLI - Command-line interface for the Waitline queue service

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9538";

#[derive(Parser)]
#[command(name = "waitline")]
#[command(about = "Waitline queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "WAITLINE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the queue and print your token
    Join,

    /// Advance service to the next token
    Serve,

    /// Show the current queue status
    Status,

    /// Stream live queue status updates
    Watch,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct StatusRow {
    #[serde(rename = "nowServing")]
    #[tabled(rename = "Now serving")]
    now_serving: i64,

    #[serde(rename = "lastIssued")]
    #[tabled(rename = "Last issued")]
    last_issued: i64,

    #[tabled(rename = "Waiting")]
    waiting: i64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to reach the Waitline daemon")?
        .json()
        .await
        .context("Invalid JSON-RPC response")?;

    if let Some(err) = response.error {
        anyhow::bail!("RPC error ({}): {}", err.code, err.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("RPC response carried neither result nor error"))
}

fn ws_url(rpc_url: &str) -> String {
    rpc_url
        .replacen("http://", "ws://", 1)
        .replacen("https://", "wss://", 1)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Join => {
            let result = call_rpc(&cli.rpc_url, "queue.join.v1", json!([])).await?;
            let token = result["token"].as_i64().unwrap_or_default();
            println!("{} your token is {}", "joined:".green().bold(), token);
        }

        Commands::Serve => {
            let result = call_rpc(&cli.rpc_url, "queue.serveNext.v1", json!([])).await?;
            let served = result["served"].as_i64().unwrap_or_default();
            println!("{} {}", "now serving:".green().bold(), served);
        }

        Commands::Status => {
            let result = call_rpc(&cli.rpc_url, "queue.status.v1", json!([])).await?;
            let row: StatusRow = serde_json::from_value(result)?;
            println!("{}", Table::new(vec![row]));
        }

        Commands::Watch => {
            let url = ws_url(&cli.rpc_url);
            let client = waitline_sdk::WaitlineClient::connect(&url)
                .await
                .context("Failed to open WebSocket connection")?;
            let mut subscription = client.subscribe_status().await?;

            println!("{} (Ctrl+C to stop)", "watching queue".cyan().bold());
            loop {
                match subscription.next().await {
                    Ok(status) => {
                        println!(
                            "now serving {} | last issued {} | waiting {}",
                            status.now_serving.to_string().green().bold(),
                            status.last_issued,
                            status.waiting.to_string().yellow()
                        );
                    }
                    Err(waitline_sdk::SdkError::SubscriptionClosed) => {
                        eprintln!("{}", "subscription closed by server".red());
                        break;
                    }
                    Err(e) => {
                        eprintln!("{} {}", "stream error:".red(), e);
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
