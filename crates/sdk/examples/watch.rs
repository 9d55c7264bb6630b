//! Watch Example
//!
//! Joins the queue once, then streams live status updates.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package waitline-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package waitline-sdk --example watch
//!    ```

use waitline_sdk::WaitlineClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Waitline SDK - Watch Example");
    println!("============================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = WaitlineClient::connect("ws://127.0.0.1:9538").await?;
    println!("   Connected\n");

    // 2. Join the queue
    println!("2. Joining the queue...");
    let join = client.join().await?;
    println!("   Your token: {}\n", join.token);

    // 3. Stream snapshots until our token is served
    println!("3. Watching queue status...");
    let mut subscription = client.subscribe_status().await?;

    loop {
        let status = subscription.next().await?;
        println!(
            "   now serving {} | last issued {} | waiting {}",
            status.now_serving, status.last_issued, status.waiting
        );

        if status.now_serving >= join.token {
            println!("\nYou're up!");
            break;
        }
    }

    Ok(())
}
