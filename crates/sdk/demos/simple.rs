//! Simple SDK Example
//!
//! Walks one customer through the queue.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package queuedesk-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package queuedesk-sdk --example simple
//!    ```

use queuedesk_sdk::QueueDeskClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("QueueDesk SDK - Simple Example");
    println!("==============================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = QueueDeskClient::connect("http://127.0.0.1:9630").await?;
    println!("   ✓ Connected\n");

    // 2. Take a ticket
    println!("2. Taking a ticket for 'general'...");
    let ticket = client.create_ticket("general").await?;
    println!("   ✓ Ticket issued:");
    println!("     - Number: {}", ticket.number);
    println!("     - Status: {:?}", ticket.status);
    println!("     - Estimated wait: {} min\n", ticket.estimated_wait_minutes);

    // 3. Counter 1 calls the next customer
    println!("3. Counter 1 calls next...");
    let Some(called) = client.call_next(1).await? else {
        println!("   ⚠ Nothing to call (counter busy with other tickets?)");
        return Ok(());
    };
    println!("   ✓ Called {} to counter 1\n", called.number);

    // 4. Serve and complete
    println!("4. Serving...");
    client.begin_service(&called.number).await?;
    let released = client.complete(&called.number).await?;
    println!(
        "   ✓ Completed, counter {} is {}\n",
        released.counter.number, released.counter.status
    );

    // 5. Stats
    let stats = client.stats().await?;
    println!("5. {} ticket(s) still waiting", stats.total_waiting);

    println!("\n✓ Example completed successfully!");

    Ok(())
}
