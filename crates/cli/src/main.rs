//! QueueDesk CLI - Command-line interface for the QueueDesk daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9630";

#[derive(Parser)]
#[command(name = "queuedesk-cli")]
#[command(about = "QueueDesk ticket queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "QUEUEDESK_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a ticket for a service type
    Take {
        /// Service type id (e.g., general, express, vip)
        service_type: String,
    },

    /// Call the next eligible ticket to a counter
    Call {
        /// Counter number
        counter: u32,
    },

    /// Start serving a called ticket
    Begin {
        /// Ticket number
        ticket: String,
    },

    /// Complete the ticket being served
    Complete {
        /// Ticket number
        ticket: String,
    },

    /// Mark a called ticket as no-show
    NoShow {
        /// Ticket number
        ticket: String,
    },

    /// Cancel a waiting ticket
    Cancel {
        /// Ticket number
        ticket: String,
    },

    /// Open, close or pause a counter
    CounterStatus {
        /// Counter number
        counter: u32,

        /// AVAILABLE, CLOSED or BREAK
        status: String,
    },

    /// List waiting tickets
    Waiting,

    /// List counters
    Counters,

    /// List service types
    Services,

    /// Show system status
    Status,
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

#[derive(Deserialize)]
struct Ticket {
    number: String,
    service_type: String,
    status: String,
    counter: Option<u32>,
    estimated_wait_minutes: u32,
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "Ticket")]
    number: String,
    #[tabled(rename = "Service")]
    service_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Counter")]
    counter: String,
    #[tabled(rename = "Est. wait (min)")]
    estimated_wait_minutes: u32,
}

impl From<Ticket> for TicketRow {
    fn from(ticket: Ticket) -> Self {
        Self {
            number: ticket.number,
            service_type: ticket.service_type,
            status: ticket.status,
            counter: ticket.counter.map(|c| c.to_string()).unwrap_or_default(),
            estimated_wait_minutes: ticket.estimated_wait_minutes,
        }
    }
}

#[derive(Deserialize)]
struct Counter {
    number: u32,
    name: String,
    status: String,
    service_types: Vec<String>,
    current_ticket: Option<String>,
}

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Services")]
    service_types: String,
    #[tabled(rename = "Current ticket")]
    current_ticket: String,
}

impl From<Counter> for CounterRow {
    fn from(counter: Counter) -> Self {
        Self {
            number: counter.number,
            name: counter.name,
            status: counter.status,
            service_types: counter.service_types.join(", "),
            current_ticket: counter.current_ticket.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Tabled)]
struct ServiceRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Prefix")]
    ticket_prefix: String,
    #[tabled(rename = "Avg (min)")]
    average_processing_time_minutes: u32,
    #[tabled(rename = "Priority")]
    default_priority: i32,
    #[tabled(rename = "Active")]
    is_active: bool,
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
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_tickets(tickets: Vec<Ticket>) {
    let rows: Vec<TicketRow> = tickets.into_iter().map(TicketRow::from).collect();
    println!("{}", Table::new(rows));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Take { service_type } => {
            let params = json!({ "service_type": service_type });
            let result = call_rpc(&cli.rpc_url, "ticket.create.v1", params).await?;
            let ticket: Ticket = serde_json::from_value(result)?;

            println!(
                "{}",
                format!("✓ Ticket {} issued", ticket.number).green().bold()
            );
            println!();
            print_tickets(vec![ticket]);
        }

        Commands::Call { counter } => {
            let params = json!({ "counter": counter });
            let result = call_rpc(&cli.rpc_url, "counter.call_next.v1", params).await?;

            match serde_json::from_value::<Option<Ticket>>(result["ticket"].clone())? {
                Some(ticket) => {
                    println!(
                        "{}",
                        format!("✓ Ticket {} → counter {}", ticket.number, counter)
                            .green()
                            .bold()
                    );
                    println!();
                    print_tickets(vec![ticket]);
                }
                None => {
                    println!("{}", format!("No ticket waiting for counter {}", counter).yellow());
                }
            }
        }

        Commands::Begin { ticket } => {
            let params = json!({ "ticket_number": ticket });
            call_rpc(&cli.rpc_url, "ticket.begin.v1", params).await?;

            println!("{}", format!("✓ Serving ticket {}", ticket).green().bold());
        }

        Commands::Complete { ticket } => {
            let params = json!({ "ticket_number": ticket });
            let result = call_rpc(&cli.rpc_url, "ticket.complete.v1", params).await?;

            println!(
                "{}",
                format!(
                    "✓ Ticket {} completed, counter {} available",
                    ticket, result["counter"]["number"]
                )
                .green()
                .bold()
            );
        }

        Commands::NoShow { ticket } => {
            let params = json!({ "ticket_number": ticket });
            let result = call_rpc(&cli.rpc_url, "ticket.no_show.v1", params).await?;

            println!(
                "{}",
                format!(
                    "✓ Ticket {} marked no-show, counter {} available",
                    ticket, result["counter"]["number"]
                )
                .yellow()
                .bold()
            );
        }

        Commands::Cancel { ticket } => {
            let params = json!({ "ticket_number": ticket });
            call_rpc(&cli.rpc_url, "ticket.cancel.v1", params).await?;

            println!("{}", format!("✓ Ticket {} cancelled", ticket).green().bold());
        }

        Commands::CounterStatus { counter, status } => {
            let params = json!({ "counter": counter, "status": status });
            let result = call_rpc(&cli.rpc_url, "counter.set_status.v1", params).await?;
            let counter: Counter = serde_json::from_value(result)?;

            println!(
                "{}",
                format!("✓ Counter {} is now {}", counter.number, counter.status)
                    .green()
                    .bold()
            );
        }

        Commands::Waiting => {
            let result = call_rpc(&cli.rpc_url, "ticket.waiting.v1", json!({})).await?;
            let tickets: Vec<Ticket> = serde_json::from_value(result)?;

            if tickets.is_empty() {
                println!("{}", "No tickets waiting".yellow());
            } else {
                println!("{}", format!("{} waiting", tickets.len()).cyan().bold());
                print_tickets(tickets);
            }
        }

        Commands::Counters => {
            let result = call_rpc(&cli.rpc_url, "counter.list.v1", json!({})).await?;
            let counters: Vec<Counter> = serde_json::from_value(result)?;
            let rows: Vec<CounterRow> = counters.into_iter().map(CounterRow::from).collect();

            println!("{}", Table::new(rows));
        }

        Commands::Services => {
            let result = call_rpc(&cli.rpc_url, "service.list.v1", json!({})).await?;
            let services: Vec<ServiceRow> = serde_json::from_value(result)?;

            println!("{}", Table::new(services));
        }

        Commands::Status => {
            println!("{}", "System Status".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Waiting:".bold(), stats["total_waiting"]);
                    if let Some(queues) = stats["queues"].as_array() {
                        for queue in queues {
                            println!(
                                "    {} {}",
                                format!("{}:", queue["service_type"].as_str().unwrap_or("?")),
                                queue["waiting"]
                            );
                        }
                    }
                    println!("  {} {}", "At counters:".bold(), stats["at_counters"]);
                    println!();
                    println!("  {} {}", "Available:".bold(), stats["counters_available"]);
                    println!("  {} {}", "Serving:".bold(), stats["counters_serving"]);
                    println!("  {} {}", "On break:".bold(), stats["counters_on_break"]);
                    println!("  {} {}", "Closed:".bold(), stats["counters_closed"]);
                    println!();
                    println!("  {} {}", "Subscribers:".bold(), stats["subscribers"]);
                    println!("  {} {} seconds", "Uptime:".bold(), stats["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
