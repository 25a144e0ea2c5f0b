//! QueueDesk Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    CallNextResponse, CancelResponse, Counter, CounterStatus, ReleaseResponse, ServiceType,
    StatsResponse, Ticket,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// QueueDesk Client
///
/// Provides a high-level interface to the QueueDesk daemon.
///
/// # Example
///
/// ```no_run
/// use queuedesk_sdk::QueueDeskClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QueueDeskClient::connect("http://127.0.0.1:9630").await?;
/// let ticket = client.create_ticket("general").await?;
/// println!("Your number: {}", ticket.number);
/// # Ok(())
/// # }
/// ```
pub struct QueueDeskClient {
    client: HttpClient,
}

impl QueueDeskClient {
    /// Connect to the QueueDesk daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9630`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Draw a ticket for a service type
    pub async fn create_ticket(&self, service_type: impl Into<String>) -> Result<Ticket> {
        self.call("ticket.create.v1", &[("service_type", service_type.into())])
            .await
    }

    /// Call the next eligible ticket to `counter`
    ///
    /// `Ok(None)` when nothing is waiting for that counter.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use queuedesk_sdk::QueueDeskClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = QueueDeskClient::connect("http://127.0.0.1:9630").await?;
    /// match client.call_next(1).await? {
    ///     Some(ticket) => println!("Now serving {}", ticket.number),
    ///     None => println!("Queue is empty"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call_next(&self, counter: u32) -> Result<Option<Ticket>> {
        let response: CallNextResponse =
            self.call("counter.call_next.v1", &[("counter", counter)]).await?;
        Ok(response.ticket)
    }

    /// Called -> Serving
    pub async fn begin_service(&self, ticket_number: impl Into<String>) -> Result<Ticket> {
        self.call("ticket.begin.v1", &[("ticket_number", ticket_number.into())])
            .await
    }

    /// Finish the ticket at its counter
    pub async fn complete(&self, ticket_number: impl Into<String>) -> Result<ReleaseResponse> {
        self.call("ticket.complete.v1", &[("ticket_number", ticket_number.into())])
            .await
    }

    pub async fn mark_no_show(&self, ticket_number: impl Into<String>) -> Result<ReleaseResponse> {
        self.call("ticket.no_show.v1", &[("ticket_number", ticket_number.into())])
            .await
    }

    /// Withdraw a waiting ticket
    pub async fn cancel(&self, ticket_number: impl Into<String>) -> Result<CancelResponse> {
        self.call("ticket.cancel.v1", &[("ticket_number", ticket_number.into())])
            .await
    }

    /// Look up a waiting or called ticket
    pub async fn ticket(&self, ticket_number: impl Into<String>) -> Result<Ticket> {
        self.call("ticket.get.v1", &[("ticket_number", ticket_number.into())])
            .await
    }

    pub async fn waiting(&self) -> Result<Vec<Ticket>> {
        Ok(self.client.request("ticket.waiting.v1", rpc_params![]).await?)
    }

    pub async fn set_counter_status(&self, counter: u32, status: CounterStatus) -> Result<Counter> {
        let mut params = ObjectParams::new();
        params.insert("counter", counter)?;
        params.insert("status", status)?;
        Ok(self.client.request("counter.set_status.v1", params).await?)
    }

    pub async fn counters(&self) -> Result<Vec<Counter>> {
        Ok(self.client.request("counter.list.v1", rpc_params![]).await?)
    }

    pub async fn service_types(&self) -> Result<Vec<ServiceType>> {
        Ok(self.client.request("service.list.v1", rpc_params![]).await?)
    }

    pub async fn stats(&self) -> Result<StatsResponse> {
        Ok(self.client.request("admin.stats.v1", rpc_params![]).await?)
    }

    /// Call `method` with named params
    async fn call<T, V>(&self, method: &str, fields: &[(&str, V)]) -> Result<T>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let mut params = ObjectParams::new();
        for (name, value) in fields {
            params.insert(name, value)?;
        }
        Ok(self.client.request(method, params).await?)
    }
}
