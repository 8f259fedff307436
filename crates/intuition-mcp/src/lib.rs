use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    tool, tool_handler, tool_router, ServerHandler,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use intuition_core::model::{
    AccountData, AtomData, PositionsData, SearchAtomsData, TriplesData, TrustSignalsData,
};
use intuition_core::{render, Network, TrustReport};
use intuition_query::{ClientConfig, IntuitionClient, Operation};

const DEFAULT_LIMIT: u32 = 10;

/// MCP server exposing Intuition knowledge graph lookups to AI agents.
///
/// Each tool call issues a single blocking GraphQL request on tokio's blocking
/// pool; the HTTP client is created and dropped on that thread.
#[derive(Debug, Clone)]
pub struct IntuitionMcpServer {
    config: ClientConfig,
    tool_router: ToolRouter<Self>,
}

impl IntuitionMcpServer {
    /// Create a server whose tools query `config.endpoint` unless a call
    /// names a network explicitly.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn config_for(&self, network: Option<&str>) -> Result<ClientConfig, String> {
        match network {
            None => Ok(self.config.clone()),
            Some(name) => {
                let network: Network = name.parse().map_err(|e| format!("{e}"))?;
                let mut config = ClientConfig::for_network(network);
                config.timeout = self.config.timeout;
                Ok(config)
            }
        }
    }

    async fn query<T, F>(
        &self,
        network: Option<&str>,
        operation: Operation,
        present: F,
    ) -> Result<String, String>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(T) -> String + Send + 'static,
    {
        let config = self.config_for(network)?;
        debug!(operation = operation.name(), endpoint = %config.endpoint, "MCP tool query");

        tokio::task::spawn_blocking(move || {
            let client =
                IntuitionClient::new(config).map_err(|e| format!("Failed to build client: {e}"))?;
            let response = client
                .run(&operation)
                .map_err(|e| format!("Query failed: {e}"))?;
            let data: T = response
                .data()
                .map_err(|e| format!("Unexpected response: {e}"))?;
            Ok(present(data))
        })
        .await
        .map_err(|e| format!("Query task failed: {e}"))?
    }
}

// -- Tool parameter structs --

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Text to match against atom labels (case-insensitive substring)
    pub query: String,
    /// Maximum number of results (default: 10)
    pub limit: Option<u32>,
    /// "mainnet" (default) or "testnet"
    pub network: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AtomParams {
    /// Numeric atom id
    pub atom_id: u64,
    /// "mainnet" (default) or "testnet"
    pub network: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddressParams {
    /// Wallet address or fragment of one
    pub address: String,
    /// "mainnet" (default) or "testnet"
    pub network: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AccountParams {
    /// Full 0x-prefixed wallet address
    pub address: String,
    /// Maximum number of positions (default: 10)
    pub limit: Option<u32>,
    /// "mainnet" (default) or "testnet"
    pub network: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AtomListParams {
    /// Numeric atom id
    pub atom_id: u64,
    /// Maximum number of results (default: 10)
    pub limit: Option<u32>,
    /// "mainnet" (default) or "testnet"
    pub network: Option<String>,
}

// -- Tool implementations --

#[tool_router]
impl IntuitionMcpServer {
    #[tool(
        description = "Search Intuition atoms (entities) by label. Results are ordered by total stake."
    )]
    async fn intuition_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<String, String> {
        let operation = Operation::SearchAtoms {
            term: params.query.clone(),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        };
        self.query(params.network.as_deref(), operation, move |data: SearchAtomsData| {
            if data.atoms.is_empty() {
                return format!("No atoms found matching: {}", params.query);
            }
            format!(
                "Found {} atom(s) matching: {}\n\n{}",
                data.atoms.len(),
                params.query,
                render::render_atom_list(&data.atoms)
            )
        })
        .await
    }

    #[tool(
        description = "Show one atom: label, type, creator, total stake, attestor count and how many claims reference it."
    )]
    async fn intuition_atom(
        &self,
        Parameters(params): Parameters<AtomParams>,
    ) -> Result<String, String> {
        let atom_id = params.atom_id;
        self.query(
            params.network.as_deref(),
            Operation::Atom { atom_id },
            move |data: AtomData| match data.atom {
                Some(atom) => render::render_atom(&atom),
                None => format!("Atom {atom_id} not found."),
            },
        )
        .await
    }

    #[tool(description = "Find atoms whose label or creator matches a wallet address.")]
    async fn intuition_address(
        &self,
        Parameters(params): Parameters<AddressParams>,
    ) -> Result<String, String> {
        let operation = Operation::AtomsByAddress {
            address: params.address,
        };
        self.query(params.network.as_deref(), operation, |data: SearchAtomsData| {
            render::render_atom_list(&data.atoms)
        })
        .await
    }

    #[tool(description = "Look up a wallet account and its largest positions.")]
    async fn intuition_account(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<String, String> {
        let operation = Operation::Account {
            address: params.address.clone(),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        };
        self.query(params.network.as_deref(), operation, move |data: AccountData| {
            match data.account {
                Some(account) => render::render_account(&account),
                None => format!("Account {} not found.", params.address),
            }
        })
        .await
    }

    #[tool(
        description = "List claims (triples) made about an atom, with stake for and against each and its trust ratio."
    )]
    async fn intuition_triples_about(
        &self,
        Parameters(params): Parameters<AtomListParams>,
    ) -> Result<String, String> {
        let operation = Operation::TriplesAbout {
            subject_id: params.atom_id,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        };
        self.query(params.network.as_deref(), operation, |data: TriplesData| {
            render::render_triples(&data.triples)
        })
        .await
    }

    #[tool(description = "List the largest positions (stakes) on an atom.")]
    async fn intuition_positions(
        &self,
        Parameters(params): Parameters<AtomListParams>,
    ) -> Result<String, String> {
        let operation = Operation::Positions {
            atom_id: params.atom_id,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        };
        self.query(params.network.as_deref(), operation, |data: PositionsData| {
            render::render_positions(&data.positions)
        })
        .await
    }

    #[tool(
        description = "Compute a trust assessment for an atom from the stake for and against its top claims. Ratio > 0.8 is strong positive, 0.5-0.8 mixed, < 0.5 negative; no counter stake means unverified."
    )]
    async fn intuition_trust_score(
        &self,
        Parameters(params): Parameters<AtomParams>,
    ) -> Result<String, String> {
        let atom_id = params.atom_id;
        self.query(
            params.network.as_deref(),
            Operation::TrustSignals { atom_id },
            move |data: TrustSignalsData| TrustReport::build(atom_id.to_string(), &data).to_text(),
        )
        .await
    }
}

#[tool_handler]
impl ServerHandler for IntuitionMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Intuition MCP Server - Query the Intuition knowledge graph. \
                 Search entities, inspect claims and stakes, and assess trust from \
                 vault versus counter-vault shares."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Start the MCP server on stdio transport.
pub async fn run_stdio(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::transport::stdio;
    use rmcp::ServiceExt;

    let server = IntuitionMcpServer::new(config);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intuition_testkit::MockEndpoint;
    use std::time::Duration;

    #[test]
    fn test_default_network_keeps_configured_endpoint() {
        let config = ClientConfig::default().with_endpoint("http://localhost:9000/v1/graphql");
        let server = IntuitionMcpServer::new(config.clone());
        assert_eq!(server.config_for(None).unwrap(), config);
    }

    #[test]
    fn test_named_network_keeps_timeout() {
        let config = ClientConfig::default().with_timeout_secs(7);
        let server = IntuitionMcpServer::new(config);
        let testnet = server.config_for(Some("testnet")).unwrap();
        assert_eq!(testnet.endpoint, Network::Testnet.endpoint());
        assert_eq!(testnet.timeout, Duration::from_secs(7));
        assert!(server.config_for(Some("goerli")).is_err());
    }

    #[test]
    fn test_server_info() {
        let server = IntuitionMcpServer::new(ClientConfig::default());
        let info = server.get_info();
        assert!(info.instructions.unwrap().contains("Intuition"));
    }

    fn server_for(endpoint: &MockEndpoint) -> IntuitionMcpServer {
        IntuitionMcpServer::new(
            ClientConfig::default()
                .with_endpoint(endpoint.url())
                .with_timeout_secs(5),
        )
    }

    #[tokio::test]
    async fn test_trust_score_tool() {
        let endpoint = MockEndpoint::ok(
            r#"{"data":{
                "atom":{"term_id":"12345","label":"Uniswap","type":"Thing","vault":{"total_shares":"1000","position_count":2}},
                "triples":[{"id":"1","predicate":{"label":"is"},"object":{"label":"safe"},
                            "vault":{"total_shares":"600"},"counter_vault":{"total_shares":"400"}}],
                "positions":[{"account":{"id":"0xabc","label":"alice.eth"},"shares":"700"}]
            }}"#,
        );
        let server = server_for(&endpoint);

        let text = server
            .intuition_trust_score(Parameters(AtomParams {
                atom_id: 12345,
                network: None,
            }))
            .await
            .unwrap();
        assert!(text.contains("Entity: Uniswap"), "got {text}");
        assert!(text.contains("Trust Ratio: 60.00% (mixed / contested)"), "got {text}");
        assert!(text.contains("  - alice.eth: <0.0001 ETH"), "got {text}");

        let body = endpoint.single_request().json();
        assert!(body["query"].as_str().unwrap().contains("query GetTrustSignals"));
        assert_eq!(body["variables"]["atomId"], 12345);
    }

    #[tokio::test]
    async fn test_search_tool() {
        let endpoint = MockEndpoint::ok(
            r#"{"data":{"atoms":[{"term_id":"42","label":"Uniswap","type":"Thing",
                "vault":{"total_shares":"5420000000000000000000","position_count":87}}]}}"#,
        );
        let server = server_for(&endpoint);

        let text = server
            .intuition_search(Parameters(SearchParams {
                query: "Uniswap".into(),
                limit: Some(3),
                network: None,
            }))
            .await
            .unwrap();
        assert!(text.starts_with("Found 1 atom(s) matching: Uniswap"), "got {text}");
        assert!(text.contains("42  Uniswap [Thing]  5420 ETH staked, 87 position(s)"));

        let body = endpoint.single_request().json();
        assert_eq!(body["variables"]["searchTerm"], "%Uniswap%");
        assert_eq!(body["variables"]["limit"], 3);
    }

    #[tokio::test]
    async fn test_search_tool_no_results() {
        let endpoint = MockEndpoint::ok(r#"{"data":{"atoms":[]}}"#);
        let text = server_for(&endpoint)
            .intuition_search(Parameters(SearchParams {
                query: "nothing".into(),
                limit: None,
                network: None,
            }))
            .await
            .unwrap();
        assert_eq!(text, "No atoms found matching: nothing");
    }

    #[tokio::test]
    async fn test_missing_atom_is_not_an_error() {
        let endpoint = MockEndpoint::ok(r#"{"data":{"atom":null}}"#);
        let text = server_for(&endpoint)
            .intuition_atom(Parameters(AtomParams {
                atom_id: 9,
                network: None,
            }))
            .await
            .unwrap();
        assert_eq!(text, "Atom 9 not found.");
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let endpoint = MockEndpoint::respond(503, r#"{"error":"upstream down"}"#);
        let err = server_for(&endpoint)
            .intuition_positions(Parameters(AtomListParams {
                atom_id: 1,
                limit: None,
                network: None,
            }))
            .await
            .unwrap_err();
        assert!(err.starts_with("Query failed"), "got {err}");
        assert!(err.contains("503"), "got {err}");
    }

    #[tokio::test]
    async fn test_invalid_account_reports_error() {
        let server = IntuitionMcpServer::new(ClientConfig::default());
        let result = server
            .intuition_account(Parameters(AccountParams {
                address: "not-an-address".into(),
                limit: None,
                network: None,
            }))
            .await;
        let err = result.unwrap_err();
        assert!(err.contains("Invalid account address"), "got {err}");
    }
}
