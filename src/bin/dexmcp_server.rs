//! DexMCP server
//!
//! A Model Context Protocol server built on the official Rust SDK (rmcp) that
//! exposes the Pokedex tools over stdio.

use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use dexmcp::cli::{init_tracing, CommonArgs};
use dexmcp::mcp_interface::respond;
use dexmcp::moveset::DEFAULT_LIMIT;
use dexmcp::DexClient;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dexmcp-server")]
#[command(author, version, about = "Serve the DexMCP tools over MCP stdio")]
struct ServerArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone)]
pub struct DexMcpService {
    tool_router: ToolRouter<DexMcpService>,
    client: Arc<DexClient>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatureRequest {
    #[schemars(description = "Pokemon name (any case) or national dex number")]
    pub pokemon: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MovesRequest {
    #[schemars(description = "Pokemon name or national dex number")]
    pub pokemon: String,
    #[schemars(description = "Game (version group) identifier, e.g. 'scarlet-violet'")]
    pub game: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SpriteRequest {
    #[schemars(description = "Pokemon name or national dex number")]
    pub pokemon: String,
    #[schemars(description = "'front' or 'back'")]
    #[serde(default = "default_side")]
    pub side: String,
    #[schemars(description = "'default', 'shiny', 'female' or 'female_shiny'")]
    #[serde(default = "default_variant")]
    pub variant: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DescriptionsRequest {
    #[schemars(description = "Pokemon name or national dex number")]
    pub pokemon: String,
    #[schemars(description = "Language code, e.g. 'en'")]
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CoverageRequest {
    #[schemars(description = "Roster of Pokemon names or dex numbers")]
    pub team: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BreedingRequest {
    #[schemars(description = "Pokemon name or national dex number")]
    pub pokemon: String,
    #[schemars(description = "Restrict egg moves to one game; all games when omitted")]
    pub game: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MovesetRequest {
    #[schemars(description = "Pokemon name or national dex number")]
    pub pokemon: String,
    #[schemars(description = "Game (version group) identifier")]
    pub game: String,
    #[schemars(description = "Maximum number of recommendations (default 4)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[schemars(description = "Also consider TM/machine moves")]
    #[serde(default)]
    pub include_tm: bool,
}

fn default_side() -> String {
    "front".to_string()
}

fn default_variant() -> String {
    "default".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[tool_router]
impl DexMcpService {
    pub fn new(client: Arc<DexClient>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    #[tool(description = "Summary stats, typing, height and weight of a Pokemon")]
    async fn get_creature(
        &self,
        Parameters(request): Parameters<CreatureRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::get_pokemon(&self.client, &request.pokemon).await)
    }

    #[tool(description = "Moves a Pokemon learns in one game, with learn method and level")]
    async fn get_moves(
        &self,
        Parameters(request): Parameters<MovesRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::get_moves(&self.client, &request.pokemon, &request.game).await)
    }

    #[tool(description = "Direct sprite image URL for a Pokemon")]
    async fn get_sprite(
        &self,
        Parameters(request): Parameters<SpriteRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            dexmcp::get_sprite(&self.client, &request.pokemon, &request.side, &request.variant)
                .await,
        )
    }

    #[tool(description = "Pokedex flavor text for each game version")]
    async fn get_descriptions(
        &self,
        Parameters(request): Parameters<DescriptionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::get_descriptions(&self.client, &request.pokemon, &request.language).await)
    }

    #[tool(description = "Defensive type coverage for a team: shared weaknesses and resistances")]
    async fn analyze_type_coverage(
        &self,
        Parameters(request): Parameters<CoverageRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::analyze_type_coverage(&self.client, request.team.as_slice()).await)
    }

    #[tool(description = "Abilities of a Pokemon with their effects, including hidden abilities")]
    async fn explore_abilities(
        &self,
        Parameters(request): Parameters<CreatureRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::explore_abilities(&self.client, &request.pokemon).await)
    }

    #[tool(description = "Every evolution path involving a Pokemon, with triggers and conditions")]
    async fn plan_evolutions(
        &self,
        Parameters(request): Parameters<CreatureRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::plan_evolutions(&self.client, &request.pokemon).await)
    }

    #[tool(description = "Where a Pokemon can be encountered in the wild, per game version")]
    async fn find_encounters(
        &self,
        Parameters(request): Parameters<CreatureRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(dexmcp::find_encounters(&self.client, &request.pokemon).await)
    }

    #[tool(description = "Egg groups, hatch steps, gender ratio and egg moves of a Pokemon")]
    async fn get_breeding_info(
        &self,
        Parameters(request): Parameters<BreedingRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            dexmcp::get_breeding_info(&self.client, &request.pokemon, request.game.as_deref())
                .await,
        )
    }

    #[tool(description = "Ranked damaging moves for a Pokemon in one game")]
    async fn suggest_moveset(
        &self,
        Parameters(request): Parameters<MovesetRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            dexmcp::suggest_moveset(
                &self.client,
                &request.pokemon,
                &request.game,
                request.limit,
                request.include_tm,
            )
            .await,
        )
    }
}

#[tool_handler]
impl ServerHandler for DexMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Pokedex lookups backed by PokeAPI. Identify Pokemon by name or national dex number."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse();
    init_tracing(args.common.verbose);

    let config = args.common.resolve_config()?;
    let client = Arc::new(DexClient::from_config(&config)?);
    info!(base_url = client.base_url(), "DexMCP server starting");

    let service = DexMcpService::new(Arc::clone(&client));
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    let quit_reason = server.waiting().await?;

    let stats = client.response_stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        entries = stats.entries,
        "response cache at shutdown"
    );
    info!(?quit_reason, "DexMCP server exiting");
    Ok(())
}
