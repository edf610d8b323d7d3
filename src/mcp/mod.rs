//! MCP server implementation for docsearch.
//!
//! Exposes keyword search and selection lookup as MCP tools for AI editors.

use std::borrow::Cow;
use std::fmt::Write;
use std::path::PathBuf;

use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData as McpError, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::Deserialize;

use crate::cli::QueryArgs;
use crate::commands;
use crate::search::MatchMode;

/// Parameters for `search_keywords` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "The query; every word must match the tag, title, or keywords")]
    pub query: String,
    #[schemars(description = "Maximum number of results (default: 100)")]
    pub max_list: Option<usize>,
    #[schemars(description = "Treat query words as literal text instead of patterns (default: false)")]
    pub literal: Option<bool>,
}

/// Parameters for `resolve_selection` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveParams {
    #[schemars(description = "The query whose result list is selected in")]
    pub query: String,
    #[schemars(description = "Selection start, as a character offset into the title list")]
    pub start: usize,
    #[schemars(description = "Selection end (default: same as start)")]
    pub end: Option<usize>,
}

/// Parameters for `list_keywords` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListParams {}

/// MCP server exposing docsearch tools.
#[derive(Clone)]
pub struct DocsearchServer {
    index: Option<PathBuf>,
    tool_router: ToolRouter<Self>,
}

fn internal_error(context: &str, e: &anyhow::Error) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(format!("{context}: {e:#}")),
        data: None,
    }
}

#[tool_router]
impl DocsearchServer {
    #[must_use]
    pub fn new(index: Option<PathBuf>) -> Self {
        Self {
            index,
            tool_router: Self::tool_router(),
        }
    }

    fn query_args(&self) -> QueryArgs {
        QueryArgs {
            index: self.index.clone(),
            ..QueryArgs::default()
        }
    }

    #[tool(description = "Filter the documentation keyword index with a query")]
    async fn search_keywords(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let args = QueryArgs {
            max_list: params.max_list,
            mode: params.literal.unwrap_or(false).then_some(MatchMode::Literal),
            ..self.query_args()
        };

        let results = commands::search(&params.query, &args)
            .map_err(|e| internal_error("Search failed", &e))?;

        if results.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(format!(
                "No matches found for '{}'",
                params.query
            ))]));
        }

        let mut output = String::new();
        for (row, (tag, title)) in results.rows().enumerate() {
            let _ = writeln!(output, "{row}. **{tag}**: {title}");
        }
        let _ = write!(output, "*{} result(s) found*", results.len());

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(description = "Resolve a selection in a query's rendered title list to its entry")]
    async fn resolve_selection(
        &self,
        Parameters(params): Parameters<ResolveParams>,
    ) -> Result<CallToolResult, McpError> {
        let resolution =
            commands::resolve(&params.query, params.start, params.end, &self.query_args())
                .map_err(|e| internal_error("Resolve failed", &e))?;

        let output = match (resolution.tag, resolution.target) {
            (Some(tag), Some(target)) => format!(
                "- **Tag:** {tag}\n- **Row:** {}\n- **Target:** {}",
                resolution.line.row, target.location
            ),
            _ => format!("No entry at row {}", resolution.line.row),
        };

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(description = "List every entry in the documentation keyword index")]
    async fn list_keywords(
        &self,
        Parameters(_params): Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        let entries =
            commands::list(self.index.clone()).map_err(|e| internal_error("List failed", &e))?;

        if entries.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "No entries found.".to_string(),
            )]));
        }

        let mut output = String::new();
        for entry in &entries {
            let _ = writeln!(output, "- **{}**: {}", entry.tag, entry.title);
        }

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }
}

#[tool_handler]
impl ServerHandler for DocsearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "docsearch searches a documentation keyword index. \
                Use search_keywords to filter entries, resolve_selection to map a row \
                of the result list to its page, and list_keywords to browse."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Start the MCP server with stdio transport.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a fatal error.
pub async fn serve(index: Option<PathBuf>) -> anyhow::Result<()> {
    let server = DocsearchServer::new(index);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
