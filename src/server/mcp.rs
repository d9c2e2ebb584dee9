use crate::app::dto::*;
use crate::app::engine::DependencyEngine;
use rmcp::{
    Json, ServerHandler, ServiceExt, handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio,
};
use tokio::task::spawn_blocking;

#[derive(Clone)]
pub struct DepchainMcpServer {
    engine: DependencyEngine,
    tool_router: ToolRouter<Self>,
}

impl DepchainMcpServer {
    pub fn new(engine: DependencyEngine) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

#[tool_router]
impl DepchainMcpServer {
    #[tool(
        description = "Resolve the transitive dependents of one or more property paths (union)."
    )]
    async fn dependency_chain(
        &self,
        params: Parameters<ChainRequest>,
    ) -> Result<Json<ChainResponse>, String> {
        let engine = self.engine.clone();
        let req = params.0;
        spawn_blocking(move || engine.chain(req))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| e.to_string())
    }

    #[tool(description = "List the direct and inverse entity dependencies of an entity.")]
    async fn entity_dependencies(
        &self,
        params: Parameters<DependenciesRequest>,
    ) -> Result<Json<DependenciesResponse>, String> {
        let engine = self.engine.clone();
        let req = params.0;
        spawn_blocking(move || engine.dependencies(req))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| e.to_string())
    }

    #[tool(description = "List dependency cycles in the loaded map.")]
    async fn dependency_cycles(
        &self,
        params: Parameters<CyclesParams>,
    ) -> Result<Json<CyclesResponse>, String> {
        let engine = self.engine.clone();
        let p = params.0;
        spawn_blocking(move || engine.cycles(p.limit))
            .await
            .map_err(|e| format!("task join error: {e}"))?
            .map(Json)
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, rmcp::schemars::JsonSchema)]
pub struct CyclesParams {
    pub limit: Option<usize>,
}

#[tool_handler]
impl ServerHandler for DepchainMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Query dependency chains and entity dependencies of a binding dependency map."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fs::reader::JsonFileSource;
    use crate::config::AppConfig;
    use crate::domain::dependency_map::DependencyMap;
    use std::sync::Arc;

    fn make_engine() -> DependencyEngine {
        let map: DependencyMap = vec![
            ("Api1.data", vec!["Table1.tableData"]),
            ("Table1.tableData", vec!["Text1.text"]),
        ]
        .into_iter()
        .collect();
        DependencyEngine::from_prebuilt(
            Arc::new(JsonFileSource::new("map.json")),
            map,
            &AppConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_mcp_tools_smoke() {
        let server = DepchainMcpServer::new(make_engine());

        let chain = server
            .dependency_chain(Parameters(ChainRequest {
                paths: vec!["Api1.data".into()],
            }))
            .await
            .unwrap()
            .0;
        assert_eq!(chain.chain, vec!["Table1.tableData", "Text1.text"]);

        let deps = server
            .entity_dependencies(Parameters(DependenciesRequest {
                entity: Some("Table1".into()),
            }))
            .await
            .unwrap()
            .0;
        let deps = deps.dependencies.unwrap();
        assert_eq!(deps.direct_dependencies, vec!["Api1"]);
        assert_eq!(deps.inverse_dependencies, vec!["Text1"]);

        let cycles = server
            .dependency_cycles(Parameters(CyclesParams { limit: None }))
            .await
            .unwrap()
            .0;
        assert_eq!(cycles.total, 0);
    }

    #[tokio::test]
    async fn test_mcp_chain_error_is_string() {
        let server = DepchainMcpServer::new(make_engine());
        let res = server
            .dependency_chain(Parameters(ChainRequest { paths: vec![] }))
            .await;
        let Err(err) = res else {
            panic!("expected an error for an empty path list");
        };
        assert!(err.contains("property path"));
    }
}
