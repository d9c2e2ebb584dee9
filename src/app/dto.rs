use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub map_path: String,
    /// Keyed entries in the map.
    pub path_count: usize,
    pub edge_count: usize,
    pub cycle_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChainRequest {
    /// Property paths to resolve; chains are unioned in order.
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChainResponse {
    pub paths: Vec<String>,
    pub chain: Vec<String>,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DependenciesRequest {
    pub entity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DependenciesResponse {
    pub entity: Option<String>,
    /// `None` when no entity was given.
    pub dependencies: Option<EntityDependenciesDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntityDependenciesDto {
    pub direct_dependencies: Vec<String>,
    pub inverse_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CyclesResponse {
    pub total: usize,
    pub cycles: Vec<Vec<String>>,
}
