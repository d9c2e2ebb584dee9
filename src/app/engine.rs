use crate::adapters::fs::reader::JsonFileSource;
use crate::adapters::path::dot::DotPathScheme;
use crate::app::dto::*;
use crate::config::AppConfig;
use crate::domain::dependency_map::DependencyMap;
use crate::domain::entity_deps::EntityDependencyScanner;
use crate::domain::graph::DependencyGraph;
use crate::domain::ports::{DependencyMapSource, PathScheme};
use crate::domain::resolver::DependencyChainResolver;
use anyhow::{Result, anyhow, bail};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone)]
pub struct DependencyEngine {
    inner: Arc<RwLock<EngineData>>,
}

struct EngineData {
    source: Arc<dyn DependencyMapSource>,
    map: Arc<DependencyMap>,
    edge_count: usize,
    cycles: Vec<Vec<String>>,
    scheme: Arc<dyn PathScheme>,
    excluded_entities: Vec<String>,
}

impl EngineData {
    fn new(
        source: Arc<dyn DependencyMapSource>,
        map: DependencyMap,
        scheme: Arc<dyn PathScheme>,
        excluded_entities: Vec<String>,
    ) -> Self {
        let graph = DependencyGraph::from_map(&map);
        Self {
            source,
            edge_count: graph.edge_count(),
            cycles: graph.cycles(),
            map: Arc::new(map),
            scheme,
            excluded_entities,
        }
    }

    fn health(&self) -> HealthResponse {
        HealthResponse {
            map_path: self.source.describe(),
            path_count: self.map.len(),
            edge_count: self.edge_count,
            cycle_count: self.cycles.len(),
        }
    }
}

impl DependencyEngine {
    /// Construct an engine from an already-loaded map.
    ///
    /// `source` is still used by [`reload`](Self::reload).
    pub fn from_prebuilt(
        source: Arc<dyn DependencyMapSource>,
        map: DependencyMap,
        config: &AppConfig,
    ) -> Self {
        let data = EngineData::new(
            source,
            map,
            Arc::new(DotPathScheme),
            config.excluded_entities.clone(),
        );
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    pub fn load(source: Arc<dyn DependencyMapSource>, config: &AppConfig) -> Result<Self> {
        let map = source.load()?;
        let engine = Self::from_prebuilt(source, map, config);
        let health = engine.health()?;
        tracing::info!(
            map = %health.map_path,
            paths = health.path_count,
            edges = health.edge_count,
            cycles = health.cycle_count,
            "dependency map loaded"
        );
        Ok(engine)
    }

    pub fn load_from_json(path: &std::path::Path, config: &AppConfig) -> Result<Self> {
        Self::load(Arc::new(JsonFileSource::new(path)), config)
    }

    /// Re-read the map from its source and swap it in.
    ///
    /// On failure the previous map stays active.
    pub fn reload(&self) -> Result<HealthResponse> {
        let (source, scheme, excluded) = {
            let data = self.read()?;
            (
                data.source.clone(),
                data.scheme.clone(),
                data.excluded_entities.clone(),
            )
        };
        let map = source.load()?;
        let fresh = EngineData::new(source, map, scheme, excluded);

        let mut data = self.write()?;
        *data = fresh;
        let health = data.health();
        tracing::info!(
            paths = health.path_count,
            edges = health.edge_count,
            "dependency map reloaded"
        );
        Ok(health)
    }

    pub fn health(&self) -> Result<HealthResponse> {
        Ok(self.read()?.health())
    }

    pub fn map(&self) -> Result<Arc<DependencyMap>> {
        Ok(self.read()?.map.clone())
    }

    pub fn chain(&self, req: ChainRequest) -> Result<ChainResponse> {
        if req.paths.is_empty() {
            bail!("at least one property path is required");
        }
        let data = self.read()?;
        let resolver = DependencyChainResolver::new(data.scheme.as_ref());
        let chain = resolver.resolve_all(req.paths.as_slice(), &data.map).into_vec();
        tracing::debug!(roots = req.paths.len(), length = chain.len(), "chain resolved");

        Ok(ChainResponse {
            paths: req.paths,
            length: chain.len(),
            chain,
        })
    }

    pub fn dependencies(&self, req: DependenciesRequest) -> Result<DependenciesResponse> {
        let data = self.read()?;
        let scanner = EntityDependencyScanner::new(data.scheme.as_ref(), &data.excluded_entities);
        let dependencies = scanner
            .scan(&data.map, req.entity.as_deref())
            .map(|deps| EntityDependenciesDto {
                direct_dependencies: deps.direct_dependencies,
                inverse_dependencies: deps.inverse_dependencies,
            });

        Ok(DependenciesResponse {
            entity: req.entity,
            dependencies,
        })
    }

    pub fn cycles(&self, limit: Option<usize>) -> Result<CyclesResponse> {
        let data = self.read()?;
        let total = data.cycles.len();
        let shown = limit.unwrap_or(total).min(total);
        Ok(CyclesResponse {
            total,
            cycles: data.cycles[..shown].to_vec(),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, EngineData>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("engine state lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, EngineData>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("engine state lock poisoned"))
    }
}
