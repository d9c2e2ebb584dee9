pub mod chain;
pub mod debugger;
pub mod dependency_map;
pub mod entity_deps;
pub mod graph;
pub mod path;
pub mod ports;
pub mod resolver;
