//! Reading route records and route collections from local files.

use crate::collection::RouteCollection;
use crate::route::RouteConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Unsupported file type: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("{} does not contain route objects: {source}", .path.display())]
    Shape {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a JSON or YAML file into a generic document.
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&content, path),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one route or an array of routes.
pub fn load_routes(path: &Path) -> Result<Vec<RouteConfig>, LoadError> {
    let document = read_document(path)?;
    let routes = routes_from_value(document).map_err(|source| LoadError::Shape {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = routes.len(), "loaded routes");
    Ok(routes)
}

/// Interpret a document as one route or an array of routes.
pub fn routes_from_value(value: Value) -> Result<Vec<RouteConfig>, serde_json::Error> {
    match value {
        Value::Array(items) => items.into_iter().map(RouteConfig::from_value).collect(),
        other => RouteConfig::from_value(other).map(|route| vec![route]),
    }
}

/// Load the existing route collection from a routes file or a full proxy
/// configuration document.
pub fn load_collection(path: &Path) -> Result<RouteCollection, LoadError> {
    let document = read_document(path)?;
    let collection = RouteCollection::from_value(document).map_err(|source| LoadError::Shape {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = collection.len(), "loaded route collection");
    Ok(collection)
}
