use crate::config::LoaderOptions;
use crate::graph::NodeId;
use crate::multiplex::LayerId;
use crate::partition::CommunityId;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Edge lists keyed by layer id, as written by hand or dumped from a notebook:
/// `{"1": [[1, 2], [2, 3]], "2": [[3, 1]]}`. Edges stay unchecked lists so that the loader
/// can report malformed ones.
pub type RawMultiplex = BTreeMap<LayerId, Vec<Vec<NodeId>>>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unable to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn read_multiplex(path: &Path) -> Result<RawMultiplex, ImportError> {
    read_json(path)
}

pub fn parse_multiplex(contents: &str) -> Result<RawMultiplex, ImportError> {
    Ok(serde_json::from_str(contents)?)
}

/// A community list: `[[1, 4], [2, 3]]` puts nodes 1 and 4 in community 0.
pub fn read_communities(path: &Path) -> Result<Vec<Vec<NodeId>>, ImportError> {
    read_json(path)
}

pub fn read_labels(path: &Path) -> Result<Vec<CommunityId>, ImportError> {
    read_json(path)
}

pub fn read_options(path: &Path) -> Result<LoaderOptions, ImportError> {
    read_json(path)
}
