use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::resolve::RegionCache;
use crate::riot::RiotApi;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub riot: Arc<dyn RiotApi>,
    pub region_cache: Option<Arc<RegionCache>>,
    /// Matches fetched when a search doesn't ask for a count
    pub match_count: u32,
    pub static_dir: PathBuf,
}
