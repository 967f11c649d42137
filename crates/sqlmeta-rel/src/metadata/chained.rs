//! Provider chains

use crate::error::MetadataResult;
use crate::metadata::provider::{
    MetadataProviderRef, RelMetadataProvider, RowCountHandler, SelectivityHandler, ROW_COUNT,
    SELECTIVITY,
};
use crate::node::RelNode;
use log::debug;
use parking_lot::RwLock;
use sqlmeta_dispatch::Dispatcher;

/// Consults providers in registration order.
///
/// A provider is skipped when it does not compute the metric or has no handler for
/// the node's kind. Any other error, ambiguity included, ends the lookup. When every
/// provider that computes the metric misses, the last not-found error is returned.
#[derive(Debug, Default)]
pub struct ChainedMetadataProvider {
    providers: RwLock<Vec<MetadataProviderRef>>,
}

impl ChainedMetadataProvider {
    pub fn new(providers: Vec<MetadataProviderRef>) -> Self {
        Self {
            providers: RwLock::new(providers),
        }
    }

    /// Append a provider; it is consulted after the existing ones
    pub fn add_provider(&self, provider: MetadataProviderRef) {
        debug!("adding metadata provider {}", provider.name());
        self.providers.write().push(provider);
    }

    /// Insert a provider ahead of the existing ones
    pub fn prepend_provider(&self, provider: MetadataProviderRef) {
        debug!("prepending metadata provider {}", provider.name());
        self.providers.write().insert(0, provider);
    }

    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    fn first_handler<H>(
        &self,
        metric: &str,
        rel: &dyn RelNode,
        lookup: impl Fn(&dyn RelMetadataProvider) -> MetadataResult<Option<H>>,
    ) -> MetadataResult<Option<H>> {
        let providers = self.providers.read().clone();
        let mut miss = None;
        for provider in &providers {
            match lookup(provider.as_ref()) {
                Ok(Some(handler)) => return Ok(Some(handler)),
                Ok(None) => {}
                Err(err) if err.is_not_found() => {
                    debug!(
                        "no '{}' handler for {} in {}, trying next provider",
                        metric,
                        rel.kind_name(),
                        provider.name()
                    );
                    miss = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        // A kind no provider covers is reported as the last miss.
        miss.map_or(Ok(None), Err)
    }
}

impl RelMetadataProvider for ChainedMetadataProvider {
    fn name(&self) -> &str {
        "chained"
    }

    fn row_count_handler(
        &self,
        dispatcher: &Dispatcher,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<RowCountHandler>> {
        self.first_handler(ROW_COUNT, rel, |provider| {
            provider.row_count_handler(dispatcher, rel)
        })
    }

    fn selectivity_handler(
        &self,
        dispatcher: &Dispatcher,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<SelectivityHandler>> {
        self.first_handler(SELECTIVITY, rel, |provider| {
            provider.selectivity_handler(dispatcher, rel)
        })
    }
}
