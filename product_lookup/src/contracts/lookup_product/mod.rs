mod api_access;

pub use api_access::HttpProductLookup;

use crate::display::{display_product_details, DisplaySurface};
use crate::errors::LookupError;
use crate::notification::Notifier;
use crate::product::{Product, ProductId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[async_trait]
pub trait LookupProduct: Send + Sync {
    /// `Ok(None)` when the service knows no such product.
    async fn get_product(&self, id: &ProductId) -> anyhow::Result<Option<Product>>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum LookupOutcome {
    Rendered(Product),
    NotFound,
    Failed,
    /// A newer lookup started before this one's response arrived.
    Superseded,
}

/// Runs lookups against `service` and presents the result on `surface`.
///
/// Every lookup draws a generation number. A response is applied only while
/// its generation is still the latest, so overlapping lookups settle on the
/// one the user started last.
pub struct LookupHandler<S> {
    service: Arc<dyn LookupProduct>,
    notifier: Arc<dyn Notifier>,
    surface: Mutex<S>,
    generation: AtomicU64,
}

impl<S: DisplaySurface> LookupHandler<S> {
    pub fn new(service: Arc<dyn LookupProduct>, notifier: Arc<dyn Notifier>, surface: S) -> Self {
        Self {
            service,
            notifier,
            surface: Mutex::new(surface),
            generation: AtomicU64::new(0),
        }
    }

    pub fn surface(&self) -> MutexGuard<'_, S> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[tracing::instrument(skip(self), fields(generation = tracing::field::Empty))]
    pub async fn lookup(&self, id: ProductId) -> LookupOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("generation", generation);

        let result = match self.service.get_product(&id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(LookupError::NotFound(id)),
            Err(err) => Err(LookupError::RequestFailed(err)),
        };

        self.present(generation, result)
    }

    fn present(&self, generation: u64, result: Result<Product, LookupError>) -> LookupOutcome {
        let mut surface = self.surface();
        // Checked under the surface lock so a newer lookup cannot apply in between.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding response superseded by a newer lookup");
            return LookupOutcome::Superseded;
        }

        match result {
            Ok(product) => {
                display_product_details(&mut *surface, Some(&product));
                LookupOutcome::Rendered(product)
            }
            Err(err) => {
                display_product_details(&mut *surface, None);
                drop(surface);
                self.report(err)
            }
        }
    }

    fn report(&self, err: LookupError) -> LookupOutcome {
        let outcome = match &err {
            LookupError::NotFound(id) => {
                tracing::info!(%id, "No product found");
                LookupOutcome::NotFound
            }
            LookupError::RequestFailed(cause) => {
                tracing::error!(error = ?cause, "Error fetching product");
                LookupOutcome::Failed
            }
        };
        self.notifier.alert(err.alert());
        outcome
    }
}
