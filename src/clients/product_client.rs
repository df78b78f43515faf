//! # Product Client
//!
//! High-level API for the `Product` actor. Wraps a `ResourceClient<Product>` and
//! exposes one method per inventory operation, so callers never build actions or
//! match on [`ProductActionResult`] themselves.
use crate::highlight::{classify, AlertTag};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, Settings, Unit};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, QuantityChange};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Persistence(msg) => ProductError::Persistence(msg),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::ActorCommunicationError(other.to_string()),
            },
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Adds an empty product (quantity 0, unit `pcs`) and returns its id.
    #[instrument(skip(self, name))]
    pub async fn add_product(&self, name: impl Into<String> + Send) -> Result<ProductId, ProductError> {
        let params = ProductCreate { name: name.into() };
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn increment(&self, id: ProductId) -> Result<QuantityChange, ProductError> {
        self.quantity_action(id, ProductAction::Increment).await
    }

    /// Removes one unit. At zero nothing changes and `changed` is false.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: ProductId) -> Result<QuantityChange, ProductError> {
        self.quantity_action(id, ProductAction::Decrement).await
    }

    /// Replaces the quantity. Negative values are stored as zero.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, id: ProductId, qty: f64) -> Result<QuantityChange, ProductError> {
        self.quantity_action(id, ProductAction::SetQuantity(qty)).await
    }

    #[instrument(skip(self))]
    pub async fn set_expiry(
        &self,
        id: ProductId,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::SetExpiry(expiry))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Expiry(stored) => Ok(stored),
            other => Err(unexpected_result("SetExpiry", &other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_unit(&self, id: ProductId, unit: Unit) -> Result<Product, ProductError> {
        self.update(
            id,
            ProductUpdate {
                unit: Some(unit),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn rename(&self, id: ProductId, name: String) -> Result<Product, ProductError> {
        self.update(
            id,
            ProductUpdate {
                name: Some(name),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_expiry_alert_days(&self, id: ProductId, days: u32) -> Result<Product, ProductError> {
        self.update(
            id,
            ProductUpdate {
                expiry_alert_days: Some(days),
                ..Default::default()
            },
        )
        .await
    }

    /// Applies a non-quantity edit and returns the updated product.
    #[instrument(skip(self))]
    pub async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Products whose name contains `query`, ignoring case. A blank query returns everything.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ProductError> {
        let products = self.list().await?;
        Ok(products.into_iter().filter(|p| p.matches(query)).collect())
    }

    /// Every product paired with its alert, all classified at the same instant.
    #[instrument(skip(self, settings))]
    pub async fn list_with_alerts(
        &self,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> Result<Vec<(Product, Option<AlertTag>)>, ProductError> {
        let products = self.list().await?;
        Ok(products
            .into_iter()
            .map(|product| {
                let tag = classify(&product, settings, now);
                (product, tag)
            })
            .collect())
    }

    async fn quantity_action(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<QuantityChange, ProductError> {
        debug!(?action, "Sending request");
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Quantity(change) => Ok(change),
            other => Err(unexpected_result("quantity", &other)),
        }
    }
}

fn unexpected_result(action: &str, result: &ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected {action} result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use resource_actor::mock::{create_mock_client, expect_action, expect_create, MockClient};

    fn product(name: &str, previous: f64, current: f64) -> Product {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let mut product = Product::new(ProductId::random(), name, at);
        product.previous_qty = previous;
        product.current_qty = current;
        product
    }

    #[tokio::test]
    async fn test_increment_sends_increment_action() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let id = ProductId::random();

        let task = tokio::spawn(async move { product_client.increment(id).await });

        let (got_id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(got_id, id);
        assert!(matches!(action, ProductAction::Increment));

        let change = QuantityChange {
            previous_qty: 4.0,
            current_qty: 5.0,
            changed: true,
        };
        responder
            .send(Ok(ProductActionResult::Quantity(change)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), change);
    }

    #[tokio::test]
    async fn test_add_product_passes_name_through() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let id = ProductId::random();

        let task = tokio::spawn(async move { product_client.add_product("Jaggery").await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.name, "Jaggery");
        responder.send(Ok(id)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), id);
    }

    #[tokio::test]
    async fn test_entity_errors_keep_their_product_variant() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .set_quantity(ProductId::random(), f64::INFINITY)
                .await
        });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, ProductAction::SetQuantity(q) if q.is_infinite()));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InvalidQuantity(f64::INFINITY),
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::InvalidQuantity(f64::INFINITY))
        );
    }

    #[tokio::test]
    async fn test_framework_errors_map_to_product_errors() {
        let id = ProductId::random();
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(id)
            .return_err(FrameworkError::NotFound(id.to_string()));
        mock.expect_action(id)
            .return_err(FrameworkError::Persistence("disk full".to_string()));
        mock.expect_action(id).return_err(FrameworkError::ActorDropped);

        let client = ProductClient::new(mock.client());
        assert_eq!(
            client.decrement(id).await,
            Err(ProductError::NotFound(id.to_string()))
        );
        assert_eq!(
            client.decrement(id).await,
            Err(ProductError::Persistence("disk full".to_string()))
        );
        assert!(matches!(
            client.decrement(id).await,
            Err(ProductError::ActorCommunicationError(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_search_filters_case_insensitively() {
        let mut mock = MockClient::<Product>::new();
        let products = vec![
            product("Toor Dal", 0.0, 0.0),
            product("Moong Dal", 0.0, 0.0),
            product("Rice", 0.0, 0.0),
        ];
        mock.expect_list().return_ok(products.clone());
        mock.expect_list().return_ok(products);

        let client = ProductClient::new(mock.client());
        let names: Vec<String> = client
            .search("DAL")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Toor Dal", "Moong Dal"]);
        assert_eq!(client.search("  ").await.unwrap().len(), 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_with_alerts_uses_one_instant() {
        let mut mock = MockClient::<Product>::new();
        let mut stale = product("Salt", 5.0, 5.0);
        stale.last_changed -= Duration::days(40);
        mock.expect_list()
            .return_ok(vec![product("Oil", 10.0, 2.0), stale, product("Tea", 1.0, 2.0)]);

        let client = ProductClient::new(mock.client());
        let now = Utc.with_ymd_and_hms(2025, 5, 2, 0, 0, 0).unwrap();
        let tags: Vec<Option<AlertTag>> = client
            .list_with_alerts(&Settings::default(), now)
            .await
            .unwrap()
            .into_iter()
            .map(|(_, tag)| tag)
            .collect();

        assert_eq!(tags, vec![Some(AlertTag::LowStock), Some(AlertTag::Stale), None]);
        mock.verify();
    }
}
