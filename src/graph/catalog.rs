//! Catalog, feed and product operations.
//!
//! Feed files are pushed with multipart uploads; everything else goes through
//! the generic call path.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use super::{data_member, json_string, GraphApiAdapter, GraphApiError};
use crate::clients::{HttpMethod, RequestParams};

/// Item type sent with catalog batch requests.
pub const CATALOG_BATCH_ITEM_TYPE: &str = "PRODUCT_ITEM";

/// Feed type of promotion feeds.
pub const PROMOTION_FEED_TYPE: &str = "OFFER";

const CATALOG_FEED_FIELDS: &str = "id,file_name,name";

impl GraphApiAdapter {
    /// Lists the product feeds of a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_catalog_feeds(&self, catalog_id: &str) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert("fields", CATALOG_FEED_FIELDS);
        let path = format!("{catalog_id}/product_feeds");
        let response = self.call_json(HttpMethod::Get, &path, params).await?;
        Ok(data_member(response))
    }

    /// Reads a feed node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_feed(&self, feed_id: &str) -> Result<Value, GraphApiError> {
        let params = self.authorized_params(None)?;
        self.call_json(HttpMethod::Get, feed_id, params).await
    }

    /// Creates a feed without a schedule and returns its ID.
    ///
    /// Promotion feeds are created with `feed_type=OFFER`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn create_empty_feed(
        &self,
        catalog_id: &str,
        name: &str,
        is_promotion: bool,
    ) -> Result<Option<String>, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert("name", name);
        if is_promotion {
            params.insert("feed_type", PROMOTION_FEED_TYPE);
        }
        let path = format!("{catalog_id}/product_feeds");
        let response = self.call_json(HttpMethod::Post, &path, params).await?;
        Ok(json_string(&response, "/id"))
    }

    /// Uploads a feed file to an existing feed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError::FileTransfer`] if the file cannot be read, the
    /// upload is rejected, or the answer is not JSON.
    pub async fn push_feed(
        &self,
        feed_id: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Value, GraphApiError> {
        let path = format!("{feed_id}/uploads");
        self.transfer_file(&path, RequestParams::new(), file_path.as_ref())
            .await
    }

    /// Uploads a product feed file. Same as [`push_feed`](Self::push_feed).
    ///
    /// # Errors
    ///
    /// See [`push_feed`](Self::push_feed).
    pub async fn push_product_feed(
        &self,
        feed_id: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Value, GraphApiError> {
        self.push_feed(feed_id, file_path).await
    }

    /// Uploads a file to a commerce partner integration.
    ///
    /// `update_time` is set to the current Unix time.
    ///
    /// # Errors
    ///
    /// See [`push_feed`](Self::push_feed).
    pub async fn upload_file(
        &self,
        integration_id: &str,
        file_path: impl AsRef<Path>,
        feed_type: &str,
        update_type: &str,
    ) -> Result<Value, GraphApiError> {
        let mut params = RequestParams::new();
        params.insert("feed_type", feed_type);
        params.insert("update_type", update_type);
        params.insert("update_time", chrono::Utc::now().timestamp());
        let path = format!("{integration_id}/file_update");
        self.transfer_file(&path, params, file_path.as_ref()).await
    }

    /// Sends item updates to a catalog in one `items_batch` call.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held, `requests` cannot be
    /// encoded, or the request fails.
    pub async fn catalog_batch_request<T: Serialize + ?Sized + Sync>(
        &self,
        catalog_id: &str,
        requests: &T,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert_json("requests", requests)?;
        params.insert("item_type", CATALOG_BATCH_ITEM_TYPE);
        let path = format!("{catalog_id}/items_batch");
        self.call_json(HttpMethod::Post, &path, params).await
    }

    /// Reads the price of a product.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_product_info(&self, fb_product_id: &str) -> Result<Value, GraphApiError> {
        self.get_node_fields(fb_product_id, "price").await
    }

    /// Looks up catalog products by the merchant's retailer ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_product_by_retailer_id(
        &self,
        catalog_id: &str,
        retailer_id: &str,
    ) -> Result<Value, GraphApiError> {
        let filter = json!({ "retailer_id": { "eq": retailer_id } });
        self.get_catalog_products(catalog_id, &filter).await
    }

    /// Looks up catalog products by their Meta product IDs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_products_by_facebook_product_ids<S: AsRef<str>>(
        &self,
        catalog_id: &str,
        fb_product_ids: &[S],
    ) -> Result<Value, GraphApiError> {
        let ids: Vec<&str> = fb_product_ids.iter().map(AsRef::as_ref).collect();
        let filter = json!({ "product_item_id": { "is_any": ids } });
        self.get_catalog_products(catalog_id, &filter).await
    }

    /// Reads the ingestion errors of a product.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_product_errors(&self, fb_product_id: &str) -> Result<Value, GraphApiError> {
        self.get_node_fields(fb_product_id, "errors").await
    }

    /// Reads the diagnostics of a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_catalog_diagnostics(&self, catalog_id: &str) -> Result<Value, GraphApiError> {
        self.get_node_fields(catalog_id, "diagnostics").await
    }

    async fn get_node_fields(&self, node_id: &str, fields: &str) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert("fields", fields);
        self.call_json(HttpMethod::Get, node_id, params).await
    }

    async fn get_catalog_products(
        &self,
        catalog_id: &str,
        filter: &Value,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert_json("filter", filter)?;
        let path = format!("{catalog_id}/products");
        self.call_json(HttpMethod::Get, &path, params).await
    }
}
