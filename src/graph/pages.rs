//! Page and business onboarding operations.

use serde_json::Value;

use super::{json_string, GraphApiAdapter, GraphApiError};
use crate::clients::HttpMethod;
use crate::config::AccessToken;
use crate::graph::CommerceAccountData;

/// Origin of commerce extension URLs served by the Graph API.
pub const COMMERCE_PARTNER_HUB_URL: &str = "https://www.commercepartnerhub.com/";

impl GraphApiAdapter {
    /// Returns the access token of the first page the user manages.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if the request fails.
    pub async fn get_page_token_from_user_token(
        &self,
        user_token: &AccessToken,
    ) -> Result<Option<String>, GraphApiError> {
        let params = self.authorized_params(Some(user_token))?;
        let response = self.call_json(HttpMethod::Get, "me/accounts", params).await?;
        Ok(json_string(&response, "/data/0/access_token"))
    }

    /// Returns the ID of the first page the user manages.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if the request fails.
    pub async fn get_page_id_from_user_token(
        &self,
        user_token: &AccessToken,
    ) -> Result<Option<String>, GraphApiError> {
        let params = self.authorized_params(Some(user_token))?;
        let response = self.call_json(HttpMethod::Get, "me/accounts", params).await?;
        Ok(json_string(&response, "/data/0/id"))
    }

    /// Returns the access token of `page_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if the request fails.
    pub async fn get_page_access_token(
        &self,
        access_token: &AccessToken,
        page_id: &str,
    ) -> Result<Option<String>, GraphApiError> {
        let mut params = self.authorized_params(Some(access_token))?;
        params.insert("fields", "access_token");
        let response = self.call_json(HttpMethod::Get, page_id, params).await?;
        Ok(json_string(&response, "/access_token"))
    }

    /// Returns the commerce merchant settings ID of a page.
    ///
    /// Without `page_id` the token's own node (`me`) is queried.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is available or the request fails.
    pub async fn get_page_merchant_settings_id(
        &self,
        access_token: Option<&AccessToken>,
        page_id: Option<&str>,
    ) -> Result<Option<String>, GraphApiError> {
        let mut params = self.authorized_params(access_token)?;
        params.insert("fields", "commerce_merchant_settings");
        let response = self
            .call_json(HttpMethod::Get, page_id.unwrap_or("me"), params)
            .await?;
        Ok(json_string(&response, "/commerce_merchant_settings/data/0/id"))
    }

    /// Returns the URL of the commerce extension iframe for a business.
    ///
    /// When an extension base URL is configured it replaces the Commerce
    /// Partner Hub origin in the returned URL.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is available or the request fails.
    pub async fn get_commerce_extension_iframe_url(
        &self,
        external_business_id: &str,
        access_token: Option<&AccessToken>,
    ) -> Result<Option<String>, GraphApiError> {
        let mut params = self.authorized_params(access_token)?;
        params.insert("fields", "commerce_extension");
        params.insert("fbe_external_business_id", external_business_id);
        let response = self.call_json(HttpMethod::Get, "fbe_business", params).await?;

        let uri = json_string(&response, "/commerce_extension/uri");
        Ok(uri.map(|uri| self.rewrite_extension_url(&uri)))
    }

    /// Returns the page and first catalog linked to a commerce account.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is available or the request fails.
    pub async fn get_commerce_account_data(
        &self,
        commerce_account_id: &str,
        access_token: Option<&AccessToken>,
    ) -> Result<CommerceAccountData, GraphApiError> {
        let mut params = self.authorized_params(access_token)?;
        params.insert("fields", "merchant_page,product_catalogs");
        let response = self
            .call_json(HttpMethod::Get, commerce_account_id, params)
            .await?;

        Ok(CommerceAccountData {
            page_id: json_string(&response, "/merchant_page/id"),
            catalog_id: json_string(&response, "/product_catalogs/data/0/id"),
        })
    }

    /// Registers this app as the order manager of a commerce account.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is available or the request fails.
    pub async fn associate_merchant_settings_with_app(
        &self,
        commerce_account_id: &str,
        access_token: Option<&AccessToken>,
    ) -> Result<Value, GraphApiError> {
        let params = self.authorized_params(access_token)?;
        let path = format!("{commerce_account_id}/order_management_apps");
        self.call_json(HttpMethod::Post, &path, params).await
    }

    /// Returns the FBE installations of a business.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError::InvalidJson`] if the body is not JSON, or
    /// another [`GraphApiError`] if the request fails.
    pub async fn get_fbe_installs(
        &self,
        access_token: &AccessToken,
        external_business_id: &str,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(Some(access_token))?;
        params.insert("fbe_external_business_id", external_business_id);
        self.call_json(HttpMethod::Get, "/fbe_business/fbe_installs", params)
            .await
    }

    fn rewrite_extension_url(&self, uri: &str) -> String {
        match self.config.extension_base_url() {
            Some(base) => uri.replace(COMMERCE_PARTNER_HUB_URL, base),
            None => uri.to_string(),
        }
    }
}
