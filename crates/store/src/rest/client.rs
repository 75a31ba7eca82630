//! HTTP client for the remote wallet API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode, header};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::debug;

use arta_core::ledger::{Account, AccountDraft, EntryDraft, LedgerEntry};
use arta_core::schedule::{BudgetConfig, PeriodKey, Subscription, SubscriptionDraft};
use arta_core::streak::StreakLedger;
use arta_shared::config::ApiConfig;
use arta_shared::types::{AccountId, EntryId, SubscriptionId};

use crate::error::StoreError;
use crate::traits::{AccountStore, BudgetStore, EntryStore, StreakStore, SubscriptionStore};

use super::wire::{
    AccountAmountPatch, AccountPayload, AccountRecord, BudgetRecord, BulkDeletePayload,
    EntryPayload, EntryRecord, LastProcessedPatch, NextPaymentPatch, StreakRecord,
    SubscriptionPayload, SubscriptionRecord,
};

/// REST implementation of the store traits.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Builds a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    /// (e.g. the configured token is not a valid header value).
    pub fn new(config: &ApiConfig) -> Result<Self, StoreError> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {token}")).map_err(
                |err| StoreError::Transport {
                    endpoint: config.base_url.clone(),
                    message: format!("invalid API token: {err}"),
                },
            )?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| StoreError::Transport {
                endpoint: config.base_url.clone(),
                message: err.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn transport_error(endpoint: &str, err: &reqwest::Error) -> StoreError {
        StoreError::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    /// Maps non-success statuses to errors, capturing the body for
    /// diagnostics.
    async fn check(response: Response, endpoint: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(endpoint.to_string()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::UnexpectedStatus {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> Result<T, StoreError> {
        response.json().await.map_err(|err| StoreError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl EntryStore for RestStore {
    async fn create_entry(&self, draft: EntryDraft) -> Result<LedgerEntry, StoreError> {
        let endpoint = self.url("wallet/transactions/");
        debug!(%endpoint, "creating ledger entry");
        let response = self
            .http
            .post(&endpoint)
            .json(&EntryPayload::from(&draft))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let record: EntryRecord = Self::decode(response, &endpoint).await?;
        Ok(record.into())
    }

    async fn get_entry(&self, id: &EntryId) -> Result<Option<LedgerEntry>, StoreError> {
        let endpoint = self.url(&format!("wallet/transactions/{id}/"));
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        match Self::check(response, &endpoint).await {
            Ok(response) => {
                let record: EntryRecord = Self::decode(response, &endpoint).await?;
                Ok(Some(record.into()))
            }
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list_entries(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let endpoint = self.url("wallet/transactions/");
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let records: Vec<EntryRecord> = Self::decode(response, &endpoint).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn update_entry(&self, id: &EntryId, draft: EntryDraft) -> Result<(), StoreError> {
        let endpoint = self.url(&format!("wallet/transactions/{id}/"));
        debug!(%endpoint, "replacing ledger entry");
        let response = self
            .http
            .put(&endpoint)
            .json(&EntryPayload::from(&draft))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }

    async fn delete_entry(&self, id: &EntryId) -> Result<(), StoreError> {
        let endpoint = self.url(&format!("wallet/transactions/{id}/"));
        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }

    async fn delete_entries(&self, ids: &[EntryId]) -> Result<(), StoreError> {
        let endpoint = self.url("wallet/transactions/bulk-delete/");
        debug!(%endpoint, count = ids.len(), "bulk-deleting ledger entries");
        let payload = BulkDeletePayload {
            ids: ids.iter().map(|id| id.as_str().to_string()).collect(),
        };
        let response = self
            .http
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for RestStore {
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, StoreError> {
        let endpoint = self.url("wallet/vision/");
        let response = self
            .http
            .post(&endpoint)
            .json(&AccountPayload::from(&draft))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let record: AccountRecord = Self::decode(response, &endpoint).await?;
        Ok(record.into())
    }

    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let endpoint = self.url(&format!("wallet/vision/{id}/"));
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        match Self::check(response, &endpoint).await {
            Ok(response) => {
                let record: AccountRecord = Self::decode(response, &endpoint).await?;
                Ok(Some(record.into()))
            }
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let endpoint = self.url("wallet/vision/");
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let records: Vec<AccountRecord> = Self::decode(response, &endpoint).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn update_account_amount(
        &self,
        id: &AccountId,
        amount: Decimal,
    ) -> Result<Account, StoreError> {
        let endpoint = self.url(&format!("wallet/vision/{id}/"));
        debug!(%endpoint, %amount, "updating account balance");
        let response = self
            .http
            .patch(&endpoint)
            .json(&AccountAmountPatch { amount })
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let record: AccountRecord = Self::decode(response, &endpoint).await?;
        Ok(record.into())
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), StoreError> {
        let endpoint = self.url(&format!("wallet/vision/{id}/"));
        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for RestStore {
    async fn load_budget(&self) -> Result<BudgetConfig, StoreError> {
        let endpoint = self.url("wallet/budget/current/");
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        match Self::check(response, &endpoint).await {
            Ok(response) => {
                let record: BudgetRecord = Self::decode(response, &endpoint).await?;
                Ok(record.into())
            }
            // Never configured: start from the default.
            Err(StoreError::NotFound(_)) => Ok(BudgetConfig::default()),
            Err(err) => Err(err),
        }
    }

    async fn save_budget(&self, config: &BudgetConfig) -> Result<(), StoreError> {
        let endpoint = self.url("wallet/budget/current/");
        let response = self
            .http
            .put(&endpoint)
            .json(&BudgetRecord::from(config))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }

    async fn reset_budget(&self) -> Result<(), StoreError> {
        let endpoint = self.url("wallet/budget/current/");
        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }

    async fn set_last_processed(&self, period: PeriodKey) -> Result<(), StoreError> {
        let endpoint = self.url("wallet/budget/current/");
        debug!(%endpoint, %period, "advancing budget cursor");
        let response = self
            .http
            .patch(&endpoint)
            .json(&LastProcessedPatch {
                last_processed: period,
            })
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl SubscriptionStore for RestStore {
    async fn create_subscription(
        &self,
        draft: SubscriptionDraft,
    ) -> Result<Subscription, StoreError> {
        let endpoint = self.url("wallet/subscriptions/");
        let response = self
            .http
            .post(&endpoint)
            .json(&SubscriptionPayload::from(&draft))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let record: SubscriptionRecord = Self::decode(response, &endpoint).await?;
        Ok(record.into())
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        let endpoint = self.url("wallet/subscriptions/");
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        let response = Self::check(response, &endpoint).await?;
        let records: Vec<SubscriptionRecord> = Self::decode(response, &endpoint).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn update_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        let endpoint = self.url(&format!("wallet/subscriptions/{}/", subscription.id));
        let response = self
            .http
            .put(&endpoint)
            .json(&SubscriptionPayload::from(subscription))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }

    async fn delete_subscription(&self, id: &SubscriptionId) -> Result<(), StoreError> {
        let endpoint = self.url(&format!("wallet/subscriptions/{id}/"));
        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }

    async fn set_next_payment_date(
        &self,
        id: &SubscriptionId,
        date: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let endpoint = self.url(&format!("wallet/subscriptions/{id}/"));
        debug!(%endpoint, %date, "advancing subscription due date");
        let response = self
            .http
            .patch(&endpoint)
            .json(&NextPaymentPatch {
                next_payment_date: date,
            })
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl StreakStore for RestStore {
    async fn load_streak_ledger(&self) -> Result<StreakLedger, StoreError> {
        let endpoint = self.url("wallet/gamification/current/");
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        match Self::check(response, &endpoint).await {
            Ok(response) => {
                let record: StreakRecord = Self::decode(response, &endpoint).await?;
                Ok(record.into())
            }
            // New user: full set of freezes, no repaired days.
            Err(StoreError::NotFound(_)) => Ok(StreakLedger::default()),
            Err(err) => Err(err),
        }
    }

    async fn save_streak_ledger(&self, ledger: &StreakLedger) -> Result<(), StoreError> {
        let endpoint = self.url("wallet/gamification/current/");
        let response = self
            .http
            .put(&endpoint)
            .json(&StreakRecord::from(ledger))
            .send()
            .await
            .map_err(|err| Self::transport_error(&endpoint, &err))?;
        Self::check(response, &endpoint).await?;
        Ok(())
    }
}
