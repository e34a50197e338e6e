use async_trait::async_trait;
use relay_core::{DeliveryReceipt, MessagingProvider, OutboundMessage};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

const API_VERSION: &str = "2010-04-01";

/// Account details returned by the credential check.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub sid: String,
    pub friendly_name: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingNumber {
    pub phone_number: String,
    #[serde(default)]
    pub friendly_name: String,
}

impl IncomingNumber {
    #[must_use]
    pub fn is_whatsapp(&self) -> bool {
        self.phone_number.starts_with("whatsapp:")
    }
}

#[derive(Debug, Deserialize)]
struct IncomingNumberPage {
    #[serde(default)]
    incoming_phone_numbers: Vec<IncomingNumber>,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u64>,
    message: Option<String>,
}

/// Twilio REST client used for WhatsApp delivery.
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioClient {
    pub fn new(account_sid: String, auth_token: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating TwilioClient");
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            account_sid,
            auth_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn account_url(&self, suffix: &str) -> String {
        format!(
            "{}/{API_VERSION}/Accounts/{}{suffix}",
            self.base_url, self.account_sid
        )
    }

    /// Turn a non-2xx response into an error carrying Twilio's code and message.
    async fn check_status(response: Response) -> anyhow::Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiError>(&body) {
            Ok(ApiError {
                code,
                message: Some(message),
            }) => anyhow::bail!(
                "Twilio API error {status} (code {}): {message}",
                code.map_or_else(|| "n/a".to_string(), |c| c.to_string())
            ),
            _ => anyhow::bail!("Twilio API error {status}: {body}"),
        }
    }

    /// Fetch the account resource; succeeds only with valid credentials.
    pub async fn fetch_account(&self) -> anyhow::Result<AccountInfo> {
        let response = self
            .client
            .get(self.account_url(".json"))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    pub async fn list_incoming_numbers(&self, limit: u32) -> anyhow::Result<Vec<IncomingNumber>> {
        let response = self
            .client
            .get(self.account_url(&format!("/IncomingPhoneNumbers.json?PageSize={limit}")))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await?;
        let page: IncomingNumberPage = Self::check_status(response).await?.json().await?;
        Ok(page.incoming_phone_numbers)
    }
}

#[async_trait]
impl MessagingProvider for TwilioClient {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<DeliveryReceipt> {
        let form = [
            ("Body", message.body.as_str()),
            ("From", message.from.as_str()),
            ("To", message.to.as_str()),
        ];
        let response = self
            .client
            .post(self.account_url("/Messages.json"))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;
        let resource: MessageResource = Self::check_status(response).await?.json().await?;

        info!("Message sent: {}", resource.sid);
        Ok(DeliveryReceipt { sid: resource.sid })
    }
}
