use async_trait::async_trait;
use packhouse_core::models::MessageChannel;
use packhouse_core::Config;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{MessageSender, NotificationError};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const WHATSAPP_PREFIX: &str = "whatsapp:";

#[derive(Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, used as `From` for both channels.
    pub phone_number: String,
}

impl std::fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

impl TwilioCredentials {
    pub fn from_config(config: &Config) -> Result<Self, NotificationError> {
        let missing = |name: &str| NotificationError::NotConfigured(format!("{} is not set", name));

        Ok(Self {
            account_sid: config
                .twilio_account_sid()
                .ok_or_else(|| missing("TWILIO_ACCOUNT_SID"))?
                .to_string(),
            auth_token: config
                .twilio_auth_token()
                .ok_or_else(|| missing("TWILIO_AUTH_TOKEN"))?
                .to_string(),
            phone_number: config
                .twilio_phone_number()
                .ok_or_else(|| missing("TWILIO_PHONE_NUMBER"))?
                .to_string(),
        })
    }
}

/// Messaging provider REST client. One request per message, no retry.
pub struct TwilioClient {
    http_client: Client,
    base_url: String,
    credentials: TwilioCredentials,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

impl TwilioClient {
    pub fn new(base_url: &str, credentials: TwilioCredentials) -> Result<Self, NotificationError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.credentials.account_sid
        )
    }
}

/// WhatsApp numbers are addressed as `whatsapp:+E164` on both ends.
fn address(channel: MessageChannel, number: &str) -> String {
    match channel {
        MessageChannel::WhatsApp if !number.starts_with(WHATSAPP_PREFIX) => {
            format!("{}{}", WHATSAPP_PREFIX, number)
        }
        _ => number.to_string(),
    }
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send(
        &self,
        channel: MessageChannel,
        to: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        let to = address(channel, to);
        let from = address(channel, &self.credentials.phone_number);

        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(
                &self.credentials.account_sid,
                Some(&self.credentials.auth_token),
            )
            .form(&[("To", to.as_str()), ("From", from.as_str()), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&error_text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("Messaging provider returned {}", status));

            tracing::warn!(
                status = status.as_u16(),
                channel = %channel,
                error = %message,
                "Messaging provider rejected message"
            );

            return Err(NotificationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let resource: MessageResource = response.json().await?;
        Ok(resource.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn credentials() -> TwilioCredentials {
        TwilioCredentials {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            phone_number: "+15550001111".to_string(),
        }
    }

    #[test]
    fn whatsapp_addresses_are_prefixed_once() {
        assert_eq!(address(MessageChannel::WhatsApp, "+1555"), "whatsapp:+1555");
        assert_eq!(
            address(MessageChannel::WhatsApp, "whatsapp:+1555"),
            "whatsapp:+1555"
        );
        assert_eq!(address(MessageChannel::Sms, "+1555"), "+1555");
    }

    #[test]
    fn debug_hides_auth_token() {
        assert!(!format!("{:?}", credentials()).contains("secret"));
    }

    #[tokio::test]
    async fn whatsapp_send_returns_message_sid() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("To".to_string(), "whatsapp:+15559990000".to_string()),
                Matcher::UrlEncoded("From".to_string(), "whatsapp:+15550001111".to_string()),
                Matcher::UrlEncoded("Body".to_string(), "Order packed".to_string()),
            ]))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sid":"SM0001","status":"queued"}"#)
            .create_async()
            .await;

        let client = TwilioClient::new(&server.url(), credentials()).unwrap();
        let sid = client
            .send(MessageChannel::WhatsApp, "+15559990000", "Order packed")
            .await
            .unwrap();

        assert_eq!(sid, "SM0001");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn provider_rejection_carries_provider_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":21211,"message":"The 'To' number 123 is not a valid phone number.","status":400}"#)
            .create_async()
            .await;

        let client = TwilioClient::new(&server.url(), credentials()).unwrap();
        let err = client
            .send(MessageChannel::Sms, "123", "hi")
            .await
            .unwrap_err();

        match err {
            NotificationError::Provider { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The 'To' number 123 is not a valid phone number.");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let client = TwilioClient::new(&server.url(), credentials()).unwrap();
        let err = client
            .send(MessageChannel::Sms, "+1555", "hi")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
