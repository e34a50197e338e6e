use relay_config::Config;
use tracing::info;

use super::{mask_secret, twilio_client};

/// Number of incoming numbers listed by the check.
const NUMBER_PAGE_SIZE: u32 = 20;

/// Strategy for verifying provider credentials.
///
/// Fetches the Twilio account and its incoming numbers, and reports whether
/// the completion provider is configured.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("🔧 Checking relaybot configuration...\n");
        println!("Twilio:");
        println!("  Account SID: {}", mask_secret(&config.twilio.account_sid));
        println!("  Auth token:  {}", mask_secret(&config.twilio.auth_token));
        println!("OpenAI:");
        println!("  API key: {}", mask_secret(&config.openai.api_key));
        println!("  Model:   {}", config.openai.model);
        println!();

        let Some(client) = twilio_client(&config)? else {
            anyhow::bail!(
                "Missing Twilio credentials. Set TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN or edit the config file."
            );
        };

        info!("Fetching Twilio account");
        let account = client.fetch_account().await.map_err(|e| {
            anyhow::anyhow!(
                "Twilio account check failed: {e}. Double-check the account SID and auth token."
            )
        })?;
        println!("✅ Account access successful!");
        println!("   Name:   {}", account.friendly_name);
        println!("   SID:    {}", account.sid);
        println!("   Status: {}", account.status);
        println!();

        let numbers = client.list_incoming_numbers(NUMBER_PAGE_SIZE).await?;
        let whatsapp: Vec<_> = numbers.iter().filter(|n| n.is_whatsapp()).collect();
        if whatsapp.is_empty() {
            println!(
                "⚠️  No WhatsApp numbers found. Use the Twilio WhatsApp sandbox or an approved sender."
            );
        } else {
            println!("✅ WhatsApp numbers found:");
            for number in whatsapp {
                println!("   {} ({})", number.phone_number, number.friendly_name);
            }
        }
        println!();

        if config.openai.is_configured() {
            println!("🧠 AI replies and summaries: enabled");
        } else {
            println!("🧠 AI replies and summaries: disabled (no OpenAI API key)");
        }
        Ok(())
    }
}
