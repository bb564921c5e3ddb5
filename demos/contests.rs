use std::env;

use acm_contest::{AcmClient, ClientConfig, Credentials, Platform};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = ClientConfig::default();
    if let (Ok(key), Ok(secret)) = (env::var("CF_API_KEY"), env::var("CF_API_SECRET")) {
        config = config.with_credentials(Credentials::new(key, secret));
    }
    let client = AcmClient::with_config(config);

    println!("{}\n", client.recent_contests().await);
    println!("{}\n", client.codeforces_contests().await);

    let mut args = env::args().skip(1);
    if let (Some(platform), Some(handle)) = (args.next(), args.next()) {
        match platform.parse::<Platform>() {
            Ok(platform) => println!("{}", client.get_profile(platform, &handle).await),
            Err(_) => eprintln!("unknown platform: {platform}"),
        }
    }
}
