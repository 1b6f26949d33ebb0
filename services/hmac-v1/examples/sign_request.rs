//! Sign a request and print the headers the transport has to send.
//!
//! ```shell
//! EBG_SECRET_KEY=1234567 cargo run --example sign_request
//! ```

use anyhow::Result;
use ebgsign_core::{Context, RetryPolicy};
use ebgsign_hmac_v1::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new();
    let signer = ebgsign_hmac_v1::signer(&ctx, Config::new()).await?;

    let req = http::Request::get(
        "https://api.pixelbin.io/service/private/misc/v1.0/skus?pageNo=1&pageSize=10",
    )
    .header("authorization", "Bearer access-key")
    .body(Vec::new())?;
    let req = signer.sign_request(req)?;

    for (name, value) in req.headers() {
        println!("{name}: {}", value.to_str()?);
    }

    match signer.retry_policy() {
        RetryPolicy::DoNotRetry => println!("failed requests must not be retried"),
    }

    Ok(())
}
