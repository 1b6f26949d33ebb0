// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use super::{fixed_signer, fixed_time, header, init_logger, SECRET_KEY};
use anyhow::Result;
use ebgsign_core::hash::base64_decode;
use ebgsign_core::{Context, ErrorKind, RetryPolicy, StaticEnv};
use ebgsign_hmac_v1::{Config, EBG_HEADER_PREFIX, EBG_SECRET_KEY};
use http::Request;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn signed_headers(uri: &str, headers: &[(&str, &str)]) -> Result<(String, String)> {
    let signer = fixed_signer(fixed_time(12, 0, 0));

    let mut builder = Request::get(uri);
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    let req = signer.sign_request(builder.body(Vec::new())?)?;

    Ok((header(&req, "x-ebg-signature"), header(&req, "x-ebg-param")))
}

#[test]
fn test_deterministic() -> Result<()> {
    let uri = "https://api.pixelbin.io/skus?pageNo=1&pageSize=10";
    let first = signed_headers(uri, &[("x-ebg-custom", "a")])?;
    for _ in 0..3 {
        assert_eq!(first, signed_headers(uri, &[("x-ebg-custom", "a")])?);
    }
    Ok(())
}

#[test_case("a=1&b=2&c=3", "c=3&a=1&b=2"; "reversed")]
#[test_case("b=2&a=1", "a=1&b=2"; "two params")]
#[test_case("a=2&a=1&b", "b&a=1&a=2"; "duplicates and flags")]
#[test_case("q=hello%20world&p=%E4%B8%AD", "p=%E4%B8%AD&q=hello%20world"; "encoded values")]
fn test_query_order_independent(left: &str, right: &str) -> Result<()> {
    assert_eq!(
        signed_headers(&format!("https://api.pixelbin.io/skus?{left}"), &[])?,
        signed_headers(&format!("https://api.pixelbin.io/skus?{right}"), &[])?
    );
    Ok(())
}

#[test]
fn test_header_order_independent() -> Result<()> {
    let uri = "https://api.pixelbin.io/skus";
    assert_eq!(
        signed_headers(uri, &[("x-ebg-b", "2"), ("x-ebg-a", "1"), ("accept", "*/*")])?,
        signed_headers(uri, &[("accept", "*/*"), ("x-ebg-a", "1"), ("x-ebg-b", "2")])?
    );
    Ok(())
}

#[test]
fn test_appended_header_value_changes_signature() -> Result<()> {
    let uri = "https://api.pixelbin.io/skus";
    assert_ne!(
        signed_headers(uri, &[("x-ebg-custom", "first")])?,
        signed_headers(uri, &[("x-ebg-custom", "first"), ("x-ebg-custom", "second")])?
    );
    Ok(())
}

#[test]
fn test_escaped_path_signs_decoded_form() -> Result<()> {
    assert_eq!(
        signed_headers("https://api.pixelbin.io/skus/a%20b", &[])?,
        signed_headers("https://api.pixelbin.io/skus/a%20%62", &[])?
    );
    assert_ne!(
        signed_headers("https://api.pixelbin.io/skus/a%20b", &[])?,
        signed_headers("https://api.pixelbin.io/skus/a%2520b", &[])?
    );
    Ok(())
}

#[test]
fn test_unsigned_headers_do_not_change_signature() -> Result<()> {
    let uri = "https://api.pixelbin.io/skus";
    assert_eq!(
        signed_headers(uri, &[])?,
        signed_headers(uri, &[("authorization", "Bearer a"), ("accept", "*/*")])?
    );
    assert_ne!(
        signed_headers(uri, &[])?,
        signed_headers(uri, &[("x-ebg-custom", "a")])?
    );
    Ok(())
}

#[test]
fn test_signed_header_value_is_trimmed() -> Result<()> {
    let uri = "https://api.pixelbin.io/skus";
    assert_eq!(
        signed_headers(uri, &[("x-ebg-custom", "a")])?,
        signed_headers(uri, &[("x-ebg-custom", "  a\t")])?
    );
    Ok(())
}

#[test_case("https://api.pixelbin.io/skus"; "no query")]
#[test_case("https://api.pixelbin.io/skus?pageNo=1"; "query")]
#[test_case("http://localhost:8080/"; "with port")]
fn test_version_prefix_and_timestamp_round_trip(uri: &str) -> Result<()> {
    let (signature, param) = signed_headers(uri, &[])?;
    assert!(signature.starts_with("v1:"));

    let timestamp = String::from_utf8(base64_decode(&param)?)?;
    assert_eq!(timestamp, "20240109T120000Z");
    Ok(())
}

#[test]
fn test_host_excludes_port() -> Result<()> {
    let signer = fixed_signer(fixed_time(0, 0, 0));
    let req = signer.sign_request(Request::get("http://localhost:8080/skus").body(Vec::new())?)?;
    assert_eq!(header(&req, "host"), "localhost");
    Ok(())
}

#[test]
fn test_concurrent_signing_shares_signer() -> Result<()> {
    let signer = fixed_signer(fixed_time(0, 0, 0));
    let expected = {
        let req = Request::get("https://api.pixelbin.io/skus?i=0").body(Vec::new())?;
        header(&signer.sign_request(req)?, "x-ebg-signature")
    };

    let results: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let signer = &signer;
                s.spawn(move || {
                    let req = Request::get("https://api.pixelbin.io/skus?i=0")
                        .body(Vec::new())
                        .unwrap();
                    header(&signer.sign_request(req).unwrap(), "x-ebg-signature")
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|v| v == &expected));
    Ok(())
}

#[tokio::test]
async fn test_signer_from_env() -> Result<()> {
    init_logger();
    let ctx = Context::new().with_env(StaticEnv::from_pairs([
        (EBG_SECRET_KEY, SECRET_KEY),
        (EBG_HEADER_PREFIX, "x-acme-"),
    ]));

    let signer = ebgsign_hmac_v1::signer(&ctx, Config::new()).await?;
    assert_eq!(signer.retry_policy(), RetryPolicy::DoNotRetry);

    let req = signer.sign_request(Request::get("https://api.pixelbin.io/skus").body(Vec::new())?)?;
    assert!(header(&req, "x-acme-signature").starts_with("v1:"));
    assert!(req.headers().get("x-ebg-signature").is_none());
    Ok(())
}

#[tokio::test]
async fn test_signer_without_secret_fails_at_build() {
    init_logger();
    let ctx = Context::new().with_env(StaticEnv::default());

    let err = ebgsign_hmac_v1::signer(&ctx, Config::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[tokio::test]
async fn test_signer_with_empty_secret_fails_at_build() {
    init_logger();
    let ctx = Context::new().with_env(StaticEnv::from_pairs([(EBG_SECRET_KEY, "")]));

    let err = ebgsign_hmac_v1::signer(&ctx, Config::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[tokio::test]
async fn test_signer_with_invalid_prefix_fails_at_build() {
    init_logger();
    let ctx = Context::new().with_env(StaticEnv::default());

    let config = Config::new()
        .with_secret_key(SECRET_KEY)
        .with_header_prefix("x ebg");
    let err = ebgsign_hmac_v1::signer(&ctx, config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}
