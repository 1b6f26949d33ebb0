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

use super::{fixed_signer, fixed_time, header, reference_signature, SECRET_KEY, SKU_LIST_URL};
use anyhow::Result;
use ebgsign_core::hash::EMPTY_SHA256;
use ebgsign_core::SigningRequest;
use ebgsign_hmac_v1::canonical::canonical_request_string;
use ebgsign_hmac_v1::HeaderMatcher;
use http::{Method, Request};
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};

#[test]
fn test_sku_list_canonical_string() -> Result<()> {
    let (mut parts, _) = Request::get(SKU_LIST_URL).body(())?.into_parts();
    let req = SigningRequest::build(&mut parts)?;

    let creq = canonical_request_string(&req, None, &HeaderMatcher::default())?;
    assert_eq!(
        creq,
        format!("GET\n/service/private/misc/v1.0/skus\npageNo=1&pageSize=10\n\n\n\n{EMPTY_SHA256}")
    );
    assert_eq!(
        reference_signature(SECRET_KEY, "20240109T000000Z", &creq),
        "v1:11473b2a5f6885742710e773e5346d7ef4bc99d04627a361ab353d0aa9fcca0a"
    );
    assert_eq!(
        ebgsign_hmac_v1::sign(SECRET_KEY, "20240109T000000Z", &creq),
        "v1:11473b2a5f6885742710e773e5346d7ef4bc99d04627a361ab353d0aa9fcca0a"
    );
    Ok(())
}

#[test]
fn test_sign_sku_list() -> Result<()> {
    let signer = fixed_signer(fixed_time(0, 0, 0));

    let req = Request::get(SKU_LIST_URL)
        .header("Authorization", "Bearer access-key")
        .body(Vec::new())?;
    let req = signer.sign_request(req)?;

    assert_eq!(header(&req, "x-ebg-param"), "MjAyNDAxMDlUMDAwMDAwWg==");
    assert_eq!(
        header(&req, "x-ebg-signature"),
        "v1:76afe6eaf45575be96a00498e8acd28c02c3e54297ee9485f58c1562b00ec9d2"
    );
    assert_eq!(header(&req, "host"), "api.pixelbin.io");
    assert_eq!(header(&req, "authorization"), "Bearer access-key");
    assert_eq!(req.uri().to_string(), SKU_LIST_URL);
    Ok(())
}

#[test]
fn test_sign_sku_list_matches_reference() -> Result<()> {
    let signer = fixed_signer(fixed_time(0, 0, 0));
    let req = signer.sign_request(Request::get(SKU_LIST_URL).body(Vec::new())?)?;

    let creq = format!(
        "GET\n/service/private/misc/v1.0/skus\npageNo=1&pageSize=10\nhost:api.pixelbin.io\nx-ebg-param:20240109T000000Z\n\nhost;x-ebg-param\n{EMPTY_SHA256}"
    );
    assert_eq!(
        header(&req, "x-ebg-signature"),
        reference_signature(SECRET_KEY, "20240109T000000Z", &creq)
    );
    Ok(())
}

#[test]
fn test_sign_post_with_body() -> Result<()> {
    let signer = fixed_signer(fixed_time(15, 30, 0));
    let body = br#"{"name":"lipstick"}"#.to_vec();

    let req = Request::builder()
        .method(Method::POST)
        .uri("https://api.pixelbin.io/service/private/misc/v1.0/skus")
        .header("x-ebg-custom", "abc")
        .header("content-type", "application/json")
        .body(body.clone())?;
    let req = signer.sign_request(req)?;

    assert_eq!(header(&req, "x-ebg-param"), "MjAyNDAxMDlUMTUzMDAwWg==");
    assert_eq!(
        header(&req, "x-ebg-signature"),
        "v1:39231fdbc5d6408eb3b97199cc4b1cab9027c2638ffa0601923b298e23ff298b"
    );

    let creq = format!(
        "POST\n/service/private/misc/v1.0/skus\n\nhost:api.pixelbin.io\nx-ebg-custom:abc\nx-ebg-param:20240109T153000Z\n\nhost;x-ebg-custom;x-ebg-param\n{}",
        hex::encode(Sha256::digest(&body))
    );
    assert_eq!(
        header(&req, "x-ebg-signature"),
        reference_signature(SECRET_KEY, "20240109T153000Z", &creq)
    );
    assert_eq!(req.body(), &body);
    Ok(())
}

#[test]
fn test_sign_with_non_utf8_body() -> Result<()> {
    let signer = fixed_signer(fixed_time(0, 0, 0));
    let body = vec![0xff, 0xfe, 0x00];

    let req = Request::put("https://api.pixelbin.io/upload").body(body.clone())?;
    let req = signer.sign_request(req)?;

    let creq = format!(
        "PUT\n/upload\n\nhost:api.pixelbin.io\nx-ebg-param:20240109T000000Z\n\nhost;x-ebg-param\n{}",
        "ba778c0261008c8f71ae4061ad0162ffcbe63b52c91f89f236738131d1217ec7"
    );
    assert_eq!(
        header(&req, "x-ebg-signature"),
        reference_signature(SECRET_KEY, "20240109T000000Z", &creq)
    );
    Ok(())
}
