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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Prefix of the custom headers that take part in signing.
pub const DEFAULT_HEADER_PREFIX: &str = "x-ebg-";
/// Suffix of the timestamp header: `x-ebg-param`.
pub const PARAM_HEADER_SUFFIX: &str = "param";
/// Suffix of the signature header: `x-ebg-signature`.
pub const SIGNATURE_HEADER_SUFFIX: &str = "signature";

/// Env value of the shared secret key.
pub const EBG_SECRET_KEY: &str = "EBG_SECRET_KEY";
/// Env value of the header prefix.
pub const EBG_HEADER_PREFIX: &str = "EBG_HEADER_PREFIX";

/// Format marker prepended to every v1 signature.
pub const SIGNATURE_VERSION: &str = "v1:";

/// AsciiSet for query names and values.
///
/// Everything allowed in an RFC 3986 query stays literal: unreserved
/// characters, sub-delims, ':', '@', '/' and '?'. Anything else, including
/// '%', space and non-ASCII bytes, is percent encoded.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?');
