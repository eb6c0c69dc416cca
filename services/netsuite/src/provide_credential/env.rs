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

use crate::{Config, Credential};
use async_trait::async_trait;
use nsfetch_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads NetSuite credentials from environment variables.
///
/// This provider looks for the following environment variables, all of which must be set:
/// - `NSFETCH_CONSUMER_KEY`
/// - `NSFETCH_CONSUMER_SECRET`
/// - `NSFETCH_TOKEN`
/// - `NSFETCH_TOKEN_SECRET`
/// - `NSFETCH_REALM`
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Config::new().from_env(ctx).into_credential())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use nsfetch_core::OsEnv;

    #[test]
    fn test_env_provider_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        temp_env::with_vars(
            vec![
                (NSFETCH_CONSUMER_KEY, Some("consumer_key")),
                (NSFETCH_CONSUMER_SECRET, Some("consumer_secret")),
                (NSFETCH_TOKEN, Some("token_id")),
                (NSFETCH_TOKEN_SECRET, Some("token_secret")),
                (NSFETCH_REALM, Some("1234567_SB1")),
            ],
            || {
                tokio::runtime::Runtime::new().unwrap().block_on(async {
                    let ctx = Context::new().with_env(OsEnv);
                    let cred = EnvCredentialProvider::new()
                        .provide_credential(&ctx)
                        .await
                        .expect("load must succeed")
                        .expect("credential must be found");

                    assert_eq!(cred.consumer_key, "consumer_key");
                    assert_eq!(cred.token_secret, "token_secret");
                    assert_eq!(cred.realm, "1234567_SB1");
                })
            },
        );
    }

    #[test]
    fn test_env_provider_partial_env() {
        temp_env::with_vars(
            vec![
                (NSFETCH_CONSUMER_KEY, Some("consumer_key")),
                (NSFETCH_CONSUMER_SECRET, None),
                (NSFETCH_TOKEN, Some("token_id")),
                (NSFETCH_TOKEN_SECRET, Some("token_secret")),
                (NSFETCH_REALM, Some("1234567")),
            ],
            || {
                tokio::runtime::Runtime::new().unwrap().block_on(async {
                    let ctx = Context::new().with_env(OsEnv);
                    let cred = EnvCredentialProvider::new()
                        .provide_credential(&ctx)
                        .await
                        .expect("load must succeed");

                    assert!(cred.is_none());
                })
            },
        );
    }
}
