//! Account, profile, and ping endpoints.

use std::collections::HashMap;

use tracing::{debug, warn};

use cfs_core::constants::methods;
use cfs_core::error::{CfsError, CfsResult};

use crate::client::ApiClient;
use crate::headers::form_body;
use crate::models::{Account, GeneralResult, Profile, User};
use crate::parse::{parse_general, parse_profile};
use crate::transport::HttpVerb;

impl ApiClient {
    /// Fetch the caller's profile (account + user data).
    pub async fn get_profile(&self) -> CfsResult<Profile> {
        let body = self
            .send(HttpVerb::Get, methods::USER, Some(methods::PROFILE), &[], None)
            .await?;
        parse_profile(body)
    }

    /// Fetch only the account half of the profile.
    pub async fn request_account_info(&self) -> CfsResult<Account> {
        let (account, _) = self.get_profile().await?.into_parts();
        Ok(account)
    }

    /// Fetch only the user half of the profile.
    pub async fn request_user_info(&self) -> CfsResult<User> {
        let (_, user) = self.get_profile().await?.into_parts();
        Ok(user)
    }

    /// Alter profile fields of `account`, returning the server's result.
    ///
    /// `changes` is sent as a form-encoded body. The local `account` value is
    /// not modified; re-fetch the profile to observe the change.
    pub async fn try_alter_profile(
        &self,
        account: &Account,
        changes: &HashMap<String, String>,
    ) -> CfsResult<GeneralResult> {
        if changes.is_empty() {
            return Err(CfsError::InvalidEndpoint("no profile changes given".into()));
        }
        debug!("altering profile of account {} ({} fields)", account.id, changes.len());

        let body = self
            .send(
                HttpVerb::Post,
                methods::USER,
                Some(methods::PROFILE),
                &[],
                Some(form_body(changes)),
            )
            .await?;
        parse_general(body)
    }

    /// Alter profile fields, reporting only whether the server accepted them.
    ///
    /// Low-fidelity: every failure collapses to `false`. The error is logged;
    /// use [`ApiClient::try_alter_profile`] to inspect it.
    pub async fn alter_profile(
        &self,
        account: &Account,
        changes: &HashMap<String, String>,
    ) -> bool {
        match self.try_alter_profile(account, changes).await {
            Ok(result) => {
                if !result.success {
                    warn!(
                        "profile change rejected: {}",
                        result.message.as_deref().unwrap_or("no message")
                    );
                }
                result.success
            }
            Err(e) => {
                warn!("profile change failed: {e}");
                false
            }
        }
    }

    /// Probe the server with HEAD (`use_head`) or GET.
    ///
    /// Succeeds when the response classifies as success; the body is not parsed.
    pub async fn try_ping(&self, use_head: bool) -> CfsResult<()> {
        let verb = if use_head { HttpVerb::Head } else { HttpVerb::Get };
        self.send(verb, methods::PING, None, &[], None).await?;
        Ok(())
    }

    /// Whether the server is reachable.
    ///
    /// Low-fidelity: every failure collapses to `false`. The error is logged;
    /// use [`ApiClient::try_ping`] to inspect it.
    pub async fn ping(&self, use_head: bool) -> bool {
        match self.try_ping(use_head).await {
            Ok(()) => true,
            Err(e) => {
                warn!("ping failed: {e}");
                false
            }
        }
    }
}
