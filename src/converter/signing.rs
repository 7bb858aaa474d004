//! APK signing credentials.
//!
//! bundletool signs the universal APK itself when handed a keystore. The four
//! keystore values travel together: a run either has all of them or none.

use crate::error::{CliError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Keystore material passed through to `bundletool build-apks`.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningCredentials {
    keystore: PathBuf,
    keystore_password: String,
    key_alias: String,
    key_password: String,
}

impl SigningCredentials {
    /// Build credentials from the four optional CLI values.
    ///
    /// Returns `Ok(None)` when none are set and an error naming the missing
    /// flags when only some are.
    pub fn from_parts(
        keystore: Option<PathBuf>,
        keystore_password: Option<String>,
        key_alias: Option<String>,
        key_password: Option<String>,
    ) -> Result<Option<Self>> {
        match (keystore, keystore_password, key_alias, key_password) {
            (None, None, None, None) => Ok(None),
            (Some(keystore), Some(keystore_password), Some(key_alias), Some(key_password)) => {
                Ok(Some(Self {
                    keystore,
                    keystore_password,
                    key_alias,
                    key_password,
                }))
            }
            (keystore, keystore_password, key_alias, key_password) => {
                let missing = [
                    ("--ks", keystore.is_none()),
                    ("--ks-pass", keystore_password.is_none()),
                    ("--ks-key-alias", key_alias.is_none()),
                    ("--key-pass", key_password.is_none()),
                ]
                .into_iter()
                .filter_map(|(flag, absent)| absent.then_some(flag))
                .collect();
                Err(CliError::IncompleteSigning { missing }.into())
            }
        }
    }

    /// Keystore file path.
    pub fn keystore(&self) -> &Path {
        &self.keystore
    }

    /// Key alias inside the keystore.
    pub fn key_alias(&self) -> &str {
        &self.key_alias
    }

    /// bundletool arguments for these credentials.
    ///
    /// Passwords use bundletool's `pass:` source prefix.
    pub fn bundletool_args(&self) -> Vec<String> {
        vec![
            format!("--ks={}", self.keystore.display()),
            format!("--ks-pass=pass:{}", self.keystore_password),
            format!("--ks-key-alias={}", self.key_alias),
            format!("--key-pass=pass:{}", self.key_password),
        ]
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("keystore", &self.keystore)
            .field("keystore_password", &"****")
            .field("key_alias", &self.key_alias)
            .field("key_password", &"****")
            .finish()
    }
}
