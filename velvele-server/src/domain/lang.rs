use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Lang {
    #[default]
    Tr,
    En,
}

impl Lang {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Lang::Tr => "tr",
            Lang::En => "en",
        }
    }

    /// `en.` subdomains serve English. Any other host carries no language
    /// and the caller falls back to its configured default.
    pub(crate) fn from_host(host: &str) -> Option<Self> {
        host.trim()
            .to_ascii_lowercase()
            .starts_with("en.")
            .then_some(Lang::En)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "tr" => Ok(Lang::Tr),
            "en" => Ok(Lang::En),
            _ => Err(DomainError::Validation {
                field: "lang",
                message: "must be one of: tr, en",
            }),
        }
    }
}
