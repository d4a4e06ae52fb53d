//! Contract data models

use serde::{Deserialize, Serialize};

use crate::ogo::models::null_as_default;
use crate::ogo::traits::OgoResource;

/// Commercial contract a site is billed against
///
/// Sites reference a contract by `number` only; the remaining fields are
/// filled in when listing available contracts.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub contract_type: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub bandwidth_per_month: i32,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub million_requests_per_month: i32,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub nb_sites_advanced: i32,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub nb_sites_expert: i32,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub cdn_enabled: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub start_date: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub end_date: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub renewal_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<ContractHolder>,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl Contract {
    /// Reference to a contract by number only
    pub fn reference(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Default::default()
        }
    }
}

impl OgoResource for Contract {
    fn id(&self) -> &str {
        &self.number
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Company holding a contract
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractHolder {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
}
