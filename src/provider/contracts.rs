//! `ogo_shield_contracts` data source

use serde::Serialize;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::traits::DataSource;
use crate::config::provider as names;
use crate::ogo::{Contract, OgoClient};

/// One contract a site can be attached to
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContractItem {
    pub number: String,
    pub name: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub bandwidth_per_month: i32,
    pub million_requests_per_month: i32,
    pub nb_sites_advanced: i32,
    pub nb_sites_expert: i32,
    pub cdn_enabled: bool,
    pub start_date: String,
    pub end_date: String,
    pub renewal_date: String,
}

impl From<&Contract> for ContractItem {
    fn from(contract: &Contract) -> Self {
        Self {
            number: contract.number.clone(),
            name: contract.name.clone(),
            contract_type: contract.contract_type.clone(),
            bandwidth_per_month: contract.bandwidth_per_month,
            million_requests_per_month: contract.million_requests_per_month,
            nb_sites_advanced: contract.nb_sites_advanced,
            nb_sites_expert: contract.nb_sites_expert,
            cdn_enabled: contract.cdn_enabled,
            start_date: contract.start_date.clone(),
            end_date: contract.end_date.clone(),
            renewal_date: contract.renewal_date.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractsDataSourceModel {
    pub contracts: Vec<ContractItem>,
}

pub struct ContractsDataSource {
    client: Arc<OgoClient>,
}

impl DataSource for ContractsDataSource {
    type Model = ContractsDataSourceModel;

    const TYPE_NAME: &'static str = names::CONTRACTS;

    fn new(client: Arc<OgoClient>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        Schema::new(
            "List the contracts available to the organization.",
            vec![Attribute::list_nested(
                "contracts",
                vec![
                    Attribute::string("number").computed(),
                    Attribute::string("name").computed(),
                    Attribute::string("type").computed(),
                    Attribute::int32("bandwidth_per_month").computed(),
                    Attribute::int32("million_requests_per_month").computed(),
                    Attribute::int32("nb_sites_advanced").computed(),
                    Attribute::int32("nb_sites_expert").computed(),
                    Attribute::bool("cdn_enabled").computed(),
                    Attribute::string("start_date").computed(),
                    Attribute::string("end_date").computed(),
                    Attribute::string("renewal_date").computed(),
                ],
            )
            .computed()],
        )
    }

    async fn read(&self) -> Result<ContractsDataSourceModel, Diagnostics> {
        let contracts = self
            .client
            .get_all_contracts()
            .await
            .map_err(|e| Diagnostics::error("Unable to read Ogo Contracts", e.to_string()))?;

        Ok(ContractsDataSourceModel {
            contracts: contracts.iter().map(ContractItem::from).collect(),
        })
    }
}
