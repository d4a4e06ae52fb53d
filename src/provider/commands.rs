//! Command handlers driving the provider from the CLI

use futures::future::join_all;
use log::debug;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

use super::clusters::ClusterItem;
use super::tls_options::TlsOptionsItem;
use super::traits::{DataSource, ManagedResource};
use super::{
    ClustersDataSource, ContractsDataSource, OgoProvider, OrganizationsDataSource, SiteResource,
    TlsOptionsDataSource, TlsOptionsResource,
};
use crate::cli::{
    ApplyResource, Cli, DeleteArgs, DeleteResource, DocumentFormat, FileArgs, GetResource,
    ImportArgs, ImportResource, SchemaArgs,
};
use crate::error::OgoError;
use crate::output::{
    output_certificates, output_clusters, output_contracts, output_organizations, output_sites,
    output_state, output_tls_options, print_json, print_yaml,
};
use crate::ui::{confirm_action, create_spinner, settle_spinner};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Which lifecycle operation `create`/`update` runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Create,
    Update,
}

/// Run the get command
pub async fn run_get_command(
    provider: &OgoProvider,
    cli: &Cli,
    resource: &GetResource,
) -> CommandResult {
    match resource {
        GetResource::Clusters(args) => {
            let clusters = match &args.name {
                Some(name) => {
                    let client = provider.client()?;
                    let spinner = create_spinner(&format!("Fetching cluster '{}'...", name), cli.batch);
                    let result = client.get_cluster(name).await;
                    settle_spinner(spinner, &result, "Done");
                    vec![ClusterItem::from(&result?)]
                }
                None => read_data_source::<ClustersDataSource>(provider, cli, "clusters")
                    .await?
                    .clusters,
            };
            output_clusters(&clusters, &args.output, cli.no_header);
        }
        GetResource::Contracts(args) => {
            let model =
                read_data_source::<ContractsDataSource>(provider, cli, "contracts").await?;
            output_contracts(&model.contracts, &args.output, cli.no_header);
        }
        GetResource::Orgs(args) => {
            let model =
                read_data_source::<OrganizationsDataSource>(provider, cli, "organizations").await?;
            output_organizations(&model.organizations, &args.output, cli.no_header);
        }
        GetResource::Tlsoptions(args) => {
            let options = match &args.uid {
                Some(uid) => {
                    let client = provider.client()?;
                    let spinner =
                        create_spinner(&format!("Fetching TLS options '{}'...", uid), cli.batch);
                    let result = client.find_tls_options(uid).await;
                    settle_spinner(spinner, &result, "Done");
                    let found = result?.ok_or_else(|| {
                        OgoError::NotFound(format!("TLS options '{}' not found", uid))
                    })?;
                    vec![TlsOptionsItem::from(&found)]
                }
                None => read_data_source::<TlsOptionsDataSource>(provider, cli, "TLS options")
                    .await?
                    .tlsoptions,
            };
            output_tls_options(&options, &args.output, cli.no_header);
        }
        GetResource::Sites(args) => {
            let client = provider.client()?;
            let spinner = create_spinner("Fetching sites...", cli.batch);
            let result = client.get_all_sites().await;
            settle_spinner(spinner, &result, "Done");
            output_sites(&result?, &args.output, cli.no_header);
        }
        GetResource::Site(args) => {
            let site = provider.resource::<SiteResource>()?;
            let spinner = create_spinner(&format!("Reading site '{}'...", args.domain), cli.batch);
            let result = site.import_state(&args.domain).await;
            settle_spinner(spinner, &result, "Done");
            output_state(&result?, &args.output, cli.no_header);
        }
        GetResource::Certificates(args) => {
            let client = provider.client()?;
            let spinner = create_spinner(
                &format!("Fetching certificates of '{}'...", args.domain),
                cli.batch,
            );
            let result = client.get_site_certificates(&args.domain).await;
            settle_spinner(spinner, &result, "Done");
            output_certificates(&result?, &args.output, cli.no_header);
        }
    }

    Ok(())
}

async fn read_data_source<D: DataSource>(
    provider: &OgoProvider,
    cli: &Cli,
    what: &str,
) -> Result<D::Model, Box<dyn std::error::Error>> {
    let data_source = provider.data_source::<D>()?;
    debug!("Reading data source {}", D::TYPE_NAME);

    let spinner = create_spinner(&format!("Fetching {}...", what), cli.batch);
    let result = data_source.read().await;
    settle_spinner(spinner, &result, "Done");
    Ok(result?)
}

/// Run the create or update command
pub async fn run_apply_command(
    provider: &OgoProvider,
    cli: &Cli,
    resource: &ApplyResource,
    mode: ApplyMode,
) -> CommandResult {
    match resource {
        ApplyResource::Site(args) => apply::<SiteResource>(provider, cli, args, mode).await,
        ApplyResource::Tlsoptions(args) => {
            apply::<TlsOptionsResource>(provider, cli, args, mode).await
        }
    }
}

async fn apply<R: ManagedResource>(
    provider: &OgoProvider,
    cli: &Cli,
    args: &FileArgs,
    mode: ApplyMode,
) -> CommandResult {
    let config = read_config(&args.file)?;
    let plan = R::plan(config)?;
    let resource = provider.resource::<R>()?;

    debug!("{:?} {} from '{}'", mode, R::TYPE_NAME, args.file);

    let (spinner, result) = match mode {
        ApplyMode::Create => {
            let spinner = create_spinner(&format!("Creating {}...", R::TYPE_NAME), cli.batch);
            (spinner, resource.create(plan).await)
        }
        ApplyMode::Update => {
            let spinner = create_spinner(&format!("Updating {}...", R::TYPE_NAME), cli.batch);
            (spinner, resource.update(plan).await)
        }
    };
    settle_spinner(spinner, &result, "Done");

    output_state(&result?, &args.output, cli.no_header);
    Ok(())
}

/// Read a resource configuration
///
/// `-` reads JSON from stdin. Files ending in `.yaml`/`.yml` are YAML, the
/// rest JSON.
pub fn read_config(path: &str) -> Result<Value, OgoError> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(serde_json::from_str(&content)?);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| OgoError::Io(format!("failed to read '{}': {}", path, e)))?;

    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yml::from_str(&content)
            .map_err(|e| OgoError::Json(format!("failed to parse '{}': {}", path, e)))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| OgoError::Json(format!("failed to parse '{}': {}", path, e)))
    }
}

/// Run the delete command
pub async fn run_delete_command(
    provider: &OgoProvider,
    cli: &Cli,
    resource: &DeleteResource,
) -> CommandResult {
    match resource {
        DeleteResource::Site(args) => delete_many::<SiteResource>(provider, cli, args, "site").await,
        DeleteResource::Tlsoptions(args) => {
            delete_many::<TlsOptionsResource>(provider, cli, args, "TLS options").await
        }
    }
}

async fn delete_many<R: ManagedResource>(
    provider: &OgoProvider,
    cli: &Cli,
    args: &DeleteArgs,
    label: &str,
) -> CommandResult {
    let prompt = format!("Delete {} [{}]?", label, args.ids.join(", "));
    if !confirm_action(&prompt, args.yes, cli.batch)? {
        println!("Cancelled");
        return Ok(());
    }

    let resource = provider.resource::<R>()?;
    let spinner = create_spinner(
        &format!("Deleting {} {}(s)...", args.ids.len(), label),
        cli.batch,
    );

    let results = join_all(args.ids.iter().map(|id| {
        let resource = &resource;
        async move { (id, resource.delete(R::import_model(id)).await) }
    }))
    .await;

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    let outcome: Result<(), ()> = if failed == 0 { Ok(()) } else { Err(()) };
    settle_spinner(spinner, &outcome, "Done");

    for (id, result) in &results {
        match result {
            Ok(()) => println!("✓ Deleted {} '{}'", label, id),
            Err(diags) => eprintln!("{}", diags),
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} deletion(s) failed", failed, results.len()).into());
    }
    Ok(())
}

/// Run the import command
pub async fn run_import_command(
    provider: &OgoProvider,
    cli: &Cli,
    resource: &ImportResource,
) -> CommandResult {
    match resource {
        ImportResource::Site(args) => import::<SiteResource>(provider, cli, args).await,
        ImportResource::Tlsoptions(args) => import::<TlsOptionsResource>(provider, cli, args).await,
    }
}

async fn import<R: ManagedResource>(
    provider: &OgoProvider,
    cli: &Cli,
    args: &ImportArgs,
) -> CommandResult {
    let resource = provider.resource::<R>()?;
    let spinner = create_spinner(
        &format!("Importing {} '{}'...", R::TYPE_NAME, args.id),
        cli.batch,
    );
    let result = resource.import_state(&args.id).await;
    settle_spinner(spinner, &result, "Done");

    output_state(&result?, &args.output, cli.no_header);
    Ok(())
}

/// Run the schema command
///
/// Needs no configured client.
pub fn run_schema_command(args: &SchemaArgs) -> CommandResult {
    let document = match &args.type_name {
        None => schema_document(),
        Some(name) => {
            let mut document = Map::new();
            if let Some(schema) = OgoProvider::resource_schema(name) {
                document.insert("resource_schema".to_string(), serde_json::to_value(schema)?);
            }
            if let Some(schema) = OgoProvider::data_source_schema(name) {
                document.insert("data_source_schema".to_string(), serde_json::to_value(schema)?);
            }
            if document.is_empty() {
                return Err(format!("Unknown resource or data source type '{}'", name).into());
            }
            Value::Object(document)
        }
    };

    match args.output {
        DocumentFormat::Json => print_json(&document),
        DocumentFormat::Yaml => print_yaml(&document),
    }
    Ok(())
}

fn schema_document() -> Value {
    let resources: Map<String, Value> = OgoProvider::resources()
        .into_iter()
        .filter_map(|name| {
            let schema = OgoProvider::resource_schema(name)?;
            Some((name.to_string(), serde_json::to_value(schema).ok()?))
        })
        .collect();
    let data_sources: Map<String, Value> = OgoProvider::data_sources()
        .into_iter()
        .filter_map(|name| {
            let schema = OgoProvider::data_source_schema(name)?;
            Some((name.to_string(), serde_json::to_value(schema).ok()?))
        })
        .collect();

    serde_json::json!({
        "provider": OgoProvider::schema(),
        "resource_schemas": resources,
        "data_source_schemas": data_sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_config_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "strict"}}"#).unwrap();
        let value = read_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"name": "strict"}));
    }

    #[test]
    fn test_read_config_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "domain_name: www.example.com").unwrap();
        writeln!(file, "tags:\n  - prod").unwrap();
        let value = read_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"domain_name": "www.example.com", "tags": ["prod"]})
        );
    }

    #[test]
    fn test_read_config_errors() {
        let err = read_config("/nonexistent/site.json").unwrap_err();
        assert!(matches!(err, OgoError::Io(_)));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_config(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, OgoError::Json(_)));
    }

    #[test]
    fn test_schema_document() {
        let document = schema_document();
        assert!(document["provider"]["attributes"].is_array());
        assert!(document["resource_schemas"]["ogo_shield_site"].is_object());
        assert!(document["resource_schemas"]["ogo_shield_tlsoptions"].is_object());
        assert!(document["data_source_schemas"]["ogo_shield_clusters"].is_object());
        assert_eq!(
            document["data_source_schemas"]
                .as_object()
                .map(|m| m.len()),
            Some(4)
        );
    }

    #[test]
    fn test_schema_command_unknown_type() {
        let args = SchemaArgs {
            type_name: Some("ogo_shield_nope".to_string()),
            output: DocumentFormat::Json,
        };
        let err = run_schema_command(&args).unwrap_err();
        assert!(err.to_string().contains("ogo_shield_nope"));
    }

    #[test]
    fn test_schema_command_shared_type_name() {
        let args = SchemaArgs {
            type_name: Some("ogo_shield_tlsoptions".to_string()),
            output: DocumentFormat::Yaml,
        };
        assert!(run_schema_command(&args).is_ok());
    }
}
