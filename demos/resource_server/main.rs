//! Resource server over a small in-memory catalogue
//!
//! Run with an optional YAML configuration file:
//!
//! ```sh
//! cargo run --example resource_server -- sw360-rest.yaml
//! ```
//!
//! Then try:
//! - `GET http://127.0.0.1:8080/api`
//! - `GET http://127.0.0.1:8080/api/components?page=0&page_entries=2&sort=name,desc`
//! - `GET http://127.0.0.1:8080/api/releases?sha1=da39a3ee5e6b4b0d3255bfef95601890afd80709`

use std::collections::{BTreeMap, BTreeSet};
use sw360_rest::prelude::*;
use tracing_subscriber::EnvFilter;

fn ids(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn seeded_services() -> RestResult<Services> {
    let vendors = InMemoryEntityService::with_entities(vec![Vendor {
        id: Some("v-apache".to_string()),
        fullname: Some("The Apache Software Foundation".to_string()),
        shortname: Some("Apache".to_string()),
        url: Some("https://www.apache.org".to_string()),
        ..Default::default()
    }])?;

    let users = InMemoryEntityService::with_entities(vec![User {
        id: Some("u-admin".to_string()),
        email: Some("admin@sw360.org".to_string()),
        fullname: Some("SW360 Admin".to_string()),
        givenname: Some("SW360".to_string()),
        lastname: Some("Admin".to_string()),
        department: Some("SW360 Administration".to_string()),
        ..Default::default()
    }])?;

    let licenses = InMemoryEntityService::with_entities(vec![License {
        id: Some("Apache-2.0".to_string()),
        shortname: Some("Apache-2.0".to_string()),
        fullname: Some("Apache License 2.0".to_string()),
        checked: Some(true),
        ..Default::default()
    }])?;

    let releases = InMemoryEntityService::with_entities(vec![Release {
        id: Some("r-commons-3.12".to_string()),
        name: Some("Apache Commons Lang".to_string()),
        version: Some("3.12.0".to_string()),
        component_id: Some("c-commons".to_string()),
        vendor: Some(Vendor {
            id: Some("v-apache".to_string()),
            fullname: Some("The Apache Software Foundation".to_string()),
            ..Default::default()
        }),
        main_license_ids: Some(ids(&["Apache-2.0"])),
        moderators: Some(ids(&["admin@sw360.org"])),
        attachments: Some(vec![Attachment {
            attachment_content_id: Some("ac-commons-src".to_string()),
            filename: Some("commons-lang3-3.12.0-src.zip".to_string()),
            sha1: Some("da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string()),
            attachment_type: Some("SOURCE".to_string()),
            check_status: Some(CheckStatus::Accepted),
            ..Default::default()
        }]),
        ..Default::default()
    }])?;

    let component = |id: &str, name: &str, kind: ComponentType| Component {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        component_type: Some(kind),
        ..Default::default()
    };
    let components = InMemoryEntityService::with_entities(vec![
        Component {
            vendor_names: Some(ids(&["The Apache Software Foundation"])),
            release_ids: Some(ids(&["r-commons-3.12"])),
            moderators: Some(ids(&["admin@sw360.org"])),
            external_ids: Some(BTreeMap::from([(
                "purl".to_string(),
                "pkg:maven/org.apache.commons/commons-lang3".to_string(),
            )])),
            ..component("c-commons", "Apache Commons Lang", ComponentType::Oss)
        },
        component("c-openssl", "OpenSSL", ComponentType::Oss),
        component("c-boost", "Boost", ComponentType::Oss),
        component("c-portal", "Customer Portal", ComponentType::Internal),
    ])?;

    let projects = InMemoryEntityService::with_entities(vec![Project {
        id: Some("p-portal".to_string()),
        name: Some("Customer Portal".to_string()),
        version: Some("2.1".to_string()),
        project_type: Some(ProjectType::Product),
        release_ids: Some(ids(&["r-commons-3.12"])),
        ..Default::default()
    }])?;

    Ok(Services::in_memory()
        .with_components(components)
        .with_releases(releases)
        .with_projects(projects)
        .with_users(users)
        .with_vendors(vendors)
        .with_licenses(licenses))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sw360_rest=debug,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            RestConfig::from_yaml_file(path)?
        }
        None => RestConfig::default(),
    };
    tracing::info!(
        "Serving the SW360 API at {}{}",
        config.api.base_url,
        config.api.prefix
    );

    ServerBuilder::new()
        .with_config(config)
        .with_services(seeded_services()?)
        .with_default_resources()
        .serve()
        .await
}
