//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use axum_test::TestServer;
use std::collections::{BTreeMap, BTreeSet};
use sw360_rest::prelude::*;

pub const BASE: &str = "http://localhost:8080/api";

pub fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn component(id: &str, name: &str) -> Component {
    Component {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        component_type: Some(ComponentType::Oss),
        ..Default::default()
    }
}

/// Components named C, A, E, B, D, stored in that order
pub fn components() -> Vec<Component> {
    vec![
        component("c-c", "C"),
        Component {
            vendor_names: Some(set(&["Acme Corp"])),
            release_ids: Some(set(&["r-1"])),
            moderators: Some(set(&["admin@sw360.org", "ghost@sw360.org"])),
            external_ids: Some(BTreeMap::from([("purl".to_string(), "pkg:a".to_string())])),
            homepage: Some("https://a.example.org".to_string()),
            ..component("c-a", "A")
        },
        component("c-e", "E"),
        component("c-b", "B"),
        component("c-d", "D"),
    ]
}

pub fn releases() -> Vec<Release> {
    vec![
        Release {
            id: Some("r-1".to_string()),
            name: Some("A".to_string()),
            version: Some("1.0".to_string()),
            component_id: Some("c-a".to_string()),
            cpeid: Some("cpe:2.3:a:acme:a:1.0".to_string()),
            vendor: Some(Vendor {
                id: Some("v-1".to_string()),
                fullname: Some("Acme Corp".to_string()),
                ..Default::default()
            }),
            main_license_ids: Some(set(&["MIT", "Missing-1.0"])),
            attachments: Some(vec![Attachment {
                id: Some("att-1".to_string()),
                attachment_content_id: Some("ac-1".to_string()),
                filename: Some("a-1.0-sources.zip".to_string()),
                sha1: Some("abc123".to_string()),
                attachment_type: Some("SOURCE".to_string()),
                created_by: Some("admin@sw360.org".to_string()),
                check_status: Some(CheckStatus::Accepted),
                ..Default::default()
            }]),
            external_ids: Some(BTreeMap::from([(
                "mainframe-id".to_string(),
                "1831A3".to_string(),
            )])),
            ..Default::default()
        },
        Release {
            id: Some("r-2".to_string()),
            name: Some("A".to_string()),
            version: Some("2.0".to_string()),
            component_id: Some("c-a".to_string()),
            ..Default::default()
        },
    ]
}

pub fn services() -> Services {
    let users = InMemoryEntityService::with_entities(vec![User {
        id: Some("u-1".to_string()),
        email: Some("admin@sw360.org".to_string()),
        fullname: Some("SW360 Admin".to_string()),
        ..Default::default()
    }])
    .unwrap();
    let vendors = InMemoryEntityService::with_entities(vec![Vendor {
        id: Some("v-1".to_string()),
        fullname: Some("Acme Corp".to_string()),
        shortname: Some("Acme".to_string()),
        ..Default::default()
    }])
    .unwrap();
    let licenses = InMemoryEntityService::with_entities(vec![License {
        id: Some("MIT".to_string()),
        shortname: Some("MIT".to_string()),
        fullname: Some("MIT License".to_string()),
        text: Some("Permission is hereby granted...".to_string()),
        ..Default::default()
    }])
    .unwrap();
    let projects = InMemoryEntityService::with_entities(vec![Project {
        id: Some("p-1".to_string()),
        name: Some("Portal".to_string()),
        version: Some("1.0".to_string()),
        project_type: Some(ProjectType::Product),
        release_ids: Some(set(&["r-1"])),
        moderators: Some(set(&["admin@sw360.org"])),
        external_ids: Some(BTreeMap::from([("crm-id".to_string(), "42".to_string())])),
        ..Default::default()
    }])
    .unwrap();

    Services::in_memory()
        .with_components(InMemoryEntityService::with_entities(components()).unwrap())
        .with_releases(InMemoryEntityService::with_entities(releases()).unwrap())
        .with_projects(projects)
        .with_users(users)
        .with_vendors(vendors)
        .with_licenses(licenses)
}

pub fn server_with(services: Services) -> TestServer {
    let app = ServerBuilder::new()
        .with_services(services)
        .with_default_resources()
        .build()
        .expect("Failed to build app");
    TestServer::try_new(app).expect("Failed to create test server")
}

pub fn server() -> TestServer {
    server_with(services())
}

/// `name` of every embedded item under `relation`
pub fn names(body: &serde_json::Value, relation: &str) -> Vec<String> {
    body["_embedded"][relation]
        .as_array()
        .expect("embedded list")
        .iter()
        .map(|item| item["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
