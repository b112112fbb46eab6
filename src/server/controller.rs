//! Request handling shared by every resource controller
//!
//! Controllers read the same handful of query parameters on every collection
//! endpoint:
//! - `page` / `page_entries`: request one page; paging is off unless at least
//!   one of them is present
//! - `sort=<field>[,asc|desc]`: repeatable, applied in order while paging
//! - `fields=<a>,<b>`: repeatable, extends the embedded view of each item
//!
//! Every other parameter is left to the endpoint (e.g. `name`, `sha1`, or the
//! external id kinds of `searchByExternalIds`).

use crate::config::PagingSettings;
use crate::core::entity::Entity;
use crate::core::error::{RequestError, RestError, RestResult, ValidationError};
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::pagination::{Pageable, SortOrder};
use crate::core::paging::{PAGE_ENTRIES_PARAM, PAGE_PARAM, PagingAwareRestHelper, SORT_PARAM};
use crate::core::request::RequestContext;
use crate::core::service::ExternalIdQuery;
use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Query parameter listing extra fields for embedded items
pub const FIELDS_PARAM: &str = "fields";

/// Parameters controlling the shape of a collection response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Extra fields for each embedded item
    pub fields: Vec<String>,

    /// Requested page, `None` when the request does not ask for paging
    pub pageable: Option<Pageable>,
}

impl ListParams {
    /// Read `fields`, `page`, `page_entries` and `sort` from the request
    pub fn from_request(request: &RequestContext, paging: &PagingSettings) -> RestResult<Self> {
        Ok(Self {
            fields: requested_fields(request),
            pageable: requested_pageable(request, paging)?,
        })
    }
}

/// Whether the request asks for paging at all
pub fn request_contains_paging(request: &RequestContext) -> bool {
    request.has_param(PAGE_PARAM) || request.has_param(PAGE_ENTRIES_PARAM)
}

/// Field names from every `fields` parameter, comma-split and trimmed
pub fn requested_fields(request: &RequestContext) -> Vec<String> {
    request
        .param_values(FIELDS_PARAM)
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sort criteria from every `sort` parameter, in request order
pub fn requested_sort(request: &RequestContext) -> RestResult<Vec<SortOrder>> {
    request
        .param_values(SORT_PARAM)
        .filter(|value| !value.trim().is_empty())
        .map(|value| SortOrder::parse(value).map_err(RestError::from))
        .collect()
}

/// The requested page, or `None` when paging is off
///
/// A negative page is read as page 0. A page size below 1 falls back to the
/// configured default, and one above the configured maximum is capped.
pub fn requested_pageable(
    request: &RequestContext,
    paging: &PagingSettings,
) -> RestResult<Option<Pageable>> {
    if !request_contains_paging(request) {
        return Ok(None);
    }

    let page = int_param(request, PAGE_PARAM)?
        .map(|page| usize::try_from(page).unwrap_or(0))
        .unwrap_or(0);

    let page_size = match int_param(request, PAGE_ENTRIES_PARAM)? {
        Some(size) if size >= 1 => {
            usize::try_from(size).map_or(paging.max_page_size, |s| s.min(paging.max_page_size))
        }
        _ => paging.default_page_size,
    };

    Ok(Some(
        Pageable::new(page, page_size).with_sort(requested_sort(request)?),
    ))
}

fn int_param(request: &RequestContext, name: &str) -> RestResult<Option<i64>> {
    let Some(raw) = request.param(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| {
        ValidationError::InvalidParameter {
            parameter: name.to_string(),
            value: raw.to_string(),
        }
        .into()
    })
}

/// External id query from every parameter that is not a paging, sort or
/// fields parameter
pub fn external_id_query(request: &RequestContext) -> ExternalIdQuery {
    let reserved = [PAGE_PARAM, PAGE_ENTRIES_PARAM, SORT_PARAM, FIELDS_PARAM];
    let mut query = ExternalIdQuery::new();
    for (key, value) in request.params() {
        if reserved.contains(&key.as_str()) {
            continue;
        }
        query.entry(key.clone()).or_default().insert(value.clone());
    }
    query
}

/// Answer a collection request, paged when the request asks for it
pub fn paged_collection<T, H>(
    helper: &H,
    items: Vec<T>,
    params: &ListParams,
    request: &RequestContext,
) -> RestResult<Json<CollectionResource<T>>>
where
    T: Entity,
    H: PagingAwareRestHelper<T>,
{
    let collection =
        helper.build_paged_response(items, &params.fields, params.pageable.as_ref(), request)?;
    Ok(Json(collection))
}

/// Read a POST or PATCH body, which must be a JSON object
pub fn parse_body<T: DeserializeOwned>(payload: Value) -> RestResult<T> {
    if !payload.is_object() {
        return Err(RequestError::InvalidBody {
            message: "expected a JSON object".to_string(),
        }
        .into());
    }
    Ok(serde_json::from_value(payload)?)
}

/// `201 Created` with a `Location` header pointing at the new resource
pub fn created<T: Serialize>(resource: HalResource<T>) -> Response {
    let location = resource.self_link().map(|link| link.href.clone());
    let mut response = (StatusCode::CREATED, Json(resource)).into_response();
    if let Some(value) = location.and_then(|href| header::HeaderValue::from_str(&href).ok()) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Outcome for one resource of a bulk request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiStatus {
    pub resource_id: String,
    pub status: u16,
}

impl MultiStatus {
    pub fn new(resource_id: impl Into<String>, status: StatusCode) -> Self {
        Self {
            resource_id: resource_id.into(),
            status: status.as_u16(),
        }
    }
}

/// `207 Multi-Status` listing the outcome for each resource
pub fn multi_status(results: Vec<MultiStatus>) -> Response {
    (StatusCode::MULTI_STATUS, Json(results)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::link::LinkBuilder;
    use crate::core::pagination::Direction;

    fn request(query: &str) -> RequestContext {
        RequestContext::new(&LinkBuilder::default(), "/api/components", Some(query)).unwrap()
    }

    #[test]
    fn test_no_paging_without_page_params() {
        let params =
            ListParams::from_request(&request("sort=name&fields=vendors"), &PagingSettings::default())
                .unwrap();
        assert!(params.pageable.is_none());
        assert_eq!(params.fields, vec!["vendors"]);
    }

    #[test]
    fn test_page_entries_alone_enables_paging() {
        let pageable = requested_pageable(&request("page_entries=5"), &PagingSettings::default())
            .unwrap()
            .unwrap();
        assert_eq!(pageable.page, 0);
        assert_eq!(pageable.page_size, 5);
    }

    #[test]
    fn test_page_size_fallbacks() {
        let paging = PagingSettings {
            default_page_size: 20,
            max_page_size: 100,
        };
        let zero = requested_pageable(&request("page=1&page_entries=0"), &paging)
            .unwrap()
            .unwrap();
        assert_eq!(zero.page_size, 20);

        let huge = requested_pageable(&request("page=0&page_entries=5000"), &paging)
            .unwrap()
            .unwrap();
        assert_eq!(huge.page_size, 100);

        let negative_page = requested_pageable(&request("page=-3"), &paging)
            .unwrap()
            .unwrap();
        assert_eq!(negative_page.page, 0);
    }

    #[test]
    fn test_unparsable_page_is_rejected() {
        let err = requested_pageable(&request("page=two"), &PagingSettings::default()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_sort_parameters_in_order() {
        let pageable = requested_pageable(
            &request("page=0&sort=name,desc&sort=createdOn"),
            &PagingSettings::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(pageable.sort.len(), 2);
        assert_eq!(pageable.sort[0].direction, Direction::Desc);
        assert_eq!(pageable.sort[1].property, "createdOn");
    }

    #[test]
    fn test_fields_are_comma_split_and_repeatable() {
        let fields = requested_fields(&request("fields=a,%20b&fields=c&fields="));
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_body() {
        let err = parse_body::<Value>(serde_json::json!(["a"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BODY");

        let parsed: std::collections::BTreeMap<String, String> =
            parse_body(serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(parsed["name"], "x");

        let err = parse_body::<std::collections::BTreeMap<String, String>>(
            serde_json::json!({"name": 1}),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_JSON");
    }

    #[test]
    fn test_multi_status_body() {
        let results = vec![
            MultiStatus::new("r-1", StatusCode::OK),
            MultiStatus::new("r-2", StatusCode::CONFLICT),
        ];
        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            serde_json::json!([
                {"resourceId": "r-1", "status": 200},
                {"resourceId": "r-2", "status": 409}
            ])
        );
        assert_eq!(multi_status(results).status(), StatusCode::MULTI_STATUS);
    }

    #[test]
    fn test_external_id_query_skips_reserved_params() {
        let query = external_id_query(&request(
            "mainframe-id=1&mainframe-id=2&purl=pkg:x&page=0&fields=name",
        ));
        assert_eq!(query.len(), 2);
        assert_eq!(query["mainframe-id"].len(), 2);
        assert!(query["purl"].contains("pkg:x"));
    }
}
