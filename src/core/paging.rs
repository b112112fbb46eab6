//! Sort-then-slice pagination and paged collection assembly

use crate::core::entity::Entity;
use crate::core::error::{RestResult, ValidationError};
use crate::core::hal::CollectionResource;
use crate::core::helper::RestHelper;
use crate::core::link::{HalLink, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};
use crate::core::pagination::{Pageable, PaginationResult, SortOrder};
use crate::core::request::RequestContext;
use std::cmp::Ordering;

/// Query parameter carrying the zero-based page number
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size
pub const PAGE_ENTRIES_PARAM: &str = "page_entries";

/// Query parameter carrying a sort criterion
pub const SORT_PARAM: &str = "sort";

/// Total order over two entities
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Compare entities by the string form of one backend field
///
/// An unset field compares as the empty string.
pub fn field_comparator<T: Entity>(field: &str) -> Comparator<T> {
    let field = field.to_string();
    Box::new(move |a: &T, b: &T| sort_key(a, &field).cmp(&sort_key(b, &field)))
}

fn compare_keys(a: &[String], b: &[String], criteria: &[(&str, bool)]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(criteria)
        .fold(Ordering::Equal, |ord, ((x, y), (_, ascending))| {
            ord.then_with(|| if *ascending { x.cmp(y) } else { y.cmp(x) })
        })
}

fn sort_key<T: Entity>(entity: &T, field: &str) -> String {
    entity
        .field_value(field)
        .map(|value| value.sort_key())
        .unwrap_or_default()
}

/// Pagination on top of [`RestHelper`]
pub trait PagingAwareRestHelper<T: Entity>: RestHelper<T> {
    /// Backend fields a collection of this type can be sorted by
    fn sortable_fields(&self) -> &'static [&'static str] {
        T::field_names()
    }

    /// Backend name of a sortable field, `None` if the field is not sortable
    fn sort_field(&self, name: &str) -> Option<&'static str> {
        let backend = self.backend_field_name(name);
        self.sortable_fields()
            .iter()
            .copied()
            .find(|field| *field == backend)
    }

    /// Comparator for a public or backend field name, `None` if the field
    /// is not sortable
    fn comparator_for_field(&self, name: &str) -> Option<Comparator<T>> {
        self.sort_field(name).map(field_comparator::<T>)
    }

    /// Backend field and ascending flag of every sort criterion, in order
    fn sort_criteria(&self, sort: &[SortOrder]) -> RestResult<Vec<(&'static str, bool)>> {
        sort.iter()
            .map(|order| {
                let field = self.sort_field(&order.property).ok_or_else(|| {
                    ValidationError::UnknownSortField {
                        entity_type: T::resource_name_singular().to_string(),
                        field: order.property.clone(),
                    }
                })?;
                Ok((field, order.direction.is_ascending()))
            })
            .collect()
    }

    /// Stable-sort `items` by the pageable's criteria, then cut out its page
    ///
    /// Sort keys are read once per item. A page past the end is empty.
    fn sort_and_slice(&self, items: Vec<T>, pageable: &Pageable) -> RestResult<Vec<T>> {
        let criteria = self.sort_criteria(&pageable.sort)?;

        let mut items = if criteria.is_empty() {
            items
        } else {
            let mut keyed: Vec<(Vec<String>, T)> = items
                .into_iter()
                .map(|item| {
                    let keys = criteria
                        .iter()
                        .map(|(field, _)| sort_key(&item, field))
                        .collect();
                    (keys, item)
                })
                .collect();
            keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, &criteria));
            keyed.into_iter().map(|(_, item)| item).collect()
        };

        let start = pageable.offset().min(items.len());
        let end = start.saturating_add(pageable.page_size).min(items.len());
        Ok(items.drain(start..end).collect())
    }

    /// Sort and slice when a pageable is given; otherwise keep every item
    fn create_pagination_result(
        &self,
        items: Vec<T>,
        pageable: Option<&Pageable>,
    ) -> RestResult<PaginationResult<T>> {
        match pageable {
            None => Ok(PaginationResult::unpaged(items)),
            Some(pageable) => {
                let total = items.len();
                let page = self.sort_and_slice(items, pageable)?;
                tracing::debug!(
                    "Paged {}: page {} of size {} holds {} of {} items",
                    T::resource_name(),
                    pageable.page,
                    pageable.page_size,
                    page.len(),
                    total
                );
                Ok(PaginationResult::paged(page, total, pageable))
            }
        }
    }

    /// Collection resource for `items`, paged when a pageable is given
    ///
    /// A paged collection carries `page` metadata, `first` and `last` links
    /// always, and `prev` / `next` links when those pages exist.
    fn build_paged_response(
        &self,
        items: Vec<T>,
        fields: &[String],
        pageable: Option<&Pageable>,
        request: &RequestContext,
    ) -> RestResult<CollectionResource<T>> {
        let result = self.create_pagination_result(items, pageable)?;
        let resources = result
            .items
            .iter()
            .map(|entity| self.to_resource(entity, fields))
            .collect::<RestResult<Vec<_>>>()?;

        let mut collection =
            CollectionResource::new(self.embedded_resource_key(), resources, request.self_href());

        if result.paging_active {
            for link in paging_links(&result, request) {
                collection.links.add(link);
            }
            collection.page = result.metadata();
        }
        Ok(collection)
    }
}

/// `first`, `prev`, `next` and `last` links for a paged result
pub fn paging_links<T>(result: &PaginationResult<T>, request: &RequestContext) -> Vec<HalLink> {
    let page_href = |page: usize| {
        let mut params = vec![
            (PAGE_PARAM, page.to_string()),
            (PAGE_ENTRIES_PARAM, result.page_size.to_string()),
        ];
        params.extend(result.sort.iter().map(|order| (SORT_PARAM, order.to_param())));
        request.href_with(&[PAGE_PARAM, PAGE_ENTRIES_PARAM, SORT_PARAM], &params)
    };

    let mut links = vec![HalLink::new(REL_FIRST, page_href(0))];
    if result.has_previous() {
        links.push(HalLink::new(REL_PREV, page_href(result.page - 1)));
    }
    if result.has_next() {
        links.push(HalLink::new(REL_NEXT, page_href(result.page + 1)));
    }
    links.push(HalLink::new(REL_LAST, page_href(result.last_page())));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::link::LinkBuilder;
    use crate::core::pagination::Direction;

    crate::impl_rest_entity!(Tile, "tile", "tiles", {
        name: String => "name",
        size: i64 => "size",
    });

    struct TileHelper {
        links: LinkBuilder,
    }

    impl RestHelper<Tile> for TileHelper {
        fn link_builder(&self) -> &LinkBuilder {
            &self.links
        }

        fn embedded_resource_key(&self) -> &'static str {
            "test:tiles"
        }

        fn embedded_fields(&self) -> &'static [&'static str] {
            &["id", "name"]
        }
    }

    impl PagingAwareRestHelper<Tile> for TileHelper {
        fn sortable_fields(&self) -> &'static [&'static str] {
            &["name", "size"]
        }
    }

    fn helper() -> TileHelper {
        TileHelper {
            links: LinkBuilder::new("http://h", "/api"),
        }
    }

    fn tile(id: &str, name: Option<&str>, size: i64) -> Tile {
        Tile {
            id: Some(id.to_string()),
            name: name.map(str::to_string),
            size: Some(size),
            ..Default::default()
        }
    }

    fn names(tiles: &[Tile]) -> Vec<&str> {
        tiles.iter().map(|t| t.name.as_deref().unwrap_or("")).collect()
    }

    #[test]
    fn test_unsortable_field_is_rejected() {
        assert!(helper().comparator_for_field("id").is_none());
        assert!(helper().comparator_for_field("size").is_some());
        let pageable = Pageable::new(0, 10).with_sort(vec![SortOrder::asc("colour")]);
        let err = helper().sort_and_slice(vec![], &pageable).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_sort_criteria_resolve_fields_and_directions() {
        let criteria = helper()
            .sort_criteria(&[SortOrder::desc("size"), SortOrder::asc("name")])
            .unwrap();
        assert_eq!(criteria, vec![("size", false), ("name", true)]);
        assert!(helper().sort_criteria(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unset_field_sorts_as_empty_string() {
        let items = vec![tile("1", Some("b"), 1), tile("2", None, 2), tile("3", Some("a"), 3)];
        let pageable = Pageable::new(0, 10).with_sort(vec![SortOrder::asc("name")]);
        let sorted = helper().sort_and_slice(items, &pageable).unwrap();
        assert_eq!(sorted[0].id.as_deref(), Some("2"));
        assert_eq!(names(&sorted[1..]), vec!["a", "b"]);
    }

    #[test]
    fn test_chained_comparators_and_stability() {
        let items = vec![
            tile("1", Some("x"), 2),
            tile("2", Some("y"), 1),
            tile("3", Some("x"), 1),
            tile("4", Some("x"), 2),
        ];
        let pageable = Pageable::new(0, 10).with_sort(vec![
            SortOrder::asc("name"),
            SortOrder {
                property: "size".into(),
                direction: Direction::Desc,
            },
        ]);
        let sorted = helper().sort_and_slice(items, &pageable).unwrap();
        let ids: Vec<_> = sorted.iter().map(|t| t.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["1", "4", "3", "2"]);
    }

    #[test]
    fn test_paging_links_on_middle_page() {
        let links = LinkBuilder::new("http://h", "/api");
        let request =
            RequestContext::new(&links, "/api/tiles", Some("page=1&page_entries=2")).unwrap();
        let pageable = Pageable::new(1, 2).with_sort(vec![SortOrder::desc("name")]);
        let result = PaginationResult::paged(vec![0u8, 0], 5, &pageable);
        let hrefs: Vec<(String, String)> = paging_links(&result, &request)
            .into_iter()
            .map(|l| (l.rel, l.href))
            .collect();
        assert_eq!(
            hrefs,
            vec![
                (
                    "first".to_string(),
                    "http://h/api/tiles?page=0&page_entries=2&sort=name,desc".to_string()
                ),
                (
                    "prev".to_string(),
                    "http://h/api/tiles?page=0&page_entries=2&sort=name,desc".to_string()
                ),
                (
                    "next".to_string(),
                    "http://h/api/tiles?page=2&page_entries=2&sort=name,desc".to_string()
                ),
                (
                    "last".to_string(),
                    "http://h/api/tiles?page=2&page_entries=2&sort=name,desc".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_unpaged_response_has_no_page_metadata() {
        let links = LinkBuilder::new("http://h", "/api");
        let request = RequestContext::new(&links, "/api/tiles", None).unwrap();
        let items = vec![tile("1", Some("a"), 1), tile("2", Some("b"), 2)];
        let collection = helper()
            .build_paged_response(items, &[], None, &request)
            .unwrap();
        assert!(collection.page.is_none());
        assert_eq!(collection.links.len(), 1);
        assert_eq!(collection.len(), 2);
    }
}
