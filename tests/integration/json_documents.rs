//! Integration tests for route index builds over JSON content documents

use autoroute_index::content::{ContainerField, JsonAspectResolver, JsonContentItem};
use autoroute_index::error::{AspectError, IndexError};
use autoroute_index::route::{IndexRecord, RouteIndexBuilder};
use serde_json::{json, Value};
use std::sync::Arc;

async fn build(document: Value) -> (JsonContentItem, Result<Option<Vec<IndexRecord>>, IndexError>) {
    let builder = RouteIndexBuilder::new(Arc::new(JsonAspectResolver::default()));
    let mut item = JsonContentItem::from_value(document).unwrap();
    let result = builder.build(&mut item).await;
    (item, result)
}

fn summary(records: &[IndexRecord]) -> Vec<(Option<String>, Option<String>, Option<String>)> {
    records
        .iter()
        .map(|r| {
            (
                r.path.clone(),
                r.contained_content_item_id.clone(),
                r.node_locator.clone(),
            )
        })
        .collect()
}

fn some(s: &str) -> Option<String> {
    Some(s.to_string())
}

#[tokio::test]
async fn test_nested_bag_document() {
    let document = json!({
        "ContentItemId": "X",
        "Published": true,
        "Latest": false,
        "AutoroutePart": { "Path": "articles", "RouteContainedItems": true },
        "BagPart": {
            "ContentItems": [{
                "ContentItemId": "Y",
                "AutoroutePart": { "Path": "intro" },
                "BagPart": {
                    "ContentItems": [{
                        "ContentItemId": "Z",
                        "AutoroutePart": { "Path": "section-1" }
                    }]
                }
            }]
        }
    });

    let (_, result) = build(document).await;
    let records = result.unwrap().unwrap();

    assert_eq!(
        summary(&records),
        vec![
            (some("articles"), None, None),
            (some("articles/intro"), some("Y"), some("BagPart.ContentItems[0]")),
            (
                some("articles/intro/section-1"),
                some("Z"),
                some("BagPart.ContentItems[0].BagPart.ContentItems[0]")
            ),
        ]
    );
    assert!(records.iter().all(|r| r.content_item_id == "X" && r.published && !r.latest));
}

#[tokio::test]
async fn test_flow_widgets_precede_bag_items() {
    let document = json!({
        "ContentItemId": "home",
        "Latest": true,
        "AutoroutePart": { "Path": "/home/", "RouteContainedItems": true },
        "BagPart": {
            "ContentItems": [{ "ContentItemId": "b1", "AutoroutePart": { "Path": "bag" } }]
        },
        "FlowPart": {
            "Widgets": [
                { "ContentItemId": "w1", "AutoroutePart": { "Path": "hero" } },
                { "ContentItemId": "w2" },
                { "ContentItemId": "w3", "AutoroutePart": { "Path": "/promo", "Absolute": true } }
            ]
        }
    });

    let (_, result) = build(document).await;
    let records = result.unwrap().unwrap();

    assert_eq!(
        summary(&records),
        vec![
            (some("/home/"), None, None),
            (some("/home/hero"), some("w1"), some("FlowPart.Widgets[0]")),
            (some("/promo"), some("w3"), some("FlowPart.Widgets[2]")),
            (some("/home/bag"), some("b1"), some("BagPart.ContentItems[0]")),
        ]
    );
    assert!(records.iter().all(|r| !r.published && r.latest));
}

#[tokio::test]
async fn test_unrouted_widget_children_are_walked() {
    let document = json!({
        "ContentItemId": "page",
        "Published": true,
        "AutoroutePart": { "Path": "docs", "RouteContainedItems": true },
        "FlowPart": {
            "Widgets": [{
                "ContentItemId": "container",
                "BagPart": {
                    "ContentItems": [{ "ContentItemId": "leaf", "AutoroutePart": { "Path": "leaf" } }]
                }
            }]
        }
    });

    let (_, result) = build(document).await;
    let records = result.unwrap().unwrap();

    // The unrouted widget contributes an empty segment to its children's base.
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].path.as_deref(), Some("docs/leaf"));
    assert_eq!(
        records[1].node_locator.as_deref(),
        Some("FlowPart.Widgets[0].BagPart.ContentItems[0]")
    );
}

#[tokio::test]
async fn test_disabled_contained_item() {
    let document = json!({
        "ContentItemId": "page",
        "Published": true,
        "AutoroutePart": { "Path": "p", "RouteContainedItems": true },
        "BagPart": {
            "ContentItems": [
                { "ContentItemId": "off", "AutoroutePart": { "Path": "off", "Disabled": true } },
                { "ContentItemId": "on", "AutoroutePart": { "Path": "on" } }
            ]
        }
    });

    let (_, result) = build(document).await;
    let records = result.unwrap().unwrap();
    assert_eq!(
        &summary(&records)[1..],
        &[(some("p/on"), some("on"), some("BagPart.ContentItems[1]"))]
    );
}

#[tokio::test]
async fn test_removed_document_clears_marker_and_writes_back() {
    let document = json!({
        "ContentItemId": "gone",
        "Published": false,
        "Latest": false,
        "AutoroutePart": { "Path": "gone", "Removed": true, "RouteContainedItems": true },
        "BagPart": { "ContentItems": [{ "ContentItemId": "c", "AutoroutePart": { "Path": "c" } }] }
    });

    let (item, result) = build(document).await;
    let records = result.unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path.as_deref(), Some("gone"));

    let written = item.to_value().unwrap();
    assert_eq!(written["AutoroutePart"]["Removed"], json!(false));
    assert_eq!(written["AutoroutePart"]["Path"], json!("gone"));
}

#[tokio::test]
async fn test_malformed_child_surfaces_as_error() {
    let document = json!({
        "ContentItemId": "page",
        "Published": true,
        "AutoroutePart": { "Path": "p", "RouteContainedItems": true },
        "BagPart": { "ContentItems": ["not an item"] }
    });

    let (_, result) = build(document).await;
    assert!(matches!(
        result,
        Err(IndexError::Aspect(AspectError::Malformed { ref locator, .. }))
            if locator == "BagPart.ContentItems[0]"
    ));
}

#[tokio::test]
async fn test_custom_containers() {
    let resolver = JsonAspectResolver::new(vec![ContainerField::new("ListPart", "Items")]);
    let builder = RouteIndexBuilder::new(Arc::new(resolver));
    let mut item = JsonContentItem::from_value(json!({
        "ContentItemId": "list",
        "Published": true,
        "AutoroutePart": { "Path": "list", "RouteContainedItems": true },
        "ListPart": { "Items": [{ "ContentItemId": "e", "AutoroutePart": { "Path": "entry" } }] },
        "BagPart": { "ContentItems": [{ "ContentItemId": "ignored", "AutoroutePart": { "Path": "x" } }] }
    }))
    .unwrap();

    let records = builder.build(&mut item).await.unwrap().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].path.as_deref(), Some("list/entry"));
    assert_eq!(records[1].node_locator.as_deref(), Some("ListPart.Items[0]"));
}

#[tokio::test]
async fn test_null_owner_path_gets_pathless_record() {
    let document = json!({
        "ContentItemId": "page",
        "Published": true,
        "AutoroutePart": { "Path": null, "Removed": true, "RouteContainedItems": true },
        "BagPart": { "ContentItems": [{ "ContentItemId": "c", "AutoroutePart": { "Path": "c" } }] }
    });

    let (item, result) = build(document).await;
    let records = result.unwrap().unwrap();
    assert_eq!(summary(&records), vec![(None, None, None)]);
    assert!(!item.autoroute.unwrap().removed);
}

#[tokio::test]
async fn test_null_child_path_is_empty_segment() {
    let document = json!({
        "ContentItemId": "page",
        "Published": true,
        "AutoroutePart": { "Path": "p", "RouteContainedItems": true },
        "BagPart": {
            "ContentItems": [{
                "ContentItemId": "wrapper",
                "AutoroutePart": { "Path": null, "Disabled": true },
                "BagPart": {
                    "ContentItems": [{ "ContentItemId": "leaf", "AutoroutePart": { "Path": "leaf" } }]
                }
            }]
        }
    });

    let (_, result) = build(document).await;
    let records = result.unwrap().unwrap();
    assert_eq!(
        &summary(&records)[1..],
        &[(
            some("p/leaf"),
            some("leaf"),
            some("BagPart.ContentItems[0].BagPart.ContentItems[0]")
        )]
    );
}
