//! Integration tests for route index builds over in-memory content trees

use autoroute_index::content::AutoroutePart;
use autoroute_index::route::testing::{TreeNode, TreeResolver};
use autoroute_index::route::{IndexRecord, RouteHandlerAspect, RouteIndexBuilder};
use std::sync::Arc;

fn part(path: &str, route_contained_items: bool) -> AutoroutePart {
    AutoroutePart {
        path: path.to_string(),
        route_contained_items,
        ..Default::default()
    }
}

fn builder() -> RouteIndexBuilder<TreeResolver> {
    RouteIndexBuilder::new(Arc::new(TreeResolver::new()))
}

fn contained_ids(records: &[IndexRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            r.contained_content_item_id
                .clone()
                .unwrap_or_else(|| format!("self({})", r.content_item_id))
        })
        .collect()
}

/// Item X (published, "articles") > Y ("intro") > Z ("section-1")
#[tokio::test]
async fn test_articles_scenario() {
    let mut item = TreeNode::new("X")
        .with_container(
            "Items",
            vec![TreeNode::routed("Y", "intro")
                .with_container("Items", vec![TreeNode::routed("Z", "section-1")])],
        )
        .into_item(Some(part("articles", true)), true, false);

    let records = builder().build(&mut item).await.unwrap().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].path.as_deref(), Some("articles"));
    assert!(records[0].is_self_record());
    assert_eq!(records[1].path.as_deref(), Some("articles/intro"));
    assert_eq!(records[1].contained_content_item_id.as_deref(), Some("Y"));
    assert_eq!(records[2].path.as_deref(), Some("articles/intro/section-1"));
    assert_eq!(records[2].contained_content_item_id.as_deref(), Some("Z"));
    for record in &records {
        assert_eq!(record.content_item_id, "X");
        assert!(record.published);
        assert!(!record.latest);
    }
}

/// Tree A -> [B, C], B -> [D] emits [self(A), B, D, C]
#[tokio::test]
async fn test_depth_first_preorder() {
    let mut item = TreeNode::new("A")
        .with_container(
            "Items",
            vec![
                TreeNode::routed("B", "b").with_container("Items", vec![TreeNode::routed("D", "d")]),
                TreeNode::routed("C", "c"),
            ],
        )
        .into_item(Some(part("a", true)), true, true);

    let records = builder().build(&mut item).await.unwrap().unwrap();
    assert_eq!(contained_ids(&records), vec!["self(A)", "B", "D", "C"]);
}

#[tokio::test]
async fn test_route_contained_items_off_yields_self_record_only() {
    let mut item = TreeNode::new("A")
        .with_container("Items", vec![TreeNode::routed("B", "b")])
        .into_item(Some(part("a", false)), true, true);

    let records = builder().build(&mut item).await.unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert!(!item.autoroute.unwrap().removed);
}

#[tokio::test]
async fn test_removed_marker_cleared_after_tombstone() {
    let mut removed = part("a", false);
    removed.removed = true;
    let mut item = TreeNode::new("A").into_item(Some(removed), true, false);

    let records = builder().build(&mut item).await.unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path.as_deref(), Some("a"));
    assert!(!item.autoroute.unwrap().removed);
}

#[tokio::test]
async fn test_inactive_item_part_is_left_untouched() {
    let original = part("a", true);
    let mut item = TreeNode::new("A").into_item(Some(original.clone()), false, false);
    assert!(builder().build(&mut item).await.unwrap().is_none());
    assert_eq!(item.autoroute, Some(original));
}

#[tokio::test]
async fn test_self_path_rule() {
    let cases = [
        ("a", false, Some("a")),
        ("", false, None),
        ("a", true, None),
        ("", true, None),
    ];
    for (path, disabled, expected) in cases {
        let mut configured = part(path, false);
        configured.disabled = disabled;
        let mut item = TreeNode::new("A").into_item(Some(configured), true, true);

        let records = builder().build(&mut item).await.unwrap().unwrap();
        assert_eq!(records[0].path.as_deref(), expected, "path={:?} disabled={}", path, disabled);
    }
}

#[tokio::test]
async fn test_disabled_part_does_not_walk() {
    let resolver = Arc::new(TreeResolver::new());
    let builder = RouteIndexBuilder::new(Arc::clone(&resolver));
    let mut disabled = part("a", true);
    disabled.disabled = true;
    let mut item = TreeNode::new("A")
        .with_container("Items", vec![TreeNode::routed("B", "b")])
        .into_item(Some(disabled), true, true);

    let records = builder.build(&mut item).await.unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn test_disabled_nested_node_still_routes_descendants() {
    let mut item = TreeNode::new("A")
        .with_container(
            "Items",
            vec![TreeNode::routed("B", "drafts")
                .disabled()
                .with_container("Items", vec![TreeNode::routed("C", "c")])],
        )
        .into_item(Some(part("/a/", true)), true, true);

    let records = builder().build(&mut item).await.unwrap().unwrap();
    assert_eq!(contained_ids(&records), vec!["self(A)", "C"]);
    assert_eq!(records[1].path.as_deref(), Some("/a/drafts/c"));
}

#[tokio::test]
async fn test_absolute_nested_node() {
    let mut item = TreeNode::new("A")
        .with_container(
            "Items",
            vec![TreeNode::new("B")
                .with_route(RouteHandlerAspect::absolute("campaigns/spring"))
                .with_container("Items", vec![TreeNode::routed("C", "faq")])],
        )
        .into_item(Some(part("shop", true)), true, true);

    let records = builder().build(&mut item).await.unwrap().unwrap();
    assert_eq!(records[1].path.as_deref(), Some("campaigns/spring"));
    assert_eq!(records[2].path.as_deref(), Some("shop/campaigns/spring/faq"));
}

#[tokio::test]
async fn test_resolutions_are_sequential_and_ordered() {
    let resolver = Arc::new(TreeResolver::new());
    let builder = RouteIndexBuilder::new(Arc::clone(&resolver));
    let mut item = TreeNode::new("A")
        .with_container(
            "Items",
            vec![
                TreeNode::routed("B", "b").with_container("Items", vec![TreeNode::routed("D", "d")]),
                TreeNode::routed("C", "c"),
            ],
        )
        .into_item(Some(part("a", true)), true, true);

    builder.build(&mut item).await.unwrap();
    assert_eq!(
        resolver.calls(),
        vec![
            "contained:A",
            "route:B",
            "contained:B",
            "route:D",
            "contained:D",
            "route:C",
            "contained:C",
        ]
    );
}

#[tokio::test]
async fn test_concurrent_builds_share_resolver() {
    let builder = Arc::new(builder());
    let mut handles = Vec::new();
    for n in 0..8 {
        let builder = Arc::clone(&builder);
        handles.push(tokio::spawn(async move {
            let mut item = TreeNode::new(format!("item-{}", n))
                .with_container("Items", vec![TreeNode::routed("child", "c")])
                .into_item(Some(part(&format!("p{}", n), true)), true, true);
            builder.build(&mut item).await.unwrap().unwrap()
        }));
    }

    for (n, handle) in handles.into_iter().enumerate() {
        let records = handle.await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].path.as_deref(), Some(format!("p{}/c", n).as_str()));
        assert_eq!(records[1].content_item_id, format!("item-{}", n));
    }
}
