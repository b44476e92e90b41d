use super::*;
use crate::models::{ImportRow, Question, Topic};
use crate::storage::{CatalogStore, InMemoryCatalogStore};
use std::sync::Arc;

async fn resolver_with(rows: Vec<ImportRow>) -> (MenuResolver, InMemoryCatalogStore) {
    let store = InMemoryCatalogStore::new();
    let client = CatalogClient::new(Arc::new(store.clone()));
    for row in &rows {
        client.upsert_row(row).await.unwrap();
    }
    (MenuResolver::new(client), store)
}

fn arrays_rows() -> Vec<ImportRow> {
    vec![
        ImportRow::new("Arrays", "What is 2-sum?", "Use a hashmap", "Track complements"),
        ImportRow::new("Arrays", "Reverse array", "Two pointers", "Swap ends"),
    ]
}

#[tokio::test]
async fn test_root_lists_topics_with_topic_tokens() {
    let (resolver, _) = resolver_with(arrays_rows()).await;

    let reply = resolver.root().await;
    assert_eq!(reply.body(), "Select a topic:");
    assert_eq!(
        reply.items(),
        &[MenuItem {
            label: "Arrays".to_string(),
            token: NavToken::topic("Arrays"),
        }]
    );
}

#[tokio::test]
async fn test_root_with_empty_catalog_is_empty_menu() {
    let (resolver, _) = resolver_with(Vec::new()).await;

    match resolver.root().await {
        Reply::Menu(menu) => {
            assert_eq!(menu.header, ROOT_HEADER);
            assert!(menu.items.is_empty());
        }
        other => panic!("Expected menu, got {other:?}"),
    }
}

#[tokio::test]
async fn test_topic_selection_lists_questions() {
    let (resolver, _) = resolver_with(arrays_rows()).await;

    let reply = resolver.select(&NavToken::topic("Arrays")).await;
    let Reply::Menu(menu) = reply else {
        panic!("Expected question menu");
    };
    assert_eq!(
        menu.header,
        "Here are some questions for Arrays: Select one to view the approach."
    );
    assert_eq!(menu.labels(), vec!["What is 2-sum?", "Reverse array"]);
    assert_eq!(
        menu.items[1].token,
        NavToken::question("Arrays", "Reverse array")
    );
}

#[tokio::test]
async fn test_topic_without_questions_is_terminal() {
    let (resolver, store) = resolver_with(arrays_rows()).await;
    store.insert_topic(&Topic::new("Trees")).await.unwrap();

    let reply = resolver.select(&NavToken::topic("Trees")).await;
    assert_eq!(reply, Reply::text("No questions found for Trees."));
    assert!(reply.items().is_empty());
}

#[tokio::test]
async fn test_question_selection_returns_answer() {
    let (resolver, _) = resolver_with(arrays_rows()).await;

    let reply = resolver
        .select(&NavToken::question("Arrays", "What is 2-sum?"))
        .await;
    assert_eq!(
        reply,
        Reply::text("Approach: Use a hashmap\nIntuition: Track complements")
    );
}

#[tokio::test]
async fn test_unknown_question_is_terminal() {
    let (resolver, _) = resolver_with(arrays_rows()).await;

    let reply = resolver.select_payload("question:Never stored").await;
    assert_eq!(reply, Reply::text(NO_APPROACH_MESSAGE));
}

#[tokio::test]
async fn test_qualified_question_ignores_other_topics() {
    let (resolver, _) = resolver_with(arrays_rows()).await;

    let reply = resolver
        .select(&NavToken::question("Graphs", "What is 2-sum?"))
        .await;
    assert_eq!(reply, Reply::text(NO_APPROACH_MESSAGE));
}

#[tokio::test]
async fn test_legacy_payload_uses_unqualified_lookup() {
    let (resolver, _) = resolver_with(arrays_rows()).await;

    let reply = resolver.select_payload("question:Reverse array").await;
    assert_eq!(reply, Reply::text("Approach: Two pointers\nIntuition: Swap ends"));
}

#[tokio::test]
async fn test_topic_named_like_legacy_prefix_routes_as_topic() {
    let rows = vec![ImportRow::new("question:odd", "Why?", "Because", "It is")];
    let (resolver, _) = resolver_with(rows).await;

    let payload = NavToken::topic("question:odd").encode();
    let reply = resolver.select_payload(&payload).await;
    let Reply::Menu(menu) = reply else {
        panic!("Expected question menu");
    };
    assert_eq!(menu.labels(), vec!["Why?"]);
}

#[tokio::test]
async fn test_empty_answer_counts_as_missing() {
    let (resolver, store) = resolver_with(Vec::new()).await;
    store
        .insert_question(&Question {
            topic: "Arrays".to_string(),
            question_text: "Half answered".to_string(),
            approach: "Binary search".to_string(),
            intuition: String::new(),
        })
        .await
        .unwrap();

    let reply = resolver
        .select(&NavToken::question("Arrays", "Half answered"))
        .await;
    assert_eq!(reply, Reply::text(NO_APPROACH_MESSAGE));
}

#[tokio::test]
async fn test_long_question_buttons_fit_callback_data() {
    let rows = vec![
        ImportRow::new(
            "Dynamic Programming",
            "Longest substring without repeating characters",
            "Sliding window",
            "Shrink on repeat",
        ),
        ImportRow::new("Dynamic Programming", "Climb stairs", "Fibonacci", "Two ways in"),
    ];
    let (resolver, _) = resolver_with(rows).await;

    let reply = resolver.select(&NavToken::topic("Dynamic Programming")).await;
    assert_eq!(reply.items().len(), 2);
    for item in reply.items() {
        assert!(item.token.fits_callback_data(), "{} does not fit", item.label);
    }
    assert_eq!(
        reply.items()[1].token,
        NavToken::question("Dynamic Programming", "Climb stairs")
    );

    let long_payload = reply.items()[0].token.encode();
    assert_eq!(
        resolver.select_payload(&long_payload).await,
        Reply::text("Approach: Sliding window\nIntuition: Shrink on repeat")
    );
}
