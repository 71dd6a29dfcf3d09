mod common;

use common::{sample_corpus, setup, FixedEmbedder, QueryFailingEmbedder, DEFAULT_THRESHOLD};
use folio_rag::application::search::RetrievalEngine;
use folio_rag::domain::entities::news_article::NewsArticle;
use folio_rag::domain::error::DomainError;
use std::sync::Arc;

fn three_article_engine_inputs() -> (Vec<NewsArticle>, FixedEmbedder) {
    let articles = vec![
        NewsArticle::new("alpha", "https://n/0", ""),
        NewsArticle::new("beta", "https://n/1", ""),
        NewsArticle::new("gamma", "https://n/2", ""),
    ];
    // Squared distances to the origin: 3.0, 0.5, 3.0
    let embedder = FixedEmbedder::new(
        &[
            ("alpha", vec![0.0, 3.0_f32.sqrt()]),
            ("beta", vec![0.5_f32.sqrt(), 0.0]),
            ("gamma", vec![-(3.0_f32.sqrt()), 0.0]),
            ("query", vec![0.0, 0.0]),
        ],
        vec![10.0, 10.0],
    );
    (articles, embedder)
}

#[tokio::test]
async fn test_single_article_under_threshold() {
    let (articles, embedder) = three_article_engine_inputs();
    let engine = RetrievalEngine::build(articles, Arc::new(embedder), 1.0).await.unwrap();

    let results = engine.search("query", 5, 2.0).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].position, 1);
    assert_eq!(results[0].article.title, "beta");
    assert!((results[0].distance - 0.5).abs() < 1e-5);
}

#[tokio::test]
async fn test_threshold_is_strict() {
    let (articles, embedder) = three_article_engine_inputs();
    let engine = RetrievalEngine::build(articles, Arc::new(embedder), 1.0).await.unwrap();

    // beta sits at 0.5; a threshold just above admits it, one well below does not
    assert_eq!(engine.search("query", 5, 0.5001).await.unwrap().len(), 1);
    assert!(engine.search("query", 5, 0.4).await.unwrap().is_empty());
    // Both 3.0 articles come back once the threshold clears them, in corpus order
    let all = engine.search("query", 5, 3.5).await.unwrap();
    let positions: Vec<usize> = all.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 0, 2]);
}

#[tokio::test]
async fn test_distance_equal_to_threshold_is_excluded() {
    let articles = vec![NewsArticle::new("edge", "https://n/edge", "")];
    let embedder = FixedEmbedder::new(&[("edge", vec![1.0, 0.0]), ("q", vec![0.0, 0.0])], vec![5.0, 5.0]);
    let engine = RetrievalEngine::build(articles, Arc::new(embedder), 1.0).await.unwrap();

    // Squared distance is exactly 1.0
    assert!(engine.search("q", 5, 1.0).await.unwrap().is_empty());
    assert!(engine.search_by_company("q", 5).await.unwrap().is_empty());
    let hits = engine.search("q", 5, 1.0001).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].distance, 1.0);
}

#[tokio::test]
async fn test_results_sorted_bounded_and_under_threshold() {
    let rag = setup().await;
    for (query, top_k, threshold) in [
        ("apple earnings", 3, 2.0),
        ("interest rates and dividends", 5, 1.8),
        ("oil", 1, 2.0),
    ] {
        let results = rag.search(query, top_k, threshold).await.unwrap();
        assert!(results.len() <= top_k);
        assert!(results.iter().all(|r| r.distance < threshold));
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}

#[tokio::test]
async fn test_all_articles_returned_when_all_qualify() {
    let rag = setup().await;
    let n = sample_corpus().len();
    // Unit vectors are never more than 4.0 apart in squared L2
    let results = rag.search("market news", n + 3, 4.5).await.unwrap();
    assert_eq!(results.len(), n);
}

#[tokio::test]
async fn test_tiny_threshold_is_empty_not_error() {
    let rag = setup().await;
    let results = rag.search("completely unrelated gibberish", 5, 0.0001).await.unwrap();
    assert!(results.is_empty());

    let shaped = rag.search_news("completely unrelated gibberish", 5, 0.0001).await.unwrap();
    assert_eq!(shaped.result_count, 0);
    assert!(shaped.news_articles.is_empty());
}

#[tokio::test]
async fn test_best_match_first() {
    let rag = setup().await;
    let results = rag.search("Apple earnings", 5, 2.0).await.unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0].article.link, "https://news.example/apple-earnings");
}

#[tokio::test]
async fn test_company_and_topic_use_default_threshold() {
    let rag = setup().await;

    let company = rag.search_by_company("Tesla", 5).await.unwrap();
    assert_eq!(company[0].article.link, "https://news.example/tesla-deliveries");
    assert!(company.iter().all(|r| r.distance < DEFAULT_THRESHOLD));

    let topic = rag.search_by_topic("dividend", 5).await.unwrap();
    assert_eq!(topic[0].article.link, "https://news.example/dividends");
    assert!(topic.iter().all(|r| r.distance < DEFAULT_THRESHOLD));

    let shaped = rag.company_news("Tesla", 5).await.unwrap();
    assert_eq!(shaped.query, "Tesla");
    assert_eq!(shaped.result_count, shaped.news_articles.len());
}

#[tokio::test]
async fn test_deterministic_results() {
    let rag = setup().await;
    let a = rag.search("federal reserve rates", 5, 2.0).await.unwrap();
    let b = rag.search("federal reserve rates", 5, 2.0).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_embedding_failure_is_retrieval_error() {
    let articles = vec![NewsArticle::new("a", "https://n/a", "b")];
    let engine = RetrievalEngine::build(articles, Arc::new(QueryFailingEmbedder), 1.0)
        .await
        .unwrap();
    let err = engine.search("anything", 5, 2.0).await.unwrap_err();
    assert!(matches!(err, DomainError::Retrieval(_)), "got {err:?}");
}

#[tokio::test]
async fn test_invalid_params() {
    let rag = setup().await;
    assert!(matches!(
        rag.search("apple", 0, 2.0).await,
        Err(DomainError::InvalidInput(_))
    ));
    assert!(matches!(
        rag.search("apple", 5, f32::NAN).await,
        Err(DomainError::InvalidInput(_))
    ));
}
