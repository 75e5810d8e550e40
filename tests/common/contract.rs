//! Behaviour every `UrlRepository` implementation must share.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use linkpulse::domain::entities::NewUrlMapping;
use linkpulse::domain::repositories::UrlRepository;
use linkpulse::error::{AppError, UniqueKey};

pub fn new_mapping(url: &str, code: &str, created_at: DateTime<Utc>) -> NewUrlMapping {
    NewUrlMapping {
        original_url: url.to_string(),
        short_code: code.to_string(),
        created_at,
        expires_at: None,
    }
}

pub async fn insert_and_find(repo: &dyn UrlRepository) {
    let created = repo
        .insert(new_mapping("https://example.com/a", "abc123", Utc::now()))
        .await
        .unwrap();

    assert_eq!(created.short_code, "abc123");
    assert_eq!(created.original_url, "https://example.com/a");
    assert_eq!(created.clicks, 0);

    let by_code = repo.find_by_short_code("abc123").await.unwrap().unwrap();
    assert_eq!(by_code.id, created.id);

    let by_url = repo
        .find_by_original_url("https://example.com/a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.id, created.id);

    assert!(repo.find_by_short_code("zzz999").await.unwrap().is_none());
    assert!(
        repo.find_by_original_url("https://example.com/other")
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn duplicate_keys_conflict(repo: &dyn UrlRepository) {
    repo.insert(new_mapping("https://example.com/a", "abc123", Utc::now()))
        .await
        .unwrap();

    let err = repo
        .insert(new_mapping("https://example.com/b", "abc123", Utc::now()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conflict {
            key: UniqueKey::ShortCode
        }
    ));

    let err = repo
        .insert(new_mapping("https://example.com/a", "def456", Utc::now()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conflict {
            key: UniqueKey::OriginalUrl
        }
    ));

    assert_eq!(repo.count().await.unwrap(), 1);
}

pub async fn increment_clicks(repo: &dyn UrlRepository) {
    repo.insert(new_mapping("https://example.com/a", "abc123", Utc::now()))
        .await
        .unwrap();

    let first = repo.increment_clicks("abc123").await.unwrap().unwrap();
    assert_eq!(first.clicks, 1);

    let second = repo.increment_clicks("abc123").await.unwrap().unwrap();
    assert_eq!(second.clicks, 2);

    assert!(repo.increment_clicks("missing").await.unwrap().is_none());
}

pub async fn list_newest_first(repo: &dyn UrlRepository) {
    let base = Utc::now() - Duration::hours(1);
    for i in 0..5 {
        repo.insert(new_mapping(
            &format!("https://example.com/{i}"),
            &format!("code{i:02}"),
            base + Duration::seconds(i),
        ))
        .await
        .unwrap();
    }

    let all = repo.list(0, None).await.unwrap();
    let codes: Vec<_> = all.iter().map(|m| m.short_code.as_str()).collect();
    assert_eq!(codes, ["code04", "code03", "code02", "code01", "code00"]);

    let page = repo.list(1, Some(2)).await.unwrap();
    let codes: Vec<_> = page.iter().map(|m| m.short_code.as_str()).collect();
    assert_eq!(codes, ["code03", "code02"]);

    assert!(repo.list(10, Some(5)).await.unwrap().is_empty());
}

pub async fn aggregates(repo: &dyn UrlRepository) {
    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(repo.sum_clicks().await.unwrap(), 0);

    repo.insert(new_mapping("https://example.com/a", "aaaaaa", Utc::now()))
        .await
        .unwrap();
    repo.insert(new_mapping("https://example.com/b", "bbbbbb", Utc::now()))
        .await
        .unwrap();

    for _ in 0..3 {
        repo.increment_clicks("aaaaaa").await.unwrap();
    }
    repo.increment_clicks("bbbbbb").await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.sum_clicks().await.unwrap(), 4);
    assert!(repo.ping().await.is_ok());
}

pub async fn concurrent_increments(repo: Arc<dyn UrlRepository>, clicks: usize) {
    repo.insert(new_mapping("https://example.com/hot", "hot001", Utc::now()))
        .await
        .unwrap();

    let mut handles = Vec::with_capacity(clicks);
    for _ in 0..clicks {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_clicks("hot001").await.unwrap().unwrap().clicks
        }));
    }

    let mut seen = Vec::with_capacity(clicks);
    for handle in handles {
        seen.push(handle.await.unwrap());
    }
    seen.sort_unstable();

    let expected: Vec<i64> = (1..=clicks as i64).collect();
    assert_eq!(seen, expected);

    let stored = repo.find_by_short_code("hot001").await.unwrap().unwrap();
    assert_eq!(stored.clicks, clicks as i64);
}

pub async fn concurrent_inserts_of_same_url(repo: Arc<dyn UrlRepository>) {
    let mut handles = Vec::new();
    for i in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.insert(new_mapping(
                "https://example.com/race",
                &format!("race{i:02}"),
                Utc::now(),
            ))
            .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(AppError::Conflict {
                key: UniqueKey::OriginalUrl,
            }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
