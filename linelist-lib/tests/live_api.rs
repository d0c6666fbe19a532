//! Integration tests against a running linelist backend.
//!
//! These tests require a reachable backend and are ignored by default.
//! To run them, create a `.env` file in the linelist-lib directory with:
//!
//! ```env
//! LINELIST_URL=https://linelist.example.org/api
//! LINELIST_TOKEN=your-access-token
//! LINELIST_RESOURCE=cases
//! ```
//!
//! Then run: `cargo test -p linelist-lib -- --ignored`

use std::env;

use linelist_lib::LinelistClient;
use linelist_lib::query::RequestQuery;

fn load_env() -> Option<(String, String, String)> {
    let _ = dotenvy::dotenv();

    let url = env::var("LINELIST_URL").ok()?;
    let token = env::var("LINELIST_TOKEN").ok()?;
    let resource = env::var("LINELIST_RESOURCE").ok()?;

    Some((url, token, resource))
}

fn connect() -> (LinelistClient, String) {
    let (url, token, resource) =
        load_env().expect("Missing required environment variables. See module docs.");

    let client = LinelistClient::builder()
        .url(url)
        .access_token(token)
        .build();

    (client, resource)
}

mod listing {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a reachable backend in .env file"]
    async fn test_list_first_page() {
        let (client, resource) = connect();

        let mut query = RequestQuery::new();
        query.exclude_deleted();
        query.limit(10);

        let records = client.list(&resource, &query).await.expect("List failed");

        assert!(records.len() <= 10, "Limit should cap the page size");
        println!("Fetched {} records from {resource}", records.len());
    }

    #[tokio::test]
    #[ignore = "requires a reachable backend in .env file"]
    async fn test_count_agrees_with_full_listing() {
        let (client, resource) = connect();

        let mut query = RequestQuery::new();
        query.exclude_deleted();

        let count = client.count(&resource, &query).await.expect("Count failed");

        let mut total = 0u64;
        let mut pages = client.pages(&resource, &query, 50);
        while let Some(page) = pages.next().await {
            total += page.expect("Page fetch failed").len() as u64;
        }

        assert_eq!(total, count, "Page walk should visit every counted record");
        println!("Walked {total} records across pages");
    }

    #[tokio::test]
    #[ignore = "requires a reachable backend in .env file"]
    async fn test_first_returns_at_most_one() {
        let (client, resource) = connect();

        let record = client
            .first(&resource, &RequestQuery::new())
            .await
            .expect("First failed");

        println!("First record present: {}", record.is_some());
    }
}
