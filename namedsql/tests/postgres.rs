//! Runs against the database in `DATABASE_URL`, e.g.
//! `postgres://localhost:5432/test-postgres?sslmode=disable`. Skipped when it is unset.
use assert_matches::assert_matches;
use namedsql::{Error, PgClient, SqlParams};
use sqlx::Row;

async fn setup() -> Option<PgClient> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let mut client = PgClient::connect(&url).await.unwrap();
    client
        .raw_execute(
            r#"
    create temporary table films (
      name text,
      genre text,
      created timestamp with time zone default now(),
      actors text[]
    );
    insert into films ("name", "genre", "actors") values ('Vanilla Sky', 'Drama', '{"Tom Cruise","Penelope Cruz"}');
  "#,
        )
        .await
        .unwrap();
    Some(client)
}

#[tokio::test]
async fn test_all() {
    let Some(mut client) = setup().await else { return };
    let params = SqlParams::new().bind("name", "Vanilla Sky".to_string());
    let rows = client
        .all("select name, genre from films where name = :name", params)
        .await
        .unwrap();
    assert_eq!(rows[0].get::<String, _>("name"), "Vanilla Sky");
    assert_eq!(rows[0].get::<String, _>("genre"), "Drama");
}

#[tokio::test]
async fn test_multiple() {
    let Some(mut client) = setup().await else { return };
    let params = SqlParams::new().bind("genre", "Drama".to_string()).bind("name", "Vanilla Sky".to_string());
    let row = client
        .one("select name, genre from films where name = :name and genre = :genre", params)
        .await
        .unwrap();
    assert_eq!(row.get::<String, _>("name"), "Vanilla Sky");
    assert_eq!(row.get::<String, _>("genre"), "Drama");
}

#[tokio::test]
async fn test_cast_and_array() {
    let Some(mut client) = setup().await else { return };
    let params = SqlParams::new().bind("actor", "Tom Cruise".to_string()).bind("n", "1".to_string());
    let row = client
        .one("select :n::int + 1 as next from films where :actor = any(actors)", params)
        .await
        .unwrap();
    assert_eq!(row.get::<i32, _>("next"), 2);
}

#[tokio::test]
async fn test_inaccessible() {
    let Ok(url) = std::env::var("DATABASE_URL") else { return };
    let mut url = url::Url::parse(&url).unwrap();
    url.set_path("/test-postgres-noooo");
    let result = PgClient::connect(url.as_str()).await;
    assert_matches!(result, Err(Error::ConnectionError(_)));
}
