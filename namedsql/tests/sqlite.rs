use assert_matches::assert_matches;
use namedsql::{Binder, Client, Config, Error, FromRow, SqlParams, UnusedParameters};
use sqlx::{Row, Sqlite};

#[derive(Debug, FromRow, PartialEq)]
struct Film {
    name: String,
    genre: String,
}

async fn setup(config: &Config) -> Client<Sqlite> {
    let mut client = Client::<Sqlite>::connect_with("sqlite::memory:", config).await.unwrap();
    client
        .raw(
            r#"
    create table films (
      name text,
      genre text,
      year integer
    );
    insert into films (name, genre, year) values ('Vanilla Sky', 'Drama', 2001);
    insert into films (name, genre, year) values ('Vanilla Sky', 'Thriller', 2001);
    insert into films (name, genre, year) values ('Minority Report', 'Thriller', 2002);
  "#,
        )
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn test_connect() {
    let client = Client::<Sqlite>::connect("sqlite::memory:").await.unwrap();
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_inaccessible() {
    let result = Client::<Sqlite>::connect("sqlite:///nonexistent-dir/films.db").await;
    assert_matches!(result, Err(Error::ConnectionError(_)));
}

#[tokio::test]
async fn test_all() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("name", "Vanilla Sky".to_string());
    let films: Vec<Film> = client
        .all_as("select name, genre from films where name = :name order by genre", params)
        .await
        .unwrap();
    assert_eq!(
        films,
        vec![
            Film { name: "Vanilla Sky".to_string(), genre: "Drama".to_string() },
            Film { name: "Vanilla Sky".to_string(), genre: "Thriller".to_string() },
        ]
    );
}

#[tokio::test]
async fn test_all_rows() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("genre", "Thriller".to_string());
    let rows = client
        .all("select name from films where genre = :genre order by year", params)
        .await
        .unwrap();
    let names = rows.iter().map(|r| r.get::<String, _>("name")).collect::<Vec<_>>();
    assert_eq!(names, vec!["Vanilla Sky", "Minority Report"]);
}

#[tokio::test]
async fn test_one() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("name", "Vanilla Sky".to_string());
    let row = client
        .one("select name, genre from films where name = :name order by genre", params)
        .await
        .unwrap();
    assert_eq!(row.get::<String, _>("name"), "Vanilla Sky");
    assert_eq!(row.get::<String, _>("genre"), "Drama");
}

#[tokio::test]
async fn test_multiple() {
    let mut client = setup(&Config::default()).await;
    let template = "select name, genre from films where name = :name and genre = :genre";
    let params = SqlParams::new().bind("genre", "Drama".to_string()).bind("name", "Vanilla Sky".to_string());
    let film: Film = client.one_as(template, params).await.unwrap();
    assert_eq!(film, Film { name: "Vanilla Sky".to_string(), genre: "Drama".to_string() });

    let params = SqlParams::new().bind("name", "Vanilla Sky".to_string()).bind("genre", "Drama".to_string());
    let again: Film = client.one_as(template, params).await.unwrap();
    assert_eq!(again, film);
}

#[tokio::test]
async fn test_repeated_parameter() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("year", 2001_i64);
    let rows = client
        .all("select name from films where year = :year and year >= :year - 0", params)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_optional() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("name", "Jerry Maguire".to_string());
    let film: Option<Film> = client
        .optional_as("select name, genre from films where name = :name", params)
        .await
        .unwrap();
    assert_eq!(film, None);

    let params = SqlParams::new().bind("name", "Jerry Maguire".to_string());
    let result = client.one("select name from films where name = :name", params).await;
    assert_matches!(result.map(|_| ()), Err(Error::SqlxError(sqlx::Error::RowNotFound)));
}

#[tokio::test]
async fn test_execute() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new()
        .bind("name", "Top Gun".to_string())
        .bind("genre", "Action".to_string())
        .bind("year", 1986_i64);
    let result = client
        .execute("insert into films (name, genre, year) values (:name, :genre, :year)", params)
        .await
        .unwrap();
    assert_eq!(result.rows_affected(), 1);

    let params = SqlParams::new().bind("year", 1990_i64);
    let count: i64 = client
        .one("select count(*) as n from films where year < :year", params)
        .await
        .unwrap()
        .get("n");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_missing_parameter() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("name", "Vanilla Sky".to_string());
    let result = client
        .all("select * from films where name = :name and genre = :genre", params)
        .await;
    assert_matches!(result.map(|rows| rows.len()), Err(Error::UnknownPlaceholder(name)) if name == "genre");
}

#[tokio::test]
async fn test_unused_parameter_dropped() {
    let config = Config { unused_parameters: UnusedParameters::Drop, ..Config::default() };
    let mut client = setup(&config).await;
    let params = SqlParams::new().bind("unused", 1_i64).bind("name", "Minority Report".to_string());
    let film: Film = client
        .one_as("select name, genre from films where name = :name", params)
        .await
        .unwrap();
    assert_eq!(film.genre, "Thriller");
}

#[tokio::test]
async fn test_unused_parameter_rejected() {
    let config = Config { unused_parameters: UnusedParameters::Reject, ..Config::default() };
    let mut client = setup(&config).await;
    let params = SqlParams::new().bind("unused", 1_i64).bind("name", "X".to_string());
    let result = client.all("select * from films where name = :name", params).await;
    assert_matches!(result.map(|rows| rows.len()), Err(Error::UnusedParameter(name)) if name == "unused");
}

#[tokio::test]
async fn test_placeholder_in_literal_is_untouched() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("name", "Vanilla Sky".to_string());
    let row = client
        .one("select ':name' as literal, count(*) as n from films where name = :name", params)
        .await
        .unwrap();
    assert_eq!(row.get::<String, _>("literal"), ":name");
    assert_eq!(row.get::<i64, _>("n"), 2);
}

#[tokio::test]
async fn test_unused_parameter_bound_by_default() {
    let mut client = setup(&Config::default()).await;
    let params = SqlParams::new().bind("unused", 1_i64).bind("name", "Minority Report".to_string());
    let film: Film = client
        .one_as("select name, genre from films where name = :name", params)
        .await
        .unwrap();
    assert_eq!(film.genre, "Thriller");
}

#[test]
fn test_bind_owned_values() -> namedsql::Result<()> {
    let params = SqlParams::<Sqlite>::new()
        .bind("name", "Vanilla Sky".to_string())
        .bind("year", 2001_i64);
    assert!(params.get("name").is_some_and(|arg| arg.type_name().ends_with("String")));
    let prepared = Binder::new().prepare("select :name, :year, :name", params)?;
    let (sql, _arguments) = prepared.into_arguments()?;
    assert_eq!(sql, "select $1, $2, $1");
    Ok(())
}
