//! Runs against a live Postgres. Set `DATABASE_URL` and use
//! `cargo test -- --ignored`; each test gets a fresh migrated database.

use sqlx::PgPool;

use orgraph::db::DatabaseError;
use orgraph::models::organization::NewOrganization;
use orgraph::models::user::UserRef;
use orgraph::store::postgres::PgStore;
use orgraph::store::Store;

async fn seed_user(pool: &PgPool, id: &str, email: &str) {
    sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2)")
        .bind(id)
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn ids(users: &[orgraph::models::user::User]) -> Vec<&str> {
    users.iter().map(|u| u.id.as_str()).collect()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_links_creator_and_connect_targets(pool: PgPool) {
    seed_user(&pool, "u1", "u1@example.com").await;
    seed_user(&pool, "u2", "u2@example.com").await;
    seed_user(&pool, "u3", "u3@example.com").await;
    let store = PgStore::new(pool.clone());

    let created = store
        .create_organization(&NewOrganization {
            name: "Cool Company".to_string(),
            connect: vec![
                UserRef::Id("u2".to_string()),
                UserRef::Email("u3@example.com".to_string()),
                UserRef::Id("nobody".to_string()),
                UserRef::Id("u1".to_string()),
            ],
            creator_id: "u1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.organization.name, "Cool Company");
    assert_eq!(ids(&created.users), vec!["u1", "u2", "u3"]);
    assert_eq!(count(&pool, "organizations").await, 1);
    assert_eq!(count(&pool, "organization_users").await, 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_same_user_by_id_and_email_is_linked_once(pool: PgPool) {
    seed_user(&pool, "u1", "u1@example.com").await;
    let store = PgStore::new(pool.clone());

    let created = store
        .create_organization(&NewOrganization {
            name: "Solo".to_string(),
            connect: vec![
                UserRef::Email("u1@example.com".to_string()),
                UserRef::Id("u1".to_string()),
            ],
            creator_id: "u1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(ids(&created.users), vec!["u1"]);
    assert_eq!(count(&pool, "organization_users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_creator_writes_nothing(pool: PgPool) {
    seed_user(&pool, "u2", "u2@example.com").await;
    let store = PgStore::new(pool.clone());

    let result = store
        .create_organization(&NewOrganization {
            name: "Cool Company".to_string(),
            connect: vec![
                UserRef::Id("u2".to_string()),
                UserRef::Id("removed".to_string()),
            ],
            creator_id: "removed".to_string(),
        })
        .await;

    assert!(matches!(result, Err(DatabaseError::UnknownCreator(id)) if id == "removed"));
    assert_eq!(count(&pool, "organizations").await, 0);
    assert_eq!(count(&pool, "organization_users").await, 0);
}
