use libsql::{params, Connection};

use super::{format_timestamp, parse_timestamp};
use crate::error::Result;
use crate::models::{StoredWeights, WeightVector};

pub struct WeightRepository;

impl WeightRepository {
    pub async fn insert(conn: &Connection, weights: &StoredWeights) -> Result<()> {
        let json = serde_json::to_string(&weights.weights)?;

        conn.execute(
            r#"
            INSERT INTO weight_configs (id, weights, updated_by, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                weights.id.clone(),
                json,
                weights.updated_by.clone(),
                format_timestamp(&weights.updated_at),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_active(conn: &Connection) -> Result<Option<StoredWeights>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, weights, updated_by, updated_at
                FROM weight_configs
                ORDER BY updated_at DESC, rowid DESC
                LIMIT 1
                "#,
                (),
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_weights(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list(conn: &Connection, limit: u32) -> Result<Vec<StoredWeights>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, weights, updated_by, updated_at
                FROM weight_configs
                ORDER BY updated_at DESC, rowid DESC
                LIMIT ?1
                "#,
                params![limit as i64],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_weights(&row)?);
        }

        Ok(results)
    }

    fn row_to_weights(row: &libsql::Row) -> Result<StoredWeights> {
        let weights: WeightVector = serde_json::from_str(&row.get::<String>(1)?)?;

        Ok(StoredWeights {
            id: row.get(0)?,
            weights,
            updated_by: row.get(2)?,
            updated_at: parse_timestamp(&row.get::<String>(3)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::db::schema::init_schema;

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        init_schema(&conn).await.unwrap();
        conn
    }

    fn stored(id: &str, skills: f64, minutes_ago: i64) -> StoredWeights {
        StoredWeights {
            id: id.to_string(),
            weights: WeightVector {
                skills,
                ..Default::default()
            },
            updated_by: "admin".to_string(),
            updated_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn empty_table_has_no_active_weights() {
        let conn = setup_test_db().await;
        assert!(WeightRepository::get_active(&conn).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn newest_vector_is_active() {
        let conn = setup_test_db().await;

        WeightRepository::insert(&conn, &stored("old", 0.1, 10))
            .await
            .unwrap();
        WeightRepository::insert(&conn, &stored("new", 0.5, 0))
            .await
            .unwrap();
        WeightRepository::insert(&conn, &stored("older", 0.9, 20))
            .await
            .unwrap();

        let active = WeightRepository::get_active(&conn).await.unwrap().unwrap();
        assert_eq!(active.id, "new");
        assert_eq!(active.weights.skills, 0.5);
        assert_eq!(active.updated_by, "admin");
    }

    #[tokio::test]
    async fn history_is_retained_newest_first() {
        let conn = setup_test_db().await;

        WeightRepository::insert(&conn, &stored("a", 0.1, 2))
            .await
            .unwrap();
        WeightRepository::insert(&conn, &stored("b", 0.2, 1))
            .await
            .unwrap();
        WeightRepository::insert(&conn, &stored("c", 0.3, 0))
            .await
            .unwrap();

        let ids: Vec<String> = WeightRepository::list(&conn, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);

        assert_eq!(WeightRepository::list(&conn, 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn corrupt_row_is_an_error() {
        let conn = setup_test_db().await;
        conn.execute(
            "INSERT INTO weight_configs (id, weights, updated_by, updated_at) VALUES ('x', '{\"skills\": null}', 'admin', '2024-01-01T00:00:00.000000Z')",
            (),
        )
        .await
        .unwrap();

        assert!(WeightRepository::get_active(&conn).await.is_err());
    }
}
