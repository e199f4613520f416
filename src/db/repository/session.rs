use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::user::{parse_timestamp, parse_uuid};
use crate::db::DatabaseError;

/// Session row resolved from a token hash. Expiry is checked by the
/// caller so expired tokens can be reported distinctly.
pub struct SessionOwner {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

pub fn insert_session(
    conn: &Connection,
    user_id: Uuid,
    token_hash: &[u8; 32],
    ttl_days: i64,
) -> Result<DateTime<Utc>, DatabaseError> {
    let now = Utc::now();
    let expires_at = now + Duration::days(ttl_days);

    conn.execute(
        "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            token_hash.as_slice(),
            user_id.to_string(),
            now.to_rfc3339(),
            expires_at.to_rfc3339(),
        ],
    )?;

    Ok(expires_at)
}

pub fn owner_for_token(
    conn: &Connection,
    token_hash: &[u8; 32],
) -> Result<Option<SessionOwner>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT user_id, expires_at FROM sessions WHERE token_hash = ?1",
            params![token_hash.as_slice()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    match row {
        Some((user_id, expires_at)) => Ok(Some(SessionOwner {
            user_id: parse_uuid(&user_id)?,
            expires_at: parse_timestamp(&expires_at)?,
        })),
        None => Ok(None),
    }
}

/// Drop sessions past their expiry. Returns the number removed.
pub fn purge_expired(conn: &Connection) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM sessions WHERE expires_at < ?1",
        params![Utc::now().to_rfc3339()],
    )?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::user::{insert_user, NewUser};
    use crate::db::sqlite::open_memory_database;

    fn seeded(conn: &Connection) -> Uuid {
        insert_user(
            conn,
            &NewUser {
                name: "Asha",
                email: "asha@example.com",
                phone: "",
                password_hash: [0u8; 32],
                password_salt: [0u8; 32],
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn token_resolves_to_owner() {
        let conn = open_memory_database().unwrap();
        let user_id = seeded(&conn);
        let hash = [3u8; 32];

        let expires = insert_session(&conn, user_id, &hash, 7).unwrap();
        assert!(expires > Utc::now());

        let owner = owner_for_token(&conn, &hash).unwrap().unwrap();
        assert_eq!(owner.user_id, user_id);
        assert!(owner.expires_at > Utc::now());
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let conn = open_memory_database().unwrap();
        seeded(&conn);
        assert!(owner_for_token(&conn, &[9u8; 32]).unwrap().is_none());
    }

    #[test]
    fn expired_sessions_are_purged() {
        let conn = open_memory_database().unwrap();
        let user_id = seeded(&conn);

        // A session that expired yesterday
        insert_session(&conn, user_id, &[1u8; 32], -1).unwrap();
        insert_session(&conn, user_id, &[2u8; 32], 7).unwrap();

        let removed = purge_expired(&conn).unwrap();
        assert_eq!(removed, 1);
        assert!(owner_for_token(&conn, &[1u8; 32]).unwrap().is_none());
        assert!(owner_for_token(&conn, &[2u8; 32]).unwrap().is_some());
    }

    #[test]
    fn expired_token_still_resolves_for_distinct_rejection() {
        let conn = open_memory_database().unwrap();
        let user_id = seeded(&conn);
        insert_session(&conn, user_id, &[5u8; 32], -1).unwrap();

        // The row is returned; expiry policy belongs to the auth layer.
        let owner = owner_for_token(&conn, &[5u8; 32]).unwrap().unwrap();
        assert!(owner.expires_at < Utc::now());
    }
}
