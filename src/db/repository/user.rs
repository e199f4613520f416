use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{ProfileUpdate, UserProfile};

/// Account data required at registration. Credentials arrive pre-hashed.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: [u8; 32],
    pub password_salt: [u8; 32],
}

/// Stored login credentials for password verification.
pub struct StoredCredentials {
    pub user_id: Uuid,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

pub fn email_exists(conn: &Connection, email: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE email = ?1",
        params![email],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn insert_user(conn: &Connection, new: &NewUser) -> Result<UserProfile, DatabaseError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    conn.execute(
        "INSERT INTO users (id, name, email, password_hash, password_salt, phone, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id.to_string(),
            new.name,
            new.email,
            new.password_hash.as_slice(),
            new.password_salt.as_slice(),
            new.phone,
            now.to_rfc3339(),
            now.to_rfc3339(),
        ],
    )?;

    profile_by_id(conn, id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "user".into(),
        id: id.to_string(),
    })
}

pub fn credentials_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<StoredCredentials>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, password_hash, password_salt FROM users WHERE email = ?1",
            params![email],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, password_hash, password_salt)) => Ok(Some(StoredCredentials {
            user_id: parse_uuid(&id)?,
            password_hash,
            password_salt,
        })),
        None => Ok(None),
    }
}

pub fn profile_by_id(conn: &Connection, id: Uuid) -> Result<Option<UserProfile>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, email, phone, address, age, sex, diet_type, smoking_history,
             created_at, updated_at
             FROM users WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<i64>>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                    row.get::<_, String>(9)?,
                    row.get::<_, String>(10)?,
                ))
            },
        )
        .optional()?;

    let Some((id, name, email, phone, address, age, sex, diet_type, smoking_history, created, updated)) =
        row
    else {
        return Ok(None);
    };

    Ok(Some(UserProfile {
        id: parse_uuid(&id)?,
        name,
        email,
        phone,
        address,
        age,
        sex,
        diet_type,
        smoking_history,
        created_at: parse_timestamp(&created)?,
        updated_at: parse_timestamp(&updated)?,
    }))
}

/// Apply a partial profile update. Fields left `None` keep their stored
/// value. Returns the updated profile, or `None` for an unknown user.
pub fn update_profile(
    conn: &Connection,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<Option<UserProfile>, DatabaseError> {
    let changed = conn.execute(
        "UPDATE users SET
             phone           = COALESCE(?2, phone),
             address         = COALESCE(?3, address),
             age             = COALESCE(?4, age),
             sex             = COALESCE(?5, sex),
             diet_type       = COALESCE(?6, diet_type),
             smoking_history = COALESCE(?7, smoking_history),
             updated_at      = ?8
         WHERE id = ?1",
        params![
            id.to_string(),
            update.phone,
            update.address,
            update.age,
            update.sex,
            update.diet_type,
            update.smoking_history,
            Utc::now().to_rfc3339(),
        ],
    )?;

    if changed == 0 {
        return Ok(None);
    }
    profile_by_id(conn, id)
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::CorruptDocument(e.to_string()))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::CorruptDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn test_user(conn: &Connection, email: &str) -> UserProfile {
        insert_user(
            conn,
            &NewUser {
                name: "Asha",
                email,
                phone: "555-0100",
                password_hash: [7u8; 32],
                password_salt: [9u8; 32],
            },
        )
        .unwrap()
    }

    #[test]
    fn insert_and_fetch_profile() {
        let conn = open_memory_database().unwrap();
        let created = test_user(&conn, "asha@example.com");

        let fetched = profile_by_id(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.email, "asha@example.com");
        assert_eq!(fetched.phone, "555-0100");
        assert_eq!(fetched.age, None);
        assert_eq!(fetched.sex, "");
    }

    #[test]
    fn email_uniqueness_is_detectable() {
        let conn = open_memory_database().unwrap();
        test_user(&conn, "asha@example.com");
        assert!(email_exists(&conn, "asha@example.com").unwrap());
        assert!(!email_exists(&conn, "other@example.com").unwrap());
    }

    #[test]
    fn credentials_round_trip() {
        let conn = open_memory_database().unwrap();
        let user = test_user(&conn, "asha@example.com");

        let creds = credentials_by_email(&conn, "asha@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(creds.user_id, user.id);
        assert_eq!(creds.password_hash, vec![7u8; 32]);
        assert_eq!(creds.password_salt, vec![9u8; 32]);

        assert!(credentials_by_email(&conn, "nobody@example.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let conn = open_memory_database().unwrap();
        let user = test_user(&conn, "asha@example.com");

        let updated = update_profile(
            &conn,
            user.id,
            &ProfileUpdate {
                age: Some(41),
                sex: Some("Female".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.age, Some(41));
        assert_eq!(updated.sex, "Female");
        assert_eq!(updated.phone, "555-0100"); // untouched
        assert_eq!(updated.name, "Asha");
    }

    #[test]
    fn update_unknown_user_returns_none() {
        let conn = open_memory_database().unwrap();
        let result = update_profile(&conn, Uuid::new_v4(), &ProfileUpdate::default()).unwrap();
        assert!(result.is_none());
    }
}
