//! Seed data for user stores

use crate::types::User;
use chrono::{DateTime, NaiveDate, Utc};

/// Rows written per insert batch when seeding a database store
pub const SEED_BATCH_SIZE: usize = 50;

/// Build the seeded user with the given id
pub fn seed_user(id: i64, now: DateTime<Utc>) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        phone_number: "1234567890".to_string(),
        address: Some(format!("Address {id}")),
        city: Some(format!("City {id}")),
        state: Some(format!("State {id}")),
        zip_code: Some(format!("0000{id}")),
        country: Some(format!("Country {id}")),
        profile_picture_url: None,
        is_email_verified: true,
        is_active: true,
        created_at: now,
        created_by: "Seeder".to_string(),
        updated_at: now,
        updated_by: "Seeder".to_string(),
        last_login_at: None,
        role: "User".to_string(),
    }
}

/// Build `count` active users with ids `1..=count`
pub fn seed_users(count: usize) -> Vec<User> {
    let now = Utc::now();
    (1..=count as i64).map(|id| seed_user(id, now)).collect()
}
