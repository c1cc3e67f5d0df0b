//! Sample data written into an empty store

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{BorrowRecord, BorrowStatus, Role, Toy, ToyCondition, User},
    storage::Document,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn seed_user(name: &str, email: &str, password: &str, role: Role, created: DateTime<Utc>) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
        phone: None,
        address: None,
        created_at: created,
    }
}

/// Staff accounts, three customers, three toys and one active borrow
pub fn default_document() -> Document {
    let admin = seed_user("Admin", "admin@toybox.local", "admin123", Role::Admin, timestamp(2024, 1, 1));
    let employee = seed_user(
        "Staff Member",
        "employee@toybox.local",
        "employee123",
        Role::Employee,
        timestamp(2024, 1, 15),
    );
    let alice = seed_user("Alice", "user1@example.com", "user123", Role::Customer, timestamp(2024, 2, 1));
    let bao = seed_user("Bao", "user2@example.com", "user123", Role::Customer, timestamp(2024, 2, 5));
    let chris = seed_user("Chris", "user3@example.com", "user123", Role::Customer, timestamp(2024, 2, 10));

    let toy = |name: &str, description: &str, category: &str, age_range: &str, condition, owner: &User, available, created| Toy {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        age_range: age_range.to_string(),
        condition,
        image_url: "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400".to_string(),
        owner_id: owner.id,
        owner_name: owner.name.clone(),
        available,
        created_at: created,
        updated_at: created,
    };

    let car = toy(
        "Remote control car",
        "Remote control car with rechargeable battery",
        "Electronic",
        "5-10 years",
        ToyCondition::Good,
        &alice,
        true,
        timestamp(2024, 1, 15),
    );
    let doll = toy(
        "Fashion doll",
        "Doll with several outfits",
        "Dolls",
        "3-8 years",
        ToyCondition::LikeNew,
        &bao,
        true,
        timestamp(2024, 2, 1),
    );
    let city = toy(
        "Building blocks city",
        "City building set with over 500 pieces",
        "Building",
        "6-12 years",
        ToyCondition::Good,
        &alice,
        false,
        timestamp(2024, 1, 20),
    );

    let borrow = BorrowRecord {
        id: Uuid::new_v4(),
        toy_id: city.id,
        toy_name: city.name.clone(),
        toy_image_url: city.image_url.clone(),
        borrower_id: chris.id,
        borrower_name: chris.name.clone(),
        owner_id: alice.id,
        owner_name: alice.name.clone(),
        borrow_date: date(2024, 3, 1),
        expected_return_date: date(2024, 3, 15),
        actual_return_date: None,
        status: BorrowStatus::Active,
        notes: Some("Will return on time".to_string()),
    };

    Document {
        users: vec![admin, employee, alice, bao, chris],
        toys: vec![car, doll, city],
        borrows: vec![borrow],
        session: None,
    }
}

impl Repository {
    /// Write the sample document if the store holds no data yet.
    /// Returns whether anything was written.
    pub async fn seed_if_empty(&self) -> AppResult<bool> {
        if !self.document().await.is_empty() {
            return Ok(false);
        }
        self.replace_document(default_document()).await?;
        tracing::info!("Seeded empty store with sample data");
        Ok(true)
    }
}
