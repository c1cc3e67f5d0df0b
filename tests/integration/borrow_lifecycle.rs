//! Borrow lifecycle through the public library API over an in-memory store

use std::sync::Arc;

use toybox_server::{
    config::UploadsConfig,
    error::AppError,
    models::{BorrowStatus, CreateBorrow, CreateToy, RegisterUser, Role, ToyCondition, ToyQuery},
    policy,
    repository::{seed::default_document, Repository},
    services::Services,
    storage::{DocumentStore, MemoryStore},
};

async fn seeded() -> (Services, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_document(&default_document()).unwrap());
    let repository = Repository::open(store.clone()).await.unwrap();
    (Services::new(repository, UploadsConfig::default()), store)
}

fn borrow(toy_id: uuid::Uuid) -> CreateBorrow {
    CreateBorrow {
        toy_id,
        borrow_date: Some("2030-05-01".to_string()),
        expected_return_date: "2030-05-08".to_string(),
        notes: None,
    }
}

#[tokio::test]
async fn test_new_member_lists_and_lends_a_toy() {
    let (services, store) = seeded().await;

    let owner = services
        .sessions
        .register(RegisterUser {
            name: "Nam".to_string(),
            email: "nam@example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
            address: None,
        })
        .await
        .unwrap();
    let toy = services
        .toys
        .create(
            &owner,
            CreateToy {
                name: "Wooden train".to_string(),
                description: "Twelve piece track".to_string(),
                category: "Wooden".to_string(),
                age_range: "2-5 years".to_string(),
                condition: ToyCondition::Good,
                image_url: "https://example.com/train.png".to_string(),
            },
        )
        .await
        .unwrap();

    let borrower = services
        .sessions
        .login("user2@example.com", "user123")
        .await
        .unwrap()
        .unwrap();
    let query = ToyQuery {
        q: Some("TRAIN".to_string()),
        category: Some("all".to_string()),
    };
    let found = services.toys.browse(Some(&borrower), &query).await;
    assert_eq!(found.iter().map(|t| t.id).collect::<Vec<_>>(), vec![toy.id]);

    let record = services.borrows.request_borrow(&borrower, borrow(toy.id)).await.unwrap();
    assert!(services.toys.browse(Some(&borrower), &query).await.is_empty());

    // The owner decides, the borrower returns
    assert!(policy::can_decide_borrow(&owner, &record));
    assert!(!policy::can_decide_borrow(&borrower, &record));
    services.borrows.approve(record.id).await.unwrap();

    assert!(policy::can_mark_returned(&borrower, &record));
    let returned = services.borrows.mark_returned(record.id).await.unwrap();
    assert_eq!(returned.status, BorrowStatus::Returned);

    let persisted = store.read_all().await.unwrap();
    assert!(persisted.toys.iter().any(|t| t.id == toy.id && t.available));
    assert_eq!(persisted.session.map(|u| u.id), Some(borrower.id));
}

#[tokio::test]
async fn test_seeded_lent_toy_cannot_be_requested_or_deleted() {
    let (services, _store) = seeded().await;

    let lent = services
        .toys
        .list()
        .await
        .into_iter()
        .find(|t| !t.available)
        .unwrap();
    let bao = services
        .sessions
        .login("user2@example.com", "user123")
        .await
        .unwrap()
        .unwrap();

    let refused = services.borrows.request_borrow(&bao, borrow(lent.id)).await;
    assert!(matches!(refused, Err(AppError::Unavailable(_))));

    let owner = services.users.get(lent.owner_id).await.unwrap();
    let blocked = services.toys.delete(&owner, lent.id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_admin_promotes_customer_and_refreshes_session() {
    let (services, _store) = seeded().await;

    let customer = services
        .sessions
        .login("user3@example.com", "user123")
        .await
        .unwrap()
        .unwrap();
    let admin = services.users.list().await.into_iter().find(|u| u.role == Role::Admin).unwrap();
    assert!(policy::can_list_all_users(&admin));

    services
        .users
        .update(
            customer.id,
            &toybox_server::models::UpdateUser {
                role: Some(Role::Employee),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let current = services.sessions.current().await.unwrap();
    assert_eq!(current.role, Role::Employee);
    assert_eq!(services.stats.dashboard().await.employees, 2);
}
