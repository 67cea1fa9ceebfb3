//! Integration tests for missions and the Postgres record store.

use chrono::NaiveDate;
use playlife_core::mission::{MissionChanges, MissionStatus, MissionType, NewMission};
use playlife_core::submission::RecordStore;
use playlife_db::models::user::CreateUser;
use playlife_db::record_store::PgRecordStore;
use playlife_db::repositories::{MissionRepo, RoleRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> i64 {
    let role = RoleRepo::find_by_name(pool, "facilitator").await.unwrap().unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
    .id
}

fn changes(title: &str) -> MissionChanges {
    MissionChanges {
        title: title.to_string(),
        description: "Jerseys and cones for a girls' club".to_string(),
        country: "Benin".to_string(),
        city: "Cotonou".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 7, 12).unwrap(),
        mission_type: MissionType::Facilitator,
        image_url: None,
        fundraising_url: None,
        status: MissionStatus::Active,
    }
}

fn new_mission(created_by: i64, title: &str) -> NewMission {
    NewMission {
        created_by,
        fields: changes(title),
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.org").await;
    let created = MissionRepo::create(&pool, &new_mission(owner, "Cotonou kits"))
        .await
        .unwrap();

    assert_eq!(created.created_by, owner);
    assert_eq!(created.editable_fields(), changes("Cotonou kits"));

    let found = MissionRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert!(MissionRepo::find_by_id(&pool, created.id + 1000).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_end_before_start_is_accepted(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.org").await;
    let mut input = new_mission(owner, "Backwards dates");
    input.fields.start_date = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
    input.fields.end_date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    assert!(MissionRepo::create(&pool, &input).await.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_orders_newest_first(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.org").await;
    let other = create_user(&pool, "other@example.org").await;

    let first = MissionRepo::create(&pool, &new_mission(owner, "First")).await.unwrap();
    let mut done = new_mission(owner, "Done");
    done.fields.status = MissionStatus::Completed;
    MissionRepo::create(&pool, &done).await.unwrap();
    let third = MissionRepo::create(&pool, &new_mission(other, "Third")).await.unwrap();

    let all = MissionRepo::list(&pool, None, 25, 0).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, third.id);

    let active = MissionRepo::list(&pool, Some(MissionStatus::Active), 25, 0)
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|m| m.status == MissionStatus::Active));

    let paged = MissionRepo::list(&pool, None, 1, 2).await.unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].id, first.id);

    let mine = MissionRepo::list_by_owner(&pool, owner, 25, 0).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|m| m.created_by == owner));

    let stats = MissionRepo::stats_for_owner(&pool, owner).await.unwrap();
    assert_eq!((stats.total, stats.active), (2, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_fundraising_and_delete(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.org").await;
    let mission = MissionRepo::create(&pool, &new_mission(owner, "Before")).await.unwrap();

    let mut edit = changes("After");
    edit.status = MissionStatus::Completed;
    let updated = MissionRepo::update(&pool, mission.id, &edit).await.unwrap().unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.status, MissionStatus::Completed);
    assert_eq!(updated.created_by, owner);
    assert_eq!(updated.created_at, mission.created_at);

    let funded = MissionRepo::set_fundraising_url(
        &pool,
        mission.id,
        Some("https://fundraise.example.org/after"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(
        funded.fundraising_url.as_deref(),
        Some("https://fundraise.example.org/after")
    );

    assert!(MissionRepo::delete(&pool, mission.id).await.unwrap());
    assert!(!MissionRepo::delete(&pool, mission.id).await.unwrap());
    assert!(MissionRepo::update(&pool, mission.id, &edit).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_store_insert_and_update(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.org").await;
    let store = PgRecordStore::new(pool.clone());

    let mission = store.insert_mission(new_mission(owner, "Via store")).await.unwrap();
    assert_eq!(mission.created_by, owner);

    let updated = store
        .update_mission(mission.id, changes("Renamed"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");

    let err = store
        .update_mission(mission.id + 1000, changes("Ghost"))
        .await
        .unwrap_err();
    assert!(err.message.contains("no longer exists"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_store_reports_database_errors(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    // No such user: the foreign key rejects the insert.
    let err = store.insert_mission(new_mission(424_242, "Orphan")).await.unwrap_err();
    assert!(!err.message.is_empty());
}
