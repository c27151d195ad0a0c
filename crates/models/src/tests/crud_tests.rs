use crate::db::connect_in_memory;
use crate::property::{self, NewProperty};
use crate::user;
use sea_orm::{EntityTrait, ActiveModelTrait, Set, ModelTrait};
use anyhow::Result;
use uuid::Uuid;

fn new_property(creator: Uuid, title: &str) -> NewProperty {
    NewProperty {
        title: title.into(),
        description: "desc".into(),
        property_type: "House".into(),
        location: "Somewhere".into(),
        price: 100.0,
        photo: "https://img.example.com/p.jpg".into(),
        creator,
    }
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    let created = user::create(&db, "Owner", "owner@example.com", "").await?;
    assert!(created.all_properties.is_empty());

    let found = user::find_by_email(&db, "owner@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(user::find_by_email(&db, "nobody@example.com").await?.is_none());

    // email is unique
    assert!(user::create(&db, "Other", "owner@example.com", "").await.is_err());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_all_properties_json_roundtrip() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, "Owner", "json@example.com", "").await?;

    let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let mut am: user::ActiveModel = u.into();
    am.all_properties = Set(user::PropertyIds(ids.clone()));
    let updated = am.update(&db).await?;

    let reloaded = user::Entity::find_by_id(updated.id).one(&db).await?.unwrap();
    assert_eq!(reloaded.all_properties.0, ids);
    Ok(())
}

#[tokio::test]
async fn test_property_insert_and_related_creator() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, "Owner", "rel@example.com", "").await?;

    let p = property::insert(&db, new_property(u.id, "Cabin")).await?;
    assert_eq!(p.creator, u.id);
    assert_eq!(p.title_search, "cabin");

    let (found, creator) = property::Entity::find_by_id(p.id)
        .find_also_related(user::Entity)
        .one(&db)
        .await?
        .unwrap();
    assert_eq!(found, p);
    assert_eq!(creator.map(|c| c.id), Some(u.id));

    let owned = u.find_related(property::Entity).all(&db).await?;
    assert_eq!(owned.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_property_insert_rejects_invalid_input() -> Result<()> {
    let db = connect_in_memory().await?;
    let u = user::create(&db, "Owner", "invalid@example.com", "").await?;

    let mut bad = new_property(u.id, "");
    assert!(property::insert(&db, bad.clone()).await.is_err());
    bad.title = "ok".into();
    bad.price = -5.0;
    assert!(property::insert(&db, bad).await.is_err());

    assert!(property::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_property_requires_existing_creator() -> Result<()> {
    let db = connect_in_memory().await?;
    let res = property::insert(&db, new_property(Uuid::new_v4(), "Orphan")).await;
    assert!(res.is_err(), "foreign key must reject unknown creator");
    Ok(())
}
