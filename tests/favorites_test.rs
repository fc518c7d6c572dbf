use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use vestiaire::{
    domain::{
        Announcement, CreateAnnouncementRequest, CreateUserRequest, LeagueDivision, OfferType,
        ProfileType, Region, SavedAnnouncement, User,
    },
    error::AppError,
    repository::{FavoriteRepository, UserRepository},
    service::ServiceContext,
};

async fn setup() -> anyhow::Result<(ServiceContext, User)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let ctx = ServiceContext::new(pool);

    let user = ctx
        .user_repo
        .create(CreateUserRequest {
            email: "player@example.com".to_string(),
            display_name: "Test Player".to_string(),
            profil: Some(ProfileType::Player),
        })
        .await?;

    Ok((ctx, user))
}

async fn create_announcement(ctx: &ServiceContext, title: &str) -> anyhow::Result<Announcement> {
    Ok(ctx
        .announcement_service
        .create(CreateAnnouncementRequest {
            offer_type: OfferType::JobOffer,
            title: title.to_string(),
            description: "Club de Starligue recherche un pivot pour la saison prochaine."
                .to_string(),
            offer_user_profil: ProfileType::Club,
            position_sought: "Pivot".to_string(),
            league_concerned: LeagueDivision::LiquiMolyStarligue,
            location: Region::IleDeFrance,
            profil: ProfileType::Club,
            expires_at: None,
        })
        .await?)
}

#[tokio::test]
async fn test_save_and_duplicate() -> anyhow::Result<()> {
    let (ctx, user) = setup().await?;
    let announcement = create_announcement(&ctx, "Recherche pivot").await?;

    let favorite = ctx
        .favorite_service
        .save(announcement.id, user.id, Some("À rappeler lundi".to_string()))
        .await?;
    assert_eq!(favorite.announcement_id, announcement.id);
    assert_eq!(favorite.notes.as_deref(), Some("À rappeler lundi"));

    assert!(ctx.favorite_service.has(announcement.id, user.id).await?);
    assert!(ctx.favorite_service.has_favorites(user.id).await?);

    let err = ctx
        .favorite_service
        .save(announcement.id, user.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyFavorited));

    Ok(())
}

#[tokio::test]
async fn test_unique_index_backs_the_precheck() -> anyhow::Result<()> {
    let (ctx, user) = setup().await?;
    let announcement = create_announcement(&ctx, "Recherche pivot").await?;

    ctx.favorite_service
        .save(announcement.id, user.id, None)
        .await?;

    // A raw insert bypassing the service still trips the schema's unique
    // index and reports the same domain error.
    let duplicate = SavedAnnouncement {
        id: Uuid::new_v4(),
        announcement_id: announcement.id,
        user_id: user.id,
        notes: None,
        created_at: Utc::now(),
    };
    let err = ctx.favorite_repo.create(duplicate).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyFavorited));

    Ok(())
}

#[tokio::test]
async fn test_remove() -> anyhow::Result<()> {
    let (ctx, user) = setup().await?;
    let announcement = create_announcement(&ctx, "Recherche pivot").await?;

    ctx.favorite_service
        .save(announcement.id, user.id, None)
        .await?;
    ctx.favorite_service
        .remove(announcement.id, user.id)
        .await?;

    assert!(!ctx.favorite_service.has(announcement.id, user.id).await?);

    let err = ctx
        .favorite_service
        .remove(announcement.id, user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFavorited));

    Ok(())
}

#[tokio::test]
async fn test_list_newest_first() -> anyhow::Result<()> {
    let (ctx, user) = setup().await?;

    let first = create_announcement(&ctx, "Recherche pivot").await?;
    let second = create_announcement(&ctx, "Recherche arrière droit").await?;

    ctx.favorite_service.save(first.id, user.id, None).await?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    ctx.favorite_service.save(second.id, user.id, None).await?;

    let favorites = ctx.favorite_service.list(user.id).await?;
    assert_eq!(favorites.len(), 2);
    assert_eq!(favorites[0].id, second.id);
    assert_eq!(favorites[1].id, first.id);

    let entries = ctx.favorite_service.list_entries(user.id).await?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].announcement_id, second.id);

    Ok(())
}

#[tokio::test]
async fn test_notes() -> anyhow::Result<()> {
    let (ctx, user) = setup().await?;
    let announcement = create_announcement(&ctx, "Recherche pivot").await?;

    ctx.favorite_service
        .save(announcement.id, user.id, None)
        .await?;
    assert_eq!(
        ctx.favorite_service
            .get_notes(announcement.id, user.id)
            .await?,
        None
    );

    let updated = ctx
        .favorite_service
        .update_notes(announcement.id, user.id, "Contact pris le 12/06".to_string())
        .await?;
    assert_eq!(updated.notes.as_deref(), Some("Contact pris le 12/06"));
    assert_eq!(
        ctx.favorite_service
            .get_notes(announcement.id, user.id)
            .await?
            .as_deref(),
        Some("Contact pris le 12/06")
    );

    // Notes can only be attached to an existing favorite.
    let other = create_announcement(&ctx, "Recherche demi-centre").await?;
    let err = ctx
        .favorite_service
        .update_notes(other.id, user.id, "Jamais enregistrée".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFavorited));

    Ok(())
}

#[tokio::test]
async fn test_count_and_clear_all() -> anyhow::Result<()> {
    let (ctx, user) = setup().await?;

    let first = create_announcement(&ctx, "Recherche pivot").await?;
    let second = create_announcement(&ctx, "Recherche gardien").await?;

    ctx.favorite_service.save(first.id, user.id, None).await?;
    ctx.favorite_service.save(second.id, user.id, None).await?;
    assert_eq!(ctx.favorite_service.count(user.id).await?, 2);

    let removed = ctx.favorite_service.clear_all(user.id).await?;
    assert_eq!(removed, 2);
    assert_eq!(ctx.favorite_service.count(user.id).await?, 0);
    assert!(!ctx.favorite_service.has_favorites(user.id).await?);

    // Clearing an already-empty list removes nothing.
    assert_eq!(ctx.favorite_service.clear_all(user.id).await?, 0);

    Ok(())
}
