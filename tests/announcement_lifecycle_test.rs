use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use vestiaire::{
    domain::{
        Announcement, AnnouncementStatus, CreateAnnouncementRequest, LeagueDivision, OfferType,
        ProfileType, Region, ANNOUNCEMENT_VALIDITY_DAYS,
    },
    error::AppError,
    service::ServiceContext,
};

async fn setup() -> anyhow::Result<ServiceContext> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(ServiceContext::new(pool))
}

fn create_request(profil: ProfileType, target: ProfileType) -> CreateAnnouncementRequest {
    CreateAnnouncementRequest {
        offer_type: OfferType::JobOffer,
        title: "Recherche gardien expérimenté".to_string(),
        description: "Club de Proligue recherche un gardien pour la saison prochaine."
            .to_string(),
        offer_user_profil: target,
        position_sought: "Gardien de but".to_string(),
        league_concerned: LeagueDivision::Proligue,
        location: Region::Bretagne,
        profil,
        expires_at: None,
    }
}

#[tokio::test]
async fn test_create_defaults() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let announcement = ctx
        .announcement_service
        .create(create_request(ProfileType::Club, ProfileType::Player))
        .await?;

    assert_eq!(announcement.offer_status, AnnouncementStatus::Active);
    assert_eq!(announcement.view_count, 0);
    assert!(!announcement.is_expired());

    let days_left = (announcement.expires_at - Utc::now()).num_days();
    assert!(
        (ANNOUNCEMENT_VALIDITY_DAYS - 1..=ANNOUNCEMENT_VALIDITY_DAYS).contains(&days_left),
        "expected ~{ANNOUNCEMENT_VALIDITY_DAYS} days of validity, got {days_left}"
    );

    Ok(())
}

#[tokio::test]
async fn test_close() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let announcement = ctx
        .announcement_service
        .create(create_request(ProfileType::Club, ProfileType::Player))
        .await?;

    let closed = ctx.announcement_service.close(announcement.id).await?;
    assert_eq!(closed.offer_status, AnnouncementStatus::Closed);
    assert!(closed.offer_status.is_finished());

    let reloaded = ctx
        .announcement_service
        .get_or_fail(announcement.id)
        .await?;
    assert_eq!(reloaded.offer_status, AnnouncementStatus::Closed);

    Ok(())
}

#[tokio::test]
async fn test_validate_checks_status_before_expiry() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let mut announcement = ctx
        .announcement_service
        .create(create_request(ProfileType::Club, ProfileType::Player))
        .await?;

    assert!(ctx.announcement_service.validate(&announcement).is_ok());

    // Active but past its expiry date reports Expired.
    announcement.expires_at = Utc::now() - Duration::days(1);
    assert!(matches!(
        ctx.announcement_service.validate(&announcement),
        Err(AppError::Expired)
    ));

    // Paused wins over expired: status is checked first.
    announcement.offer_status = AnnouncementStatus::Paused;
    assert!(matches!(
        ctx.announcement_service.validate(&announcement),
        Err(AppError::NotActive)
    ));

    announcement.offer_status = AnnouncementStatus::Closed;
    announcement.expires_at = Utc::now() + Duration::days(30);
    assert!(matches!(
        ctx.announcement_service.validate(&announcement),
        Err(AppError::NotActive)
    ));

    Ok(())
}

#[tokio::test]
async fn test_needs_renewal_window() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let mut request = create_request(ProfileType::Club, ProfileType::Player);
    request.expires_at = Some(Utc::now() + Duration::days(3));
    let expiring_soon = ctx.announcement_service.create(request).await?;
    assert!(ctx.announcement_service.needs_renewal(&expiring_soon));

    let mut request = create_request(ProfileType::Club, ProfileType::Player);
    request.expires_at = Some(Utc::now() + Duration::days(30));
    let fresh = ctx.announcement_service.create(request).await?;
    assert!(!ctx.announcement_service.needs_renewal(&fresh));

    Ok(())
}

#[tokio::test]
async fn test_renew_extends_from_current_expiry() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let mut request = create_request(ProfileType::Club, ProfileType::Player);
    request.expires_at = Some(Utc::now() + Duration::days(30));
    let announcement = ctx.announcement_service.create(request).await?;

    let renewed = ctx.announcement_service.renew(announcement.id).await?;
    let days_left = (renewed.expires_at - Utc::now()).num_days();
    assert!(
        (118..=120).contains(&days_left),
        "expected ~120 days after renewing a 30-day posting, got {days_left}"
    );

    Ok(())
}

#[tokio::test]
async fn test_renew_expired_counts_from_now() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let mut request = create_request(ProfileType::Club, ProfileType::Player);
    request.expires_at = Some(Utc::now() - Duration::days(10));
    let announcement = ctx.announcement_service.create(request).await?;
    assert!(announcement.is_expired());

    // Renewal never backdates: the new expiry counts from now, not from the
    // lapsed date.
    let renewed = ctx.announcement_service.renew(announcement.id).await?;
    assert!(!renewed.is_expired());
    let days_left = (renewed.expires_at - Utc::now()).num_days();
    assert!(
        (ANNOUNCEMENT_VALIDITY_DAYS - 1..=ANNOUNCEMENT_VALIDITY_DAYS).contains(&days_left),
        "expected ~{ANNOUNCEMENT_VALIDITY_DAYS} days after renewing an expired posting, got {days_left}"
    );

    Ok(())
}

#[tokio::test]
async fn test_view_count_increment_is_best_effort() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let announcement = ctx
        .announcement_service
        .create(create_request(ProfileType::Club, ProfileType::Player))
        .await?;

    ctx.announcement_service
        .increment_view_count(announcement.id)
        .await;
    ctx.announcement_service
        .increment_view_count(announcement.id)
        .await;

    let reloaded = ctx
        .announcement_service
        .get_or_fail(announcement.id)
        .await?;
    assert_eq!(reloaded.view_count, 2);

    // Unknown id is swallowed, never an error surfaced to the page view.
    ctx.announcement_service
        .increment_view_count(Uuid::new_v4())
        .await;

    Ok(())
}

#[tokio::test]
async fn test_update_merges_fields() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let announcement = ctx
        .announcement_service
        .create(create_request(ProfileType::Club, ProfileType::Player))
        .await?;

    let updated = ctx
        .announcement_service
        .update(
            announcement.id,
            vestiaire::domain::UpdateAnnouncementRequest {
                title: Some("Recherche gardien confirmé".to_string()),
                offer_status: Some(AnnouncementStatus::Paused),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.title, "Recherche gardien confirmé");
    assert_eq!(updated.offer_status, AnnouncementStatus::Paused);
    // Untouched fields survive the merge.
    assert_eq!(updated.description, announcement.description);
    assert_eq!(updated.location, Region::Bretagne);

    Ok(())
}

#[tokio::test]
async fn test_list_visible_to_follows_matrix_and_skips_expired() -> anyhow::Result<()> {
    let ctx = setup().await?;

    // A player posting is only visible to the employer profiles.
    ctx.announcement_service
        .create(create_request(ProfileType::Player, ProfileType::Club))
        .await?;

    let seen_by_club = ctx
        .announcement_service
        .list_visible_to(ProfileType::Club)
        .await?;
    assert_eq!(seen_by_club.len(), 1);

    let seen_by_referee = ctx
        .announcement_service
        .list_visible_to(ProfileType::Referee)
        .await?;
    assert!(seen_by_referee.is_empty());

    // Expired rows drop out of listings without any status change.
    let mut request = create_request(ProfileType::Player, ProfileType::Club);
    request.expires_at = Some(Utc::now() - Duration::days(1));
    let expired = ctx.announcement_service.create(request).await?;

    let seen_by_club = ctx
        .announcement_service
        .list_visible_to(ProfileType::Club)
        .await?;
    assert_eq!(seen_by_club.len(), 1);
    assert!(seen_by_club.iter().all(|a| a.id != expired.id));

    let stored: Option<Announcement> = ctx.announcement_service.get(expired.id).await?;
    assert_eq!(
        stored.expect("row still exists").offer_status,
        AnnouncementStatus::Active
    );

    Ok(())
}
