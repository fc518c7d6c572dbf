use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use vestiaire::{
    domain::{
        Announcement, AnnouncementResponse, AnnouncementStatus, CreateAnnouncementRequest,
        CreateUserRequest, LeagueDivision, OfferType, ProfileType, Region, ResponseStatus, User,
    },
    error::AppError,
    repository::{ResponseRepository, UserRepository},
    service::ServiceContext,
};

async fn setup() -> anyhow::Result<ServiceContext> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(ServiceContext::new(pool))
}

async fn create_user(
    ctx: &ServiceContext,
    email: &str,
    profil: Option<ProfileType>,
) -> anyhow::Result<User> {
    Ok(ctx
        .user_repo
        .create(CreateUserRequest {
            email: email.to_string(),
            display_name: "Test User".to_string(),
            profil,
        })
        .await?)
}

async fn create_announcement(
    ctx: &ServiceContext,
    profil: ProfileType,
    target: ProfileType,
) -> anyhow::Result<Announcement> {
    Ok(ctx
        .announcement_service
        .create(CreateAnnouncementRequest {
            offer_type: OfferType::JobOffer,
            title: "Recherche ailier gauche".to_string(),
            description: "Club de Nationale 1 recherche un ailier gauche pour la montée."
                .to_string(),
            offer_user_profil: target,
            position_sought: "Ailier gauche".to_string(),
            league_concerned: LeagueDivision::Nationale1,
            location: Region::Occitanie,
            profil,
            expires_at: None,
        })
        .await?)
}

#[tokio::test]
async fn test_respond_happy_path() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    let response = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Bonjour, je suis très intéressé par ce poste d'ailier gauche.".to_string(),
            Some("/uploads/cv-player.pdf".to_string()),
        )
        .await?;

    assert_eq!(response.status, ResponseStatus::Pending);
    assert!(!response.is_read);
    assert!(response.updated_at.is_none());
    assert!(response.has_attachment());

    assert!(
        ctx.response_service
            .has_already_responded(player.id, announcement.id)
            .await?
    );
    assert_eq!(
        ctx.response_service
            .count_announcement_responses(announcement.id)
            .await?,
        1
    );

    // Postings carry no owner relation, so a new response produces no
    // notification for anyone.
    assert_eq!(
        ctx.notification_service.count_unread(player.id).await?,
        0
    );

    Ok(())
}

#[tokio::test]
async fn test_second_response_is_rejected() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    ctx.response_service
        .respond(
            &announcement,
            &player,
            "Première candidature pour ce poste.".to_string(),
            None,
        )
        .await?;

    let err = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Deuxième tentative pour le même poste.".to_string(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyResponded));

    Ok(())
}

#[tokio::test]
async fn test_unique_index_backs_the_precheck() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    ctx.response_service
        .respond(
            &announcement,
            &player,
            "Candidature passée par le workflow normal.".to_string(),
            None,
        )
        .await?;

    // A raw insert that skips the workflow's pre-check still hits the
    // schema's unique index, reported as the same domain error.
    let duplicate = AnnouncementResponse {
        id: Uuid::new_v4(),
        announcement_id: announcement.id,
        user_id: player.id,
        message: "Insertion directe en doublon.".to_string(),
        status: ResponseStatus::Pending,
        is_read: false,
        attachment_path: None,
        created_at: Utc::now(),
        updated_at: None,
    };
    let err = ctx.response_repo.create(duplicate).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyResponded));

    Ok(())
}

#[tokio::test]
async fn test_profile_without_permission_cannot_respond() -> anyhow::Result<()> {
    let ctx = setup().await?;

    // Referee postings are out of reach for players.
    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Referee, ProfileType::Referee).await?;

    let err = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Je souhaite postuler malgré tout.".to_string(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CannotRespond));

    Ok(())
}

#[tokio::test]
async fn test_unset_profile_cannot_respond() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let newcomer = create_user(&ctx, "newcomer@example.com", None).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    assert!(!ctx
        .response_service
        .can_user_respond(&newcomer, &announcement));

    let err = ctx
        .response_service
        .respond(
            &announcement,
            &newcomer,
            "Candidature sans profil renseigné.".to_string(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CannotRespond));

    Ok(())
}

#[tokio::test]
async fn test_lifecycle_guards_run_before_access() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;

    let announcement = create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;
    let paused = ctx
        .announcement_service
        .update(
            announcement.id,
            vestiaire::domain::UpdateAnnouncementRequest {
                offer_status: Some(AnnouncementStatus::Paused),
                ..Default::default()
            },
        )
        .await?;

    let err = ctx
        .response_service
        .respond(&paused, &player, "Candidature sur une annonce en pause.".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotActive));

    // Active but lapsed reports Expired.
    let mut expired = create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;
    expired.expires_at = Utc::now() - Duration::days(1);

    let err = ctx
        .response_service
        .respond(&expired, &player, "Candidature sur une annonce expirée.".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Expired));

    Ok(())
}

#[tokio::test]
async fn test_change_status_stamps_and_notifies() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    let response = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Candidature initiale, en attente de revue.".to_string(),
            None,
        )
        .await?;
    assert!(response.updated_at.is_none());

    let reviewed = ctx
        .response_service
        .change_status(response.id, ResponseStatus::Shortlisted)
        .await?;
    assert_eq!(reviewed.status, ResponseStatus::Shortlisted);
    assert!(reviewed.updated_at.is_some());

    // The responder is told about the status change.
    let unread = ctx.notification_service.unread(player.id).await?;
    assert_eq!(unread.len(), 1);
    assert!(unread[0].message.contains(&announcement.title));

    let accepted = ctx
        .response_service
        .change_status(response.id, ResponseStatus::Accepted)
        .await?;
    assert!(accepted.is_accepted());
    assert!(accepted.status.is_finished());
    assert_eq!(ctx.notification_service.count_unread(player.id).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_pending_filter_and_counts() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let coach = create_user(&ctx, "coach@example.com", Some(ProfileType::Coach)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    let first = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Première candidature sur ce poste.".to_string(),
            None,
        )
        .await?;
    ctx.response_service
        .respond(
            &announcement,
            &coach,
            "Seconde candidature sur ce poste.".to_string(),
            None,
        )
        .await?;

    ctx.response_service
        .change_status(first.id, ResponseStatus::Rejected)
        .await?;

    let pending = ctx
        .response_service
        .pending_responses(announcement.id)
        .await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_id, coach.id);

    assert_eq!(
        ctx.response_service
            .count_announcement_responses(announcement.id)
            .await?,
        2
    );
    assert_eq!(ctx.response_service.count_user_responses(player.id).await?, 1);

    let rejected = ctx
        .response_service
        .responses_by_status(ResponseStatus::Rejected)
        .await?;
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].user_id, player.id);

    Ok(())
}

#[tokio::test]
async fn test_close_notifies_every_responder() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let coach = create_user(&ctx, "coach@example.com", Some(ProfileType::Coach)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    ctx.response_service
        .respond(
            &announcement,
            &player,
            "Candidature du joueur sur ce poste.".to_string(),
            None,
        )
        .await?;
    ctx.response_service
        .respond(
            &announcement,
            &coach,
            "Candidature de l'entraîneur sur ce poste.".to_string(),
            None,
        )
        .await?;

    let closed = ctx.announcement_service.close(announcement.id).await?;
    ctx.response_service
        .notify_responders_of_closure(&closed)
        .await?;

    for responder in [&player, &coach] {
        let unread = ctx.notification_service.unread(responder.id).await?;
        assert_eq!(unread.len(), 1, "each responder gets exactly one notice");
        assert_eq!(unread[0].title, "Annonce fermée");
        assert!(unread[0].message.contains(&announcement.title));
    }

    Ok(())
}

#[tokio::test]
async fn test_notification_read_and_cleanup() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    let response = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Candidature suivie de deux changements de statut.".to_string(),
            None,
        )
        .await?;

    ctx.response_service
        .change_status(response.id, ResponseStatus::Viewed)
        .await?;
    ctx.response_service
        .change_status(response.id, ResponseStatus::Shortlisted)
        .await?;
    assert_eq!(ctx.notification_service.count_unread(player.id).await?, 2);

    let unread = ctx.notification_service.unread(player.id).await?;
    ctx.notification_service.mark_read(unread[0].id).await?;
    assert_eq!(ctx.notification_service.count_unread(player.id).await?, 1);

    // Nothing is older than a month yet.
    assert_eq!(ctx.notification_service.cleanup_old(30).await?, 0);

    // A zero-day cutoff sweeps everything, read or not.
    assert_eq!(ctx.notification_service.cleanup_old(0).await?, 2);
    assert_eq!(ctx.notification_service.count_unread(player.id).await?, 0);
    assert!(ctx.notification_service.recent(player.id, 10).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_mark_read_and_delete() -> anyhow::Result<()> {
    let ctx = setup().await?;

    let player = create_user(&ctx, "player@example.com", Some(ProfileType::Player)).await?;
    let announcement =
        create_announcement(&ctx, ProfileType::Club, ProfileType::Club).await?;

    let response = ctx
        .response_service
        .respond(
            &announcement,
            &player,
            "Candidature qui sera lue puis retirée.".to_string(),
            None,
        )
        .await?;

    let read = ctx.response_service.mark_as_read(response.id).await?;
    assert!(read.is_read);

    let unread = ctx.response_service.mark_as_unread(response.id).await?;
    assert!(!unread.is_read);

    ctx.response_service.delete(response.id).await?;
    assert!(ctx.response_service.get(response.id).await?.is_none());

    let err = ctx
        .response_service
        .get_or_fail(response.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // The slot is free again after withdrawal.
    assert!(
        !ctx.response_service
            .has_already_responded(player.id, announcement.id)
            .await?
    );

    Ok(())
}
