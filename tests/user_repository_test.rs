use sqlx::SqlitePool;

use vestiaire::{
    domain::{CreateUserRequest, ProfileType},
    error::AppError,
    repository::{SqliteUserRepository, UserRepository},
};

async fn setup() -> anyhow::Result<SqliteUserRepository> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(SqliteUserRepository::new(pool))
}

#[tokio::test]
async fn test_user_crud() -> anyhow::Result<()> {
    let repo = setup().await?;

    let user = repo
        .create(CreateUserRequest {
            email: "gardien@example.com".to_string(),
            display_name: "Gardien Titulaire".to_string(),
            profil: Some(ProfileType::Player),
        })
        .await?;
    assert_eq!(user.email, "gardien@example.com");
    assert_eq!(user.profil, Some(ProfileType::Player));

    let found = repo.find_by_id(user.id).await?;
    assert!(found.is_some());

    let found_by_email = repo.find_by_email("gardien@example.com").await?;
    assert_eq!(found_by_email.map(|u| u.id), Some(user.id));

    let users = repo.list(10, 0).await?;
    assert_eq!(users.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_a_bad_request() -> anyhow::Result<()> {
    let repo = setup().await?;

    repo.create(CreateUserRequest {
        email: "club@example.com".to_string(),
        display_name: "Club Alpha".to_string(),
        profil: Some(ProfileType::Club),
    })
    .await?;

    // An insert racing past the API's pre-check lands on the unique email
    // constraint; it must surface as the same user-facing error, never a
    // raw storage failure.
    let err = repo
        .create(CreateUserRequest {
            email: "club@example.com".to_string(),
            display_name: "Club Beta".to_string(),
            profil: Some(ProfileType::Club),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}
