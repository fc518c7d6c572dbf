use clap::Parser;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::seq::SliceRandom;
use sqlx::sqlite::SqlitePoolOptions;

use vestiaire::{
    domain::{
        CreateAnnouncementRequest, CreateUserRequest, LeagueDivision, OfferType, ProfileType,
        Region,
    },
    repository::UserRepository,
    service::ServiceContext,
};

#[derive(Parser, Debug)]
#[command(about = "Seed the vestiaire database with demo data")]
struct Args {
    /// Database URL (falls back to DATABASE_URL, then sqlite:vestiaire.db)
    #[arg(long)]
    database_url: Option<String>,

    /// Announcements to create per posting profile
    #[arg(long, default_value_t = 2)]
    announcements_per_profile: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:vestiaire.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let ctx = ServiceContext::new(db_pool);
    let mut rng = rand::thread_rng();

    println!("👥 Creating one user per profile...");
    let mut users = Vec::new();
    for profil in ProfileType::ALL {
        let user = ctx
            .user_repo
            .create(CreateUserRequest {
                email: SafeEmail().fake(),
                display_name: Name().fake(),
                profil: Some(profil),
            })
            .await?;
        println!("  ✅ {} ({})", user.display_name, profil.label());
        users.push(user);
    }

    println!("📣 Creating announcements...");
    let divisions = [
        LeagueDivision::LiquiMolyStarligue,
        LeagueDivision::Proligue,
        LeagueDivision::Nationale1,
        LeagueDivision::Nationale2,
        LeagueDivision::Prenational,
    ];
    let regions = [
        Region::IleDeFrance,
        Region::Bretagne,
        Region::Occitanie,
        Region::GrandEst,
        Region::NouvelleAquitaine,
    ];

    let mut created = 0usize;
    for poster in &users {
        let profil = poster.profil.expect("seeded users always carry a profile");
        let targets: Vec<ProfileType> = ctx
            .access_matrix
            .allowed_response_targets(profil)
            .into_iter()
            .collect();

        for _ in 0..args.announcements_per_profile {
            // Aim the posting at someone allowed to answer it so the demo
            // data supports the respond flow out of the box.
            let Some(target) = targets.choose(&mut rng).copied() else {
                continue;
            };

            let announcement = ctx
                .announcement_service
                .create(CreateAnnouncementRequest {
                    offer_type: if profil.is_club() {
                        OfferType::JobOffer
                    } else {
                        OfferType::JobSeeking
                    },
                    title: format!("{} recherche {}", profil.label(), target.label()),
                    description: Paragraph(3..6).fake(),
                    offer_user_profil: target,
                    position_sought: target.short_label().to_string(),
                    league_concerned: *divisions.choose(&mut rng).expect("non-empty"),
                    location: *regions.choose(&mut rng).expect("non-empty"),
                    profil,
                    expires_at: None,
                })
                .await?;

            created += 1;

            // Have one eligible user respond to every other posting.
            if created % 2 == 0 {
                if let Some(responder) = users.iter().find(|u| {
                    u.id != poster.id
                        && u.profil
                            .is_some_and(|p| ctx.access_matrix.can_respond(p, target))
                }) {
                    ctx.response_service
                        .respond(
                            &announcement,
                            responder,
                            "Bonjour, votre annonce m'intéresse. Pouvons-nous échanger ?"
                                .to_string(),
                            None,
                        )
                        .await?;
                }
            }
        }
    }

    println!("  ✅ Created {created} announcements");
    println!("🎉 Seeding complete");

    Ok(())
}
