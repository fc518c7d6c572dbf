use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::ProfileType;

/// Days an announcement stays valid after creation or renewal.
pub const ANNOUNCEMENT_VALIDITY_DAYS: i64 = 90;

/// Announcements expiring within this window are flagged for renewal.
pub const RENEWAL_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub offer_type: OfferType,
    pub title: String,
    pub description: String,
    /// Profile the posting is aimed at, the target side of the access check.
    pub offer_user_profil: ProfileType,
    pub position_sought: String,
    pub league_concerned: LeagueDivision,
    pub location: Region,
    pub offer_status: AnnouncementStatus,
    pub view_count: i64,
    /// Poster's own profile, the owner side of the visibility check.
    pub profil: ProfileType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Announcement {
    /// Expiration is derived from `expires_at`, never persisted as a status.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    pub fn is_active(&self) -> bool {
        self.offer_status == AnnouncementStatus::Active
    }

    pub fn default_expiration() -> DateTime<Utc> {
        Utc::now() + Duration::days(ANNOUNCEMENT_VALIDITY_DAYS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    /// A structure looking for a profile.
    JobOffer,
    /// A professional looking for an opportunity.
    JobSeeking,
}

impl OfferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::JobOffer => "job_offer",
            OfferType::JobSeeking => "job_seeking",
        }
    }

    pub fn parse(s: &str) -> Option<OfferType> {
        match s {
            "job_offer" => Some(OfferType::JobOffer),
            "job_seeking" => Some(OfferType::JobSeeking),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OfferType::JobOffer => "Offre d'emploi",
            OfferType::JobSeeking => "Recherche d'emploi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Active,
    Paused,
    Closed,
    Expired,
    Archived,
}

impl AnnouncementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Active => "active",
            AnnouncementStatus::Paused => "paused",
            AnnouncementStatus::Closed => "closed",
            AnnouncementStatus::Expired => "expired",
            AnnouncementStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<AnnouncementStatus> {
        match s {
            "active" => Some(AnnouncementStatus::Active),
            "paused" => Some(AnnouncementStatus::Paused),
            "closed" => Some(AnnouncementStatus::Closed),
            "expired" => Some(AnnouncementStatus::Expired),
            "archived" => Some(AnnouncementStatus::Archived),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnnouncementStatus::Active => "Active",
            AnnouncementStatus::Paused => "En pause",
            AnnouncementStatus::Closed => "Fermée",
            AnnouncementStatus::Expired => "Expirée",
            AnnouncementStatus::Archived => "Archivée",
        }
    }

    /// Visible in listings (active or paused).
    pub fn is_visible(&self) -> bool {
        matches!(self, AnnouncementStatus::Active | AnnouncementStatus::Paused)
    }

    pub fn can_be_edited(&self) -> bool {
        matches!(self, AnnouncementStatus::Active | AnnouncementStatus::Paused)
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            AnnouncementStatus::Closed | AnnouncementStatus::Expired | AnnouncementStatus::Archived
        )
    }
}

/// Competition levels of the federation, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeagueDivision {
    LiquiMolyStarligue,
    Proligue,
    LigueButagazEnergie,
    D2Feminine,
    Nationale1Elite,
    Nationale1,
    Nationale2,
    Nationale3,
    Prenational,
    ExcellenceRegionale,
    HonneurRegionale,
    Departemental,
}

impl LeagueDivision {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueDivision::LiquiMolyStarligue => "LIQUI_MOLY_STARLIGUE",
            LeagueDivision::Proligue => "PROLIGUE",
            LeagueDivision::LigueButagazEnergie => "LIGUE_BUTAGAZ_ENERGIE",
            LeagueDivision::D2Feminine => "D2_FEMININE",
            LeagueDivision::Nationale1Elite => "NATIONALE_1_ELITE",
            LeagueDivision::Nationale1 => "NATIONALE_1",
            LeagueDivision::Nationale2 => "NATIONALE_2",
            LeagueDivision::Nationale3 => "NATIONALE_3",
            LeagueDivision::Prenational => "PRENATIONAL",
            LeagueDivision::ExcellenceRegionale => "EXCELLENCE_REGIONALE",
            LeagueDivision::HonneurRegionale => "HONNEUR_REGIONALE",
            LeagueDivision::Departemental => "DEPARTEMENTAL",
        }
    }

    pub fn parse(s: &str) -> Option<LeagueDivision> {
        match s {
            "LIQUI_MOLY_STARLIGUE" => Some(LeagueDivision::LiquiMolyStarligue),
            "PROLIGUE" => Some(LeagueDivision::Proligue),
            "LIGUE_BUTAGAZ_ENERGIE" => Some(LeagueDivision::LigueButagazEnergie),
            "D2_FEMININE" => Some(LeagueDivision::D2Feminine),
            "NATIONALE_1_ELITE" => Some(LeagueDivision::Nationale1Elite),
            "NATIONALE_1" => Some(LeagueDivision::Nationale1),
            "NATIONALE_2" => Some(LeagueDivision::Nationale2),
            "NATIONALE_3" => Some(LeagueDivision::Nationale3),
            "PRENATIONAL" => Some(LeagueDivision::Prenational),
            "EXCELLENCE_REGIONALE" => Some(LeagueDivision::ExcellenceRegionale),
            "HONNEUR_REGIONALE" => Some(LeagueDivision::HonneurRegionale),
            "DEPARTEMENTAL" => Some(LeagueDivision::Departemental),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    AuvergneRhoneAlpes,
    BourgogneFrancheComte,
    Bretagne,
    CentreValDeLoire,
    Corse,
    GrandEst,
    HautsDeFrance,
    IleDeFrance,
    Normandie,
    NouvelleAquitaine,
    Occitanie,
    PaysDeLaLoire,
    ProvenceAlpesCoteAzur,
    Guadeloupe,
    Martinique,
    Guyane,
    Reunion,
    Mayotte,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::AuvergneRhoneAlpes => "auvergne_rhone_alpes",
            Region::BourgogneFrancheComte => "bourgogne_franche_comte",
            Region::Bretagne => "bretagne",
            Region::CentreValDeLoire => "centre_val_de_loire",
            Region::Corse => "corse",
            Region::GrandEst => "grand_est",
            Region::HautsDeFrance => "hauts_de_france",
            Region::IleDeFrance => "ile_de_france",
            Region::Normandie => "normandie",
            Region::NouvelleAquitaine => "nouvelle_aquitaine",
            Region::Occitanie => "occitanie",
            Region::PaysDeLaLoire => "pays_de_la_loire",
            Region::ProvenceAlpesCoteAzur => "provence_alpes_cote_azur",
            Region::Guadeloupe => "guadeloupe",
            Region::Martinique => "martinique",
            Region::Guyane => "guyane",
            Region::Reunion => "reunion",
            Region::Mayotte => "mayotte",
        }
    }

    pub fn parse(s: &str) -> Option<Region> {
        match s {
            "auvergne_rhone_alpes" => Some(Region::AuvergneRhoneAlpes),
            "bourgogne_franche_comte" => Some(Region::BourgogneFrancheComte),
            "bretagne" => Some(Region::Bretagne),
            "centre_val_de_loire" => Some(Region::CentreValDeLoire),
            "corse" => Some(Region::Corse),
            "grand_est" => Some(Region::GrandEst),
            "hauts_de_france" => Some(Region::HautsDeFrance),
            "ile_de_france" => Some(Region::IleDeFrance),
            "normandie" => Some(Region::Normandie),
            "nouvelle_aquitaine" => Some(Region::NouvelleAquitaine),
            "occitanie" => Some(Region::Occitanie),
            "pays_de_la_loire" => Some(Region::PaysDeLaLoire),
            "provence_alpes_cote_azur" => Some(Region::ProvenceAlpesCoteAzur),
            "guadeloupe" => Some(Region::Guadeloupe),
            "martinique" => Some(Region::Martinique),
            "guyane" => Some(Region::Guyane),
            "reunion" => Some(Region::Reunion),
            "mayotte" => Some(Region::Mayotte),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    pub offer_type: OfferType,
    #[validate(length(min = 5, max = 200, message = "Le titre doit contenir entre 5 et 200 caractères"))]
    pub title: String,
    #[validate(length(min = 20, max = 2000, message = "La description doit contenir entre 20 et 2000 caractères"))]
    pub description: String,
    pub offer_user_profil: ProfileType,
    #[validate(length(min = 2, max = 100, message = "Le poste doit contenir entre 2 et 100 caractères"))]
    pub position_sought: String,
    pub league_concerned: LeagueDivision,
    pub location: Region,
    pub profil: ProfileType,
    /// Defaults to 90 days from now when omitted.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 5, max = 200, message = "Le titre doit contenir entre 5 et 200 caractères"))]
    pub title: Option<String>,
    #[validate(length(min = 20, max = 2000, message = "La description doit contenir entre 20 et 2000 caractères"))]
    pub description: Option<String>,
    #[validate(length(min = 2, max = 100, message = "Le poste doit contenir entre 2 et 100 caractères"))]
    pub position_sought: Option<String>,
    pub league_concerned: Option<LeagueDivision>,
    pub location: Option<Region>,
    pub offer_status: Option<AnnouncementStatus>,
}
