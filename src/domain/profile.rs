use serde::{Deserialize, Serialize};

/// The ten professional profiles recognised by the federation. A user holds
/// exactly one; every announcement targets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileType {
    Club,
    TechnicalDirector,
    Coach,
    GoalkeeperCoach,
    Player,
    PhysicalTrainer,
    MentalTrainer,
    Physiotherapist,
    VideoAnalyst,
    Referee,
}

impl ProfileType {
    pub const ALL: [ProfileType; 10] = [
        ProfileType::Club,
        ProfileType::TechnicalDirector,
        ProfileType::Coach,
        ProfileType::GoalkeeperCoach,
        ProfileType::Player,
        ProfileType::PhysicalTrainer,
        ProfileType::MentalTrainer,
        ProfileType::Physiotherapist,
        ProfileType::VideoAnalyst,
        ProfileType::Referee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Club => "CLUB",
            ProfileType::TechnicalDirector => "TECHNICAL_DIRECTOR",
            ProfileType::Coach => "COACH",
            ProfileType::GoalkeeperCoach => "GOALKEEPER_COACH",
            ProfileType::Player => "PLAYER",
            ProfileType::PhysicalTrainer => "PHYSICAL_TRAINER",
            ProfileType::MentalTrainer => "MENTAL_TRAINER",
            ProfileType::Physiotherapist => "PHYSIOTHERAPIST",
            ProfileType::VideoAnalyst => "VIDEO_ANALYST",
            ProfileType::Referee => "REFEREE",
        }
    }

    pub fn parse(s: &str) -> Option<ProfileType> {
        match s {
            "CLUB" => Some(ProfileType::Club),
            "TECHNICAL_DIRECTOR" => Some(ProfileType::TechnicalDirector),
            "COACH" => Some(ProfileType::Coach),
            "GOALKEEPER_COACH" => Some(ProfileType::GoalkeeperCoach),
            "PLAYER" => Some(ProfileType::Player),
            "PHYSICAL_TRAINER" => Some(ProfileType::PhysicalTrainer),
            "MENTAL_TRAINER" => Some(ProfileType::MentalTrainer),
            "PHYSIOTHERAPIST" => Some(ProfileType::Physiotherapist),
            "VIDEO_ANALYST" => Some(ProfileType::VideoAnalyst),
            "REFEREE" => Some(ProfileType::Referee),
            _ => None,
        }
    }

    /// Full display label (federation copy is French).
    pub fn label(&self) -> &'static str {
        match self {
            ProfileType::Club => "Club",
            ProfileType::TechnicalDirector => "Directeur Technique",
            ProfileType::Coach => "Entraîneur",
            ProfileType::GoalkeeperCoach => "Entraîneur des gardiens",
            ProfileType::Player => "Joueur",
            ProfileType::PhysicalTrainer => "Préparateur Physique",
            ProfileType::MentalTrainer => "Préparateur Mental",
            ProfileType::Physiotherapist => "Kinésithérapeute",
            ProfileType::VideoAnalyst => "Analyste Vidéo",
            ProfileType::Referee => "Arbitre",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            ProfileType::Club => "Club",
            ProfileType::TechnicalDirector => "Dir. Technique",
            ProfileType::Coach => "Entraîneur",
            ProfileType::GoalkeeperCoach => "Ent. Gardiens",
            ProfileType::Player => "Joueur",
            ProfileType::PhysicalTrainer => "Prep. Physique",
            ProfileType::MentalTrainer => "Prep. Mental",
            ProfileType::Physiotherapist => "Kinésithérapeute",
            ProfileType::VideoAnalyst => "Analyste Vidéo",
            ProfileType::Referee => "Arbitre",
        }
    }

    /// Display ordering only, never used in access decisions.
    pub fn priority(&self) -> u8 {
        match self {
            ProfileType::Club => 1,
            ProfileType::TechnicalDirector => 2,
            ProfileType::Coach => 3,
            ProfileType::GoalkeeperCoach => 4,
            ProfileType::Player => 5,
            ProfileType::PhysicalTrainer => 6,
            ProfileType::MentalTrainer => 7,
            ProfileType::Physiotherapist => 8,
            ProfileType::VideoAnalyst => 9,
            ProfileType::Referee => 10,
        }
    }

    pub fn is_player(&self) -> bool {
        *self == ProfileType::Player
    }

    pub fn is_technical_staff(&self) -> bool {
        matches!(
            self,
            ProfileType::Coach
                | ProfileType::PhysicalTrainer
                | ProfileType::MentalTrainer
                | ProfileType::VideoAnalyst
                | ProfileType::TechnicalDirector
                | ProfileType::GoalkeeperCoach
        )
    }

    pub fn is_medical_staff(&self) -> bool {
        *self == ProfileType::Physiotherapist
    }

    pub fn is_referee(&self) -> bool {
        *self == ProfileType::Referee
    }

    pub fn is_club(&self) -> bool {
        *self == ProfileType::Club
    }
}

impl std::fmt::Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
