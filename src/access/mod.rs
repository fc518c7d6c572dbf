use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::ProfileType;

/// Cross-profile access rules: who may respond to whose announcements, and
/// who may see whose announcements.
///
/// The two relations are deliberately independent tables. A coach may respond
/// to a player's posting without every coach posting being visible to players,
/// so neither table may be derived from the other. What must hold is the
/// symmetry invariant: if A may respond to B then B must be able to see A's
/// announcements. `validate_rules` checks it exhaustively and runs once at
/// startup, never on the request path.
#[derive(Debug)]
pub struct AccessMatrix {
    /// responder profile -> profiles whose announcements it may respond to
    respond_targets: HashMap<ProfileType, HashSet<ProfileType>>,
    /// owner profile -> profiles allowed to see its announcements
    view_targets: HashMap<ProfileType, HashSet<ProfileType>>,
}

impl AccessMatrix {
    pub fn new() -> Self {
        use ProfileType::*;

        let everyone: HashSet<ProfileType> = ProfileType::ALL.into_iter().collect();
        let staff_employers: HashSet<ProfileType> =
            [Club, Coach, GoalkeeperCoach, TechnicalDirector].into_iter().collect();
        let club_only: HashSet<ProfileType> = [Club].into_iter().collect();

        let mut respond_targets = HashMap::new();
        respond_targets.insert(Player, staff_employers.clone());
        respond_targets.insert(Club, everyone.clone());
        respond_targets.insert(Coach, everyone.clone());
        respond_targets.insert(GoalkeeperCoach, everyone.clone());
        respond_targets.insert(PhysicalTrainer, staff_employers.clone());
        respond_targets.insert(MentalTrainer, staff_employers.clone());
        respond_targets.insert(VideoAnalyst, staff_employers.clone());
        respond_targets.insert(Physiotherapist, staff_employers.clone());
        respond_targets.insert(Referee, club_only.clone());
        respond_targets.insert(TechnicalDirector, club_only.clone());

        // Visibility is the symmetric closure of the response table: every
        // profile allowed to respond to an owner must also see that owner's
        // announcements. Coach-class and technical-director postings end up
        // visible to everyone but referees; referee postings to clubs and the
        // coach-class profiles that may answer them.
        let all_but_referee: HashSet<ProfileType> = ProfileType::ALL
            .into_iter()
            .filter(|p| *p != Referee)
            .collect();
        let referee_viewers: HashSet<ProfileType> =
            [Club, Coach, GoalkeeperCoach].into_iter().collect();

        let mut view_targets = HashMap::new();
        view_targets.insert(Player, staff_employers.clone());
        view_targets.insert(Club, everyone);
        view_targets.insert(Coach, all_but_referee.clone());
        view_targets.insert(GoalkeeperCoach, all_but_referee.clone());
        view_targets.insert(PhysicalTrainer, staff_employers.clone());
        view_targets.insert(MentalTrainer, staff_employers.clone());
        view_targets.insert(VideoAnalyst, staff_employers.clone());
        view_targets.insert(Physiotherapist, staff_employers);
        view_targets.insert(Referee, referee_viewers);
        view_targets.insert(TechnicalDirector, all_but_referee);

        Self {
            respond_targets,
            view_targets,
        }
    }

    /// True iff `responder` may respond to announcements posted by `target`.
    /// A missing table entry means no permission.
    pub fn can_respond(&self, responder: ProfileType, target: ProfileType) -> bool {
        self.respond_targets
            .get(&responder)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// True iff `viewer` may see announcements posted by `owner`.
    pub fn can_see_announcements(&self, viewer: ProfileType, owner: ProfileType) -> bool {
        self.view_targets
            .get(&owner)
            .is_some_and(|viewers| viewers.contains(&viewer))
    }

    /// Profiles whose announcements `responder` may respond to.
    pub fn allowed_response_targets(&self, responder: ProfileType) -> HashSet<ProfileType> {
        self.respond_targets
            .get(&responder)
            .cloned()
            .unwrap_or_default()
    }

    /// Profiles allowed to see announcements posted by `owner`.
    pub fn allowed_viewers(&self, owner: ProfileType) -> HashSet<ProfileType> {
        self.view_targets.get(&owner).cloned().unwrap_or_default()
    }

    /// True iff A may respond to B's announcements and B may see A's.
    pub fn is_symmetric(&self, a: ProfileType, b: ProfileType) -> bool {
        self.can_respond(a, b) && self.can_see_announcements(b, a)
    }

    /// True iff `profile` may respond to every profile and be seen by every
    /// profile. Only Club holds this today.
    pub fn has_full_permissions(&self, profile: ProfileType) -> bool {
        let can_respond_to_all = ProfileType::ALL
            .iter()
            .all(|target| self.can_respond(profile, *target));
        let seen_by_all = ProfileType::ALL
            .iter()
            .all(|viewer| self.can_see_announcements(*viewer, profile));

        can_respond_to_all && seen_by_all
    }

    /// Scans every profile pair and reports each asymmetric edge. A table
    /// edit that breaks symmetry is a configuration bug; a non-empty result
    /// aborts server startup.
    pub fn validate_rules(&self) -> Vec<String> {
        let mut inconsistencies = Vec::new();

        for a in ProfileType::ALL {
            for b in ProfileType::ALL {
                if self.can_respond(a, b) && !self.can_see_announcements(b, a) {
                    inconsistencies.push(format!(
                        "{} peut répondre à {} mais {} ne peut pas voir les annonces de {}",
                        a.label(),
                        b.label(),
                        b.label(),
                        a.label()
                    ));
                }
            }
        }

        inconsistencies
    }

    /// Human-readable summary of a profile's rules, for admin display.
    pub fn profile_rules(&self, profile: ProfileType) -> ProfileRules {
        let mut can_respond_to: Vec<&'static str> = self
            .allowed_response_targets(profile)
            .into_iter()
            .map(|p| p.label())
            .collect();
        can_respond_to.sort_unstable();

        let mut can_be_seen_by: Vec<&'static str> = self
            .allowed_viewers(profile)
            .into_iter()
            .map(|p| p.label())
            .collect();
        can_be_seen_by.sort_unstable();

        ProfileRules {
            profile: profile.label(),
            can_respond_to,
            can_be_seen_by,
            has_full_permissions: self.has_full_permissions(profile),
        }
    }

    /// True when every pair in the group can interact in at least one
    /// direction.
    pub fn can_profiles_interact(&self, profiles: &[ProfileType]) -> bool {
        for a in profiles {
            for b in profiles {
                if a == b {
                    continue;
                }
                if !self.can_respond(*a, *b) && !self.can_respond(*b, *a) {
                    return false;
                }
            }
        }

        true
    }
}

impl Default for AccessMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileRules {
    pub profile: &'static str,
    pub can_respond_to: Vec<&'static str>,
    pub can_be_seen_by: Vec<&'static str>,
    pub has_full_permissions: bool,
}
