use vestiaire::{access::AccessMatrix, domain::ProfileType};

#[test]
fn test_player_response_targets() {
    let matrix = AccessMatrix::new();

    // Players apply to employers, not to peers or officials.
    assert!(matrix.can_respond(ProfileType::Player, ProfileType::Club));
    assert!(matrix.can_respond(ProfileType::Player, ProfileType::Coach));
    assert!(matrix.can_respond(ProfileType::Player, ProfileType::GoalkeeperCoach));
    assert!(matrix.can_respond(ProfileType::Player, ProfileType::TechnicalDirector));

    assert!(!matrix.can_respond(ProfileType::Player, ProfileType::Player));
    assert!(!matrix.can_respond(ProfileType::Player, ProfileType::Referee));
    assert!(!matrix.can_respond(ProfileType::Player, ProfileType::Physiotherapist));
}

#[test]
fn test_referee_only_reaches_clubs() {
    let matrix = AccessMatrix::new();

    assert!(matrix.can_respond(ProfileType::Referee, ProfileType::Club));
    for target in ProfileType::ALL {
        if target != ProfileType::Club {
            assert!(
                !matrix.can_respond(ProfileType::Referee, target),
                "referee should not reach {target:?}"
            );
        }
    }

    let targets = matrix.allowed_response_targets(ProfileType::Referee);
    assert_eq!(targets.len(), 1);
    assert!(targets.contains(&ProfileType::Club));
}

#[test]
fn test_club_has_full_permissions_and_nobody_else() {
    let matrix = AccessMatrix::new();

    for profile in ProfileType::ALL {
        assert_eq!(
            matrix.has_full_permissions(profile),
            profile == ProfileType::Club,
            "unexpected full-permission result for {profile:?}"
        );
    }
}

#[test]
fn test_visibility_mirrors_response_rights() {
    let matrix = AccessMatrix::new();

    // A player may respond to coach postings, so coaches must see player
    // announcements.
    assert!(matrix.can_see_announcements(ProfileType::Coach, ProfileType::Player));
    assert!(matrix.is_symmetric(ProfileType::Player, ProfileType::Coach));

    // Referees never reach players, and players never see referee postings.
    assert!(!matrix.can_see_announcements(ProfileType::Player, ProfileType::Referee));
    assert!(!matrix.is_symmetric(ProfileType::Referee, ProfileType::Player));
}

#[test]
fn test_rules_are_consistent() {
    let matrix = AccessMatrix::new();

    let inconsistencies = matrix.validate_rules();
    assert!(
        inconsistencies.is_empty(),
        "asymmetric access rules: {inconsistencies:?}"
    );
}

#[test]
fn test_every_respond_edge_is_visible() {
    let matrix = AccessMatrix::new();

    for responder in ProfileType::ALL {
        for owner in ProfileType::ALL {
            if matrix.can_respond(responder, owner) {
                assert!(
                    matrix.can_see_announcements(owner, responder),
                    "{responder:?} can respond to {owner:?} but {owner:?} cannot see \
                     {responder:?}'s announcements"
                );
            }
        }
    }
}

#[test]
fn test_profiles_interact() {
    let matrix = AccessMatrix::new();

    assert!(matrix.can_profiles_interact(&[
        ProfileType::Player,
        ProfileType::Club,
        ProfileType::Coach,
    ]));

    // Players and referees have no edge in either direction.
    assert!(!matrix.can_profiles_interact(&[ProfileType::Player, ProfileType::Referee]));
}

#[test]
fn test_profile_rules_summary() {
    let matrix = AccessMatrix::new();

    let rules = matrix.profile_rules(ProfileType::Club);
    assert!(rules.has_full_permissions);
    assert_eq!(rules.can_respond_to.len(), ProfileType::ALL.len());
    assert_eq!(rules.can_be_seen_by.len(), ProfileType::ALL.len());

    let rules = matrix.profile_rules(ProfileType::Player);
    assert!(!rules.has_full_permissions);
    assert_eq!(rules.can_respond_to.len(), 4);
}
