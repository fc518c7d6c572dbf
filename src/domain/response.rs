use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One user's reply to one announcement. At most one row may exist per
/// (announcement, user) pair; the schema carries a unique index backing the
/// workflow's pre-insert check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementResponse {
    pub id: Uuid,
    pub announcement_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub status: ResponseStatus,
    pub is_read: bool,
    pub attachment_path: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set on the first status change, null until then.
    pub updated_at: Option<DateTime<Utc>>,
}

impl AnnouncementResponse {
    pub fn is_pending(&self) -> bool {
        self.status == ResponseStatus::Pending
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ResponseStatus::Accepted
    }

    pub fn is_rejected(&self) -> bool {
        self.status == ResponseStatus::Rejected
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment_path.is_some()
    }
}

/// Review status of a response. Pending is the unique start state; any status
/// may follow any other — this models a moderation tool, not a strict FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Pending,
    Viewed,
    Shortlisted,
    Interview,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Pending => "pending",
            ResponseStatus::Viewed => "viewed",
            ResponseStatus::Shortlisted => "shortlisted",
            ResponseStatus::Interview => "interview",
            ResponseStatus::Accepted => "accepted",
            ResponseStatus::Rejected => "rejected",
            ResponseStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<ResponseStatus> {
        match s {
            "pending" => Some(ResponseStatus::Pending),
            "viewed" => Some(ResponseStatus::Viewed),
            "shortlisted" => Some(ResponseStatus::Shortlisted),
            "interview" => Some(ResponseStatus::Interview),
            "accepted" => Some(ResponseStatus::Accepted),
            "rejected" => Some(ResponseStatus::Rejected),
            "withdrawn" => Some(ResponseStatus::Withdrawn),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseStatus::Pending => "En attente",
            ResponseStatus::Viewed => "Vue",
            ResponseStatus::Shortlisted => "Présélectionné",
            ResponseStatus::Interview => "Entretien",
            ResponseStatus::Accepted => "Accepté",
            ResponseStatus::Rejected => "Refusé",
            ResponseStatus::Withdrawn => "Retirée",
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ResponseStatus::Pending
                | ResponseStatus::Viewed
                | ResponseStatus::Shortlisted
                | ResponseStatus::Interview
        )
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            ResponseStatus::Accepted | ResponseStatus::Rejected | ResponseStatus::Withdrawn
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RespondToAnnouncementRequest {
    pub user_id: Uuid,
    #[validate(length(min = 10, max = 1000, message = "Le message doit contenir entre 10 et 1000 caractères"))]
    pub message: String,
    #[validate(length(max = 255, message = "Le chemin de la pièce jointe ne peut pas dépasser 255 caractères"))]
    pub attachment_path: Option<String>,
}
