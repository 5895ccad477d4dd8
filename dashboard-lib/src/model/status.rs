//! Shared status → badge mapping.
//!
//! Every dashboard page shows a status column (appointments, quotes,
//! invoices, payments, users, log levels). All of them go through
//! [`Status::badge_variant`] so one status always renders the same way.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Visual variant of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    /// Neutral badge, used for unknown statuses.
    #[default]
    Default,
    /// Informational, waiting on someone.
    Info,
    /// Finished successfully.
    Success,
    /// Needs attention soon.
    Warning,
    /// Failed, cancelled or rejected.
    Destructive,
    /// Inactive or archival state.
    Secondary,
}

impl BadgeVariant {
    /// Returns the stable lowercase name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Info => "info",
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Secondary => "secondary",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status value reported by the backend.
///
/// Parsing ignores case and treats `_`, `-` and spaces alike, so
/// `"In Progress"`, `"in_progress"` and `"IN-PROGRESS"` are the same status.
/// Anything unknown is kept verbatim in [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Paid,
    Unpaid,
    PartiallyPaid,
    Overdue,
    Refunded,
    Failed,
    Active,
    Inactive,
    Blocked,
    Info,
    Warning,
    Error,
    Other(String),
}

impl Status {
    /// Returns the badge variant for this status.
    pub fn badge_variant(&self) -> BadgeVariant {
        match self {
            Status::Pending | Status::Scheduled | Status::Sent | Status::Info => BadgeVariant::Info,
            Status::Confirmed
            | Status::Completed
            | Status::Accepted
            | Status::Paid
            | Status::Active => BadgeVariant::Success,
            Status::InProgress
            | Status::Unpaid
            | Status::PartiallyPaid
            | Status::Overdue
            | Status::Warning => BadgeVariant::Warning,
            Status::Cancelled
            | Status::NoShow
            | Status::Rejected
            | Status::Failed
            | Status::Blocked
            | Status::Error => BadgeVariant::Destructive,
            Status::Draft | Status::Expired | Status::Refunded | Status::Inactive => {
                BadgeVariant::Secondary
            }
            Status::Other(_) => BadgeVariant::Default,
        }
    }

    /// Returns the canonical snake_case name of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::Scheduled => "scheduled",
            Status::Confirmed => "confirmed",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
            Status::NoShow => "no_show",
            Status::Draft => "draft",
            Status::Sent => "sent",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
            Status::Expired => "expired",
            Status::Paid => "paid",
            Status::Unpaid => "unpaid",
            Status::PartiallyPaid => "partially_paid",
            Status::Overdue => "overdue",
            Status::Refunded => "refunded",
            Status::Failed => "failed",
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Blocked => "blocked",
            Status::Info => "info",
            Status::Warning => "warning",
            Status::Error => "error",
            Status::Other(raw) => raw,
        }
    }

    /// Parses a backend status string. Never fails.
    pub fn parse(raw: &str) -> Status {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "pending" => Status::Pending,
            "scheduled" => Status::Scheduled,
            "confirmed" => Status::Confirmed,
            "in_progress" => Status::InProgress,
            "completed" | "done" => Status::Completed,
            "cancelled" | "canceled" => Status::Cancelled,
            "no_show" => Status::NoShow,
            "draft" => Status::Draft,
            "sent" => Status::Sent,
            "accepted" | "approved" => Status::Accepted,
            "rejected" | "declined" => Status::Rejected,
            "expired" => Status::Expired,
            "paid" => Status::Paid,
            "unpaid" => Status::Unpaid,
            "partially_paid" | "partial" => Status::PartiallyPaid,
            "overdue" => Status::Overdue,
            "refunded" => Status::Refunded,
            "failed" => Status::Failed,
            "active" => Status::Active,
            "inactive" | "disabled" => Status::Inactive,
            "blocked" | "suspended" => Status::Blocked,
            "info" => Status::Info,
            "warning" | "warn" => Status::Warning,
            "error" => Status::Error,
            _ => Status::Other(raw.trim().to_string()),
        }
    }
}

impl FromStr for Status {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Status::parse(s))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered status badge: label plus variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl Badge {
    /// Creates a badge for a status, labelled with the raw backend text.
    pub fn for_status(raw: &str) -> Self {
        Self {
            label: raw.to_string(),
            variant: Status::parse(raw).badge_variant(),
        }
    }
}
