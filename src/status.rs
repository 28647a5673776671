//! Homework status codes and the verdict sentences sent to the chat.

use std::fmt;
use std::str::FromStr;

use crate::api::Homework;
use crate::error::PollError;

/// A review status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work.
    Approved,
    /// The work is currently being reviewed.
    Reviewing,
    /// The reviewer returned the work with remarks.
    Rejected,
}

impl HomeworkStatus {
    /// All known statuses.
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// The code used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(PollError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw status code to its verdict sentence.
///
/// Unknown codes fail with [`PollError::UnknownStatus`] instead of being
/// skipped, so a change in the server's vocabulary gets reported.
pub fn classify(status_code: &str) -> Result<&'static str, PollError> {
    status_code.parse::<HomeworkStatus>().map(|s| s.verdict())
}

/// Build the status-change notification for a homework.
pub fn status_message(homework: &Homework) -> Result<String, PollError> {
    let verdict = classify(&homework.status)?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.name, verdict
    ))
}
