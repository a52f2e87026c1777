//! Wire DTOs for the PhotoShare HTTP API.
//!
//! Responses are decoded into these transport shapes first, then mapped into
//! domain records in one pass. The API is loose about numeric types (SQL
//! aggregates arrive as strings) and about a few field names, so the DTOs
//! accept every observed variant and normalise it here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    LoginCredentials, MediaDetail, MediaId, MediaSummary, Registration, Role, User, UserId,
};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(value: &'a LoginCredentials) -> Self {
        Self {
            email: value.email(),
            password: value.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequestDto<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    role: Role,
}

impl<'a> From<&'a Registration> for RegisterRequestDto<'a> {
    fn from(value: &'a Registration) -> Self {
        Self {
            email: value.email(),
            password: value.password(),
            name: value.name(),
            role: value.role(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    id: i64,
    name: String,
    role: Role,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self::new(UserId::new(value.id), value.name, value.role)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEnvelopeDto {
    pub(super) user: UserDto,
}

/// Error body shape: `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBodyDto {
    pub(super) fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CountDto {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RatingDto {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PeopleDto {
    List(Vec<String>),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
pub(super) struct MediaDto {
    id: i64,
    creator_id: Option<i64>,
    user_id: Option<i64>,
    #[serde(default)]
    creator_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    caption: Option<String>,
    location: Option<String>,
    blob_url: Option<String>,
    thumbnail_blob_url: Option<String>,
    created_at: DateTime<Utc>,
    comment_count: Option<CountDto>,
    average_rating: Option<RatingDto>,
    people: Option<PeopleDto>,
}

impl MediaDto {
    pub(super) fn into_summary(self) -> Result<MediaSummary, String> {
        let creator_id = self.creator()?;
        let comment_count = parse_count(self.id, self.comment_count)?;
        let average_rating = parse_rating(self.id, self.average_rating)?;
        let thumbnail_url = non_blank(self.thumbnail_blob_url)
            .or_else(|| non_blank(self.blob_url))
            .ok_or_else(|| format!("media {} has no image url", self.id))?;
        Ok(MediaSummary {
            id: MediaId::new(self.id),
            creator_id,
            creator_name: self.creator_name.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            caption: non_blank(self.caption),
            location: non_blank(self.location),
            thumbnail_url,
            created_at: self.created_at,
            comment_count,
            average_rating,
        })
    }

    pub(super) fn into_detail(self) -> Result<MediaDetail, String> {
        let creator_id = self.creator()?;
        let average_rating = parse_rating(self.id, self.average_rating)?;
        let people = parse_people(self.id, self.people)?;
        let image_url = non_blank(self.blob_url)
            .or_else(|| non_blank(self.thumbnail_blob_url))
            .ok_or_else(|| format!("media {} has no image url", self.id))?;
        Ok(MediaDetail {
            id: MediaId::new(self.id),
            creator_id,
            creator_name: self.creator_name.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            caption: non_blank(self.caption),
            location: non_blank(self.location),
            image_url,
            created_at: self.created_at,
            average_rating,
            people,
        })
    }

    fn creator(&self) -> Result<UserId, String> {
        self.creator_id
            .or(self.user_id)
            .map(UserId::new)
            .ok_or_else(|| format!("media {} has no creator id", self.id))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_count(id: i64, raw: Option<CountDto>) -> Result<u64, String> {
    match raw {
        None => Ok(0),
        Some(CountDto::Number(count)) => Ok(count),
        Some(CountDto::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| format!("media {id} has non-numeric comment_count {text:?}")),
    }
}

fn parse_rating(id: i64, raw: Option<RatingDto>) -> Result<f64, String> {
    let rating = match raw {
        None => 0.0,
        Some(RatingDto::Number(rating)) => rating,
        Some(RatingDto::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| format!("media {id} has non-numeric average_rating {text:?}"))?,
    };
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(format!("media {id} has non-finite average_rating"))
    }
}

fn parse_people(id: i64, raw: Option<PeopleDto>) -> Result<Vec<String>, String> {
    match raw {
        None => Ok(Vec::new()),
        Some(PeopleDto::List(people)) => Ok(people),
        Some(PeopleDto::Encoded(text)) if text.trim().is_empty() => Ok(Vec::new()),
        Some(PeopleDto::Encoded(text)) => serde_json::from_str(&text)
            .map_err(|error| format!("media {id} has malformed people list: {error}")),
    }
}
