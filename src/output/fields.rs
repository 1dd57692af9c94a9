//! Output column selection
//!
//! Every persisted column is an [`OutputField`]. A [`FieldSet`] holds the
//! enabled subset and projects records into ordered `(column, value)` pairs;
//! top-level comments and replies go through the same projection.

use crate::config::Config;
use crate::model::CommentRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use serde::Serialize;
use std::fmt;

/// A recognized output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputField {
    CommentId,
    CommentType,
    CommentText,
    AuthorName,
    AuthorChannelId,
    AuthorChannelUrl,
    AuthorProfileImageUrl,
    AuthorIsVerified,
    AuthorIsChannelOwner,
    AuthorIsSponsor,
    IsLikedByCreator,
    IsHeartedByCreator,
    IsPinned,
    PublishDate,
    UpdatedAt,
    LikeCount,
    ReplyCount,
    ParentId,
    ParentAuthor,
    WordCount,
    HasLinks,
    HasMentions,
    SentimentScore,
    VideoTitle,
    VideoId,
    VideoUrl,
    ChannelId,
    ChannelTitle,
    CrawlTimestamp,
}

impl OutputField {
    /// All fields in column order
    pub const ALL: [OutputField; 29] = [
        Self::CommentId,
        Self::CommentType,
        Self::CommentText,
        Self::AuthorName,
        Self::AuthorChannelId,
        Self::AuthorChannelUrl,
        Self::AuthorProfileImageUrl,
        Self::AuthorIsVerified,
        Self::AuthorIsChannelOwner,
        Self::AuthorIsSponsor,
        Self::IsLikedByCreator,
        Self::IsHeartedByCreator,
        Self::IsPinned,
        Self::PublishDate,
        Self::UpdatedAt,
        Self::LikeCount,
        Self::ReplyCount,
        Self::ParentId,
        Self::ParentAuthor,
        Self::WordCount,
        Self::HasLinks,
        Self::HasMentions,
        Self::SentimentScore,
        Self::VideoTitle,
        Self::VideoId,
        Self::VideoUrl,
        Self::ChannelId,
        Self::ChannelTitle,
        Self::CrawlTimestamp,
    ];

    /// Column name used in every output format
    pub fn name(&self) -> &'static str {
        match self {
            Self::CommentId => "comment_id",
            Self::CommentType => "comment_type",
            Self::CommentText => "comment_text",
            Self::AuthorName => "author_name",
            Self::AuthorChannelId => "author_channel_id",
            Self::AuthorChannelUrl => "author_channel_url",
            Self::AuthorProfileImageUrl => "author_profile_image_url",
            Self::AuthorIsVerified => "author_is_verified",
            Self::AuthorIsChannelOwner => "author_is_channel_owner",
            Self::AuthorIsSponsor => "author_is_sponsor",
            Self::IsLikedByCreator => "is_liked_by_creator",
            Self::IsHeartedByCreator => "is_hearted_by_creator",
            Self::IsPinned => "is_pinned",
            Self::PublishDate => "publish_date",
            Self::UpdatedAt => "updated_at",
            Self::LikeCount => "like_count",
            Self::ReplyCount => "reply_count",
            Self::ParentId => "parent_id",
            Self::ParentAuthor => "parent_author",
            Self::WordCount => "word_count",
            Self::HasLinks => "has_links",
            Self::HasMentions => "has_mentions",
            Self::SentimentScore => "sentiment_score",
            Self::VideoTitle => "video_title",
            Self::VideoId => "video_id",
            Self::VideoUrl => "video_url",
            Self::ChannelId => "channel_id",
            Self::ChannelTitle => "channel_title",
            Self::CrawlTimestamp => "crawl_timestamp",
        }
    }

    /// Looks a field up by its column name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Whether `[fields].disabled` may remove this column
    ///
    /// Identity and linkage columns stay so replies can always be joined
    /// back to their parent.
    pub fn is_optional(&self) -> bool {
        !matches!(
            self,
            Self::CommentId | Self::CommentType | Self::ParentAuthor
        )
    }

    /// SQLite column affinity
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::LikeCount
            | Self::ReplyCount
            | Self::WordCount
            | Self::AuthorIsVerified
            | Self::AuthorIsChannelOwner
            | Self::AuthorIsSponsor
            | Self::IsLikedByCreator
            | Self::IsHeartedByCreator
            | Self::IsPinned
            | Self::HasLinks
            | Self::HasMentions => "INTEGER",
            Self::SentimentScore => "REAL",
            _ => "TEXT",
        }
    }

    /// Extracts this column from a record
    pub fn value_of(&self, record: &CommentRecord) -> FieldValue {
        match self {
            Self::CommentId => FieldValue::text(&record.comment_id),
            Self::CommentType => FieldValue::text(record.kind.as_str()),
            Self::CommentText => FieldValue::text(&record.text),
            Self::AuthorName => FieldValue::text(&record.author_name),
            Self::AuthorChannelId => FieldValue::text(&record.author_channel_id),
            Self::AuthorChannelUrl => FieldValue::text(&record.author_channel_url),
            Self::AuthorProfileImageUrl => FieldValue::text(&record.author_profile_image_url),
            Self::AuthorIsVerified => FieldValue::Bool(record.author_is_verified),
            Self::AuthorIsChannelOwner => FieldValue::Bool(record.author_is_channel_owner),
            Self::AuthorIsSponsor => FieldValue::Bool(record.author_is_sponsor),
            Self::IsLikedByCreator => FieldValue::Bool(record.liked_by_creator),
            Self::IsHeartedByCreator => FieldValue::Bool(record.hearted_by_creator),
            Self::IsPinned => FieldValue::Bool(record.is_pinned),
            Self::PublishDate => record.published_at.into(),
            Self::UpdatedAt => record.updated_at.into(),
            Self::LikeCount => FieldValue::count(record.like_count),
            Self::ReplyCount => FieldValue::count(record.reply_count),
            Self::ParentId => record.parent_id.as_deref().into(),
            Self::ParentAuthor => record.parent_author.as_deref().into(),
            Self::WordCount => FieldValue::count(record.word_count as u64),
            Self::HasLinks => FieldValue::Bool(record.has_links),
            Self::HasMentions => FieldValue::Bool(record.has_mentions),
            Self::SentimentScore => record
                .sentiment_score
                .map_or(FieldValue::Null, FieldValue::Float),
            Self::VideoTitle => FieldValue::text(&record.video_title),
            Self::VideoId => FieldValue::text(&record.video_id),
            Self::VideoUrl => FieldValue::text(&record.video_url),
            Self::ChannelId => FieldValue::text(&record.channel_id),
            Self::ChannelTitle => FieldValue::text(&record.channel_title),
            Self::CrawlTimestamp => FieldValue::Timestamp(record.captured_at),
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single projected cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl FieldValue {
    fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }

    fn count(n: u64) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::text)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Null, Self::Timestamp)
    }
}

/// Textual form used by CSV cells; `Null` renders empty
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Null => Ok(()),
        }
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::Integer(n) => ToSqlOutput::Owned(Value::Integer(*n)),
            Self::Float(x) => ToSqlOutput::Owned(Value::Real(*x)),
            Self::Bool(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            Self::Timestamp(t) => {
                ToSqlOutput::Owned(Value::Text(t.to_rfc3339_opts(SecondsFormat::Secs, true)))
            }
            Self::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

/// The enabled output columns, in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    enabled: Vec<OutputField>,
}

impl FieldSet {
    /// Every column enabled
    pub fn all() -> Self {
        Self {
            enabled: OutputField::ALL.to_vec(),
        }
    }

    /// Applies `[fields].disabled`; turning sentiment off drops its column
    ///
    /// Unknown or mandatory names are ignored here; validation rejects them
    /// when the file is loaded.
    pub fn from_config(config: &Config) -> Self {
        let mut set = Self::all();
        for field in config
            .fields
            .disabled
            .iter()
            .filter_map(|name| OutputField::from_name(name))
            .filter(OutputField::is_optional)
        {
            set = set.without(field);
        }

        if !config.crawler.sentiment {
            set = set.without(OutputField::SentimentScore);
        }
        set
    }

    /// Returns the set with `field` removed (mandatory fields stay)
    pub fn without(mut self, field: OutputField) -> Self {
        if field.is_optional() {
            self.enabled.retain(|f| *f != field);
        }
        self
    }

    pub fn contains(&self, field: OutputField) -> bool {
        self.enabled.contains(&field)
    }

    pub fn fields(&self) -> &[OutputField] {
        &self.enabled
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.enabled.iter().map(OutputField::name)
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Projects a record into `(column, value)` pairs
    pub fn project(&self, record: &CommentRecord) -> Vec<(&'static str, FieldValue)> {
        self.enabled
            .iter()
            .map(|field| (field.name(), field.value_of(record)))
            .collect()
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::all()
    }
}
