use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::bookmark::{BookmarkChanges, NewBookmark};
use crate::domain::types::{
    BookmarkCategory, BookmarkDescription, BookmarkTitle, BookmarkUrl, TypeConstraintError,
    UserId,
};
use crate::repository::DEFAULT_ITEMS_PER_PAGE;

fn default_user_id() -> String {
    UserId::DEFAULT.to_string()
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

/// Keeps `null` distinguishable from an absent field: absent stays `None`
/// through `#[serde(default)]`, present becomes `Some(value_or_null)`.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Splits a comma separated tag list, trimming entries and dropping empty ones.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Error)]
pub enum BookmarkFormError {
    #[error("Bookmark form validation failed: {0}")]
    Validation(String),
    #[error("Bookmark form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for BookmarkFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BookmarkFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Collects constraint failures of several fields into one error.
#[derive(Default)]
struct FieldErrors(Vec<String>);

impl FieldErrors {
    fn check<T>(&mut self, result: Result<T, TypeConstraintError>) -> Option<T> {
        result.map_err(|e| self.0.push(e.to_string())).ok()
    }

    fn null(&mut self, field: &str) {
        self.0.push(format!("{field} cannot be null"));
    }

    fn into_error(self) -> BookmarkFormError {
        BookmarkFormError::TypeConstraint(self.0.join("; "))
    }

    fn finish(self) -> Result<(), BookmarkFormError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

impl FromIterator<TypeConstraintError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = TypeConstraintError>>(iter: I) -> Self {
        Self(iter.into_iter().map(|e| e.to_string()).collect())
    }
}

/// JSON body of `POST /bookmarks`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookmarkForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub url: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl TryFrom<CreateBookmarkForm> for NewBookmark {
    type Error = BookmarkFormError;

    fn try_from(value: CreateBookmarkForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let title = BookmarkTitle::new(value.title);
        let url = BookmarkUrl::new(value.url);
        let description = value.description.map(BookmarkDescription::new).transpose();
        let category = value
            .category
            .map(BookmarkCategory::try_from)
            .transpose()
            .map(Option::unwrap_or_default);

        match (title, url, description, category) {
            (Ok(title), Ok(url), Ok(description), Ok(category)) => Ok(Self {
                user_id: UserId::new(value.user_id),
                title,
                url,
                description,
                category,
                tags: value.tags.unwrap_or_default(),
            }),
            (title, url, description, category) => Err([
                title.err(),
                url.err(),
                description.err(),
                category.err(),
            ]
            .into_iter()
            .flatten()
            .collect::<FieldErrors>()
            .into_error()),
        }
    }
}

/// JSON body of `PUT /bookmarks/{id}`. Only present fields are applied.
///
/// Identity and timestamp fields are not part of the form; serde ignores them
/// if a client sends them.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookmarkForm {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub tags: Option<Option<Vec<String>>>,
}

impl TryFrom<UpdateBookmarkForm> for BookmarkChanges {
    type Error = BookmarkFormError;

    /// `null` clears `description` and `tags`; it is rejected for the
    /// required fields `title`, `url` and `category`.
    fn try_from(value: UpdateBookmarkForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let mut changes = BookmarkChanges::default();

        match value.title {
            Some(Some(title)) => changes.title = errors.check(BookmarkTitle::new(title)),
            Some(None) => errors.null("title"),
            None => {}
        }
        match value.url {
            Some(Some(url)) => changes.url = errors.check(BookmarkUrl::new(url)),
            Some(None) => errors.null("url"),
            None => {}
        }
        match value.category {
            Some(Some(category)) => {
                changes.category = errors.check(BookmarkCategory::try_from(category))
            }
            Some(None) => errors.null("category"),
            None => {}
        }
        if let Some(description) = value.description {
            changes.description =
                errors.check(description.map(BookmarkDescription::new).transpose());
        }
        if let Some(tags) = value.tags {
            changes.tags = Some(tags.unwrap_or_default());
        }

        errors.finish()?;
        Ok(changes)
    }
}

/// Query string of `GET /bookmarks`.
#[derive(Debug, Deserialize, Validate)]
pub struct ListBookmarksForm {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub category: Option<String>,
    /// Comma separated tag list.
    pub tags: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBookmarksPayload {
    pub user_id: UserId,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub page: usize,
    pub page_size: usize,
}

impl TryFrom<ListBookmarksForm> for ListBookmarksPayload {
    type Error = BookmarkFormError;

    fn try_from(value: ListBookmarksForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let tags = value
            .tags
            .as_deref()
            .map(parse_tags)
            .filter(|tags| !tags.is_empty());

        Ok(Self {
            user_id: UserId::new(value.user_id),
            category: value.category.filter(|category| !category.is_empty()),
            tags,
            page: value.page,
            page_size: value.page_size,
        })
    }
}

/// Query string carrying only the owner, shared by the single-bookmark routes.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}
