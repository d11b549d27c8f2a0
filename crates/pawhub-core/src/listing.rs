//! Listing types for PawHub classifieds.
//!
//! A [`Listing`] is a single lost / found / adoption / marketplace posting.
//! Listings are created from a [`ListingDraft`] and changed through a
//! [`ListingPatch`]; both paths end in [`Listing::validate`], so every record
//! that reaches a store satisfies the same invariants.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ListingId;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Allowed length of a contact phone number, not counting a leading `+`.
const PHONE_CHARS: std::ops::RangeInclusive<usize> = 6..=20;

/// Minimum number of digits in a contact phone number.
const MIN_PHONE_DIGITS: usize = 6;

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// A pet that went missing.
    Lost,
    /// A pet that was found and is looking for its owner.
    Found,
    /// A pet looking for a new home.
    Adoption,
    /// A pet or pet product for sale.
    Marketplace,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [Self::Lost, Self::Found, Self::Adoption, Self::Marketplace];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lost => "LOST",
            Self::Found => "FOUND",
            Self::Adoption => "ADOPTION",
            Self::Marketplace => "MARKETPLACE",
        }
    }

    /// Whether listings in this category may carry a price.
    #[must_use]
    pub const fn is_priced(&self) -> bool {
        matches!(self, Self::Marketplace)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::new("category", format!("unknown category `{s}`")))
    }
}

/// Kind of animal a listing is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalType {
    /// Dogs.
    Dog,
    /// Cats.
    Cat,
    /// Birds.
    Bird,
    /// Anything else.
    Other,
}

impl AnimalType {
    /// All animal types, in display order.
    pub const ALL: [Self; 4] = [Self::Dog, Self::Cat, Self::Bird, Self::Other];

    /// Wire name of the animal type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "DOG",
            Self::Cat => "CAT",
            Self::Bird => "BIRD",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::new("animalType", format!("unknown animal type `{s}`"))
            })
    }
}

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    /// Visible and open.
    #[default]
    Active,
    /// The pet was found, adopted or sold.
    Resolved,
    /// Closed without resolution.
    Expired,
}

/// A classified-ad record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing ID, assigned at creation.
    pub id: ListingId,

    /// Listing category.
    pub category: Category,

    /// Kind of animal.
    pub animal_type: AnimalType,

    /// Short headline.
    pub title: String,

    /// Free-text body.
    pub description: String,

    /// Breed, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,

    /// Free-form tags (colour, size, "vaccinated", ...).
    #[serde(default)]
    pub tags: Vec<String>,

    /// City the listing is located in.
    pub location_city: String,

    /// District within the city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_district: Option<String>,

    /// Price in tugrik. Only marketplace listings carry a price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    /// Contact person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    /// Contact phone number.
    pub contact_phone: String,

    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    /// Photo URLs; at least one.
    pub photos: Vec<String>,

    /// Lifecycle status.
    #[serde(default)]
    pub status: ListingStatus,

    /// When the listing was created. Never changes.
    pub created_at: DateTime<Utc>,

    /// When the listing was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Build a new listing from a draft.
    ///
    /// The server-assigned fields (`id`, `status`, `created_at`) come from the
    /// caller; everything else comes from the draft.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn create(
        draft: ListingDraft,
        id: ListingId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let category = draft
            .category
            .ok_or_else(|| ValidationError::required("category"))?;
        let animal_type = draft
            .animal_type
            .ok_or_else(|| ValidationError::required("animalType"))?;

        let listing = Self {
            id,
            category,
            animal_type,
            title: required_text("title", draft.title)?,
            description: required_text("description", draft.description)?,
            breed: optional_text(draft.breed),
            tags: draft.tags,
            location_city: required_text("locationCity", draft.location_city)?,
            location_district: optional_text(draft.location_district),
            price: draft.price.map(non_negative_price).transpose()?,
            contact_name: optional_text(draft.contact_name),
            contact_phone: required_text("contactPhone", draft.contact_phone)?,
            contact_email: optional_text(draft.contact_email),
            photos: draft.photos,
            status: ListingStatus::Active,
            created_at: now,
            updated_at: now,
        };

        listing.validate()?;
        Ok(listing)
    }

    /// Return a copy of this listing with the patch applied.
    ///
    /// `self` is left untouched, so a rejected patch never leaves a
    /// half-updated record behind. When the category moves away from
    /// [`Category::Marketplace`] and the patch does not set a price, the old
    /// price is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the patched listing is invalid.
    pub fn apply(&self, patch: ListingPatch, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut next = self.clone();

        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(animal_type) = patch.animal_type {
            next.animal_type = animal_type;
        }
        if let Some(title) = patch.title {
            next.title = required_text("title", Some(title))?;
        }
        if let Some(description) = patch.description {
            next.description = required_text("description", Some(description))?;
        }
        if patch.breed.is_some() {
            next.breed = optional_text(patch.breed);
        }
        if let Some(tags) = patch.tags {
            next.tags = tags;
        }
        if let Some(city) = patch.location_city {
            next.location_city = required_text("locationCity", Some(city))?;
        }
        if patch.location_district.is_some() {
            next.location_district = optional_text(patch.location_district);
        }
        match patch.price {
            Some(price) => next.price = Some(non_negative_price(price)?),
            None if !next.category.is_priced() => next.price = None,
            None => {}
        }
        if patch.contact_name.is_some() {
            next.contact_name = optional_text(patch.contact_name);
        }
        if let Some(phone) = patch.contact_phone {
            next.contact_phone = required_text("contactPhone", Some(phone))?;
        }
        if patch.contact_email.is_some() {
            next.contact_email = optional_text(patch.contact_email);
        }
        if let Some(photos) = patch.photos {
            next.photos = photos;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        next.updated_at = now;

        next.validate()?;
        Ok(next)
    }

    /// Check every listing invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("locationCity", &self.location_city),
            ("contactPhone", &self.contact_phone),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field));
            }
        }

        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::new(
                "title",
                format!("must be at most {MAX_TITLE_CHARS} characters"),
            ));
        }

        if self.photos.is_empty() {
            return Err(ValidationError::new("photos", "at least one photo is required"));
        }
        if let Some(bad) = self.photos.iter().find(|p| !is_photo_url(p)) {
            return Err(ValidationError::new(
                "photos",
                format!("`{bad}` is not a valid photo URL"),
            ));
        }

        if !is_valid_phone(&self.contact_phone) {
            return Err(ValidationError::new(
                "contactPhone",
                "must be 6 to 20 digits, spaces or hyphens with at least 6 digits",
            ));
        }

        if let Some(email) = &self.contact_email {
            if !is_valid_email(email) {
                return Err(ValidationError::new("contactEmail", "must be a valid email address"));
            }
        }

        if self.price.is_some() && !self.category.is_priced() {
            return Err(ValidationError::new(
                "price",
                format!("{} listings cannot have a price", self.category),
            ));
        }

        if self.updated_at < self.created_at {
            return Err(ValidationError::new("updatedAt", "cannot precede createdAt"));
        }

        Ok(())
    }

    /// Price used for sorting; a missing price counts as zero.
    #[must_use]
    pub fn sort_price(&self) -> u64 {
        self.price.unwrap_or(0)
    }
}

/// Request body for creating a listing.
///
/// Every field is optional at the type level so that a missing required field
/// is reported as a field-level [`ValidationError`] rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    /// Listing category (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Kind of animal (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_type: Option<AnimalType>,
    /// Headline (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Breed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// City (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    /// District.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_district: Option<String>,
    /// Price; only for marketplace listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// Contact person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    /// Contact phone (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Photo URLs (at least one required).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

/// Request body for updating a listing. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// New animal type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_type: Option<AnimalType>,
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New breed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Replacement tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    /// New district.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_district: Option<String>,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// New contact person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    /// New contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// New contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Replacement photo list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ValidationError::required(field))
}

/// Blank optional text means "absent".
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_negative_price(price: i64) -> Result<u64, ValidationError> {
    u64::try_from(price).map_err(|_| ValidationError::new("price", "must not be negative"))
}

fn is_photo_url(url: &str) -> bool {
    !url.chars().any(char::is_whitespace)
        && (url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/'))
        && url.len() > 1
}

fn is_valid_phone(phone: &str) -> bool {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    PHONE_CHARS.contains(&body.len())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && body.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
