//! Pet listing document.
//!
//! `Model` is both the sea-orm row and the JSON document returned to clients.
//! The identifier is serialized as `_id` so clients written against a
//! document store keep working.

use chrono::{DateTime, FixedOffset};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "adopted")]
    Adopted,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub petname: String,
    pub pettype: String,
    pub petbreed: String,
    pub petage: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: PetStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type Pet = Model;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please provide all the required fields";

/// Length of the hyphenated form `_id` is written in.
const HYPHENATED_LEN: usize = 36;

/// Syntactic identifier check. Does not touch the store.
///
/// Only the hyphenated form is accepted; braced, `urn:uuid:` and simple
/// spellings of the same value are rejected.
pub fn parse_id(raw: &str) -> Result<Uuid, ModelError> {
    if raw.trim().is_empty() {
        return Err(ModelError::Validation("Please provide pet ID".into()));
    }
    let invalid = || ModelError::Validation("Invalid pet ID".into());
    if raw.len() != HYPHENATED_LEN {
        return Err(invalid());
    }
    Uuid::try_parse(raw).map_err(|_| invalid())
}

/// Text fields of a create/update form. `None` means the field was not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PetFields {
    pub petname: Option<String>,
    pub pettype: Option<String>,
    pub petbreed: Option<String>,
    pub petage: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// A pet ready to be inserted: every required field is present and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPet {
    pub petname: String,
    pub pettype: String,
    pub petbreed: String,
    pub petage: String,
    pub description: Option<String>,
    pub location: String,
    pub image: Option<String>,
}

/// Empty strings count as absent.
fn truthy(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn merge(slot: &mut String, incoming: Option<String>) {
    if let Some(v) = truthy(incoming) {
        *slot = v;
    }
}

fn merge_optional(slot: &mut Option<String>, incoming: Option<String>) {
    if let Some(v) = truthy(incoming) {
        *slot = Some(v);
    }
}

impl PetFields {
    /// Check the required fields and build an insert payload.
    pub fn into_new_pet(self, image: Option<String>) -> Result<NewPet, ModelError> {
        let missing = || ModelError::Validation(REQUIRED_FIELDS_MESSAGE.into());
        Ok(NewPet {
            petname: truthy(self.petname).ok_or_else(missing)?,
            pettype: truthy(self.pettype).ok_or_else(missing)?,
            petbreed: truthy(self.petbreed).ok_or_else(missing)?,
            petage: truthy(self.petage).ok_or_else(missing)?,
            description: truthy(self.description),
            location: truthy(self.location).ok_or_else(missing)?,
            image: truthy(image),
        })
    }

    /// Overwrite the stored values with every non-empty incoming value,
    /// the image path included. Everything else keeps its stored value.
    pub fn merge_into(self, pet: &mut Model, image: Option<String>) {
        merge(&mut pet.petname, self.petname);
        merge(&mut pet.pettype, self.pettype);
        merge(&mut pet.petbreed, self.petbreed);
        merge(&mut pet.petage, self.petage);
        merge_optional(&mut pet.image, image);
        merge_optional(&mut pet.description, self.description);
        merge(&mut pet.location, self.location);
    }
}

impl NewPet {
    /// Materialize the document with a fresh id; status always starts as available.
    pub fn into_model(self, id: Uuid, now: DateTime<FixedOffset>) -> Model {
        Model {
            id,
            petname: self.petname,
            pettype: self.pettype,
            petbreed: self.petbreed,
            petage: self.petage,
            description: self.description,
            location: self.location,
            image: self.image,
            status: PetStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Model {
    /// Case-insensitive substring match on name, type or breed.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.petname, &self.pettype, &self.petbreed]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fields(name: &str) -> PetFields {
        PetFields {
            petname: Some(name.into()),
            pettype: Some("Dog".into()),
            petbreed: Some("Labrador".into()),
            petage: Some("3".into()),
            description: None,
            location: Some("Berlin".into()),
        }
    }

    fn stored() -> Model {
        fields("Rex")
            .into_new_pet(Some("/public/pets/rex.png".into()))
            .unwrap()
            .into_model(Uuid::new_v4(), Utc::now().into())
    }

    #[test]
    fn parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_empty_and_malformed() {
        match parse_id("") {
            Err(ModelError::Validation(msg)) => assert_eq!(msg, "Please provide pet ID"),
            other => panic!("unexpected: {other:?}"),
        }
        match parse_id("not-an-id") {
            Err(ModelError::Validation(msg)) => assert_eq!(msg, "Invalid pet ID"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parse_id_rejects_other_uuid_spellings() {
        let id = Uuid::new_v4();
        for raw in [
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
        ] {
            assert!(matches!(parse_id(&raw), Err(ModelError::Validation(_))), "{raw}");
        }
        assert_eq!(parse_id(&id.hyphenated().to_string()).unwrap(), id);
    }

    #[test]
    fn new_pet_starts_available() {
        let pet = stored();
        assert_eq!(pet.status, PetStatus::Available);
        assert_eq!(pet.image.as_deref(), Some("/public/pets/rex.png"));
        assert_eq!(pet.created_at, pet.updated_at);
    }

    #[test]
    fn missing_or_empty_required_field_is_rejected() {
        let mut f = fields("Rex");
        f.location = None;
        assert!(matches!(f.into_new_pet(None), Err(ModelError::Validation(_))));

        let mut f = fields("Rex");
        f.petage = Some(String::new());
        assert!(matches!(f.into_new_pet(None), Err(ModelError::Validation(_))));
    }

    #[test]
    fn description_is_optional() {
        let pet = fields("Rex").into_new_pet(None).unwrap();
        assert_eq!(pet.description, None);
    }

    #[test]
    fn empty_value_keeps_stored_field() {
        let mut pet = stored();
        PetFields { petname: Some(String::new()), ..Default::default() }.merge_into(&mut pet, None);
        assert_eq!(pet.petname, "Rex");

        PetFields { petname: Some("Max".into()), ..Default::default() }.merge_into(&mut pet, None);
        assert_eq!(pet.petname, "Max");
    }

    #[test]
    fn merge_only_touches_sent_fields() {
        let mut pet = stored();
        let before = pet.clone();
        PetFields {
            description: Some("friendly".into()),
            location: Some("Hamburg".into()),
            ..Default::default()
        }
        .merge_into(&mut pet, Some("/public/pets/new.png".into()));

        assert_eq!(pet.description.as_deref(), Some("friendly"));
        assert_eq!(pet.location, "Hamburg");
        assert_eq!(pet.image.as_deref(), Some("/public/pets/new.png"));
        assert_eq!(pet.petname, before.petname);
        assert_eq!(pet.pettype, before.pettype);
        assert_eq!(pet.petbreed, before.petbreed);
        assert_eq!(pet.petage, before.petage);
        assert_eq!(pet.status, before.status);
    }

    #[test]
    fn absent_image_keeps_existing_path() {
        let mut pet = stored();
        PetFields::default().merge_into(&mut pet, None);
        assert_eq!(pet.image.as_deref(), Some("/public/pets/rex.png"));
    }

    #[test]
    fn matches_term_is_case_insensitive_across_three_fields() {
        let pet = stored();
        assert!(pet.matches_term("lab"));
        assert!(pet.matches_term("DOG"));
        assert!(pet.matches_term("re"));
        assert!(!pet.matches_term("berlin"));
    }

    #[test]
    fn serializes_id_as_underscore_id() {
        let pet = stored();
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["_id"], pet.id.to_string());
        assert_eq!(json["status"], "available");
        assert!(json.get("id").is_none());
    }
}
