use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{
    FieldErrors, FlagValue, NAME_MAX_LEN, NAME_MAX_LEN_VALIDATOR, nullable, required_name,
    resolve_flag, sanitize_inline_text, sanitize_multiline_text, slugify, too_long_message,
};

/// Form payload accepted when creating a category. A missing or blank `slug`
/// is derived from the name.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCategoryForm {
    /// Name entered by the user.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    /// Optional URL slug.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub slug: Option<String>,
    /// Optional description for the category.
    pub description: Option<String>,
    pub is_active: Option<FlagValue>,
}

impl CreateCategoryForm {
    pub fn normalized_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
    }

    /// Slug the category would be stored with.
    pub fn resolved_slug(&self) -> Option<String> {
        explicit_slug(self.slug.as_deref())
            .or_else(|| self.normalized_name().map(|name| slugify(&name)))
            .filter(|slug| !slug.is_empty())
    }

    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> Result<NewCategory, FieldErrors> {
        let mut errors = self.validate().err().map(FieldErrors::from).unwrap_or_default();

        let name = if errors.contains("name") {
            None
        } else {
            required_name(self.name.as_deref(), "name", &mut errors)
        };

        let slug = if errors.contains("slug") {
            None
        } else {
            let slug = self.resolved_slug();
            check_slug(slug.as_deref(), name.is_some(), &mut errors);
            slug
        };

        let is_active = resolve_flag(self.is_active.as_ref(), "is_active", &mut errors);

        let (Some(name), Some(slug)) = (name, slug) else {
            return Err(errors);
        };
        errors.into_result()?;

        let mut new_category = NewCategory::new(name, slug).active(is_active.unwrap_or(true));
        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_category = new_category.with_description(description);
        }

        Ok(new_category)
    }
}

/// Form payload accepted when updating a category.
///
/// A `slug` sent as `null` or blank is re-derived from the new name, or from
/// the current one when the name is not changing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub is_active: Option<FlagValue>,
}

impl UpdateCategoryForm {
    pub fn normalized_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
    }

    /// Slug that the update would store, if it changes the slug at all.
    pub fn resolved_slug(&self, current_name: &str) -> Option<String> {
        let requested = self.slug.as_ref()?;
        explicit_slug(requested.as_deref()).or_else(|| {
            let name = self
                .normalized_name()
                .unwrap_or_else(|| current_name.to_string());
            Some(slugify(&name)).filter(|slug| !slug.is_empty())
        })
    }

    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self, current_name: &str) -> Result<UpdateCategory, FieldErrors> {
        let mut errors = self.validate().err().map(FieldErrors::from).unwrap_or_default();
        let mut update = UpdateCategory::new();

        let mut name_ok = true;
        if let Some(raw) = self.name.as_deref() {
            name_ok = false;
            if !errors.contains("name")
                && let Some(name) = required_name(Some(raw), "name", &mut errors)
            {
                update = update.name(name);
                name_ok = true;
            }
        }

        if self.slug.is_some() {
            let slug = self.resolved_slug(current_name);
            check_slug(slug.as_deref(), name_ok, &mut errors);
            if let Some(slug) = slug {
                update = update.slug(slug);
            }
        }

        if let Some(description) = self.description {
            update = update.description(
                description
                    .as_deref()
                    .map(sanitize_multiline_text)
                    .filter(|value| !value.is_empty()),
            );
        }

        if let Some(is_active) = resolve_flag(self.is_active.as_ref(), "is_active", &mut errors) {
            update = update.active(is_active);
        }

        errors.into_result()?;
        Ok(update)
    }
}

fn explicit_slug(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Record a slug error unless the name already failed and the slug was meant
/// to be derived from it.
fn check_slug(slug: Option<&str>, name_ok: bool, errors: &mut FieldErrors) {
    match slug {
        Some(slug) if slug.chars().count() > NAME_MAX_LEN => {
            errors.add("slug", too_long_message("slug", NAME_MAX_LEN));
        }
        Some(_) => {}
        None if name_ok => errors.add("slug", "The slug could not be derived from the name."),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_form_derives_slug_from_name() {
        let bracelets: CreateCategoryForm =
            serde_json::from_str(r#"{"name": "Bracelets"}"#).expect("valid json");
        let stones: CreateCategoryForm =
            serde_json::from_str(r#"{"name": "Loose Stones", "slug": ""}"#).expect("valid json");

        assert_eq!(
            bracelets.into_new_category().expect("valid form").slug,
            "bracelets"
        );
        assert_eq!(
            stones.into_new_category().expect("valid form").slug,
            "loose-stones"
        );
    }

    #[test]
    fn create_form_keeps_explicit_slug() {
        let form: CreateCategoryForm =
            serde_json::from_str(r#"{"name": "Rings", "slug": " bridal-rings ", "is_active": "0"}"#)
                .expect("valid json");

        let new_category = form.into_new_category().expect("valid form");

        assert_eq!(new_category.slug, "bridal-rings");
        assert!(!new_category.is_active);
    }

    #[test]
    fn create_form_without_name_reports_name_only() {
        let form = CreateCategoryForm::default();

        let errors = form.into_new_category().expect_err("should fail");

        assert!(errors.contains("name"));
        assert!(!errors.contains("slug"));
    }

    #[test]
    fn create_form_rejects_underivable_slug() {
        let form: CreateCategoryForm =
            serde_json::from_str(r#"{"name": "***"}"#).expect("valid json");

        let errors = form.into_new_category().expect_err("should fail");

        assert!(errors.contains("slug"));
    }

    #[test]
    fn update_form_rederives_cleared_slug_from_new_name() {
        let form: UpdateCategoryForm =
            serde_json::from_str(r#"{"name": "Wedding Bands", "slug": null}"#)
                .expect("valid json");

        let update = form.into_update_category("Rings").expect("valid form");

        assert_eq!(update.name.as_deref(), Some("Wedding Bands"));
        assert_eq!(update.slug.as_deref(), Some("wedding-bands"));
    }

    #[test]
    fn update_form_rederives_cleared_slug_from_current_name() {
        let form: UpdateCategoryForm =
            serde_json::from_str(r#"{"slug": ""}"#).expect("valid json");

        let update = form.into_update_category("Loose Stones").expect("valid form");

        assert_eq!(update.slug.as_deref(), Some("loose-stones"));
    }

    #[test]
    fn update_form_without_slug_keeps_it() {
        let form: UpdateCategoryForm =
            serde_json::from_str(r#"{"name": "Anklets"}"#).expect("valid json");

        let update = form.into_update_category("Bracelets").expect("valid form");

        assert_eq!(update.slug, None);
    }
}
