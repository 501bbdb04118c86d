//! Site registry.
//!
//! In-memory operations on a decrypted profile. Every operation reports its
//! progress through [`Hooks`], validates its input before touching the
//! profile, and either applies all of its changes or none of them.
//! Persisting the result is the caller's job (see `Session::commit`).

mod request;
mod search;

pub use request::{AddSite, FieldQuery, ListQuery, PatternMode, SiteUpdate};

use tracing::debug;
use zeroize::Zeroizing;

use self::search::Matcher;
use crate::core::constants::PASSWORD_FIELD;
use crate::core::domain::{
    validate_field_name, validate_site_name, FieldView, MatchResult, Profile, Retrieval, Site,
    SiteView,
};
use crate::core::hooks::{fail, Hooks, Step};
use crate::error::{Result, SiteError};

/// Site operations over an owned profile.
#[derive(Debug, Clone)]
pub struct Registry {
    profile: Profile,
}

impl Registry {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// The underlying profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }

    /// Look up a site.
    pub fn site(&self, name: &str) -> Option<&Site> {
        self.profile.site(name)
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.profile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
    }

    /// Add a new site.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Exists` if the name is taken and a
    /// `ValidationError` for an empty site name or an invalid field name.
    pub fn add(&mut self, request: AddSite, hooks: &mut dyn Hooks) -> Result<()> {
        hooks.on_step(Step::SiteAdding);

        validate_site_name(&request.name).map_err(|e| fail(hooks, Step::SiteAdding, e))?;
        if self.profile.contains(&request.name) {
            return Err(fail(hooks, Step::SiteExists, SiteError::Exists(request.name)));
        }

        let mut site = Site::new();
        if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
            site.set_field(PASSWORD_FIELD, password)
                .map_err(|e| fail(hooks, Step::InvalidField, e))?;
        }
        for (name, value) in &request.fields {
            site.set_field(name, value)
                .map_err(|e| fail(hooks, Step::InvalidField, e))?;
        }
        site.merge_tags(&request.tags);

        debug!(site = %request.name, fields = site.field_count(), tags = site.tags().len(), "site added");
        self.profile.insert(request.name, site);
        hooks.on_step(Step::Done);
        Ok(())
    }

    /// Remove a site after confirmation.
    ///
    /// Returns `Ok(false)` without changing anything if the hooks decline
    /// the confirmation.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NotFound` if the site does not exist.
    pub fn remove(&mut self, name: &str, hooks: &mut dyn Hooks) -> Result<bool> {
        if !self.profile.contains(name) {
            return Err(fail(hooks, Step::SiteMissing, SiteError::NotFound(name.to_string())));
        }

        hooks.on_step(Step::SiteConfirmRemove);
        if !hooks.confirm(Step::SiteConfirmRemove) {
            debug!(site = name, "removal declined");
            return Ok(false);
        }

        hooks.on_step(Step::SiteRemoving);
        self.profile.remove(name);
        debug!(site = name, "site removed");
        hooks.on_step(Step::Done);
        Ok(true)
    }

    /// Rename a site, keeping its fields and tags.
    ///
    /// Renaming a site to its current name succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NotFound` if `name` does not exist and
    /// `SiteError::Exists` if `new_name` is already taken.
    pub fn rename(&mut self, name: &str, new_name: &str, hooks: &mut dyn Hooks) -> Result<()> {
        hooks.on_step(Step::SiteRenaming);

        validate_site_name(new_name).map_err(|e| fail(hooks, Step::SiteRenaming, e))?;
        if !self.profile.contains(name) {
            return Err(fail(hooks, Step::SiteMissing, SiteError::NotFound(name.to_string())));
        }
        if name != new_name {
            if self.profile.contains(new_name) {
                return Err(fail(
                    hooks,
                    Step::SiteExists,
                    SiteError::Exists(new_name.to_string()),
                ));
            }
            if let Some(site) = self.profile.remove(name) {
                self.profile.insert(new_name.to_string(), site);
            }
            debug!(from = name, to = new_name, "site renamed");
        }

        hooks.on_step(Step::Done);
        Ok(())
    }

    /// Update an existing site's fields and tags.
    ///
    /// Applying the same update twice leaves the site as after the first.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NotFound` if the site does not exist and a
    /// `ValidationError` if a field name to set is empty or reserved.
    pub fn set(&mut self, name: &str, update: SiteUpdate, hooks: &mut dyn Hooks) -> Result<()> {
        hooks.on_step(Step::SiteUpdating);

        for (field, _) in &update.set_fields {
            validate_field_name(field).map_err(|e| fail(hooks, Step::InvalidField, e))?;
        }
        let Some(site) = self.profile.site_mut(name) else {
            return Err(fail(hooks, Step::SiteMissing, SiteError::NotFound(name.to_string())));
        };

        for field in &update.delete_fields {
            site.remove_field(field);
        }
        // Field names were validated above, so these cannot fail.
        if let Some(password) = update.password.as_deref().filter(|p| !p.is_empty()) {
            site.set_field(PASSWORD_FIELD, password)?;
        }
        for (field, value) in &update.set_fields {
            site.set_field(field, value)?;
        }
        site.remove_tags(&update.delete_tags);
        site.merge_tags(&update.add_tags);

        debug!(site = name, "site updated");
        hooks.on_step(Step::Done);
        Ok(())
    }

    /// List sites whose names match the query, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PatternCompile` if the pattern has to be used as a
    /// regex and does not compile.
    pub fn list(&self, query: &ListQuery, hooks: &mut dyn Hooks) -> Result<Vec<MatchResult>> {
        hooks.on_step(Step::ListingSites);

        let mut matcher =
            Matcher::new(&query.pattern, query.mode).map_err(|e| fail(hooks, Step::PatternCompile, e))?;

        let mut results = Vec::new();
        for (name, site) in self.profile.sites() {
            if !query.tags.is_empty() && site.matching_tags(&query.tags).is_empty() {
                continue;
            }
            let found = matcher
                .find(name)
                .map_err(|e| fail(hooks, Step::PatternCompile, e))?;
            if let Some((start, end)) = found {
                results.push(MatchResult::new(name, start, end, site.tags()));
            }
        }

        debug!(pattern = %query.pattern, matches = results.len(), "sites listed");
        hooks.on_step(Step::Done);
        Ok(results)
    }

    /// Retrieve fields of a site.
    ///
    /// Without `copy`, returns a view of the requested fields (all fields if
    /// none are named). With `copy`, returns the first requested field, or
    /// the password, for the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NotFound` if the site does not exist and
    /// `SiteError::FieldNotFound` for the first requested field the site
    /// lacks. Nothing is returned in that case.
    pub fn get(&self, name: &str, query: &FieldQuery, hooks: &mut dyn Hooks) -> Result<Retrieval> {
        let Some(site) = self.profile.site(name) else {
            return Err(fail(hooks, Step::SiteMissing, SiteError::NotFound(name.to_string())));
        };

        if query.copy {
            let (field, step) = match query.fields.first() {
                Some(field) => (field.as_str(), Step::SettingClipboard),
                None => (PASSWORD_FIELD, Step::SettingClipboardPassword),
            };
            hooks.on_step(step);
            let value = site
                .field(field)
                .ok_or_else(|| missing_field(hooks, name, field))?;
            hooks.on_step(Step::Done);
            return Ok(Retrieval::Clipboard {
                field: field.to_string(),
                value: Zeroizing::new(value.to_string()),
            });
        }

        hooks.on_step(Step::ListingFields);
        let fields = if query.fields.is_empty() {
            site.fields().map(|(k, v)| field_view(k, v)).collect()
        } else {
            let mut fields = Vec::with_capacity(query.fields.len());
            for field in &query.fields {
                let value = site
                    .field(field)
                    .ok_or_else(|| missing_field(hooks, name, field))?;
                fields.push(field_view(field, value));
            }
            fields
        };

        hooks.on_step(Step::Done);
        Ok(Retrieval::Fields(SiteView {
            site: name.to_string(),
            fields,
            tags: query.tags.then(|| site.tags().to_vec()),
        }))
    }
}

fn field_view(name: &str, value: &str) -> FieldView {
    FieldView {
        name: name.to_string(),
        value: value.to_string(),
        sensitive: name == PASSWORD_FIELD,
    }
}

fn missing_field(hooks: &mut dyn Hooks, site: &str, field: &str) -> crate::error::Error {
    fail(
        hooks,
        Step::InvalidField,
        SiteError::FieldNotFound {
            site: site.to_string(),
            field: field.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hooks::testing::Recorder;
    use crate::error::{Error, ValidationError};

    fn registry() -> Registry {
        let mut reg = Registry::new(Profile::new("test"));
        let mut hooks = ();
        for name in ["site1.com", "site2.com", "other.net"] {
            reg.add(
                AddSite::new(name).password("pw-".to_string() + name).field("user", "alice"),
                &mut hooks,
            )
            .unwrap();
        }
        reg
    }

    fn fields(retrieval: Retrieval) -> SiteView {
        match retrieval {
            Retrieval::Fields(view) => view,
            Retrieval::Clipboard { .. } => panic!("expected fields"),
        }
    }

    #[test]
    fn test_add_twice_is_exists() {
        let mut reg = registry();
        let mut rec = Recorder::default();
        let result = reg.add(AddSite::new("site1.com"), &mut rec);

        assert!(matches!(result, Err(Error::Site(SiteError::Exists(_)))));
        assert_eq!(reg.len(), 3);
        assert_eq!(rec.steps, vec![Step::SiteAdding]);
        assert_eq!(rec.errors[0].0, Step::SiteExists);
    }

    #[test]
    fn test_add_builds_site() {
        let mut reg = Registry::new(Profile::new("p"));
        let mut rec = Recorder::default();
        reg.add(
            AddSite::new("a.com")
                .password("secret")
                .field("user", "bob")
                .field("user", "carol")
                .tag("x")
                .tag("y")
                .tag("x"),
            &mut rec,
        )
        .unwrap();

        let site = reg.site("a.com").unwrap();
        assert_eq!(site.password(), Some("secret"));
        assert_eq!(site.field("user"), Some("carol"));
        assert_eq!(site.tags(), &["x", "y"]);
        assert_eq!(rec.steps, vec![Step::SiteAdding, Step::Done]);
    }

    #[test]
    fn test_add_empty_password_is_not_stored() {
        let mut reg = Registry::new(Profile::new("p"));
        reg.add(AddSite::new("a.com").password(""), &mut ()).unwrap();
        assert_eq!(reg.site("a.com").unwrap().password(), None);
    }

    #[test]
    fn test_add_rejects_reserved_field_without_mutation() {
        let mut reg = Registry::new(Profile::new("p"));
        let result = reg.add(AddSite::new("a.com").field("$$_TAGS", "[]"), &mut ());
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::ReservedField(_)))
        ));
        assert!(reg.is_empty());

        assert!(reg.add(AddSite::new(""), &mut ()).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut reg = registry();

        let mut declining = Recorder::default();
        assert!(!reg.remove("site1.com", &mut declining).unwrap());
        assert_eq!(reg.len(), 3);
        assert_eq!(declining.asked, vec![Step::SiteConfirmRemove]);

        let mut confirming = Recorder::confirming();
        assert!(reg.remove("site1.com", &mut confirming).unwrap());
        assert!(reg.site("site1.com").is_none());
        assert_eq!(
            confirming.steps,
            vec![Step::SiteConfirmRemove, Step::SiteRemoving, Step::Done]
        );
    }

    #[test]
    fn test_remove_missing() {
        let mut reg = registry();
        let mut rec = Recorder::confirming();
        assert!(matches!(
            reg.remove("nope", &mut rec),
            Err(Error::Site(SiteError::NotFound(_)))
        ));
        assert!(rec.asked.is_empty());
        assert_eq!(rec.errors[0].0, Step::SiteMissing);
    }

    #[test]
    fn test_rename_moves_fields() {
        let mut reg = registry();
        reg.set(
            "site1.com",
            SiteUpdate {
                add_tags: vec!["t".into()],
                ..Default::default()
            },
            &mut (),
        )
        .unwrap();
        let before = reg.site("site1.com").unwrap().clone();

        reg.rename("site1.com", "new.com", &mut ()).unwrap();

        assert!(matches!(
            reg.get("site1.com", &FieldQuery::default(), &mut ()),
            Err(Error::Site(SiteError::NotFound(_)))
        ));
        assert_eq!(reg.site("new.com"), Some(&before));
    }

    #[test]
    fn test_rename_conflicts() {
        let mut reg = registry();
        assert!(matches!(
            reg.rename("site1.com", "site2.com", &mut ()),
            Err(Error::Site(SiteError::Exists(_)))
        ));
        assert!(matches!(
            reg.rename("missing", "x", &mut ()),
            Err(Error::Site(SiteError::NotFound(_)))
        ));
        assert!(reg.rename("site1.com", "site1.com", &mut ()).is_ok());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_rename_is_case_sensitive() {
        let mut reg = registry();
        reg.rename("site1.com", "Site1.com", &mut ()).unwrap();
        assert!(reg.site("Site1.com").is_some());
        assert!(reg.site("site1.com").is_none());
    }

    #[test]
    fn test_set_order_and_idempotence() {
        let mut reg = registry();
        reg.set(
            "site1.com",
            SiteUpdate {
                add_tags: vec!["a".into(), "b".into()],
                ..Default::default()
            },
            &mut (),
        )
        .unwrap();

        let update = SiteUpdate {
            password: Some("new".into()),
            set_fields: vec![("url".into(), "https://site1.com".into())],
            delete_fields: vec!["user".into(), "url".into()],
            add_tags: vec!["b".into(), "c".into()],
            delete_tags: vec!["c".into()],
        };
        reg.set("site1.com", update.clone(), &mut ()).unwrap();
        let once = reg.site("site1.com").unwrap().clone();
        reg.set("site1.com", update, &mut ()).unwrap();
        let twice = reg.site("site1.com").unwrap();

        assert_eq!(&once, twice);
        assert_eq!(twice.password(), Some("new"));
        assert_eq!(twice.field("user"), None);
        // Deletes run before sets.
        assert_eq!(twice.field("url"), Some("https://site1.com"));
        // Tags are removed before new ones are merged.
        assert_eq!(twice.tags(), &["b", "c", "a"]);
    }

    #[test]
    fn test_set_invalid_field_leaves_site_untouched() {
        let mut reg = registry();
        let before = reg.site("site1.com").unwrap().clone();
        let mut rec = Recorder::default();
        let result = reg.set(
            "site1.com",
            SiteUpdate {
                delete_fields: vec!["user".into()],
                set_fields: vec![("".into(), "x".into())],
                ..Default::default()
            },
            &mut rec,
        );
        assert!(result.is_err());
        assert_eq!(reg.site("site1.com"), Some(&before));
        assert_eq!(rec.errors[0].0, Step::InvalidField);
    }

    #[test]
    fn test_set_missing_site() {
        let mut reg = registry();
        assert!(matches!(
            reg.set("nope", SiteUpdate::default(), &mut ()),
            Err(Error::Site(SiteError::NotFound(_)))
        ));
    }

    #[test]
    fn test_list_exact_name() {
        let reg = registry();
        let results = reg.list(&ListQuery::pattern("site1.com"), &mut ()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "site1.com");
        assert_eq!(results[0].prefix, "");
        assert_eq!(results[0].matched, "site1.com");
        assert_eq!(results[0].suffix, "");
    }

    #[test]
    fn test_list_substring() {
        let reg = registry();
        let results = reg.list(&ListQuery::pattern("site"), &mut ()).unwrap();
        let names: Vec<_> = results.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["site1.com", "site2.com"]);
        assert!(results.iter().all(|m| m.matched == "site" && m.suffix.ends_with(".com")));
    }

    #[test]
    fn test_list_empty_pattern_lists_all_sorted() {
        let reg = registry();
        let results = reg.list(&ListQuery::default(), &mut ()).unwrap();
        let names: Vec<_> = results.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["other.net", "site1.com", "site2.com"]);
        assert!(results.iter().all(MatchResult::is_whole));
    }

    #[test]
    fn test_list_regex_fallback() {
        let reg = registry();
        let results = reg.list(&ListQuery::pattern(r"\.(net|org)$"), &mut ()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched, ".net");
        assert_eq!(results[0].prefix, "other");
    }

    #[test]
    fn test_list_bad_regex_reports_pattern_compile() {
        let reg = registry();
        let mut rec = Recorder::default();
        let result = reg.list(&ListQuery::pattern("(unclosed"), &mut rec);
        assert!(matches!(result, Err(Error::Site(SiteError::PatternCompile(_)))));
        assert_eq!(rec.errors[0].0, Step::PatternCompile);
    }

    #[test]
    fn test_list_literal_mode() {
        let reg = registry();
        let query = ListQuery {
            pattern: "(unclosed".into(),
            mode: PatternMode::Literal,
            ..Default::default()
        };
        assert!(reg.list(&query, &mut ()).unwrap().is_empty());
    }

    #[test]
    fn test_list_tag_filter() {
        let mut reg = registry();
        reg.set(
            "site2.com",
            SiteUpdate {
                add_tags: vec!["work".into()],
                ..Default::default()
            },
            &mut (),
        )
        .unwrap();
        let query = ListQuery {
            tags: vec!["work".into(), "home".into()],
            ..Default::default()
        };
        let results = reg.list(&query, &mut ()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "site2.com");
        assert_eq!(results[0].tags, vec!["work".to_string()]);
    }

    #[test]
    fn test_get_all_fields() {
        let reg = registry();
        let view = fields(reg.get("site1.com", &FieldQuery::default(), &mut ()).unwrap());
        assert_eq!(view.fields.len(), 2);
        assert!(view.field("password").unwrap().sensitive);
        assert!(!view.field("user").unwrap().sensitive);
        assert_eq!(view.field("password").unwrap().value, "pw-site1.com");
        assert!(view.tags.is_none());
    }

    #[test]
    fn test_get_selected_fields_in_order() {
        let reg = registry();
        let query = FieldQuery {
            fields: vec!["user".into(), "password".into()],
            tags: true,
            ..Default::default()
        };
        let view = fields(reg.get("site1.com", &query, &mut ()).unwrap());
        let names: Vec<_> = view.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["user", "password"]);
        assert_eq!(view.tags, Some(vec![]));
    }

    #[test]
    fn test_get_missing_field_is_all_or_nothing() {
        let reg = registry();
        let mut rec = Recorder::default();
        let query = FieldQuery {
            fields: vec!["user".into(), "pin".into()],
            ..Default::default()
        };
        let result = reg.get("site1.com", &query, &mut rec);
        assert!(matches!(
            result,
            Err(Error::Site(SiteError::FieldNotFound { ref field, .. })) if field == "pin"
        ));
        assert_eq!(rec.errors[0].0, Step::InvalidField);
    }

    #[test]
    fn test_get_copy_defaults_to_password() {
        let reg = registry();
        let mut rec = Recorder::default();
        let query = FieldQuery {
            copy: true,
            ..Default::default()
        };
        match reg.get("site2.com", &query, &mut rec).unwrap() {
            Retrieval::Clipboard { field, value } => {
                assert_eq!(field, "password");
                assert_eq!(value.as_str(), "pw-site2.com");
            }
            Retrieval::Fields(_) => panic!("expected clipboard"),
        }
        assert_eq!(rec.steps, vec![Step::SettingClipboardPassword, Step::Done]);
    }

    #[test]
    fn test_get_copy_named_field() {
        let reg = registry();
        let mut rec = Recorder::default();
        let query = FieldQuery {
            fields: vec!["user".into(), "password".into()],
            copy: true,
            ..Default::default()
        };
        match reg.get("site2.com", &query, &mut rec).unwrap() {
            Retrieval::Clipboard { field, value } => {
                assert_eq!(field, "user");
                assert_eq!(value.as_str(), "alice");
            }
            Retrieval::Fields(_) => panic!("expected clipboard"),
        }
        assert_eq!(rec.steps[0], Step::SettingClipboard);
    }

    #[test]
    fn test_get_copy_missing_password() {
        let mut reg = Registry::new(Profile::new("p"));
        reg.add(AddSite::new("nopw"), &mut ()).unwrap();
        let query = FieldQuery {
            copy: true,
            ..Default::default()
        };
        assert!(matches!(
            reg.get("nopw", &query, &mut ()),
            Err(Error::Site(SiteError::FieldNotFound { .. }))
        ));
    }
}
