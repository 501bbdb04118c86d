//! Domain types.

mod profile;
mod site;
mod view;

pub use profile::{validate_profile_name, validate_site_name, Profile};
pub use site::{validate_field_name, Site};
pub use view::{FieldView, MatchResult, Retrieval, SiteView};
